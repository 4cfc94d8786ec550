//! Shared test harness for topo-cli integration tests.
//!
//! Repositories are created with the real `git` binary under pinned
//! identities and dates, then `topo-order-commits` is run against them.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::Command;

// ──────────────────────────── Types ────────────────────────────

/// Captured output from running a command.
pub struct CommandResult {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

/// A line of `topo-order-commits` output, classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutLine {
    Commit { hash: String, labels: Vec<String> },
    StickyEnd(Vec<String>),
    Blank,
    StickyStart(Vec<String>),
}

// ──────────────────────────── Process Runners ────────────────────────────

/// Path to the compiled binary under test.
pub fn topo_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_topo-order-commits"))
}

fn pin_env(cmd: &mut Command, dir: &Path) {
    cmd.env("GIT_AUTHOR_NAME", "Test Author")
        .env("GIT_AUTHOR_EMAIL", "test@example.com")
        .env("GIT_AUTHOR_DATE", "1234567890 +0000")
        .env("GIT_COMMITTER_NAME", "Test Committer")
        .env("GIT_COMMITTER_EMAIL", "test@example.com")
        .env("GIT_COMMITTER_DATE", "1234567890 +0000")
        .env("TZ", "UTC")
        .env("LC_ALL", "C")
        .env("LANG", "C")
        .env("GIT_CONFIG_NOSYSTEM", "1")
        .env("HOME", dir.parent().unwrap_or(dir))
        .env_remove("RUST_LOG");
}

fn capture(mut cmd: Command, what: &str) -> CommandResult {
    let output = cmd.output().unwrap_or_else(|e| panic!("failed to run {what}: {e}"));
    CommandResult {
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        exit_code: output.status.code().unwrap_or(128),
    }
}

/// Run C git in `dir`; panics if it fails.
pub fn git(dir: &Path, args: &[&str]) -> String {
    let mut cmd = Command::new("git");
    cmd.args(args).current_dir(dir);
    pin_env(&mut cmd, dir);
    let result = capture(cmd, "git");
    assert_eq!(
        result.exit_code, 0,
        "git {:?} failed: {}",
        args, result.stderr
    );
    result.stdout.trim().to_string()
}

/// Run `topo-order-commits` in `dir`.
pub fn topo(dir: &Path, args: &[&str]) -> CommandResult {
    let mut cmd = Command::new(topo_bin());
    cmd.args(args).current_dir(dir);
    pin_env(&mut cmd, dir);
    capture(cmd, "topo-order-commits")
}

// ──────────────────────────── Repo Setup ────────────────────────────

/// `git init` on branch `main` with a local identity.
pub fn init_repo(dir: &Path) {
    git(dir, &["init", "-q", "-b", "main"]);
    git(dir, &["config", "user.name", "Test Author"]);
    git(dir, &["config", "user.email", "test@example.com"]);
}

/// Write `file`, commit it with `message`, and return the new hash.
pub fn commit_file(dir: &Path, file: &str, message: &str) -> String {
    std::fs::write(dir.join(file), format!("{message}\n")).unwrap();
    git(dir, &["add", file]);
    git(dir, &["commit", "-q", "-m", message]);
    git(dir, &["rev-parse", "HEAD"])
}

// ──────────────────────────── Output Parsing ────────────────────────────

/// Classify each output line.
///
/// A lone `=` is ambiguous on its own: it opens a chain when it follows the
/// blank separator and closes one otherwise.
pub fn parse_output(stdout: &str) -> Vec<OutLine> {
    let words = |s: &str| -> Vec<String> { s.split_whitespace().map(String::from).collect() };
    let mut parsed: Vec<OutLine> = Vec::new();
    for line in stdout.lines() {
        let after_blank = matches!(parsed.last(), Some(OutLine::Blank));
        let next = if line.is_empty() {
            OutLine::Blank
        } else if let (true, Some(rest)) = (after_blank, line.strip_prefix('=')) {
            OutLine::StickyStart(words(rest))
        } else if let Some(rest) = line.strip_suffix('=') {
            OutLine::StickyEnd(words(rest))
        } else {
            let mut parts = words(line);
            let hash = parts.remove(0);
            OutLine::Commit { hash, labels: parts }
        };
        parsed.push(next);
    }
    parsed
}

/// The commit hashes of the output, in order.
pub fn commit_order(lines: &[OutLine]) -> Vec<String> {
    lines
        .iter()
        .filter_map(|l| match l {
            OutLine::Commit { hash, .. } => Some(hash.clone()),
            _ => None,
        })
        .collect()
}

/// Labels printed next to `hash`.
pub fn labels_of(lines: &[OutLine], hash: &str) -> Vec<String> {
    lines
        .iter()
        .find_map(|l| match l {
            OutLine::Commit { hash: h, labels } if h == hash => Some(labels.clone()),
            _ => None,
        })
        .unwrap_or_else(|| panic!("{hash} not in output"))
}

/// Position of `hash` in the commit order.
pub fn position(order: &[String], hash: &str) -> usize {
    order
        .iter()
        .position(|h| h == hash)
        .unwrap_or_else(|| panic!("{hash} not in order"))
}
