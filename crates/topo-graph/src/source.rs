//! Collaborators that supply branches and parent links.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use bstr::ByteSlice;
use topo_hash::CommitId;
use topo_refs::{Branches, Repository};
use topo_utils::subprocess::GitCommand;

use crate::GraphError;

/// Answers "what are the direct parents of this commit?".
pub trait CommitSource {
    /// Parents of `id`, or `None` if no such commit exists.
    fn parents(&self, id: &CommitId) -> Result<Option<Vec<CommitId>>, GraphError>;
}

/// A whole repository: its root, its branches and its parent links.
pub trait HistorySource: CommitSource {
    /// The repository's working-tree root.
    fn resolve_root(&self) -> Result<PathBuf, GraphError>;

    /// Every local branch and its head.
    fn read_branches(&self) -> Result<Branches, GraphError>;
}

/// A repository on disk, inspected with `git cat-file -p`.
#[derive(Debug, Clone)]
pub struct GitRepository {
    repo: Repository,
    program: OsString,
}

impl GitRepository {
    /// Discover the repository containing `start`.
    pub fn discover(start: &Path) -> Result<Self, GraphError> {
        let repo = topo_refs::discover(start)?;
        Ok(Self {
            repo,
            program: OsString::from("git"),
        })
    }

    /// Use `program` instead of `git` for commit inspection.
    pub fn with_program(mut self, program: impl AsRef<OsStr>) -> Self {
        self.program = program.as_ref().to_os_string();
        self
    }

    pub fn repository(&self) -> &Repository {
        &self.repo
    }
}

impl CommitSource for GitRepository {
    fn parents(&self, id: &CommitId) -> Result<Option<Vec<CommitId>>, GraphError> {
        let output = GitCommand::new(&self.program)
            .args(["cat-file", "-p", id.as_str()])
            .working_dir(self.repo.work_tree())
            .run()?;

        if !output.success() {
            tracing::debug!(
                commit = %id,
                stderr = %output.stderr.trim().to_str_lossy(),
                "commit inspection failed"
            );
            return Ok(None);
        }
        parse_parents(id, &output.stdout).map(Some)
    }
}

impl HistorySource for GitRepository {
    fn resolve_root(&self) -> Result<PathBuf, GraphError> {
        Ok(self.repo.work_tree().to_path_buf())
    }

    fn read_branches(&self) -> Result<Branches, GraphError> {
        Ok(self.repo.branches()?)
    }
}

/// Extract the parent ids from `git cat-file -p` output of a commit.
///
/// Only the header (everything before the first empty line) is scanned, so
/// message lines are never mistaken for parents.
pub fn parse_parents(id: &CommitId, data: &[u8]) -> Result<Vec<CommitId>, GraphError> {
    let mut parents = Vec::new();
    for line in data.lines() {
        if line.is_empty() {
            break;
        }
        let Some(hex) = line.strip_prefix(b"parent ") else {
            continue;
        };
        let hex = hex.trim().to_str().map_err(|_| GraphError::Inspect {
            id: id.clone(),
            reason: "non-UTF-8 parent line".into(),
        })?;
        let parent = CommitId::from_hex(hex).map_err(|e| GraphError::Inspect {
            id: id.clone(),
            reason: format!("bad parent '{hex}': {e}"),
        })?;
        parents.push(parent);
    }
    Ok(parents)
}
