mod logging;

use std::ffi::OsString;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::{error::ErrorKind, ArgAction, Parser};
use topo_graph::{topo_order, write_lines, GitRepository, GraphError};
use topo_refs::RefError;

/// Exit status when no repository encloses the working directory.
const EXIT_NOT_A_REPOSITORY: i32 = 1;
/// Exit status for every other failure.
const EXIT_FATAL: i32 = 128;

#[derive(Parser)]
#[command(
    name = "topo-order-commits",
    about = "Print every commit reachable from a local branch, children before parents",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Run as if started in <path>
    #[arg(short = 'C', value_name = "path")]
    change_dir: Option<PathBuf>,

    /// Program used to inspect commit objects
    #[arg(long = "git", value_name = "program", default_value = "git")]
    git: OsString,

    /// Log progress to stderr (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => process::exit(0),
                _ => process::exit(EXIT_FATAL),
            }
        }
    };

    logging::init(cli.verbose);

    if let Some(dir) = &cli.change_dir {
        if let Err(e) = std::env::set_current_dir(dir) {
            eprintln!("fatal: cannot change to '{}': {}", dir.display(), e);
            process::exit(EXIT_FATAL);
        }
    }

    match run(&cli) {
        Ok(()) => process::exit(0),
        Err(e) => process::exit(report(&e)),
    }
}

fn run(cli: &Cli) -> Result<()> {
    let start = std::env::current_dir().context("cannot determine the working directory")?;
    let repo = GitRepository::discover(&start)?.with_program(&cli.git);
    let lines = topo_order(&repo)?;

    let mut out = BufWriter::new(io::stdout().lock());
    match write_lines(&mut out, &lines) {
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        result => result.context("cannot write to standard output"),
    }
}

/// Print `err` to stderr and pick the exit status for it.
fn report(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<GraphError>() {
        Some(GraphError::Ref(RefError::NotARepository(_))) => {
            eprintln!("Not inside a Git repository");
            EXIT_NOT_A_REPOSITORY
        }
        _ => {
            eprintln!("fatal: {err:#}");
            EXIT_FATAL
        }
    }
}
