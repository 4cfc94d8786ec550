use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

use bstr::BString;

use crate::error::UtilError;
use crate::Result;

/// Captured result of a finished subprocess.
#[derive(Debug)]
pub struct CommandOutput {
    /// The exit status.
    pub status: ExitStatus,
    /// Everything the process wrote to stdout.
    pub stdout: BString,
    /// Everything the process wrote to stderr.
    pub stderr: BString,
}

impl CommandOutput {
    /// Returns true if the process exited successfully.
    pub fn success(&self) -> bool {
        self.status.success()
    }
}

/// Builder for a blocking, fully captured subprocess run.
///
/// Stdin is always closed; stdout and stderr are piped and collected. The
/// child is spawned, waited for and reaped inside [`GitCommand::run`], so no
/// process handle escapes the call.
#[derive(Debug, Clone)]
pub struct GitCommand {
    program: OsString,
    args: Vec<OsString>,
    working_dir: Option<PathBuf>,
}

impl GitCommand {
    /// Create a new command builder for the given program.
    pub fn new(program: impl AsRef<OsStr>) -> Self {
        Self {
            program: program.as_ref().to_os_string(),
            args: Vec::new(),
            working_dir: None,
        }
    }

    /// Add an argument.
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    /// Add multiple arguments.
    pub fn args(mut self, args: impl IntoIterator<Item = impl AsRef<OsStr>>) -> Self {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    /// Set the working directory.
    pub fn working_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.working_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Get the command string for error messages.
    pub fn command_string(&self) -> String {
        let mut s = self.program.to_string_lossy().into_owned();
        for arg in &self.args {
            s.push(' ');
            s.push_str(&arg.to_string_lossy());
        }
        s
    }

    /// Run the command to completion and capture its output.
    ///
    /// A non-zero exit is not an error here; callers inspect
    /// [`CommandOutput::success`]. Only failing to start or wait for the
    /// process is reported as [`UtilError::Subprocess`].
    pub fn run(&self) -> Result<CommandOutput> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(ref dir) = self.working_dir {
            cmd.current_dir(dir);
        }

        tracing::trace!(command = %self.command_string(), "spawning");
        let output = cmd.output().map_err(|e| UtilError::Subprocess {
            command: self.command_string(),
            source: e,
        })?;

        Ok(CommandOutput {
            status: output.status,
            stdout: BString::from(output.stdout),
            stderr: BString::from(output.stderr),
        })
    }
}
