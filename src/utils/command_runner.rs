use std::ffi::OsStr;
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};

use crate::Error;

/// Captured result of a finished child process.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.status.success()
    }
}

/// Runs external tools to completion, capturing both streams. Arguments go
/// straight to the process; no shell is involved.
///
/// Non-zero exits are returned as a normal [`CommandOutput`]; callers decide
/// whether that is fatal. Only failing to spawn the process is an error here.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandRunner;

impl CommandRunner {
    pub fn new() -> Self {
        CommandRunner
    }

    pub fn run_command(
        &self,
        program: impl AsRef<OsStr>,
        args: &[impl AsRef<OsStr>],
        current_dir: Option<&Path>,
    ) -> Result<CommandOutput, Error> {
        let program = program.as_ref();
        log::debug!(
            "Running command: {} {} (in {:?})",
            program.to_string_lossy(),
            args.iter().map(|a| a.as_ref().to_string_lossy()).collect::<Vec<_>>().join(" "),
            current_dir.unwrap_or_else(|| Path::new("."))
        );

        let mut cmd = Command::new(program);
        cmd.args(args);

        if let Some(dir) = current_dir {
            cmd.current_dir(dir);
        }

        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        let output = cmd.output().map_err(|e| {
            Error::Subprocess(format!(
                "failed to execute '{}': {}. Is it installed and in your PATH?",
                program.to_string_lossy(),
                e
            ))
        })?;

        let result = CommandOutput {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        log::debug!("'{}' exited with {}", program.to_string_lossy(), result.status);
        Ok(result)
    }
}
