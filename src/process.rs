//! Blocking external command execution
//!
//! This module provides:
//! - CommandLine assembly with a display form for diagnostics
//! - Streamed execution (inherited stdio) for long-running installs
//! - Captured execution for output that must be parsed
//! - Classification of missing executables vs non-zero exits

use crate::error::CommandError;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// An external command and its arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    program: String,
    args: Vec<String>,
}

impl CommandLine {
    /// Create a new command line for the given program
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append a single argument (builder pattern)
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append multiple arguments (builder pattern)
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// The program name
    pub fn program(&self) -> &str {
        &self.program
    }
}

impl std::fmt::Display for CommandLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Captured output of a completed command
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// Standard output
    pub stdout: String,
    /// Standard error
    pub stderr: String,
}

/// Trait for running external commands
///
/// All execution is blocking; a non-zero exit is an error, never a value.
pub trait CommandRunner {
    /// Run a command with inherited stdio
    fn run(&self, command: &CommandLine) -> Result<(), CommandError>;

    /// Run a command capturing stdout and stderr
    fn run_captured(&self, command: &CommandLine) -> Result<CommandOutput, CommandError>;
}

impl<T: CommandRunner + ?Sized> CommandRunner for &T {
    fn run(&self, command: &CommandLine) -> Result<(), CommandError> {
        (**self).run(command)
    }

    fn run_captured(&self, command: &CommandLine) -> Result<CommandOutput, CommandError> {
        (**self).run_captured(command)
    }
}

/// Runner that executes real commands from a fixed working directory
#[derive(Debug)]
pub struct SystemRunner {
    cwd: PathBuf,
}

impl SystemRunner {
    /// Create a runner executing commands from `cwd`
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self { cwd: cwd.into() }
    }

    /// The working directory commands run from
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    fn classify_spawn_error(command: &CommandLine, err: std::io::Error) -> CommandError {
        if err.kind() == std::io::ErrorKind::NotFound {
            CommandError::not_found(command.program())
        } else {
            CommandError::spawn(command.to_string(), err)
        }
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, command: &CommandLine) -> Result<(), CommandError> {
        let status = Command::new(&command.program)
            .args(&command.args)
            .current_dir(&self.cwd)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| Self::classify_spawn_error(command, e))?;

        if status.success() {
            Ok(())
        } else {
            Err(CommandError::failed(
                command.to_string(),
                status.code().unwrap_or(-1),
                String::new(),
                String::new(),
            ))
        }
    }

    fn run_captured(&self, command: &CommandLine) -> Result<CommandOutput, CommandError> {
        let output = Command::new(&command.program)
            .args(&command.args)
            .current_dir(&self.cwd)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| Self::classify_spawn_error(command, e))?;

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        if output.status.success() {
            Ok(CommandOutput { stdout, stderr })
        } else {
            Err(CommandError::failed(
                command.to_string(),
                output.status.code().unwrap_or(-1),
                stdout,
                stderr,
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_line_display() {
        let cmd = CommandLine::new("python3")
            .arg("-m")
            .arg("venv")
            .arg("venv");
        assert_eq!(cmd.to_string(), "python3 -m venv venv");
    }

    #[test]
    fn test_command_line_args_batch() {
        let cmd = CommandLine::new("pip").args(["install", "--upgrade", "Flask"]);
        assert_eq!(cmd.to_string(), "pip install --upgrade Flask");
        assert_eq!(cmd.program(), "pip");
    }

    #[test]
    fn test_run_captured_success() {
        let runner = SystemRunner::new(".");
        let output = runner
            .run_captured(&CommandLine::new("true"))
            .expect("true should succeed");
        assert!(output.stdout.is_empty());
    }

    #[test]
    fn test_run_captured_failure_carries_status() {
        let runner = SystemRunner::new(".");
        let err = runner
            .run_captured(&CommandLine::new("false"))
            .expect_err("false should fail");
        match err {
            CommandError::Failed {
                command, status, ..
            } => {
                assert_eq!(command, "false");
                assert_ne!(status, 0);
            }
            other => panic!("expected Failed, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_executable_is_not_found() {
        let runner = SystemRunner::new(".");
        let err = runner
            .run(&CommandLine::new("definitely-not-a-real-binary-4471"))
            .expect_err("missing binary should fail");
        match err {
            CommandError::NotFound { program } => {
                assert_eq!(program, "definitely-not-a-real-binary-4471");
            }
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_streamed_failure_carries_command() {
        let runner = SystemRunner::new(".");
        let err = runner
            .run(&CommandLine::new("false"))
            .expect_err("false should fail");
        assert!(format!("{}", err).contains("false"));
    }
}
