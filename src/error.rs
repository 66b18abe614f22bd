//! Application error types using thiserror
//!
//! Error hierarchy:
//! - CommandError: external tool invocation failures
//! - ManifestError: requirements file read/write failures

use std::path::PathBuf;
use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// External command related errors
    #[error(transparent)]
    Command(#[from] CommandError),

    /// Requirements manifest related errors
    #[error(transparent)]
    Manifest(#[from] ManifestError),
}

/// Errors related to external command invocation
#[derive(Error, Debug)]
pub enum CommandError {
    /// Executable missing from PATH
    #[error("command not found: {program} (is it on your PATH?)")]
    NotFound { program: String },

    /// Command ran and returned a non-zero status
    #[error("command `{command}` exited with status {status}")]
    Failed {
        command: String,
        status: i32,
        stdout: String,
        stderr: String,
    },

    /// Command could not be spawned or waited on
    #[error("failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

/// Errors related to the requirements manifest
#[derive(Error, Debug)]
pub enum ManifestError {
    /// Root manifest missing after aggregation
    #[error("requirements file not found: {path}")]
    NotFound { path: PathBuf },

    /// Failed to read a requirements file
    #[error("failed to read {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a requirements file
    #[error("failed to write {path}: {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to scan a directory for sub-manifests
    #[error("failed to scan {path}: {source}")]
    ScanError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CommandError {
    /// Creates a new NotFound error
    pub fn not_found(program: impl Into<String>) -> Self {
        CommandError::NotFound {
            program: program.into(),
        }
    }

    /// Creates a new Failed error
    pub fn failed(
        command: impl Into<String>,
        status: i32,
        stdout: impl Into<String>,
        stderr: impl Into<String>,
    ) -> Self {
        CommandError::Failed {
            command: command.into(),
            status,
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    /// Creates a new Spawn error
    pub fn spawn(command: impl Into<String>, source: std::io::Error) -> Self {
        CommandError::Spawn {
            command: command.into(),
            source,
        }
    }
}

impl ManifestError {
    /// Creates a new NotFound error
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        ManifestError::NotFound { path: path.into() }
    }

    /// Creates a new ReadError
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ManifestError::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new WriteError
    pub fn write_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ManifestError::WriteError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new ScanError
    pub fn scan_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ManifestError::ScanError {
            path: path.into(),
            source,
        }
    }
}
