//! Virtual environment provisioning
//!
//! Checks for the environment directory and its interpreter, creating the
//! environment with `python -m venv` when either is missing. An existing
//! directory is trusted as-is; there is no version compatibility check.

use crate::domain::VenvStatus;
use crate::error::CommandError;
use crate::process::{CommandLine, CommandRunner};
use std::path::{Path, PathBuf};

/// Default directory name for the virtual environment
pub const DEFAULT_VENV_DIR: &str = "venv";

/// Path layout of a virtual environment under a project root
#[derive(Debug, Clone)]
pub struct Venv {
    root: PathBuf,
    name: PathBuf,
}

impl Venv {
    /// Describe the environment `name` under `project_root`
    pub fn new(project_root: impl Into<PathBuf>, name: impl Into<PathBuf>) -> Self {
        Self {
            root: project_root.into(),
            name: name.into(),
        }
    }

    /// Absolute path of the environment directory
    pub fn dir(&self) -> PathBuf {
        self.root.join(&self.name)
    }

    /// Path of the environment's interpreter binary
    pub fn python_path(&self) -> PathBuf {
        self.dir().join("bin").join("python")
    }

    /// Interpreter path relative to the project root, for commands run
    /// from there
    pub fn python_relpath(&self) -> PathBuf {
        self.name.join("bin").join("python")
    }

    /// Whether the directory and its interpreter both exist
    pub fn is_provisioned(&self) -> bool {
        self.dir().is_dir() && self.python_path().is_file()
    }

    /// The creation command, run from the project root
    pub fn create_command(&self, interpreter: &str) -> CommandLine {
        CommandLine::new(interpreter)
            .arg("-m")
            .arg("venv")
            .arg(self.name.display().to_string())
    }

    /// Create the environment if missing; report what happened
    pub fn ensure<R: CommandRunner>(
        &self,
        runner: &R,
        interpreter: &str,
    ) -> Result<VenvStatus, CommandError> {
        if self.is_provisioned() {
            return Ok(VenvStatus::Reused);
        }
        runner.run(&self.create_command(interpreter))?;
        Ok(VenvStatus::Created)
    }
}

/// Interpreter used to create the environment: `python3`, or `python<X.Y>`
/// when a version is configured
pub fn base_interpreter(version: Option<&str>) -> String {
    match version {
        Some(v) => format!("python{}", v),
        None => "python3".to_string(),
    }
}
