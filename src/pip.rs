//! pip operations through the environment interpreter
//!
//! Every operation is a separate blocking `python -m pip` invocation:
//! installs stream their output, freeze and list-outdated are captured for
//! parsing.

use crate::error::CommandError;
use crate::process::{CommandLine, CommandRunner};
use std::path::{Path, PathBuf};

/// pip bound to a specific interpreter binary
#[derive(Debug, Clone)]
pub struct Pip {
    python: PathBuf,
}

impl Pip {
    /// Use pip through the given interpreter
    pub fn new(python: impl Into<PathBuf>) -> Self {
        Self {
            python: python.into(),
        }
    }

    fn base(&self) -> CommandLine {
        CommandLine::new(self.python.display().to_string())
            .arg("-m")
            .arg("pip")
    }

    /// `pip install -r <manifest>`
    pub fn install_command(&self, manifest: &Path) -> CommandLine {
        self.base()
            .arg("install")
            .arg("-r")
            .arg(manifest.display().to_string())
    }

    /// `pip freeze`
    pub fn freeze_command(&self) -> CommandLine {
        self.base().arg("freeze")
    }

    /// `pip list --outdated`
    pub fn list_outdated_command(&self) -> CommandLine {
        self.base().arg("list").arg("--outdated")
    }

    /// `pip install --upgrade <packages…>`
    pub fn upgrade_command(&self, packages: &[String]) -> CommandLine {
        self.base()
            .arg("install")
            .arg("--upgrade")
            .args(packages.iter().cloned())
    }

    /// Install from the manifest, streaming output
    pub fn install_requirements<R: CommandRunner>(
        &self,
        runner: &R,
        manifest: &Path,
    ) -> Result<(), CommandError> {
        runner.run(&self.install_command(manifest))
    }

    /// Capture the exact installed versions
    pub fn freeze<R: CommandRunner>(&self, runner: &R) -> Result<String, CommandError> {
        Ok(runner.run_captured(&self.freeze_command())?.stdout)
    }

    /// Capture the outdated-package table
    pub fn list_outdated<R: CommandRunner>(&self, runner: &R) -> Result<String, CommandError> {
        Ok(runner.run_captured(&self.list_outdated_command())?.stdout)
    }

    /// Upgrade exactly the named packages, streaming output
    pub fn upgrade<R: CommandRunner>(
        &self,
        runner: &R,
        packages: &[String],
    ) -> Result<(), CommandError> {
        runner.run(&self.upgrade_command(packages))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pip() -> Pip {
        Pip::new("venv/bin/python")
    }

    #[test]
    fn test_install_command_shape() {
        let cmd = pip().install_command(Path::new("requirements.txt"));
        assert_eq!(
            cmd.to_string(),
            "venv/bin/python -m pip install -r requirements.txt"
        );
    }

    #[test]
    fn test_freeze_command_shape() {
        assert_eq!(pip().freeze_command().to_string(), "venv/bin/python -m pip freeze");
    }

    #[test]
    fn test_list_outdated_command_shape() {
        assert_eq!(
            pip().list_outdated_command().to_string(),
            "venv/bin/python -m pip list --outdated"
        );
    }

    #[test]
    fn test_upgrade_command_lists_exact_packages() {
        let cmd = pip().upgrade_command(&["Flask".to_string(), "requests".to_string()]);
        assert_eq!(
            cmd.to_string(),
            "venv/bin/python -m pip install --upgrade Flask requests"
        );
    }
}
