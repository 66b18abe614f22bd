//! CLI argument parsing module for venvup

use clap::Parser;
use std::path::PathBuf;

/// Parse a Python version string like `3`, `3.9`, or `3.11`
fn parse_python_version(s: &str) -> Result<String, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty version string".to_string());
    }

    let valid = s
        .split('.')
        .all(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_digit()));
    if !valid {
        return Err(format!("invalid Python version: {}", s));
    }

    Ok(s.to_string())
}

/// Python virtual environment bootstrapper and requirements pinner
#[derive(Parser, Debug, Clone)]
#[command(
    name = "venvup",
    version,
    about = "Bootstrap a Python virtual environment and pin requirements"
)]
pub struct CliArgs {
    /// Target project directory (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Python version for environment creation (e.g. 3.9); default uses python3
    #[arg(long, value_name = "VERSION", value_parser = parse_python_version)]
    pub python: Option<String>,

    /// Virtual environment directory, relative to the project directory
    #[arg(long, value_name = "DIR", default_value = "venv")]
    pub venv_dir: PathBuf,

    /// Dry run mode - report what would happen without changing anything
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Assume "yes" at the upgrade confirmation prompt
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Skip the upgrade check entirely
    #[arg(long)]
    pub skip_upgrade: bool,

    /// Output the run report in JSON format
    #[arg(long)]
    pub json: bool,

    /// Enable quiet mode - minimal output
    #[arg(short, long)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,
}

impl CliArgs {
    /// The interpreter used to create the environment
    pub fn interpreter(&self) -> String {
        crate::venv::base_interpreter(self.python.as_deref())
    }
}
