//! venvup - Python virtual environment bootstrapper CLI tool
//!
//! Aggregates per-subdirectory requirements files, provisions a virtual
//! environment, installs dependencies, pins unpinned specifiers to the
//! installed versions, and offers a targeted upgrade of outdated packages.

use clap::Parser;
use std::io::{self, Write};
use std::process::ExitCode;
use venvup::cli::CliArgs;
use venvup::error::{AppError, CommandError};
use venvup::orchestrator::Orchestrator;
use venvup::output::{create_formatter, OutputConfig};

fn main() -> ExitCode {
    let args = CliArgs::parse();

    match run(args) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {}", e);
            // Echo captured diagnostics for failed commands
            if let Some(AppError::Command(CommandError::Failed { stdout, stderr, .. })) =
                e.downcast_ref::<AppError>()
            {
                if !stdout.trim().is_empty() {
                    eprintln!("  stdout: {}", stdout.trim());
                }
                if !stderr.trim().is_empty() {
                    eprintln!("  stderr: {}", stderr.trim());
                }
            }
            ExitCode::FAILURE
        }
    }
}

/// Main application logic
fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    if args.verbose {
        eprintln!("venvup v{}", env!("CARGO_PKG_VERSION"));
        eprintln!("Target: {}", args.path.display());
        if args.dry_run {
            eprintln!("Mode: dry-run");
        }
    }

    let orchestrator = Orchestrator::new(args.clone());
    let report = orchestrator.run()?;

    let output_config = OutputConfig::from_cli(args.json, args.verbose, args.quiet);
    let formatter = create_formatter(output_config);

    let mut stdout = io::stdout().lock();
    formatter.format(&report, &mut stdout)?;
    stdout.flush()?;

    Ok(ExitCode::SUCCESS)
}
