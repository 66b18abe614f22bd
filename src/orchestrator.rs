//! Run orchestrator for coordinating the bootstrap pipeline
//!
//! Stages run strictly in sequence: aggregate → provision → install → pin →
//! upgrade-check. Each stage either completes or terminates the whole run;
//! a missing manifest after aggregation is the only recoverable exception,
//! and only for the two stages that merely read it.

use crate::cli::CliArgs;
use crate::domain::{
    parse_outdated_table, InstalledPackages, RunReport, UpgradeOutcome, VenvStatus,
};
use crate::error::{AppError, ManifestError};
use crate::manifest::{
    collect_sub_manifests, has_unpinned, join_lines, package_keys, pin_lines, read_manifest,
    split_lines, write_manifest, write_root_manifest, AggregateOutcome, REQUIREMENTS_FILE,
};
use crate::output::VersionChangeType;
use crate::pip::Pip;
use crate::process::{CommandRunner, SystemRunner};
use crate::progress::Progress;
use crate::upgrade::{candidates, TerminalPrompt, UpgradePrompt};
use crate::venv::Venv;
use colored::Colorize;
use std::path::Path;

/// Coordinates one complete run
pub struct Orchestrator<R: CommandRunner, P: UpgradePrompt> {
    args: CliArgs,
    runner: R,
    prompt: P,
}

impl Orchestrator<SystemRunner, TerminalPrompt> {
    /// Create an orchestrator running real commands from the target directory
    pub fn new(args: CliArgs) -> Self {
        let runner = SystemRunner::new(&args.path);
        let prompt = TerminalPrompt::new(args.yes);
        Self::with_parts(args, runner, prompt)
    }
}

impl<R: CommandRunner, P: UpgradePrompt> Orchestrator<R, P> {
    /// Create an orchestrator with a custom runner and prompt (for testing)
    pub fn with_parts(args: CliArgs, runner: R, prompt: P) -> Self {
        Self {
            args,
            runner,
            prompt,
        }
    }

    /// Run the pipeline
    pub fn run(&self) -> Result<RunReport, AppError> {
        let mut report = RunReport::new(self.args.dry_run);
        let root_manifest = self.args.path.join(REQUIREMENTS_FILE);

        // Stage 1: aggregate sub-manifests into the root manifest
        self.note("searching for requirements.txt in subdirectories...");
        let aggregate = collect_sub_manifests(&self.args.path)?;
        for file in &aggregate.files {
            self.note_verbose(&format!("  found {}", file.display()));
        }
        report.aggregated_files = aggregate.files.clone();

        if !aggregate.is_empty() && !self.args.dry_run {
            write_root_manifest(&self.args.path, &aggregate.content)?;
        }
        if !root_manifest.is_file() && !(self.args.dry_run && !aggregate.is_empty()) {
            return Err(ManifestError::not_found(root_manifest).into());
        }

        // Stage 2: provision the virtual environment
        let venv = Venv::new(&self.args.path, &self.args.venv_dir);
        report.venv = if self.args.dry_run {
            if venv.is_provisioned() {
                VenvStatus::Reused
            } else {
                VenvStatus::WouldCreate
            }
        } else {
            if !venv.is_provisioned() {
                self.note(&format!(
                    "creating virtual environment at '{}'...",
                    self.args.venv_dir.display()
                ));
                self.echo_command(&venv.create_command(&self.args.interpreter()).to_string());
            }
            venv.ensure(&self.runner, &self.args.interpreter())?
        };

        let pip = Pip::new(venv.python_relpath());
        let can_query = venv.is_provisioned();

        // Stage 3: install dependencies
        if !self.args.dry_run {
            self.note("installing dependencies from requirements.txt...");
            self.echo_command(&pip.install_command(Path::new(REQUIREMENTS_FILE)).to_string());
            pip.install_requirements(&self.runner, Path::new(REQUIREMENTS_FILE))?;
            report.installed = true;
        }

        // Stages 4 and 5 only read (and rewrite) the root manifest; a missing
        // file here skips them with a warning instead of failing the run.
        let mut lines = match self.load_manifest_lines(&root_manifest, &aggregate) {
            Ok(lines) => Some(lines),
            Err(ManifestError::NotFound { path }) => {
                report.warn(format!(
                    "'{}' not found, skipping pinning and upgrade check",
                    path.display()
                ));
                None
            }
            Err(e) => return Err(e.into()),
        };

        // Stage 4: pin unpinned dependencies
        if let Some(ref mut lines) = lines {
            self.note("checking for unpinned dependencies...");
            if !has_unpinned(lines) {
                self.note("all dependencies are already pinned");
            } else if !can_query {
                report.warn("virtual environment not provisioned, skipping pin check");
            } else {
                let freeze = self.captured(
                    "querying installed versions",
                    &pip.freeze_command().to_string(),
                    || pip.freeze(&self.runner),
                )?;
                let installed = InstalledPackages::parse(&freeze);
                let outcome = pin_lines(lines, &installed);
                if outcome.changed() {
                    if !self.args.dry_run {
                        write_manifest(&root_manifest, &join_lines(&outcome.lines))?;
                    }
                    for pin in &outcome.changes {
                        self.note(&format!("pinned '{}' to '{}'", pin.name, pin.spec));
                    }
                    report.pinned = outcome.changes;
                    *lines = outcome.lines;
                }
            }
        }

        // Stage 5: check for upgrades
        if self.args.skip_upgrade {
            report.upgrade = UpgradeOutcome::Skipped;
        } else if let Some(ref lines) = lines {
            if !can_query {
                report.warn("virtual environment not provisioned, skipping upgrade check");
            } else {
                self.note("checking for package upgrades...");
                let table = self.captured(
                    "checking for outdated packages",
                    &pip.list_outdated_command().to_string(),
                    || pip.list_outdated(&self.runner),
                )?;
                let outdated = parse_outdated_table(&table);
                if outdated.skipped_rows > 0 {
                    report.warn(format!(
                        "{} outdated-list row{} could not be parsed",
                        outdated.skipped_rows,
                        if outdated.skipped_rows == 1 { "" } else { "s" }
                    ));
                }

                let found = candidates(&outdated, &package_keys(lines));
                if found.is_empty() {
                    report.upgrade = UpgradeOutcome::UpToDate;
                } else {
                    self.list_candidates(&found);
                    report.upgrade_candidates = found.clone();
                    report.upgrade = if self.args.dry_run {
                        UpgradeOutcome::Skipped
                    } else if self.prompt.confirm(&found) {
                        let names: Vec<String> =
                            found.iter().map(|c| c.name.clone()).collect();
                        self.echo_command(&pip.upgrade_command(&names).to_string());
                        pip.upgrade(&self.runner, &names)?;
                        UpgradeOutcome::Applied
                    } else {
                        UpgradeOutcome::Declined
                    };
                }
            }
        }

        Ok(report)
    }

    /// Read the root manifest, falling back to the in-memory aggregate in
    /// dry-run mode where the file was deliberately not written
    fn load_manifest_lines(
        &self,
        root_manifest: &Path,
        aggregate: &AggregateOutcome,
    ) -> Result<Vec<String>, ManifestError> {
        match read_manifest(root_manifest) {
            Ok(content) => Ok(split_lines(&content)),
            Err(ManifestError::NotFound { .. }) if self.args.dry_run && !aggregate.is_empty() => {
                Ok(split_lines(&aggregate.content))
            }
            Err(e) => Err(e),
        }
    }

    /// Run a captured pip query behind a spinner
    fn captured<T>(
        &self,
        label: &str,
        command: &str,
        f: impl FnOnce() -> Result<T, crate::error::CommandError>,
    ) -> Result<T, crate::error::CommandError> {
        self.echo_command(command);
        let mut progress = Progress::new(!self.args.quiet && !self.args.json);
        progress.spinner(label);
        let result = f();
        progress.finish_and_clear();
        result
    }

    fn list_candidates(&self, found: &[crate::domain::UpgradeCandidate]) {
        if self.args.quiet {
            return;
        }
        eprintln!("upgrades available for the following packages:");
        for candidate in found {
            let change = VersionChangeType::from_versions(&candidate.current, &candidate.latest);
            eprintln!(
                "  {}: {} -> {} ({})",
                candidate.name.bold(),
                candidate.current,
                candidate.latest.cyan(),
                change.colored_label()
            );
        }
    }

    fn note(&self, message: &str) {
        if !self.args.quiet {
            eprintln!("> {}", message);
        }
    }

    fn note_verbose(&self, message: &str) {
        if self.args.verbose && !self.args.quiet {
            eprintln!("{}", message);
        }
    }

    fn echo_command(&self, command: &str) {
        if self.args.verbose && !self.args.quiet {
            eprintln!(">> running: {}", command);
        }
    }
}
