//! Text output formatter for human-readable display
//!
//! This module provides:
//! - Human-readable run summary with colors
//! - Semantic version change type indication (major/minor/patch)
//! - Warning display for recoverable conditions

use crate::domain::{RunReport, UpgradeOutcome, VenvStatus};
use crate::output::{ReportFormatter, Verbosity};
use colored::Colorize;
use std::io::Write;

/// Semantic version change type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionChangeType {
    /// Major version change (breaking)
    Major,
    /// Minor version change (features)
    Minor,
    /// Patch version change (fixes)
    Patch,
    /// Unknown or unparseable
    Unknown,
}

impl VersionChangeType {
    /// Determine the change type between two versions
    pub fn from_versions(old: &str, new: &str) -> Self {
        let parse = |v: &str| -> Option<(u64, u64, u64)> {
            let v = v.strip_prefix('v').unwrap_or(v);
            // Split by . and - to handle prerelease suffixes
            let parts: Vec<&str> = v.split(['.', '-']).collect();
            if parts.len() >= 3 {
                Some((
                    parts[0].parse().ok()?,
                    parts[1].parse().ok()?,
                    parts[2].parse().ok()?,
                ))
            } else if parts.len() == 2 {
                Some((parts[0].parse().ok()?, parts[1].parse().ok()?, 0))
            } else if parts.len() == 1 {
                Some((parts[0].parse().ok()?, 0, 0))
            } else {
                None
            }
        };

        match (parse(old), parse(new)) {
            (Some((old_major, old_minor, _)), Some((new_major, new_minor, _))) => {
                if new_major != old_major {
                    VersionChangeType::Major
                } else if new_minor != old_minor {
                    VersionChangeType::Minor
                } else {
                    VersionChangeType::Patch
                }
            }
            _ => VersionChangeType::Unknown,
        }
    }

    /// Get the display label with color
    pub fn colored_label(&self) -> String {
        match self {
            VersionChangeType::Major => "major".red().bold().to_string(),
            VersionChangeType::Minor => "minor".yellow().to_string(),
            VersionChangeType::Patch => "patch".green().to_string(),
            VersionChangeType::Unknown => "?".dimmed().to_string(),
        }
    }

    /// Get the plain label
    pub fn label(&self) -> &'static str {
        match self {
            VersionChangeType::Major => "major",
            VersionChangeType::Minor => "minor",
            VersionChangeType::Patch => "patch",
            VersionChangeType::Unknown => "?",
        }
    }
}

/// Text formatter for human-readable output
pub struct TextFormatter {
    verbosity: Verbosity,
}

impl TextFormatter {
    /// Create a new text formatter
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }
}

impl ReportFormatter for TextFormatter {
    fn format(&self, report: &RunReport, writer: &mut dyn Write) -> std::io::Result<()> {
        if self.verbosity == Verbosity::Quiet {
            // warnings only
            for warning in &report.warnings {
                writeln!(writer, "{} {}", "warning:".yellow(), warning)?;
            }
            return Ok(());
        }

        if report.dry_run {
            writeln!(writer, "{}", "dry-run: no files or environments were modified".dimmed())?;
        }

        match report.aggregated_files.len() {
            0 => writeln!(writer, "no sub-manifests found, using existing requirements.txt")?,
            n => writeln!(writer, "aggregated {} requirements file{}", n, plural(n))?,
        }
        if self.verbosity == Verbosity::Verbose {
            for file in &report.aggregated_files {
                writeln!(writer, "  {}", file.display())?;
            }
        }

        match report.venv {
            VenvStatus::Created => writeln!(writer, "virtual environment {}", "created".green())?,
            VenvStatus::Reused => writeln!(writer, "virtual environment reused")?,
            VenvStatus::WouldCreate => {
                writeln!(writer, "virtual environment {}", "would be created".dimmed())?
            }
        }

        if report.installed {
            writeln!(writer, "dependencies installed from requirements.txt")?;
        }

        if report.pinned.is_empty() {
            writeln!(writer, "all dependencies already pinned")?;
        } else {
            let verb = if report.dry_run { "would pin" } else { "pinned" };
            writeln!(
                writer,
                "{} {} package{}",
                verb,
                report.pinned.len(),
                plural(report.pinned.len())
            )?;
            for pin in &report.pinned {
                writeln!(writer, "  {} -> {}", pin.name, pin.spec.cyan())?;
            }
        }

        if report.upgrade == UpgradeOutcome::UpToDate {
            writeln!(writer, "all requirements.txt packages are {}", "up to date".green())?;
        } else if !report.upgrade_candidates.is_empty() {
            writeln!(
                writer,
                "upgrades available for {} package{}:",
                report.upgrade_candidates.len(),
                plural(report.upgrade_candidates.len())
            )?;
            for candidate in &report.upgrade_candidates {
                let change =
                    VersionChangeType::from_versions(&candidate.current, &candidate.latest);
                writeln!(
                    writer,
                    "  {}: {} -> {} ({})",
                    candidate.name.bold(),
                    candidate.current,
                    candidate.latest.cyan(),
                    change.colored_label()
                )?;
            }
            match report.upgrade {
                UpgradeOutcome::Applied => writeln!(writer, "{}", "packages upgraded".green())?,
                UpgradeOutcome::Declined => writeln!(writer, "no packages were upgraded")?,
                _ => writeln!(writer, "upgrade skipped")?,
            }
        } else {
            writeln!(writer, "upgrade check skipped")?;
        }

        for warning in &report.warnings {
            writeln!(writer, "{} {}", "warning:".yellow(), warning)?;
        }

        Ok(())
    }
}

fn plural(n: usize) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}
