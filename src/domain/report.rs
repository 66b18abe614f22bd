//! Run report structures
//!
//! A single `RunReport` is produced per run and handed to the output
//! formatters; the JSON formatter serializes it directly.

use serde::Serialize;
use std::path::PathBuf;

/// What the provisioner did with the virtual environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VenvStatus {
    /// Environment was missing and has been created
    Created,
    /// Existing environment was trusted as-is
    Reused,
    /// Dry-run: environment is missing and would be created
    WouldCreate,
}

/// A single line rewritten by the pinner
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PinChange {
    /// Identity key of the pinned package
    pub name: String,
    /// The exact specifier the line now carries
    pub spec: String,
}

/// An outdated package referenced by the manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpgradeCandidate {
    /// Package name as reported by pip (original case)
    pub name: String,
    /// Currently installed version
    pub current: String,
    /// Latest available version
    pub latest: String,
}

/// Outcome of the upgrade-check stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UpgradeOutcome {
    /// Every manifest package is at its latest version
    UpToDate,
    /// Candidates were listed and the upgrade ran
    Applied,
    /// Candidates were listed and the user declined
    Declined,
    /// Stage did not run (skipped by flag, dry-run, or missing input)
    Skipped,
}

/// Summary of one complete run, consumed by the output formatters
#[derive(Debug, Serialize)]
pub struct RunReport {
    /// Whether this was a dry-run
    pub dry_run: bool,
    /// Sub-manifests discovered by the aggregator, in concatenation order
    pub aggregated_files: Vec<PathBuf>,
    /// Provisioner outcome
    pub venv: VenvStatus,
    /// Whether the install stage ran
    pub installed: bool,
    /// Lines rewritten by the pinner
    pub pinned: Vec<PinChange>,
    /// Outdated packages referenced by the manifest
    pub upgrade_candidates: Vec<UpgradeCandidate>,
    /// Upgrade-check outcome
    pub upgrade: UpgradeOutcome,
    /// Non-fatal conditions surfaced during the run
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl RunReport {
    /// Create an empty report for a run
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            aggregated_files: Vec::new(),
            venv: VenvStatus::Reused,
            installed: false,
            pinned: Vec::new(),
            upgrade_candidates: Vec::new(),
            upgrade: UpgradeOutcome::Skipped,
            warnings: Vec::new(),
        }
    }

    /// Record a non-fatal warning
    pub fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// Whether the run changed anything on disk or in the environment
    pub fn has_changes(&self) -> bool {
        !self.dry_run
            && (self.venv == VenvStatus::Created
                || self.installed
                || !self.pinned.is_empty()
                || self.upgrade == UpgradeOutcome::Applied)
    }
}
