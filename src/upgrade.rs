//! Upgrade checking: candidate filtering and confirmation
//!
//! The outdated table covers every installed package; only names the
//! manifest references become upgrade candidates. Confirmation defaults to
//! "no", and a missing terminal (piped or closed stdin) declines without
//! blocking.

use crate::domain::{OutdatedReport, UpgradeCandidate};
use console::Term;
use dialoguer::Confirm;
use std::collections::BTreeSet;

/// Filter the outdated table down to packages the manifest references.
///
/// Case-insensitive: pip reports `Flask`, the manifest may say `flask`.
/// The candidate keeps pip's casing so the upgrade invocation echoes it.
pub fn candidates(
    outdated: &OutdatedReport,
    manifest_keys: &BTreeSet<String>,
) -> Vec<UpgradeCandidate> {
    outdated
        .packages
        .iter()
        .filter(|pkg| manifest_keys.contains(&pkg.name.to_lowercase()))
        .map(|pkg| UpgradeCandidate {
            name: pkg.name.clone(),
            current: pkg.current.clone(),
            latest: pkg.latest.clone(),
        })
        .collect()
}

/// Trait for confirming a batch upgrade
pub trait UpgradePrompt {
    /// Whether the listed candidates should be upgraded
    fn confirm(&self, candidates: &[UpgradeCandidate]) -> bool;
}

impl<T: UpgradePrompt + ?Sized> UpgradePrompt for &T {
    fn confirm(&self, candidates: &[UpgradeCandidate]) -> bool {
        (**self).confirm(candidates)
    }
}

/// Interactive terminal prompt
pub struct TerminalPrompt {
    assume_yes: bool,
}

impl TerminalPrompt {
    /// Create a prompt; `assume_yes` answers affirmatively without asking
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

impl UpgradePrompt for TerminalPrompt {
    fn confirm(&self, candidates: &[UpgradeCandidate]) -> bool {
        if self.assume_yes {
            return true;
        }

        let term = Term::stderr();
        if !term.is_term() {
            // no attached terminal: treat as "no"
            return false;
        }

        Confirm::new()
            .with_prompt(format!(
                "Upgrade {} package{}?",
                candidates.len(),
                if candidates.len() == 1 { "" } else { "s" }
            ))
            .default(false)
            .interact_on(&term)
            .unwrap_or(false)
    }
}
