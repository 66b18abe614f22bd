//! Order-preserving manifest reading, pinning, and writing
//!
//! The manifest is handled as an ordered sequence of opaque lines. Rewriting
//! only touches unpinned dependency specifiers; every other line round-trips
//! byte-identical, including blank lines, comments, and duplicates.

use crate::domain::{classify, identity_key, InstalledPackages, PinChange, RequirementLine};
use crate::error::ManifestError;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

/// Result of a pinning pass over the manifest lines
#[derive(Debug, Clone)]
pub struct PinOutcome {
    /// The rewritten line sequence, same length as the input
    pub lines: Vec<String>,
    /// Lines that were rewritten to an exact specifier
    pub changes: Vec<PinChange>,
}

impl PinOutcome {
    /// Whether the pass rewrote anything
    pub fn changed(&self) -> bool {
        !self.changes.is_empty()
    }
}

/// Read the manifest, distinguishing a missing file from other read failures
pub fn read_manifest(path: &Path) -> Result<String, ManifestError> {
    fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ManifestError::not_found(path.to_path_buf())
        } else {
            ManifestError::read_error(path.to_path_buf(), e)
        }
    })
}

/// Write the manifest content back in place
pub fn write_manifest(path: &Path, content: &str) -> Result<(), ManifestError> {
    fs::write(path, content).map_err(|e| ManifestError::write_error(path.to_path_buf(), e))
}

/// Split manifest content into lines, keeping a trailing empty segment so the
/// final newline survives a join
pub fn split_lines(content: &str) -> Vec<String> {
    content.split('\n').map(str::to_string).collect()
}

/// Join lines back into manifest content
pub fn join_lines(lines: &[String]) -> String {
    lines.join("\n")
}

/// Whether any line is an unpinned dependency specifier
pub fn has_unpinned(lines: &[String]) -> bool {
    lines
        .iter()
        .any(|line| matches!(classify(line), RequirementLine::Unpinned { .. }))
}

/// The set of identity keys referenced by the manifest
pub fn package_keys(lines: &[String]) -> BTreeSet<String> {
    lines
        .iter()
        .filter_map(|line| classify(line).name().map(identity_key))
        .collect()
}

/// Rewrite unpinned lines to the exact installed specifier.
///
/// Inline comments are reattached unchanged; names absent from the installed
/// map (URL requirements, pip options) leave the line untouched. Line order
/// and duplicates are preserved.
pub fn pin_lines(lines: &[String], installed: &InstalledPackages) -> PinOutcome {
    let mut out = Vec::with_capacity(lines.len());
    let mut changes = Vec::new();

    for line in lines {
        match classify(line) {
            RequirementLine::Unpinned { name } => {
                let key = identity_key(&name);
                match installed.lookup(&key) {
                    Some(spec) => {
                        let rewritten = match line.split_once('#') {
                            Some((_, comment)) => format!("{}  # {}", spec, comment.trim()),
                            None => spec.to_string(),
                        };
                        changes.push(PinChange {
                            name: key,
                            spec: spec.to_string(),
                        });
                        out.push(rewritten);
                    }
                    None => out.push(line.clone()),
                }
            }
            _ => out.push(line.clone()),
        }
    }

    PinOutcome {
        lines: out,
        changes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(content: &str) -> Vec<String> {
        split_lines(content)
    }

    fn installed() -> InstalledPackages {
        InstalledPackages::parse("requests==2.31.0\nFlask==2.0.1\nuvicorn==0.24.0\n")
    }

    #[test]
    fn test_split_join_round_trip() {
        let content = "requests\n\n# comment\nflask==2.0.1\n";
        assert_eq!(join_lines(&lines(content)), content);
    }

    #[test]
    fn test_has_unpinned() {
        assert!(has_unpinned(&lines("requests\nflask==2.0.1\n")));
        assert!(!has_unpinned(&lines("flask==2.0.1\n# requests\n")));
    }

    #[test]
    fn test_package_keys_normalized_and_distinct() {
        let keys = package_keys(&lines("Flask>=2.0\nuvicorn[standard]\nflask\n# requests\n"));
        let expected: Vec<&str> = vec!["flask", "uvicorn"];
        assert_eq!(keys.iter().map(String::as_str).collect::<Vec<_>>(), expected);
    }

    #[test]
    fn test_pin_rewrites_unpinned_line() {
        let outcome = pin_lines(&lines("requests\n"), &installed());
        assert_eq!(outcome.lines, vec!["requests==2.31.0", ""]);
        assert_eq!(
            outcome.changes,
            vec![PinChange {
                name: "requests".to_string(),
                spec: "requests==2.31.0".to_string(),
            }]
        );
    }

    #[test]
    fn test_pin_preserves_inline_comment() {
        let outcome = pin_lines(&lines("  requests  # pinned above\n"), &installed());
        assert_eq!(outcome.lines[0], "requests==2.31.0  # pinned above");
    }

    #[test]
    fn test_pin_leaves_pinned_lines_byte_identical() {
        let content = "Flask==2.0.1\nrequests==2.30.0  # held back\n";
        let outcome = pin_lines(&lines(content), &installed());
        assert_eq!(join_lines(&outcome.lines), content);
        assert!(!outcome.changed());
    }

    #[test]
    fn test_pin_leaves_unknown_names_untouched() {
        let content = "somepkg-not-installed\ngit+https://example.com/repo.git\n";
        let outcome = pin_lines(&lines(content), &installed());
        assert_eq!(join_lines(&outcome.lines), content);
        assert!(outcome.changes.is_empty());
    }

    #[test]
    fn test_pin_strips_extras_for_lookup() {
        let outcome = pin_lines(&lines("uvicorn[standard]\n"), &installed());
        // extras are dropped in favor of the exact installed specifier
        assert_eq!(outcome.lines[0], "uvicorn==0.24.0");
    }

    #[test]
    fn test_pin_preserves_order_and_duplicates() {
        let content = "requests\nflask\nrequests\n";
        let outcome = pin_lines(&lines(content), &installed());
        assert_eq!(
            outcome.lines,
            vec![
                "requests==2.31.0",
                "Flask==2.0.1",
                "requests==2.31.0",
                ""
            ]
        );
        assert_eq!(outcome.changes.len(), 3);
    }

    #[test]
    fn test_pin_is_idempotent() {
        let first = pin_lines(&lines("requests  # http client\nflask\n"), &installed());
        let second = pin_lines(&first.lines, &installed());
        assert_eq!(first.lines, second.lines);
        assert!(second.changes.is_empty());
    }

    #[test]
    fn test_pin_preserves_blank_and_comment_lines() {
        let content = "# prod deps\n\nrequests\n\n# end\n";
        let outcome = pin_lines(&lines(content), &installed());
        assert_eq!(
            join_lines(&outcome.lines),
            "# prod deps\n\nrequests==2.31.0\n\n# end\n"
        );
    }

    #[test]
    fn test_read_manifest_missing_is_not_found() {
        let temp = tempfile::tempdir().unwrap();
        let err = read_manifest(&temp.path().join("requirements.txt")).unwrap_err();
        assert!(matches!(err, ManifestError::NotFound { .. }));
    }

    #[test]
    fn test_write_then_read_round_trip() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("requirements.txt");
        write_manifest(&path, "requests==2.31.0\n").unwrap();
        assert_eq!(read_manifest(&path).unwrap(), "requests==2.31.0\n");
    }
}
