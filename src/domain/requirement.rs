//! Requirement line classification
//!
//! The manifest is treated as an ordered sequence of opaque lines. Each line
//! is classified without building a structured representation, so rewrites
//! can never lose comments, blank lines, or formatting.

use regex::Regex;
use std::sync::LazyLock;

/// Captures the package name, with an optional bracketed extras suffix.
/// Comments, editable installs, and URL requirements do not match.
static PACKAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([A-Za-z0-9_-]+(?:\[[A-Za-z0-9_,-]+\])?)\s*").unwrap());

/// Classification of a single manifest line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequirementLine {
    /// Whitespace only
    Blank,
    /// Full-line comment
    Comment,
    /// Dependency specifier carrying an exact-version marker
    Pinned { name: String },
    /// Dependency specifier without an exact-version marker
    Unpinned { name: String },
    /// Anything else (URL requirements, pip options, continuation lines)
    Other,
}

impl RequirementLine {
    /// The captured package name, if this line is a dependency specifier
    pub fn name(&self) -> Option<&str> {
        match self {
            RequirementLine::Pinned { name } | RequirementLine::Unpinned { name } => Some(name),
            _ => None,
        }
    }
}

/// Classify a single manifest line.
///
/// A line is "unpinned" when it matches the package pattern and contains no
/// `==` marker anywhere, matching pip's exact-version syntax.
pub fn classify(line: &str) -> RequirementLine {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return RequirementLine::Blank;
    }
    if trimmed.starts_with('#') {
        return RequirementLine::Comment;
    }

    match PACKAGE_RE.captures(line) {
        Some(caps) => {
            let name = caps[1].to_string();
            if line.contains("==") {
                RequirementLine::Pinned { name }
            } else {
                RequirementLine::Unpinned { name }
            }
        }
        None => RequirementLine::Other,
    }
}

/// Normalize a captured package name to its identity key:
/// lowercased, with any `[extras]` suffix stripped.
pub fn identity_key(name: &str) -> String {
    let lowered = name.to_lowercase();
    match lowered.split_once('[') {
        Some((base, _)) => base.to_string(),
        None => lowered,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_blank() {
        assert_eq!(classify(""), RequirementLine::Blank);
        assert_eq!(classify("   "), RequirementLine::Blank);
        assert_eq!(classify("\t"), RequirementLine::Blank);
    }

    #[test]
    fn test_classify_comment() {
        assert_eq!(classify("# a comment"), RequirementLine::Comment);
        assert_eq!(classify("  # indented comment"), RequirementLine::Comment);
    }

    #[test]
    fn test_classify_unpinned() {
        let line = classify("requests");
        assert_eq!(
            line,
            RequirementLine::Unpinned {
                name: "requests".to_string()
            }
        );
        assert_eq!(line.name(), Some("requests"));
    }

    #[test]
    fn test_classify_unpinned_with_leading_whitespace() {
        assert_eq!(
            classify("  requests  # pinned above"),
            RequirementLine::Unpinned {
                name: "requests".to_string()
            }
        );
    }

    #[test]
    fn test_classify_unpinned_with_extras() {
        assert_eq!(
            classify("uvicorn[standard]"),
            RequirementLine::Unpinned {
                name: "uvicorn[standard]".to_string()
            }
        );
    }

    #[test]
    fn test_classify_unpinned_with_range_constraint() {
        // >= is not an exact-version marker
        assert_eq!(
            classify("Flask>=2.0"),
            RequirementLine::Unpinned {
                name: "Flask".to_string()
            }
        );
    }

    #[test]
    fn test_classify_pinned() {
        assert_eq!(
            classify("requests==2.31.0"),
            RequirementLine::Pinned {
                name: "requests".to_string()
            }
        );
    }

    #[test]
    fn test_classify_pinned_with_extras_and_comment() {
        assert_eq!(
            classify("celery[redis]==5.3.4  # task queue"),
            RequirementLine::Pinned {
                name: "celery[redis]".to_string()
            }
        );
    }

    #[test]
    fn test_classify_url_requirement_is_other() {
        assert_eq!(
            classify("git+https://example.com/repo.git"),
            RequirementLine::Other
        );
    }

    #[test]
    fn test_identity_key_lowercases() {
        assert_eq!(identity_key("Flask"), "flask");
        assert_eq!(identity_key("SQLAlchemy"), "sqlalchemy");
    }

    #[test]
    fn test_identity_key_strips_extras() {
        assert_eq!(identity_key("uvicorn[standard]"), "uvicorn");
        assert_eq!(identity_key("celery[redis,msgpack]"), "celery");
    }
}
