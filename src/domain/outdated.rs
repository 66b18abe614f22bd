//! Parsing of `pip list --outdated` tabular output
//!
//! The table carries a two-line header followed by one row per package:
//!
//! ```text
//! Package Version Latest Type
//! ------- ------- ------ -----
//! Flask   2.0.1   2.3.2  wheel
//! ```
//!
//! Rows that do not split into exactly four fields are dropped per-row, so
//! format drift never aborts the stage; the drop count is reported back to
//! the caller as a warning.

/// One row of the outdated-package table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutdatedPackage {
    /// Package name as reported by pip (original case)
    pub name: String,
    /// Currently installed version
    pub current: String,
    /// Latest available version
    pub latest: String,
    /// Distribution type (wheel/sdist)
    pub kind: String,
}

/// Parsed outdated table, with the count of unparseable rows
#[derive(Debug, Clone, Default)]
pub struct OutdatedReport {
    /// Successfully parsed rows
    pub packages: Vec<OutdatedPackage>,
    /// Non-empty rows dropped for having the wrong field count
    pub skipped_rows: usize,
}

/// Parse `pip list --outdated` output.
///
/// Output with two lines or fewer means nothing is outdated.
pub fn parse_outdated_table(output: &str) -> OutdatedReport {
    let mut report = OutdatedReport::default();

    let lines: Vec<&str> = output.trim().lines().collect();
    if lines.len() <= 2 {
        return report;
    }

    for line in &lines[2..] {
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split_whitespace().collect();
        if let [name, current, latest, kind] = fields[..] {
            report.packages.push(OutdatedPackage {
                name: name.to_string(),
                current: current.to_string(),
                latest: latest.to_string(),
                kind: kind.to_string(),
            });
        } else {
            report.skipped_rows += 1;
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Package Version Latest Type
------- ------- ------ -----
Flask   2.0.1   2.3.2  wheel
requests 2.28.0 2.31.0 wheel
";

    #[test]
    fn test_parse_sample_table() {
        let report = parse_outdated_table(SAMPLE);
        assert_eq!(report.packages.len(), 2);
        assert_eq!(report.skipped_rows, 0);

        let flask = &report.packages[0];
        assert_eq!(flask.name, "Flask");
        assert_eq!(flask.current, "2.0.1");
        assert_eq!(flask.latest, "2.3.2");
        assert_eq!(flask.kind, "wheel");
    }

    #[test]
    fn test_parse_empty_output() {
        let report = parse_outdated_table("");
        assert!(report.packages.is_empty());
        assert_eq!(report.skipped_rows, 0);
    }

    #[test]
    fn test_parse_header_only_means_up_to_date() {
        let report = parse_outdated_table("Package Version Latest Type\n------- ------- ------ -----\n");
        assert!(report.packages.is_empty());
    }

    #[test]
    fn test_parse_counts_malformed_rows() {
        let drifted = "\
Package Version Latest Type
------- ------- ------ -----
Flask 2.0.1 2.3.2 wheel
broken-row-with-two fields
another broken row of five fields
";
        let report = parse_outdated_table(drifted);
        assert_eq!(report.packages.len(), 1);
        assert_eq!(report.skipped_rows, 2);
    }

    #[test]
    fn test_parse_ignores_blank_rows() {
        let with_blank = "\
Package Version Latest Type
------- ------- ------ -----
Flask 2.0.1 2.3.2 wheel

";
        let report = parse_outdated_table(with_blank);
        assert_eq!(report.packages.len(), 1);
        assert_eq!(report.skipped_rows, 0);
    }
}
