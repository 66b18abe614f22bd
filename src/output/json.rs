//! JSON output formatter for machine processing
//!
//! Serializes the run report directly; the schema is the `RunReport`
//! structure with snake_case enum values.

use crate::domain::RunReport;
use crate::output::ReportFormatter;
use std::io::Write;

/// JSON formatter for machine-readable output
#[derive(Debug, Default)]
pub struct JsonFormatter;

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new() -> Self {
        Self
    }
}

impl ReportFormatter for JsonFormatter {
    fn format(&self, report: &RunReport, writer: &mut dyn Write) -> std::io::Result<()> {
        serde_json::to_writer_pretty(&mut *writer, report)?;
        writeln!(writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PinChange, UpgradeOutcome, VenvStatus};

    #[test]
    fn test_json_schema() {
        let mut report = RunReport::new(true);
        report.venv = VenvStatus::WouldCreate;
        report.upgrade = UpgradeOutcome::Skipped;
        report.pinned.push(PinChange {
            name: "requests".to_string(),
            spec: "requests==2.31.0".to_string(),
        });

        let mut buf = Vec::new();
        JsonFormatter::new().format(&report, &mut buf).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();

        assert_eq!(value["dry_run"], true);
        assert_eq!(value["venv"], "would_create");
        assert_eq!(value["upgrade"], "skipped");
        assert_eq!(value["pinned"][0]["name"], "requests");
        assert_eq!(value["pinned"][0]["spec"], "requests==2.31.0");
    }

    #[test]
    fn test_json_output_ends_with_newline() {
        let report = RunReport::new(false);
        let mut buf = Vec::new();
        JsonFormatter::new().format(&report, &mut buf).unwrap();
        assert_eq!(buf.last(), Some(&b'\n'));
    }
}
