//! Output formatting for run reports
//!
//! This module provides:
//! - Text output for human-readable display
//! - JSON output for machine processing

mod json;
mod text;

pub use json::JsonFormatter;
pub use text::{TextFormatter, VersionChangeType};

use crate::domain::RunReport;
use std::io::Write;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output for machine processing
    Json,
}

/// Output verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Minimal output
    Quiet,
    /// Normal output
    #[default]
    Normal,
    /// Detailed output with additional information
    Verbose,
}

/// Configuration for output formatting
#[derive(Debug, Clone, Copy)]
pub struct OutputConfig {
    /// Output format
    pub format: OutputFormat,
    /// Verbosity level
    pub verbosity: Verbosity,
}

impl OutputConfig {
    /// Create configuration from CLI arguments
    pub fn from_cli(json: bool, verbose: bool, quiet: bool) -> Self {
        let format = if json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        };

        let verbosity = if quiet {
            Verbosity::Quiet
        } else if verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        };

        Self { format, verbosity }
    }
}

/// Trait for run report formatters
pub trait ReportFormatter {
    /// Format and write the run report
    fn format(&self, report: &RunReport, writer: &mut dyn Write) -> std::io::Result<()>;
}

/// Create a formatter for the given configuration
pub fn create_formatter(config: OutputConfig) -> Box<dyn ReportFormatter> {
    match config.format {
        OutputFormat::Text => Box::new(TextFormatter::new(config.verbosity)),
        OutputFormat::Json => Box::new(JsonFormatter::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cli_defaults() {
        let config = OutputConfig::from_cli(false, false, false);
        assert_eq!(config.format, OutputFormat::Text);
        assert_eq!(config.verbosity, Verbosity::Normal);
    }

    #[test]
    fn test_from_cli_json() {
        let config = OutputConfig::from_cli(true, false, false);
        assert_eq!(config.format, OutputFormat::Json);
    }

    #[test]
    fn test_from_cli_quiet_wins() {
        let config = OutputConfig::from_cli(false, true, true);
        assert_eq!(config.verbosity, Verbosity::Quiet);
    }
}
