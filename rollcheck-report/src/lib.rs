#![warn(missing_docs)]
//! rollcheck Report - Reporting
//!
//! Serializable report model for a roll-log analysis plus its output formats:
//! - JSON (machine-readable)
//! - Human-readable terminal text (rendered by the CLI)

mod histogram;
mod json;
mod report;

pub use histogram::histogram;
pub use json::{generate_json_report, parse_json_report};
pub use report::{
    BootstrapReport, ComparisonReport, DatasetSummary, DecisionLabel, FaceCount, Findings,
    GroupDescriptives, HistogramBin, Report, ReportConfig, ReportMeta, SCHEMA_VERSION,
    TestOutcome, UniformityReport,
};

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Pretty-printed JSON
    Json,
    /// Human-readable terminal output
    Human,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "human" | "text" => Ok(OutputFormat::Human),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}
