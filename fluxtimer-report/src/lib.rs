#![warn(missing_docs)]
//! FluxTimer Report - Result Presentation
//!
//! Turns runner output into a [`Report`] and renders it as:
//! - JSON (machine-readable)
//! - Human-readable duration strings for terminal output

mod format;
mod json;
mod report;

pub use format::format_duration;
pub use json::generate_json_report;
pub use report::{CandidateResult, Report, ReportMeta, SCHEMA_VERSION};

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON with full schema
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
