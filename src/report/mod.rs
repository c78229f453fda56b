//! Report rendering
//!
//! Turns analysis results into Markdown for people or pretty JSON for
//! other tools.

pub mod markdown;

pub use markdown::{render_consistency_report, render_file_report};

use crate::aggregate::ConsistencyReport;
use crate::analysis::{BatchFailure, FileAnalysis};
use serde::Serialize;

/// Output format for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Markdown,
    Json,
}

impl ReportFormat {
    /// File extension for reports in this format
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Markdown => "md",
            ReportFormat::Json => "json",
        }
    }
}

#[derive(Serialize)]
struct ConsistencyDocument<'a> {
    #[serde(flatten)]
    report: &'a ConsistencyReport,
    failures: &'a [BatchFailure],
}

/// Render a single-file report in the requested format
pub fn file_report(analysis: &FileAnalysis, format: ReportFormat) -> Result<String, serde_json::Error> {
    match format {
        ReportFormat::Markdown => Ok(render_file_report(analysis)),
        ReportFormat::Json => serde_json::to_string_pretty(analysis),
    }
}

/// Render a consistency report in the requested format
pub fn consistency_report(
    report: &ConsistencyReport,
    failures: &[BatchFailure],
    format: ReportFormat,
) -> Result<String, serde_json::Error> {
    match format {
        ReportFormat::Markdown => Ok(render_consistency_report(report, failures)),
        ReportFormat::Json => serde_json::to_string_pretty(&ConsistencyDocument { report, failures }),
    }
}
