//! JSON structure analyzer
//!
//! Flattens JSON documents into field paths with types and nesting depth,
//! and compares those structures across files to find fields that are typed
//! inconsistently or missing from some files.

pub mod aggregate;
pub mod analysis;
pub mod cli;
pub mod error;
pub mod parser;
pub mod report;
pub mod structure;

// Re-export commonly used types
pub use aggregate::{aggregate, ConsistencyEntry, ConsistencyReport, CoverageGap, StructureAggregator};
pub use analysis::{AnalysisConfig, AnalysisEngine, BatchAnalysis, FileAnalysis};
pub use error::{AnalysisError, AnalysisResult, ParseError};
pub use parser::JsonSource;
pub use structure::{ArraySampling, FieldRecord, FileStructure, StructureExtractor, TypeTag};

/// Extract the structure of a parsed document with default configuration
pub fn extract_structure(id: &str, json: &serde_json::Value) -> AnalysisResult<FileStructure> {
    StructureExtractor::default().extract(id, json)
}

/// Extract and compare several parsed documents with default configuration.
///
/// Documents that exceed the depth limit or repeat an earlier id are
/// returned as errors alongside the report built from the others.
pub fn compare_structures<'a, I>(documents: I) -> (ConsistencyReport, Vec<(String, AnalysisError)>)
where
    I: IntoIterator<Item = (&'a str, &'a serde_json::Value)>,
{
    let extractor = StructureExtractor::default();
    let mut aggregator = StructureAggregator::new();
    let mut errors = Vec::new();

    for (id, value) in documents {
        let added = extractor
            .extract(id, value)
            .and_then(|structure| aggregator.add(&structure));
        if let Err(error) = added {
            errors.push((id.to_string(), error));
        }
    }

    (aggregator.finish(), errors)
}
