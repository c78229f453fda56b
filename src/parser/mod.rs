//! JSON input sources and parsing

pub mod directory;
pub mod filter;
pub mod nesting;

use crate::error::{AnalysisResult, ParseError, ParseResult};
use serde::Deserialize;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Source for parsing operations
#[derive(Debug, Clone, PartialEq)]
pub enum JsonSource {
    /// Raw JSON string input
    String(String),
    /// Single JSON file path
    File(PathBuf),
    /// Standard input stream
    Stdin,
}

impl JsonSource {
    /// Parse JSON from this source, rejecting values nested deeper than
    /// `max_depth`
    pub fn parse(&self, max_depth: usize) -> AnalysisResult<serde_json::Value> {
        parse_with_depth_limit(&self.read()?, max_depth)
    }

    fn read(&self) -> ParseResult<String> {
        match self {
            JsonSource::String(content) => Ok(content.clone()),
            JsonSource::File(path) => read_file(path),
            JsonSource::Stdin => read_stdin(),
        }
    }

    /// Identifier used for this source in reports
    pub fn default_id(&self) -> String {
        match self {
            JsonSource::String(_) => "input".to_string(),
            JsonSource::File(path) => file_stem(path),
            JsonSource::Stdin => "stdin".to_string(),
        }
    }

    /// Get a human-readable description of the source
    pub fn description(&self) -> String {
        match self {
            JsonSource::String(_) => "string input".to_string(),
            JsonSource::File(path) => format!("file: {}", path.display()),
            JsonSource::Stdin => "standard input".to_string(),
        }
    }

    /// Get the size of the source in bytes, if known before reading
    pub fn estimated_size(&self) -> Option<u64> {
        match self {
            JsonSource::String(s) => Some(s.len() as u64),
            JsonSource::File(path) => std::fs::metadata(path).ok().map(|m| m.len()),
            JsonSource::Stdin => None,
        }
    }
}

/// File name without directory and extension
pub fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Parse JSON text nested at most `max_depth` levels below the root.
///
/// Nesting is checked on the raw text first, so the parser's recursion
/// limit can be lifted and deep documents fail with `DepthExceeded` rather
/// than a syntax error.
fn parse_with_depth_limit(content: &str, max_depth: usize) -> AnalysisResult<serde_json::Value> {
    let trimmed = non_empty(content)?;
    nesting::check_nesting(trimmed, max_depth)?;

    let mut deserializer = serde_json::Deserializer::from_str(trimmed);
    deserializer.disable_recursion_limit();
    let value = serde_json::Value::deserialize(&mut deserializer).map_err(ParseError::from)?;
    deserializer.end().map_err(ParseError::from)?;
    Ok(value)
}

fn non_empty(content: &str) -> ParseResult<&str> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(ParseError::new("Empty JSON input".to_string(), None));
    }
    Ok(trimmed)
}

fn read_file(path: &Path) -> ParseResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| ParseError::new(format!("Failed to read file: {}", e), None))
}

fn read_stdin() -> ParseResult<String> {
    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .map_err(|e| ParseError::new(format!("Failed to read stdin: {}", e), None))?;
    Ok(buffer)
}
