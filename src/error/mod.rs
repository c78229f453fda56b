//! Error types for structure analysis

use std::fmt;
use std::path::PathBuf;

/// Main error type for analysis operations
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("Invalid JSON: {0}")]
    InvalidJson(#[from] ParseError),

    #[error("Nesting depth {depth} at '{path}' exceeds the limit of {limit}")]
    DepthExceeded {
        path: String,
        depth: usize,
        limit: usize,
    },

    #[error("JSON file too large: {size} bytes (limit: {limit} bytes)")]
    FileTooLarge { size: usize, limit: usize },

    #[error("IO error: {message}")]
    Io {
        message: String,
        path: Option<PathBuf>,
    },

    #[error("Invalid configuration: {message}")]
    Configuration { message: String },

    #[error("Duplicate document id '{id}'")]
    DuplicateId { id: String },
}

impl AnalysisError {
    pub fn depth_exceeded(path: String, depth: usize, limit: usize) -> Self {
        Self::DepthExceeded { path, depth, limit }
    }

    pub fn io(message: String, path: Option<PathBuf>) -> Self {
        Self::Io { message, path }
    }

    pub fn configuration(message: String) -> Self {
        Self::Configuration { message }
    }

    pub fn duplicate_id(id: impl Into<String>) -> Self {
        Self::DuplicateId { id: id.into() }
    }

    /// Create a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidJson(err) => match err.location {
                Some((line, col)) => format!(
                    "JSON parse error at line {}, column {}: {}",
                    line, col, err.message
                ),
                None => format!("JSON parse error: {}", err.message),
            },
            Self::DepthExceeded { path, depth, limit } => format!(
                "JSON nesting too deep: depth {} at '{}' (limit: {})",
                depth, path, limit
            ),
            Self::Io {
                message,
                path: Some(path),
            } => format!("{}: {}", path.display(), message),
            _ => self.to_string(),
        }
    }
}

/// JSON parsing errors
#[derive(Debug, Clone)]
pub struct ParseError {
    pub message: String,
    pub location: Option<(usize, usize)>,
}

impl ParseError {
    pub fn new(message: String, location: Option<(usize, usize)>) -> Self {
        Self { message, location }
    }
}

impl From<serde_json::Error> for ParseError {
    fn from(error: serde_json::Error) -> Self {
        // serde_json reports line 0 for errors that are not tied to input text
        let location = (error.line() > 0).then(|| (error.line(), error.column()));
        Self::new(error.to_string(), location)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ParseError {}

/// Result type for analysis operations
pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Convenience result type for parsing operations
pub type ParseResult<T> = Result<T, ParseError>;
