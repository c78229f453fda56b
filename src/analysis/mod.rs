//! Structure analysis module
//!
//! Configuration, input limits, per-file statistics, and the engine that ties
//! parsing, extraction and aggregation together.

pub mod batch;
pub mod config;
pub mod engine;
pub mod limits;
pub mod stats;

pub use batch::{BatchAnalysis, BatchFailure};
pub use config::AnalysisConfig;
pub use engine::{AnalysisEngine, FileAnalysis};
pub use stats::StructureStatistics;
