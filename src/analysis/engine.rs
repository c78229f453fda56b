//! Core analysis engine: source -> parsed value -> structure + statistics

use crate::analysis::config::AnalysisConfig;
use crate::analysis::limits;
use crate::analysis::stats::StructureStatistics;
use crate::error::AnalysisResult;
use crate::parser::JsonSource;
use crate::structure::{FileStructure, StructureExtractor};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;

/// Analysis result for one document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileAnalysis {
    pub structure: FileStructure,
    pub stats: StructureStatistics,
}

impl FileAnalysis {
    pub fn id(&self) -> &str {
        &self.structure.id
    }
}

/// Main analysis engine
#[derive(Debug, Clone)]
pub struct AnalysisEngine {
    config: AnalysisConfig,
    extractor: StructureExtractor,
}

impl Default for AnalysisEngine {
    fn default() -> Self {
        Self::new(AnalysisConfig::default())
    }
}

impl AnalysisEngine {
    /// Create a new analysis engine
    pub fn new(config: AnalysisConfig) -> Self {
        let extractor = StructureExtractor::from_config(&config);
        Self { config, extractor }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Analyze an already parsed document
    pub fn analyze_value(&self, id: &str, value: &Value) -> AnalysisResult<FileAnalysis> {
        let start_time = Instant::now();
        let structure = self.extractor.extract(id, value)?;
        let stats = StructureStatistics::for_structure(&structure, start_time.elapsed());

        tracing::debug!(
            file = id,
            fields = stats.field_count,
            max_depth = stats.max_depth,
            "extracted structure"
        );

        Ok(FileAnalysis { structure, stats })
    }

    /// Read, parse and analyze a source
    pub fn analyze_source(&self, id: &str, source: &JsonSource) -> AnalysisResult<FileAnalysis> {
        // Check source size before reading to avoid loading very large files
        limits::check_source_size_before_read(source, &self.config)?;

        let value = source.parse(self.extractor.max_depth())?;
        self.analyze_value(id, &value)
    }

    /// Parse and analyze a JSON string
    pub fn analyze_str(&self, id: &str, json: &str) -> AnalysisResult<FileAnalysis> {
        self.analyze_source(id, &JsonSource::String(json.to_string()))
    }
}
