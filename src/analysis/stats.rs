//! Statistics for analyzed documents

use crate::structure::{FileStructure, TypeTag};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// Summary figures for one analyzed document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructureStatistics {
    /// Number of field records
    pub field_count: usize,
    /// Deepest nesting level reached
    pub max_depth: usize,
    /// Records per type
    pub type_counts: BTreeMap<TypeTag, usize>,
    /// Extraction time in milliseconds
    pub processing_time_ms: u64,
    /// Timestamp of when statistics were collected
    pub collected_at: chrono::DateTime<chrono::Utc>,
}

impl StructureStatistics {
    /// Compute statistics for an extracted structure
    pub fn for_structure(structure: &FileStructure, processing_time: Duration) -> Self {
        Self {
            field_count: structure.len(),
            max_depth: structure.max_depth(),
            type_counts: structure.type_counts(),
            processing_time_ms: processing_time.as_millis() as u64,
            collected_at: chrono::Utc::now(),
        }
    }

    pub fn count_of(&self, tag: TypeTag) -> usize {
        self.type_counts.get(&tag).copied().unwrap_or(0)
    }

    /// Get a formatted summary
    pub fn summary(&self) -> String {
        format!(
            "{} fields, max depth {}",
            self.field_count, self.max_depth
        )
    }

    /// Export to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
