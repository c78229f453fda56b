//! Cross-file structure comparison
//!
//! Merges the [`FileStructure`]s of several documents into one view per
//! path, flagging paths whose type differs between files (type conflicts) and
//! paths that only some files contain (coverage gaps). Entries are ordered
//! lexicographically by path, so the report does not depend on the order in
//! which files were added.

use crate::error::{AnalysisError, AnalysisResult};
use crate::structure::{FileStructure, TypeTag};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// Union view of one path across all analyzed files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsistencyEntry {
    pub path: String,
    pub depth: usize,
    pub observed_types: BTreeSet<TypeTag>,
    pub files_per_type: BTreeMap<TypeTag, BTreeSet<String>>,
    /// Number of files containing the path
    pub present_in: usize,
}

impl ConsistencyEntry {
    fn new(path: String, depth: usize) -> Self {
        Self {
            path,
            depth,
            observed_types: BTreeSet::new(),
            files_per_type: BTreeMap::new(),
            present_in: 0,
        }
    }

    pub fn is_consistent(&self) -> bool {
        self.observed_types.len() == 1
    }

    /// All files containing the path, sorted
    pub fn files(&self) -> BTreeSet<&str> {
        self.files_per_type
            .values()
            .flatten()
            .map(String::as_str)
            .collect()
    }
}

/// A path missing from some of the analyzed files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageGap {
    pub path: String,
    pub present_in: usize,
    pub missing_from: Vec<String>,
}

/// Result of one aggregation pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsistencyReport {
    pub file_count: usize,
    /// File identifiers in the order they were added
    pub files: Vec<String>,
    pub entries: Vec<ConsistencyEntry>,
    /// Paths observed with more than one type
    pub conflicts: Vec<String>,
    pub coverage_gaps: Vec<CoverageGap>,
    /// Deepest nesting level per file
    pub max_depths: BTreeMap<String, usize>,
}

impl ConsistencyReport {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entry(&self, path: &str) -> Option<&ConsistencyEntry> {
        self.entries
            .binary_search_by(|e| e.path.as_str().cmp(path))
            .ok()
            .map(|i| &self.entries[i])
    }

    pub fn consistent_count(&self) -> usize {
        self.entries.len() - self.conflicts.len()
    }

    /// True when every file reaches the same maximum depth
    pub fn is_depth_consistent(&self) -> bool {
        let depths: BTreeSet<usize> = self.max_depths.values().copied().collect();
        depths.len() <= 1
    }
}

/// Accumulates file structures into a [`ConsistencyReport`]
#[derive(Debug, Default)]
pub struct StructureAggregator {
    entries: BTreeMap<String, ConsistencyEntry>,
    files: Vec<String>,
    file_paths: Vec<HashSet<String>>,
    max_depths: BTreeMap<String, usize>,
}

impl StructureAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one file's records into the running view.
    ///
    /// File ids key the per-file views, so an id that was already added is
    /// rejected and the aggregation is left unchanged.
    pub fn add(&mut self, structure: &FileStructure) -> AnalysisResult<()> {
        if self.max_depths.contains_key(&structure.id) {
            return Err(AnalysisError::duplicate_id(structure.id.as_str()));
        }

        let mut seen = HashSet::with_capacity(structure.len());

        for record in &structure.records {
            let entry = self
                .entries
                .entry(record.path.clone())
                .or_insert_with(|| ConsistencyEntry::new(record.path.clone(), record.depth));

            entry.observed_types.insert(record.field_type);
            entry
                .files_per_type
                .entry(record.field_type)
                .or_default()
                .insert(structure.id.clone());

            if seen.insert(record.path.clone()) {
                entry.present_in += 1;
            }
        }

        self.files.push(structure.id.clone());
        self.file_paths.push(seen);
        self.max_depths
            .insert(structure.id.clone(), structure.max_depth());
        Ok(())
    }

    pub fn finish(self) -> ConsistencyReport {
        let file_count = self.files.len();

        let coverage_gaps = self
            .entries
            .values()
            .filter(|entry| entry.present_in < file_count)
            .map(|entry| CoverageGap {
                path: entry.path.clone(),
                present_in: entry.present_in,
                missing_from: self
                    .files
                    .iter()
                    .zip(&self.file_paths)
                    .filter(|(_, paths)| !paths.contains(&entry.path))
                    .map(|(id, _)| id.clone())
                    .collect(),
            })
            .collect();

        let conflicts = self
            .entries
            .values()
            .filter(|entry| !entry.is_consistent())
            .map(|entry| entry.path.clone())
            .collect();

        ConsistencyReport {
            file_count,
            files: self.files,
            entries: self.entries.into_values().collect(),
            conflicts,
            coverage_gaps,
            max_depths: self.max_depths,
        }
    }
}

/// Aggregate a batch of file structures in one pass
pub fn aggregate<'a, I>(structures: I) -> AnalysisResult<ConsistencyReport>
where
    I: IntoIterator<Item = &'a FileStructure>,
{
    let mut aggregator = StructureAggregator::new();
    for structure in structures {
        aggregator.add(structure)?;
    }
    Ok(aggregator.finish())
}
