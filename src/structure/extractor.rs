//! Depth-first structure extraction
//!
//! Walks a parsed document with an explicit stack of container frames, so
//! pathological nesting is reported as [`AnalysisError::DepthExceeded`]
//! instead of exhausting the call stack.

use crate::analysis::config::AnalysisConfig;
use crate::error::{AnalysisError, AnalysisResult};
use crate::structure::path::{self, ROOT};
use crate::structure::{FieldRecord, FileStructure, TypeTag};
use serde_json::{map, Value};
use std::iter::{Enumerate, Take};
use std::slice;

/// Which array elements are visited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArraySampling {
    /// Visit every index
    #[default]
    Every,
    /// Visit only the first element of each array
    First,
}

/// Flattens a JSON value into ordered [`FieldRecord`]s
#[derive(Debug, Clone)]
pub struct StructureExtractor {
    max_depth: usize,
    sampling: ArraySampling,
}

impl Default for StructureExtractor {
    fn default() -> Self {
        Self::from_config(&AnalysisConfig::default())
    }
}

impl StructureExtractor {
    pub fn new(max_depth: usize, sampling: ArraySampling) -> Self {
        Self {
            max_depth,
            sampling,
        }
    }

    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self::new(config.max_depth, config.array_sampling)
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Extract the structure of `value`, labelled with `id`.
    ///
    /// A non-empty root object is described by its keys alone; any other root
    /// (scalar, array, empty object) gets a `$` record at depth 0.
    pub fn extract(&self, id: &str, value: &Value) -> AnalysisResult<FileStructure> {
        let mut records = Vec::new();

        let keyed_root = matches!(value, Value::Object(map) if !map.is_empty());
        if !keyed_root {
            records.push(FieldRecord::new(
                ROOT.to_string(),
                ROOT.to_string(),
                TypeTag::of(value),
                0,
            ));
        }

        let mut stack: Vec<Frame<'_>> = Frame::open(String::new(), 0, value, self.sampling)
            .into_iter()
            .collect();

        while let Some(frame) = stack.last_mut() {
            let Some(child) = frame.next_child() else {
                stack.pop();
                continue;
            };

            if child.depth > self.max_depth {
                return Err(AnalysisError::depth_exceeded(
                    child.path,
                    child.depth,
                    self.max_depth,
                ));
            }

            records.push(FieldRecord::new(
                child.path.clone(),
                child.name,
                TypeTag::of(child.value),
                child.depth,
            ));

            if let Some(next) = Frame::open(child.path, child.depth, child.value, self.sampling) {
                stack.push(next);
            }
        }

        Ok(FileStructure::new(id, records))
    }
}

struct Child<'a> {
    path: String,
    name: String,
    value: &'a Value,
    depth: usize,
}

/// A container whose children are still being visited
enum Frame<'a> {
    Object {
        path: String,
        depth: usize,
        entries: map::Iter<'a>,
    },
    Array {
        path: String,
        depth: usize,
        items: Take<Enumerate<slice::Iter<'a, Value>>>,
    },
}

impl<'a> Frame<'a> {
    /// Frame for a non-empty container, `None` for scalars and empty containers
    fn open(path: String, depth: usize, value: &'a Value, sampling: ArraySampling) -> Option<Self> {
        match value {
            Value::Object(map) if !map.is_empty() => Some(Frame::Object {
                path,
                depth,
                entries: map.iter(),
            }),
            Value::Array(items) if !items.is_empty() => {
                let limit = match sampling {
                    ArraySampling::Every => items.len(),
                    ArraySampling::First => 1,
                };
                Some(Frame::Array {
                    path,
                    depth,
                    items: items.iter().enumerate().take(limit),
                })
            }
            _ => None,
        }
    }

    fn next_child(&mut self) -> Option<Child<'a>> {
        match self {
            Frame::Object {
                path: parent,
                depth,
                entries,
            } => entries.next().map(|(key, value)| Child {
                path: path::child_key(parent, key),
                name: key.clone(),
                value,
                depth: *depth + 1,
            }),
            Frame::Array {
                path: parent,
                depth,
                items,
            } => items.next().map(|(index, value)| Child {
                path: path::child_index(parent, index),
                name: path::index_name(index),
                value,
                depth: *depth + 1,
            }),
        }
    }
}
