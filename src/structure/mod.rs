//! Structural model of a single JSON document
//!
//! A document is flattened into an ordered list of [`FieldRecord`]s, one per
//! reachable key or index position, each tagged with a [`TypeTag`] and its
//! nesting depth.

pub mod extractor;
pub mod path;

pub use extractor::{ArraySampling, StructureExtractor};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Closed set of JSON value kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeTag {
    Null,
    Boolean,
    Integer,
    Float,
    String,
    Array,
    Object,
}

impl TypeTag {
    /// Classify a JSON value.
    ///
    /// Numbers without a fractional component are integers, including
    /// floating-point literals such as `2.0`.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => TypeTag::Null,
            Value::Bool(_) => TypeTag::Boolean,
            Value::Number(n) => {
                if n.is_i64() || n.is_u64() {
                    TypeTag::Integer
                } else {
                    match n.as_f64() {
                        Some(f) if f.is_finite() && f.fract() == 0.0 => TypeTag::Integer,
                        _ => TypeTag::Float,
                    }
                }
            }
            Value::String(_) => TypeTag::String,
            Value::Array(_) => TypeTag::Array,
            Value::Object(_) => TypeTag::Object,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TypeTag::Null => "null",
            TypeTag::Boolean => "boolean",
            TypeTag::Integer => "integer",
            TypeTag::Float => "float",
            TypeTag::String => "string",
            TypeTag::Array => "array",
            TypeTag::Object => "object",
        }
    }

    pub fn is_container(&self) -> bool {
        matches!(self, TypeTag::Array | TypeTag::Object)
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One reachable position in a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRecord {
    /// Address from the document root, see [`path`]
    pub path: String,
    /// Last path segment, for display
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: TypeTag,
    /// Nesting level; the root is 0
    pub depth: usize,
}

impl FieldRecord {
    pub fn new(path: String, name: String, field_type: TypeTag, depth: usize) -> Self {
        Self {
            path,
            name,
            field_type,
            depth,
        }
    }
}

/// Ordered records for one source file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileStructure {
    pub id: String,
    pub records: Vec<FieldRecord>,
}

impl FileStructure {
    pub fn new(id: impl Into<String>, records: Vec<FieldRecord>) -> Self {
        Self {
            id: id.into(),
            records,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Deepest record depth, 0 for an empty structure
    pub fn max_depth(&self) -> usize {
        self.records.iter().map(|r| r.depth).max().unwrap_or(0)
    }

    /// Number of records per type
    pub fn type_counts(&self) -> BTreeMap<TypeTag, usize> {
        let mut counts = BTreeMap::new();
        for record in &self.records {
            *counts.entry(record.field_type).or_insert(0) += 1;
        }
        counts
    }

    pub fn get(&self, path: &str) -> Option<&FieldRecord> {
        self.records.iter().find(|r| r.path == path)
    }
}
