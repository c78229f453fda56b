//! Configuration options for structure analysis

use crate::structure::ArraySampling;

/// Highest accepted `max_depth`; parsing recurses once per nesting level
pub const MAX_DEPTH_CEILING: usize = 4096;

/// Analysis configuration options
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    /// Maximum nesting depth of any field
    pub max_depth: usize,
    /// Which array elements are visited
    pub array_sampling: ArraySampling,
    /// Maximum input size in bytes, checked before reading a file
    pub max_file_size: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            max_depth: 1000,
            array_sampling: ArraySampling::Every,
            max_file_size: 100 * 1024 * 1024, // 100MB
        }
    }
}

impl AnalysisConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Only look at the first element of every array
    pub fn quick_scan() -> Self {
        Self {
            array_sampling: ArraySampling::First,
            ..Default::default()
        }
    }

    /// Set maximum nesting depth
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Set array sampling mode
    pub fn with_array_sampling(mut self, sampling: ArraySampling) -> Self {
        self.array_sampling = sampling;
        self
    }

    /// Set maximum input size
    pub fn with_max_file_size(mut self, limit_bytes: usize) -> Self {
        self.max_file_size = limit_bytes;
        self
    }

    /// Validate configuration consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.max_depth == 0 {
            return Err("Max depth must be at least 1".to_string());
        }

        if self.max_depth > MAX_DEPTH_CEILING {
            return Err(format!("Max depth must be at most {}", MAX_DEPTH_CEILING));
        }

        if self.max_file_size < 1024 {
            return Err("Max file size must be at least 1KB".to_string());
        }

        Ok(())
    }
}
