use crate::analysis::config::AnalysisConfig;
use crate::error::{AnalysisError, AnalysisResult};
use crate::parser::JsonSource;

/// Check the source size before attempting to read or parse the JSON.
/// This avoids loading very large files into memory if the configured
/// limit is smaller than the file.
pub fn check_source_size_before_read(
    source: &JsonSource,
    config: &AnalysisConfig,
) -> AnalysisResult<()> {
    if let Some(size) = source.estimated_size() {
        if size > config.max_file_size as u64 {
            return Err(AnalysisError::FileTooLarge {
                size: size as usize,
                limit: config.max_file_size,
            });
        }
    }

    Ok(())
}
