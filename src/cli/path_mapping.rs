use std::path::{Path, PathBuf};

use crate::report::ReportFormat;

/// File name of the cross-file consistency report
pub const CONSISTENCY_REPORT_STEM: &str = "field_consistency_analysis";

/// Subdirectory for per-file reports written alongside a consistency report
pub const PER_FILE_DIR: &str = "files";

/// Map a document id to its report path under `output_dir`.
/// Ids containing `/` (files found recursively) keep their directory
/// structure: `sub/b` maps to `output_dir/sub/b_analysis.md`.
pub fn map_id_to_report(output_dir: &Path, id: &str, format: ReportFormat) -> PathBuf {
    output_dir.join(format!("{}_analysis.{}", id, format.extension()))
}

/// Per-file report path in folder mode. These live under [`PER_FILE_DIR`]
/// so no document id can map onto the consistency report.
pub fn map_id_to_folder_report(output_dir: &Path, id: &str, format: ReportFormat) -> PathBuf {
    map_id_to_report(&output_dir.join(PER_FILE_DIR), id, format)
}

/// Path of the consistency report under `output_dir`
pub fn consistency_report_path(output_dir: &Path, format: ReportFormat) -> PathBuf {
    output_dir.join(format!("{}.{}", CONSISTENCY_REPORT_STEM, format.extension()))
}
