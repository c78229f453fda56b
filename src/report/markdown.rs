//! Markdown rendering for structure and consistency reports

use crate::aggregate::{ConsistencyEntry, ConsistencyReport};
use crate::analysis::{BatchFailure, FileAnalysis};
use crate::structure::FieldRecord;

/// Number of file names listed before abbreviating
const FILE_LIST_PREVIEW: usize = 2;

/// Render the structure report for one document
pub fn render_file_report(analysis: &FileAnalysis) -> String {
    let stats = &analysis.stats;
    let mut lines = vec![
        format!("# JSON Structure Report: {}", analysis.id()),
        String::new(),
        format!("- Fields: {}", stats.field_count),
        format!("- Max depth: {}", stats.max_depth),
        String::new(),
        "## Type Counts".to_string(),
        String::new(),
        "| Type | Count |".to_string(),
        "| ---- | ----- |".to_string(),
    ];

    for (tag, count) in &stats.type_counts {
        lines.push(format!("| {} | {} |", tag, count));
    }

    lines.extend([
        String::new(),
        "## Fields".to_string(),
        String::new(),
        "| Depth | Path | Type |".to_string(),
        "| ----- | ---- | ---- |".to_string(),
    ]);

    let mut sorted: Vec<&FieldRecord> = analysis.structure.records.iter().collect();
    sorted.sort_by(|a, b| a.depth.cmp(&b.depth).then_with(|| a.path.cmp(&b.path)));
    for record in sorted {
        lines.push(format!(
            "| {} | {} | {} |",
            record.depth,
            escape_cell(&record.path),
            record.field_type
        ));
    }

    lines.extend([
        String::new(),
        "## Tree".to_string(),
        String::new(),
        "```".to_string(),
    ]);
    for record in &analysis.structure.records {
        lines.push(format!(
            "{}├── {} ({})",
            "  ".repeat(record.depth),
            record.name,
            record.field_type
        ));
    }
    lines.push("```".to_string());

    lines.join("\n") + "\n"
}

/// Render the cross-file consistency report
pub fn render_consistency_report(report: &ConsistencyReport, failures: &[BatchFailure]) -> String {
    let mut lines = vec!["# JSON Field Consistency Report".to_string(), String::new()];

    if report.is_empty() {
        lines.push("No fields found.".to_string());
        push_failures(&mut lines, failures);
        return lines.join("\n") + "\n";
    }

    lines.extend([
        "## Summary".to_string(),
        String::new(),
        format!("- Files analyzed: {}", report.file_count),
        format!("- Fields: {}", report.entries.len()),
        format!("- Consistent fields: {}", report.consistent_count()),
        format!("- Conflicting fields: {}", report.conflicts.len()),
        format!("- Coverage gaps: {}", report.coverage_gaps.len()),
    ]);
    if !failures.is_empty() {
        lines.push(format!("- Failed files: {}", failures.len()));
    }

    lines.extend([String::new(), "## Depth Consistency".to_string(), String::new()]);
    match report.max_depths.values().next() {
        Some(depth) if report.is_depth_consistent() => {
            lines.push(format!("All files reach a maximum depth of {}.", depth));
        }
        _ => {
            lines.push("| File | Max Depth |".to_string());
            lines.push("| ---- | --------- |".to_string());
            for id in &report.files {
                let depth = report.max_depths.get(id).copied().unwrap_or(0);
                lines.push(format!("| {} | {} |", escape_cell(id), depth));
            }
        }
    }

    lines.extend([
        String::new(),
        "## All Fields".to_string(),
        String::new(),
        "| Depth | Path | Types | Consistent | Files |".to_string(),
        "| ----- | ---- | ----- | ---------- | ----- |".to_string(),
    ]);
    for entry in &report.entries {
        let types = entry
            .observed_types
            .iter()
            .map(|t| t.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        lines.push(format!(
            "| {} | {} | {} | {} | {} |",
            entry.depth,
            escape_cell(&entry.path),
            types,
            if entry.is_consistent() { "yes" } else { "no" },
            file_summary(entry, report.file_count)
        ));
    }

    if !report.conflicts.is_empty() {
        lines.extend([String::new(), "## Type Conflicts".to_string()]);
        for entry in report.entries.iter().filter(|e| !e.is_consistent()) {
            lines.extend([
                String::new(),
                format!("### {} (depth {})", entry.path, entry.depth),
                String::new(),
                "| Type | Files |".to_string(),
                "| ---- | ----- |".to_string(),
            ]);
            for (tag, files) in &entry.files_per_type {
                let names: Vec<&str> = files.iter().map(String::as_str).collect();
                lines.push(format!("| {} | {} |", tag, escape_cell(&names.join(", "))));
            }
        }
    }

    if !report.coverage_gaps.is_empty() {
        lines.extend([
            String::new(),
            "## Coverage Gaps".to_string(),
            String::new(),
            "| Path | Present In | Missing From |".to_string(),
            "| ---- | ---------- | ------------ |".to_string(),
        ]);
        for gap in &report.coverage_gaps {
            lines.push(format!(
                "| {} | {}/{} | {} |",
                escape_cell(&gap.path),
                gap.present_in,
                report.file_count,
                escape_cell(&abbreviate(&gap.missing_from))
            ));
        }
    }

    push_failures(&mut lines, failures);
    lines.join("\n") + "\n"
}

fn push_failures(lines: &mut Vec<String>, failures: &[BatchFailure]) {
    if failures.is_empty() {
        return;
    }

    lines.extend([
        String::new(),
        "## Failed Files".to_string(),
        String::new(),
        "| File | Error |".to_string(),
        "| ---- | ----- |".to_string(),
    ]);
    for failure in failures {
        lines.push(format!(
            "| {} | {} |",
            escape_cell(&failure.id),
            escape_cell(&failure.message)
        ));
    }
}

/// Which files contain a path, grouped by type for conflicting paths
fn file_summary(entry: &ConsistencyEntry, file_count: usize) -> String {
    if entry.is_consistent() {
        if entry.present_in == file_count {
            return format!("all {} files", file_count);
        }
        let files: Vec<String> = entry.files().into_iter().map(str::to_string).collect();
        return escape_cell(&abbreviate(&files));
    }

    entry
        .files_per_type
        .iter()
        .map(|(tag, files)| {
            let files: Vec<String> = files.iter().cloned().collect();
            format!("{}: {}", tag, escape_cell(&abbreviate(&files)))
        })
        .collect::<Vec<_>>()
        .join("<br>")
}

/// `a, b` or `a, b and 3 more`
fn abbreviate(files: &[String]) -> String {
    if files.len() <= FILE_LIST_PREVIEW {
        return files.join(", ");
    }
    format!(
        "{} and {} more",
        files[..FILE_LIST_PREVIEW].join(", "),
        files.len() - FILE_LIST_PREVIEW
    )
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}
