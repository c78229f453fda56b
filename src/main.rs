use anyhow::{Context, Result};
use clap::Parser;
use std::path::Path;
use tracing_subscriber::EnvFilter;

use jsonshape::analysis::AnalysisEngine;
use jsonshape::cli::path_mapping::{
    consistency_report_path, map_id_to_folder_report, map_id_to_report,
};
use jsonshape::cli::{handle_error, Args, CliConfig, CliUtils};
use jsonshape::error::AnalysisError;
use jsonshape::parser::directory::{find_json_files, unique_ids};
use jsonshape::parser::JsonSource;
use jsonshape::report;

fn main() -> Result<()> {
    let config = match CliConfig::from_args(Args::parse()) {
        Ok(config) => config,
        Err(error) => {
            handle_error(&error);
            std::process::exit(2);
        }
    };
    init_logging(config.is_verbose());

    let result = if let Some(folder) = config.args.folder.clone() {
        analyze_folder(&folder, &config)
    } else if let Some(file) = config.args.file.clone() {
        let source = JsonSource::File(file);
        analyze_single(&source, &config)
    } else {
        analyze_single(&JsonSource::Stdin, &config)
    };

    // Analysis errors get the friendly message and tips; anything else is
    // reported by anyhow
    if let Err(error) = result {
        match error.downcast_ref::<AnalysisError>() {
            Some(analysis_error) => {
                handle_error(analysis_error);
                std::process::exit(1);
            }
            None => return Err(error),
        }
    }
    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .ok();
}

fn analyze_single(source: &JsonSource, config: &CliConfig) -> Result<()> {
    let id = source.default_id();
    tracing::info!(source = %source.description(), "analyzing document");

    let engine = AnalysisEngine::new(config.analysis_config.clone());
    let analysis = engine.analyze_source(&id, source)?;

    CliUtils::show_info(
        &format!("Analyzed {}: {}", id, analysis.stats.summary()),
        config.is_quiet(),
    );

    let rendered = report::file_report(&analysis, config.format)?;
    let path = map_id_to_report(&config.args.output, &id, config.format);
    emit_report(&rendered, &path, config)
}

fn analyze_folder(folder: &Path, config: &CliConfig) -> Result<()> {
    let quiet = config.is_quiet();
    let json_files = find_json_files(folder, config.args.recursive)
        .with_context(|| format!("Failed finding JSON files in {}", folder.display()))?;

    if json_files.is_empty() {
        CliUtils::show_info(
            &format!("No JSON files found in {}", folder.display()),
            quiet,
        );
        return Ok(());
    }

    CliUtils::show_info(&format!("Found {} JSON files", json_files.len()), quiet);

    let ids = unique_ids(folder, &json_files);
    let sources: Vec<(String, JsonSource)> = ids
        .into_iter()
        .zip(json_files)
        .map(|(id, path)| (id, JsonSource::File(path)))
        .collect();

    let engine = AnalysisEngine::new(config.analysis_config.clone());
    let progress = CliUtils::create_progress_bar(sources.len() as u64, quiet);
    let batch = engine.analyze_batch_with(&sources, |_| progress.inc(1));
    progress.finish_and_clear();

    for failure in &batch.failures {
        CliUtils::show_error(&format!("{}: {}", failure.id, failure.message));
    }

    if config.args.per_file {
        for analysis in &batch.analyses {
            let rendered = report::file_report(analysis, config.format)?;
            let path = map_id_to_folder_report(&config.args.output, analysis.id(), config.format);
            emit_report(&rendered, &path, config)?;
        }
    }

    CliUtils::show_info(
        &format!(
            "Compared {} files: {} fields, {} with conflicting types, {} not present in every file",
            batch.report.file_count,
            batch.report.entries.len(),
            batch.report.conflicts.len(),
            batch.report.coverage_gaps.len()
        ),
        quiet,
    );

    let rendered = report::consistency_report(&batch.report, &batch.failures, config.format)?;
    let path = consistency_report_path(&config.args.output, config.format);
    emit_report(&rendered, &path, config)
}

fn emit_report(rendered: &str, path: &Path, config: &CliConfig) -> Result<()> {
    if config.args.stdout {
        println!("{}", rendered.trim_end());
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(path, rendered).with_context(|| format!("Failed to write {}", path.display()))?;

    tracing::debug!(path = %path.display(), "report written");
    CliUtils::show_success(
        &format!("Report written to {}", path.display()),
        config.is_quiet(),
    );
    Ok(())
}
