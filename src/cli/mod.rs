//! Command-line interface module

use clap::{ArgGroup, Parser, ValueEnum};
use std::path::PathBuf;

use crate::analysis::AnalysisConfig;
use crate::error::{AnalysisError, AnalysisResult};
use crate::report::ReportFormat;
use crate::structure::ArraySampling;

pub mod path_mapping;

/// Main CLI arguments
#[derive(Parser, Debug, Clone)]
#[command(name = "jsonshape")]
#[command(about = "Report the structure of JSON documents and check field consistency across files")]
#[command(version)]
#[command(group(ArgGroup::new("source").required(true).args(["file", "folder", "stdin"])))]
pub struct Args {
    /// JSON file to analyze
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Folder of JSON files to compare with each other
    #[arg(long)]
    pub folder: Option<PathBuf>,

    /// Read a JSON document from standard input
    #[arg(long)]
    pub stdin: bool,

    /// Directory for report files
    #[arg(short, long, default_value = "./analysis_results")]
    pub output: PathBuf,

    /// Include JSON files in subdirectories of --folder
    #[arg(long)]
    pub recursive: bool,

    /// Report format
    #[arg(long, value_enum, default_value_t = Format::Markdown)]
    pub format: Format,

    /// Maximum nesting depth before a document is rejected (default: 1000, at most 4096)
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Only inspect the first element of each array
    #[arg(long)]
    pub sample_first: bool,

    /// Largest file to read (e.g., 100MB, default: 100MB)
    #[arg(long)]
    pub max_file_size: Option<String>,

    /// With --folder, also write a structure report per file
    #[arg(long)]
    pub per_file: bool,

    /// Print reports to standard output instead of writing files
    #[arg(long)]
    pub stdout: bool,

    /// Enable verbose logging
    #[arg(long)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(long)]
    pub quiet: bool,
}

/// Report formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    #[value(name = "markdown", alias = "md")]
    Markdown,
    #[value(name = "json")]
    Json,
}

impl From<Format> for ReportFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Markdown => ReportFormat::Markdown,
            Format::Json => ReportFormat::Json,
        }
    }
}

/// CLI configuration
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub args: Args,
    pub analysis_config: AnalysisConfig,
    pub format: ReportFormat,
}

impl CliConfig {
    /// Create CLI configuration from arguments
    pub fn from_args(args: Args) -> AnalysisResult<Self> {
        let analysis_config = Self::create_analysis_config(&args)?;
        let format = args.format.into();

        Ok(Self {
            args,
            analysis_config,
            format,
        })
    }

    /// Create analysis configuration from CLI arguments
    fn create_analysis_config(args: &Args) -> AnalysisResult<AnalysisConfig> {
        let defaults = AnalysisConfig::default();
        let sampling = if args.sample_first {
            ArraySampling::First
        } else {
            ArraySampling::Every
        };
        let max_file_size = match &args.max_file_size {
            Some(limit) => parse_size(limit)?,
            None => defaults.max_file_size,
        };

        let max_depth = args.max_depth.unwrap_or(defaults.max_depth);
        let config = defaults
            .with_max_depth(max_depth)
            .with_array_sampling(sampling)
            .with_max_file_size(max_file_size);

        config.validate().map_err(AnalysisError::configuration)?;

        Ok(config)
    }

    /// Status lines are suppressed in quiet mode and when reports go to stdout
    pub fn is_quiet(&self) -> bool {
        self.args.quiet || self.args.stdout
    }

    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.args.verbose
    }
}

/// Parse a size string (e.g., "100MB", "1GB", "500KB", "2048")
fn parse_size(limit: &str) -> AnalysisResult<usize> {
    let limit_str = limit.trim().to_uppercase();
    let invalid = || AnalysisError::configuration(format!("Invalid file size: {}", limit));

    let (number, multiplier) = if let Some(size) = limit_str.strip_suffix("GB") {
        (size, 1024.0 * 1024.0 * 1024.0)
    } else if let Some(size) = limit_str.strip_suffix("MB") {
        (size, 1024.0 * 1024.0)
    } else if let Some(size) = limit_str.strip_suffix("KB") {
        (size, 1024.0)
    } else if let Some(size) = limit_str.strip_suffix('B') {
        (size, 1.0)
    } else {
        (limit_str.as_str(), 1.0)
    };

    let value = number.trim().parse::<f64>().map_err(|_| invalid())?;
    if !value.is_finite() || value < 0.0 {
        return Err(invalid());
    }
    Ok((value * multiplier) as usize)
}

/// CLI utilities and helpers
pub struct CliUtils;

impl CliUtils {
    /// Create a progress bar for file processing
    pub fn create_progress_bar(total: u64, quiet: bool) -> indicatif::ProgressBar {
        if quiet {
            return indicatif::ProgressBar::hidden();
        }

        let pb = indicatif::ProgressBar::new(total);
        if let Ok(style) = indicatif::ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} {msg}")
        {
            pb.set_style(style.progress_chars("#>-"));
        }
        pb
    }

    /// Show a success message (if not in quiet mode)
    pub fn show_success(message: &str, quiet: bool) {
        if !quiet {
            println!("{} {}", console::style("✓").green(), message);
        }
    }

    /// Show an informational message (if not in quiet mode)
    pub fn show_info(message: &str, quiet: bool) {
        if !quiet {
            println!("{}", message);
        }
    }

    /// Show an error message
    pub fn show_error(message: &str) {
        eprintln!("{} {}", console::style("✗").red(), message);
    }
}

/// Handle CLI errors with user-friendly messages
pub fn handle_error(error: &AnalysisError) {
    CliUtils::show_error(&error.user_message());

    match error {
        AnalysisError::DepthExceeded { .. } => {
            eprintln!("\nTip: Use --max-depth to allow deeper nesting");
        }
        AnalysisError::FileTooLarge { .. } => {
            eprintln!("\nTip: Use --max-file-size to allow larger inputs");
        }
        _ => {}
    }
}
