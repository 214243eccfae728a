/// CLI argument definitions via clap derive.
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::layout::index::DEFAULT_IGNORED;
use crate::layout::{LayoutConfig, QueryFilter};

/// File written by `runs` unless `--stdout` or `--output-file` is given.
pub const DEFAULT_OUTPUT_FILE: &str = "sub_ses_run_description.json";

/// bidsq — query subjects, sessions and runs of a BIDS dataset.
///
/// With only a dataset path, behaves like `bidsq runs <DATASET_PATH>`.
#[derive(Debug, Parser)]
#[command(
    name = "bidsq",
    about = "Query subjects, sessions and runs of a BIDS dataset",
    version,
    args_conflicts_with_subcommands = true
)]
pub struct Cli {
    /// Output format for stdout. `json` picks each command's natural layout.
    #[arg(long, global = true, value_name = "FORMAT", default_value = "json")]
    pub output: OutputFormat,

    /// Omit table headers (useful for awk/cut processing).
    #[arg(long, global = true)]
    pub no_header: bool,

    /// Print indexing/query timing and dataset notes to stderr.
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(flatten)]
    pub layout: LayoutArgs,

    // Arguments for the implicit `runs` command.
    #[command(flatten)]
    pub runs: RunsArgs,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Output format variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// The command's natural JSON layout (indented records, single-line summary).
    #[default]
    Json,
    /// JSON indented by four spaces.
    Pretty,
    /// Single-line JSON with `", "` and `": "` separators.
    Compact,
    /// Newline-delimited JSON (one record per line).
    Ndjson,
    /// Aligned table with headers (human-readable).
    Table,
    /// Bare identifiers, one per line.
    Id,
}

/// All subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Write runs of one scan type per subject/session to a JSON file.
    Runs(RunsArgs),
    /// Print dataset-wide subject and session lists.
    Summary(SummaryArgs),
    /// Print one record per subject/session/run with its files.
    Scans(ScansArgs),
}

/// Options controlling how the dataset is indexed.
#[derive(Debug, Args)]
pub struct LayoutArgs {
    /// Do not require `dataset_description.json` at the dataset root.
    #[arg(long, global = true)]
    pub no_validate: bool,

    /// Extra top-level directory to skip while indexing (repeatable).
    #[arg(long, global = true, value_name = "NAME")]
    pub ignore: Vec<String>,
}

impl LayoutArgs {
    /// Build the indexer configuration. `--ignore` adds to the default list.
    #[must_use]
    pub fn to_config(&self) -> LayoutConfig {
        let mut ignore: Vec<String> = DEFAULT_IGNORED.iter().map(|&s| s.to_owned()).collect();
        ignore.extend(self.ignore.iter().cloned());
        LayoutConfig {
            validate: !self.no_validate,
            ignore,
        }
    }
}

/// Scan-type metadata selecting which files count as runs.
#[derive(Debug, Args)]
pub struct ScanFilterArgs {
    /// BIDS suffix of the scan type.
    #[arg(long, value_name = "SUFFIX", default_value = "T2w")]
    pub suffix: String,

    /// `part` entity (e.g., mag, phase).
    #[arg(long, value_name = "PART", default_value = "mag")]
    pub part: String,

    /// File extension, with or without a leading dot.
    #[arg(long, value_name = "EXT", default_value = "nii.gz")]
    pub extension: String,

    /// Restrict to one `acq` entity label.
    #[arg(long = "acq", value_name = "LABEL")]
    pub acquisition: Option<String>,

    /// Restrict to one `task` entity label.
    #[arg(long, value_name = "LABEL")]
    pub task: Option<String>,
}

impl ScanFilterArgs {
    /// Convert to an unscoped query filter.
    #[must_use]
    pub fn to_filter(&self) -> QueryFilter {
        QueryFilter {
            suffix: Some(self.suffix.clone()),
            part: Some(self.part.clone()),
            extension: Some(self.extension.clone()),
            acquisition: self.acquisition.clone(),
            task: self.task.clone(),
            ..QueryFilter::default()
        }
    }
}

/// Arguments for `bidsq runs`.
#[derive(Debug, Args)]
pub struct RunsArgs {
    /// Path to the BIDS dataset root.
    #[arg(value_name = "DATASET_PATH")]
    pub dataset: Option<PathBuf>,

    #[command(flatten)]
    pub scan: ScanFilterArgs,

    /// File to write, relative to the current directory.
    #[arg(long, value_name = "FILE", default_value = DEFAULT_OUTPUT_FILE)]
    pub output_file: PathBuf,

    /// Print to stdout (using --output) instead of writing a file.
    #[arg(long)]
    pub stdout: bool,
}

/// Arguments for `bidsq summary`.
#[derive(Debug, Args)]
pub struct SummaryArgs {
    /// Path to the BIDS dataset root.
    #[arg(value_name = "DATASET_PATH")]
    pub dataset: Option<PathBuf>,
}

/// Arguments for `bidsq scans`.
#[derive(Debug, Args)]
pub struct ScansArgs {
    /// Path to the BIDS dataset root.
    #[arg(value_name = "DATASET_PATH")]
    pub dataset: Option<PathBuf>,

    #[command(flatten)]
    pub scan: ScanFilterArgs,
}
