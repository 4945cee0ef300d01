//! CLI argument definitions for the entity resolver.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use er_core::{DEFAULT_K, Metric, Normalization};
use er_output::OutputFormat;

#[derive(Parser)]
#[command(
    name = "entity-resolver",
    version,
    about = "Rank the closest target values for every source value",
    long_about = "Fuzzy-match one CSV column against another.\n\n\
                  For every value in the source column, the K most similar values of the\n\
                  target column are reported with a similarity score in percent."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow input values to appear in trace logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Match a source column against a target column.
    Match(MatchArgs),

    /// List the column names of a CSV file.
    Columns {
        /// CSV file to inspect.
        #[arg(value_name = "CSV")]
        file: PathBuf,
    },
}

#[derive(Parser)]
pub struct MatchArgs {
    /// CSV file holding the values to resolve.
    #[arg(long, value_name = "CSV")]
    pub source: PathBuf,

    /// Column of the source file to resolve.
    #[arg(long = "source-column", value_name = "COLUMN")]
    pub source_column: String,

    /// CSV file holding the candidate values.
    #[arg(long, value_name = "CSV")]
    pub target: PathBuf,

    /// Column of the target file holding the candidates.
    #[arg(long = "target-column", value_name = "COLUMN")]
    pub target_column: String,

    /// Number of candidates to keep per source value.
    #[arg(short, long, default_value_t = DEFAULT_K)]
    pub k: usize,

    /// Similarity metric: edit-distance (osa), levenshtein, indel (ratio) or jaro-winkler.
    #[arg(
        long,
        default_value = "edit-distance",
        value_parser = clap::value_parser!(Metric)
    )]
    pub metric: Metric,

    /// Normalization applied to both sides: none, whitespace (trim), case-fold (case) or full.
    #[arg(
        long = "normalize",
        default_value = "none",
        value_parser = clap::value_parser!(Normalization)
    )]
    pub normalize: Normalization,

    /// Write the full result table to this file.
    #[arg(long, short, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Output format (default: from the output file extension, else csv).
    #[arg(long, value_enum)]
    pub format: Option<OutputFormatArg>,

    /// Reuse results stored in this directory, and store new ones there.
    #[arg(long = "cache-dir", value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Score on the current thread only.
    #[arg(long = "no-parallel")]
    pub no_parallel: bool,

    /// Number of result rows to print (0 to skip the preview).
    #[arg(long, value_name = "N", default_value_t = 10)]
    pub preview: usize,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormatArg {
    Csv,
    Json,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Csv => OutputFormat::Csv,
            OutputFormatArg::Json => OutputFormat::Json,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
