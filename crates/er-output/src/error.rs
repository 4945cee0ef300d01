//! Output error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from flattening or writing result tables.
#[derive(Debug, Error)]
pub enum OutputError {
    /// Original values and results are not index-aligned.
    #[error("row count mismatch: {originals} original values but {results} results")]
    RowMismatch { originals: usize, results: usize },

    /// File I/O error.
    #[error("failed to {operation} {path}: {source}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CSV writer error.
    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    /// JSON writer error.
    #[error("failed to write JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Output format could not be determined.
    #[error("unknown output format '{0}' (expected csv or json)")]
    UnknownFormat(String),
}

/// Result type for output operations.
pub type Result<T> = std::result::Result<T, OutputError>;
