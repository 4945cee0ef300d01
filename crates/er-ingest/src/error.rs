//! Error types for CSV ingestion.

use std::path::PathBuf;

use er_core::MatchError;
use thiserror::Error;

/// Errors that can occur while loading match input from CSV files.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// CSV file not found.
    #[error("CSV file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File exceeds the size limit.
    #[error("file too large: {path} ({size} bytes, max {max_size} bytes)")]
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    /// File uses an encoding other than UTF-8.
    #[error("unsupported encoding {encoding} in {path} (only UTF-8 is supported)")]
    UnsupportedEncoding {
        path: PathBuf,
        encoding: &'static str,
    },

    // === CSV Parsing Errors ===
    /// Failed to parse CSV.
    #[error("failed to parse CSV {path}: {source}")]
    CsvParse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// CSV file is empty.
    #[error("CSV file is empty: {path}")]
    EmptyCsv { path: PathBuf },

    /// Header row missing, blank, or not text.
    #[error("could not detect header row in {path}")]
    NoHeaderDetected { path: PathBuf },

    // === Column Errors ===
    /// Column not found in the header row.
    #[error("column '{column}' not found in {path} (available: {available})")]
    ColumnNotFound {
        column: String,
        path: PathBuf,
        available: String,
    },

    /// Column values could not be used as matcher input.
    #[error("column '{column}' in {path}: {source}")]
    Text {
        column: String,
        path: PathBuf,
        #[source]
        source: MatchError,
    },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
