//! Cache error types.

use std::path::PathBuf;

use thiserror::Error;

/// Cache operation error.
#[derive(Debug, Error)]
pub enum CacheError {
    /// File I/O error.
    #[error("failed to {operation} cache file: {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Cache entry could not be encoded or decoded.
    #[error("failed to serialize cache entry")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;
