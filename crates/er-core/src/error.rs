//! Error types for the matching engine.

use thiserror::Error;

/// Errors raised by the matching engine.
///
/// The engine is deterministic and side-effect free, so there is nothing to
/// retry: every error is surfaced to the caller as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    /// A caller-supplied argument is unusable (zero `k`, non-text input).
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    /// The caller raised the cancellation flag between source items.
    #[error("matching cancelled after {completed} source items")]
    Cancelled { completed: usize },
}

impl MatchError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, MatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MatchError::invalid("k must be at least 1");
        assert_eq!(err.to_string(), "invalid argument: k must be at least 1");

        let err = MatchError::Cancelled { completed: 4 };
        assert_eq!(err.to_string(), "matching cancelled after 4 source items");
    }
}
