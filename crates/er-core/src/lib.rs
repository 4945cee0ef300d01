//! Entity resolution engine.
//!
//! Given a source and a target sequence of strings, the engine ranks, for
//! every source item, the `k` most similar target items with a normalized
//! similarity score in `[0.0, 1.0]`.
//!
//! # Example
//!
//! ```
//! use er_core::{MatchOptions, Matcher};
//!
//! let matcher = Matcher::new(MatchOptions::default().with_k(2)).unwrap();
//! let table = matcher
//!     .resolve(&["appel", "orange"], &["apple", "orage", "banana"])
//!     .unwrap();
//!
//! let best = table.get(0).and_then(|r| r.best()).unwrap();
//! assert_eq!(best.text, "apple");
//! assert!((best.score - 0.8).abs() < 1e-9);
//! ```
//!
//! Comparison is exhaustive (`source x target` similarity evaluations); see
//! [`Matcher`] for the cost model.

#![deny(unsafe_code)]

mod error;
pub mod input;
mod matcher;
mod normalize;
mod select;
mod similarity;
mod types;

// === Error Types ===
pub use error::{MatchError, Result};

// === Matching ===
pub use matcher::{DEFAULT_K, MatchOptions, Matcher, resolve};

// === Scoring ===
pub use normalize::Normalization;
pub use similarity::{
    Metric, edit_similarity, indel_similarity, jaro_winkler_similarity, levenshtein_similarity,
    similarity,
};

// === Results ===
pub use types::{MatchResult, ResultTable, ScoredCandidate};
