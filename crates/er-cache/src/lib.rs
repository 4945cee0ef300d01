//! Memoization of resolution results, keyed by input content and options.

mod cache;
mod error;
mod key;

pub use cache::{CacheStatus, ResultCache};
pub use error::{CacheError, Result};
pub use key::{CacheKey, sequence_hash};
