//! Content-addressed cache keys.

use std::fmt;

use er_core::{MatchOptions, Metric, Normalization};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Identity of a matcher invocation.
///
/// Two invocations share a key exactly when their inputs hash identically
/// and every option that shapes the output is equal. Parallelism is not part
/// of the key since it never changes results.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CacheKey {
    pub source_hash: String,
    pub target_hash: String,
    pub k: usize,
    pub metric: Metric,
    pub normalization: Normalization,
}

impl CacheKey {
    pub fn new<S, T>(source: &[S], target: &[T], options: &MatchOptions) -> Self
    where
        S: AsRef<str>,
        T: AsRef<str>,
    {
        Self {
            source_hash: sequence_hash(source),
            target_hash: sequence_hash(target),
            k: options.k,
            metric: options.metric,
            normalization: options.normalization,
        }
    }

    /// Digest of the whole key, used as the on-disk file stem.
    pub fn digest(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.source_hash.as_bytes());
        hasher.update(b"\0");
        hasher.update(self.target_hash.as_bytes());
        hasher.update(b"\0");
        hasher.update((self.k as u64).to_le_bytes());
        hasher.update(self.metric.as_str().as_bytes());
        hasher.update(b"\0");
        hasher.update(self.normalization.as_str().as_bytes());
        hex::encode(hasher.finalize())
    }

    pub fn file_name(&self) -> String {
        format!("{}.json", self.digest())
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/k={}/{}/{}",
            &self.source_hash[..12.min(self.source_hash.len())],
            &self.target_hash[..12.min(self.target_hash.len())],
            self.k,
            self.metric,
            self.normalization
        )
    }
}

/// SHA-256 of a string sequence.
///
/// The item count and each item's byte length are hashed ahead of the bytes,
/// so `["ab", "c"]` and `["a", "bc"]` differ.
pub fn sequence_hash<S: AsRef<str>>(items: &[S]) -> String {
    let mut hasher = Sha256::new();
    hasher.update((items.len() as u64).to_le_bytes());
    for item in items {
        let bytes = item.as_ref().as_bytes();
        hasher.update((bytes.len() as u64).to_le_bytes());
        hasher.update(bytes);
    }
    hex::encode(hasher.finalize())
}
