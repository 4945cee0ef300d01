//! String similarity metrics.
//!
//! Every metric returns a score in `[0.0, 1.0]` and is symmetric, reflexive
//! (`sim(a, a) == 1.0`), total on empty strings (`sim("", "") == 1.0`,
//! `sim("", b) == 0.0` for non-empty `b`) and pure. Lengths are counted in
//! Unicode scalar values, never bytes.

use std::fmt;
use std::str::FromStr;

use rapidfuzz::distance::{indel, jaro_winkler, levenshtein, osa};
use serde::{Deserialize, Serialize};

/// Similarity metric used to score a source item against a candidate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Metric {
    /// `1 - osa(a, b) / max(len(a), len(b), 1)`, where an adjacent
    /// transposition counts as a single edit.
    #[default]
    EditDistance,
    /// `1 - levenshtein(a, b) / max(len(a), len(b), 1)`.
    Levenshtein,
    /// `1 - indel(a, b) / (len(a) + len(b))`: insertions and deletions only.
    Indel,
    /// Jaro-Winkler similarity with the standard prefix boost.
    JaroWinkler,
}

impl Metric {
    /// All supported metrics, in display order.
    pub const ALL: [Metric; 4] = [
        Metric::EditDistance,
        Metric::Levenshtein,
        Metric::Indel,
        Metric::JaroWinkler,
    ];

    /// Stable identifier used in cache keys and on the command line.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EditDistance => "edit-distance",
            Self::Levenshtein => "levenshtein",
            Self::Indel => "indel",
            Self::JaroWinkler => "jaro-winkler",
        }
    }

    /// Score `a` against `b`.
    ///
    /// Cost is `O(len(a) * len(b))` in the worst case for every metric.
    #[must_use]
    pub fn similarity(&self, a: &str, b: &str) -> f64 {
        if a == b {
            return 1.0;
        }
        match self {
            Self::EditDistance => edit_similarity(a, b),
            Self::Levenshtein => levenshtein_similarity(a, b),
            Self::Indel => indel_similarity(a, b),
            Self::JaroWinkler => jaro_winkler_similarity(a, b),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "edit-distance" | "edit" | "osa" => Ok(Self::EditDistance),
            "levenshtein" | "lev" => Ok(Self::Levenshtein),
            "indel" | "ratio" => Ok(Self::Indel),
            "jaro-winkler" | "jw" => Ok(Self::JaroWinkler),
            other => Err(format!("unknown similarity metric '{other}'")),
        }
    }
}

/// Default similarity: normalized edit distance.
#[must_use]
pub fn similarity(a: &str, b: &str) -> f64 {
    Metric::EditDistance.similarity(a, b)
}

/// Normalized optimal-string-alignment similarity.
#[must_use]
pub fn edit_similarity(a: &str, b: &str) -> f64 {
    let longest = a.chars().count().max(b.chars().count()).max(1);
    let distance = osa::distance(a.chars(), b.chars());
    clamp_unit(1.0 - distance as f64 / longest as f64)
}

/// Normalized Levenshtein similarity.
#[must_use]
pub fn levenshtein_similarity(a: &str, b: &str) -> f64 {
    let longest = a.chars().count().max(b.chars().count()).max(1);
    let distance = levenshtein::distance(a.chars(), b.chars());
    clamp_unit(1.0 - distance as f64 / longest as f64)
}

/// Normalized InDel similarity (the classic "ratio" score).
#[must_use]
pub fn indel_similarity(a: &str, b: &str) -> f64 {
    let total = (a.chars().count() + b.chars().count()).max(1);
    let distance = indel::distance(a.chars(), b.chars());
    clamp_unit(1.0 - distance as f64 / total as f64)
}

/// Jaro-Winkler similarity with explicit handling of empty input.
#[must_use]
pub fn jaro_winkler_similarity(a: &str, b: &str) -> f64 {
    match (a.is_empty(), b.is_empty()) {
        (true, true) => 1.0,
        (true, false) | (false, true) => 0.0,
        (false, false) => clamp_unit(jaro_winkler::similarity(a.chars(), b.chars())),
    }
}

fn clamp_unit(score: f64) -> f64 {
    score.clamp(0.0, 1.0)
}
