//! Result types produced by the matcher.

use serde::{Deserialize, Serialize};

/// A target item scored against one source item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    /// Candidate text, exactly as it appeared in the target sequence.
    pub text: String,
    /// Similarity in `[0.0, 1.0]`.
    pub score: f64,
    /// Position of the candidate in the target sequence.
    pub index: usize,
}

impl ScoredCandidate {
    /// Score scaled to a percentage and rounded to two decimal places.
    #[must_use]
    pub fn percent(&self) -> f64 {
        (self.score * 100.0 * 100.0).round() / 100.0
    }
}

/// Ranked candidates for a single source item.
///
/// Candidates are ordered by descending score; equal scores keep target order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub candidates: Vec<ScoredCandidate>,
}

impl MatchResult {
    pub fn new(candidates: Vec<ScoredCandidate>) -> Self {
        Self { candidates }
    }

    /// Candidate at rank `rank` (0-based), `None` when the slot is empty.
    #[must_use]
    pub fn slot(&self, rank: usize) -> Option<&ScoredCandidate> {
        self.candidates.get(rank)
    }

    /// Highest ranked candidate.
    #[must_use]
    pub fn best(&self) -> Option<&ScoredCandidate> {
        self.candidates.first()
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

/// Match results index-aligned with the source sequence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultTable {
    /// Number of ranks requested when the table was built.
    pub k: usize,
    pub results: Vec<MatchResult>,
}

impl ResultTable {
    pub fn new(k: usize, results: Vec<MatchResult>) -> Self {
        Self { k, results }
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&MatchResult> {
        self.results.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MatchResult> {
        self.results.iter()
    }

    /// Number of source items whose best candidate is identical text.
    #[must_use]
    pub fn exact_matches(&self) -> usize {
        self.results
            .iter()
            .filter(|r| r.best().is_some_and(|c| c.score >= 1.0))
            .count()
    }

    /// Number of source items with no candidate at all.
    #[must_use]
    pub fn unmatched(&self) -> usize {
        self.results.iter().filter(|r| r.is_empty()).count()
    }

    /// Mean of the best score over results that have a candidate.
    #[must_use]
    pub fn mean_best_score(&self) -> Option<f64> {
        let best: Vec<f64> = self
            .results
            .iter()
            .filter_map(|r| r.best().map(|c| c.score))
            .collect();
        if best.is_empty() {
            None
        } else {
            Some(best.iter().sum::<f64>() / best.len() as f64)
        }
    }
}

impl<'a> IntoIterator for &'a ResultTable {
    type Item = &'a MatchResult;
    type IntoIter = std::slice::Iter<'a, MatchResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(text: &str, score: f64, index: usize) -> ScoredCandidate {
        ScoredCandidate {
            text: text.to_string(),
            score,
            index,
        }
    }

    #[test]
    fn test_percent_rounds_to_two_places() {
        assert_eq!(candidate("orage", 5.0 / 6.0, 1).percent(), 83.33);
        assert_eq!(candidate("apple", 0.8, 0).percent(), 80.0);
        assert_eq!(candidate("x", 2.0 / 3.0, 0).percent(), 66.67);
    }

    #[test]
    fn test_slots_beyond_candidates_are_absent() {
        let result = MatchResult::new(vec![candidate("", 1.0, 0)]);
        assert_eq!(result.slot(0).map(|c| c.text.as_str()), Some(""));
        assert!(result.slot(1).is_none());
        assert!(result.slot(2).is_none());
    }

    #[test]
    fn test_serde_round_trip() {
        let table = ResultTable::new(
            3,
            vec![
                MatchResult::new(vec![candidate("", 1.0, 0), candidate("orage", 5.0 / 6.0, 2)]),
                MatchResult::default(),
            ],
        );
        let json = serde_json::to_string(&table).unwrap();
        let restored: ResultTable = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, table);
        assert_eq!(restored.get(0).and_then(|r| r.slot(0)).map(|c| c.text.as_str()), Some(""));
        assert!(restored.get(0).and_then(|r| r.slot(2)).is_none());
        assert!(restored.get(1).is_some_and(MatchResult::is_empty));
    }

    #[test]
    fn test_table_stats() {
        let table = ResultTable::new(
            2,
            vec![
                MatchResult::new(vec![candidate("a", 1.0, 0), candidate("b", 0.5, 1)]),
                MatchResult::new(vec![candidate("b", 0.5, 1)]),
                MatchResult::default(),
            ],
        );
        assert_eq!(table.len(), 3);
        assert_eq!(table.exact_matches(), 1);
        assert_eq!(table.unmatched(), 1);
        assert_eq!(table.mean_best_score(), Some(0.75));
        assert_eq!(ResultTable::default().mean_best_score(), None);
    }
}
