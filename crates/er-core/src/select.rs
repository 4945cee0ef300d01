//! Top-K candidate selection.
//!
//! Every target is scored; there is no pruning, since any candidate could end
//! up in the top K. The K best survive in a bounded heap whose ordering puts
//! the weakest entry on top: lower score is weaker, and on equal scores the
//! later target position is weaker. The result is therefore identical to a
//! stable sort by descending score followed by taking the first K.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::types::{MatchResult, ScoredCandidate};

/// Heap entry ordered so that the weakest candidate compares greatest.
#[derive(Debug, Clone, Copy)]
struct Ranked {
    score: f64,
    index: usize,
}

impl PartialEq for Ranked {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Ranked {}

impl PartialOrd for Ranked {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Ranked {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .score
            .total_cmp(&self.score)
            .then_with(|| self.index.cmp(&other.index))
    }
}

/// Keep the `k` best `(position, score)` pairs.
///
/// Returns positions and scores ordered best first.
pub(crate) fn select_top_k<I>(scores: I, k: usize) -> Vec<(usize, f64)>
where
    I: IntoIterator<Item = (usize, f64)>,
{
    if k == 0 {
        return Vec::new();
    }
    let scores = scores.into_iter();
    let mut heap: BinaryHeap<Ranked> = BinaryHeap::with_capacity(k.min(scores.size_hint().0));
    for (index, score) in scores {
        let entry = Ranked { score, index };
        if heap.len() < k {
            heap.push(entry);
        } else if heap.peek().is_some_and(|weakest| entry < *weakest) {
            heap.pop();
            heap.push(entry);
        }
    }
    heap.into_sorted_vec()
        .into_iter()
        .map(|r| (r.index, r.score))
        .collect()
}

/// Score every target position with `score_at` and keep the `k` best.
pub(crate) fn rank_candidates<T, F>(targets: &[T], k: usize, mut score_at: F) -> MatchResult
where
    T: AsRef<str>,
    F: FnMut(usize) -> f64,
{
    let top = select_top_k((0..targets.len()).map(|index| (index, score_at(index))), k);
    MatchResult::new(
        top.into_iter()
            .map(|(index, score)| ScoredCandidate {
                text: targets[index].as_ref().to_string(),
                score,
                index,
            })
            .collect(),
    )
}
