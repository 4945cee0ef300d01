//! Matcher orchestration: top-K selection for every source item.

use std::borrow::Cow;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use tracing::{debug, debug_span};

use crate::error::{MatchError, Result};
use crate::normalize::Normalization;
use crate::select::rank_candidates;
use crate::similarity::Metric;
use crate::types::{MatchResult, ResultTable};

/// Number of ranks kept per source item unless configured otherwise.
pub const DEFAULT_K: usize = 3;

/// Options controlling how a [`Matcher`] scores and ranks candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MatchOptions {
    /// Maximum number of candidates kept per source item. Must be at least 1.
    pub k: usize,
    /// Similarity metric.
    pub metric: Metric,
    /// Text normalization applied to both sides before scoring.
    pub normalization: Normalization,
    /// Spread source items across the rayon pool (requires the `parallel` feature).
    pub parallel: bool,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            k: DEFAULT_K,
            metric: Metric::default(),
            normalization: Normalization::default(),
            parallel: true,
        }
    }
}

impl MatchOptions {
    #[must_use]
    pub fn with_k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }

    #[must_use]
    pub fn with_metric(mut self, metric: Metric) -> Self {
        self.metric = metric;
        self
    }

    #[must_use]
    pub fn with_normalization(mut self, normalization: Normalization) -> Self {
        self.normalization = normalization;
        self
    }

    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Reject option combinations the matcher cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.k == 0 {
            return Err(MatchError::invalid("k must be at least 1"));
        }
        Ok(())
    }
}

/// Resolves every source item against the full target sequence.
///
/// The matcher is stateless: it holds only its options and never caches
/// results between calls.
///
/// # Cost
///
/// Matching compares every source item with every target item, so total work
/// is `O(len(source) * len(target) * C)` where `C` is one similarity
/// evaluation, itself `O(len(a) * len(b))` for the edit-distance metrics.
/// Large inputs grow quadratically on both axes.
#[derive(Debug, Clone, Copy)]
pub struct Matcher {
    options: MatchOptions,
}

impl Matcher {
    /// Create a matcher, validating the options.
    pub fn new(options: MatchOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self { options })
    }

    pub fn options(&self) -> &MatchOptions {
        &self.options
    }

    /// Rank the target sequence against a single source item.
    pub fn top_k<T: AsRef<str>>(&self, item: &str, target: &[T]) -> MatchResult {
        let prepared = self.prepare(target);
        self.rank(item, target, &prepared)
    }

    /// Build the result table for `source`, index-aligned with it.
    ///
    /// Empty source yields an empty table; empty target yields empty
    /// candidate lists.
    pub fn resolve<S, T>(&self, source: &[S], target: &[T]) -> Result<ResultTable>
    where
        S: AsRef<str> + Sync,
        T: AsRef<str> + Sync,
    {
        self.run(source, target, None)
    }

    /// Like [`Matcher::resolve`], but stops between source items once
    /// `cancel` is set.
    pub fn resolve_cancellable<S, T>(
        &self,
        source: &[S],
        target: &[T],
        cancel: &AtomicBool,
    ) -> Result<ResultTable>
    where
        S: AsRef<str> + Sync,
        T: AsRef<str> + Sync,
    {
        self.run(source, target, Some(cancel))
    }

    fn run<S, T>(
        &self,
        source: &[S],
        target: &[T],
        cancel: Option<&AtomicBool>,
    ) -> Result<ResultTable>
    where
        S: AsRef<str> + Sync,
        T: AsRef<str> + Sync,
    {
        let span = debug_span!(
            "resolve",
            source = source.len(),
            target = target.len(),
            k = self.options.k,
            metric = %self.options.metric,
        );
        let _guard = span.enter();
        let started = Instant::now();

        let prepared = self.prepare(target);

        #[cfg(feature = "parallel")]
        let results = if self.options.parallel && source.len() > 1 {
            self.rank_parallel(source, target, &prepared, cancel)?
        } else {
            self.rank_sequential(source, target, &prepared, cancel)?
        };
        #[cfg(not(feature = "parallel"))]
        let results = self.rank_sequential(source, target, &prepared, cancel)?;

        debug!(
            rows = results.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "resolve finished"
        );
        Ok(ResultTable::new(self.options.k, results))
    }

    fn prepare<'t, T: AsRef<str>>(&self, target: &'t [T]) -> Vec<Cow<'t, str>> {
        target
            .iter()
            .map(|t| self.options.normalization.apply(t.as_ref()))
            .collect()
    }

    fn rank<T: AsRef<str>>(
        &self,
        item: &str,
        target: &[T],
        prepared: &[Cow<'_, str>],
    ) -> MatchResult {
        let needle = self.options.normalization.apply(item);
        let metric = self.options.metric;
        rank_candidates(target, self.options.k, |index| {
            metric.similarity(&needle, &prepared[index])
        })
    }

    fn rank_sequential<S, T>(
        &self,
        source: &[S],
        target: &[T],
        prepared: &[Cow<'_, str>],
        cancel: Option<&AtomicBool>,
    ) -> Result<Vec<MatchResult>>
    where
        S: AsRef<str>,
        T: AsRef<str>,
    {
        let mut results = Vec::with_capacity(source.len());
        for (completed, item) in source.iter().enumerate() {
            if is_cancelled(cancel) {
                return Err(MatchError::Cancelled { completed });
            }
            results.push(self.rank(item.as_ref(), target, prepared));
        }
        Ok(results)
    }

    #[cfg(feature = "parallel")]
    fn rank_parallel<S, T>(
        &self,
        source: &[S],
        target: &[T],
        prepared: &[Cow<'_, str>],
        cancel: Option<&AtomicBool>,
    ) -> Result<Vec<MatchResult>>
    where
        S: AsRef<str> + Sync,
        T: AsRef<str> + Sync,
    {
        use rayon::prelude::*;
        use std::sync::atomic::AtomicUsize;

        let completed = AtomicUsize::new(0);
        source
            .par_iter()
            .map(|item| {
                if is_cancelled(cancel) {
                    return Err(MatchError::Cancelled {
                        completed: completed.load(Ordering::Relaxed),
                    });
                }
                let result = self.rank(item.as_ref(), target, prepared);
                completed.fetch_add(1, Ordering::Relaxed);
                Ok(result)
            })
            .collect()
    }
}

fn is_cancelled(cancel: Option<&AtomicBool>) -> bool {
    cancel.is_some_and(|flag| flag.load(Ordering::Relaxed))
}

/// Resolve `source` against `target` with the default metric and `k` ranks.
///
/// Fails with [`MatchError::InvalidArgument`] when `k` is zero.
pub fn resolve<S, T>(source: &[S], target: &[T], k: usize) -> Result<ResultTable>
where
    S: AsRef<str> + Sync,
    T: AsRef<str> + Sync,
{
    Matcher::new(MatchOptions::default().with_k(k))?.resolve(source, target)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(result: &MatchResult) -> Vec<&str> {
        result.candidates.iter().map(|c| c.text.as_str()).collect()
    }

    #[test]
    fn test_zero_k_is_invalid() {
        let err = Matcher::new(MatchOptions::default().with_k(0)).unwrap_err();
        assert!(matches!(err, MatchError::InvalidArgument { .. }));
        assert!(resolve(&["a"], &["a"], 0).is_err());
    }

    #[test]
    fn test_empty_inputs() {
        let empty: [&str; 0] = [];
        let table = resolve(&empty, &["a", "b"], 3).unwrap();
        assert!(table.is_empty());

        let table = resolve(&["a", "b"], &empty, 3).unwrap();
        assert_eq!(table.len(), 2);
        assert!(table.iter().all(MatchResult::is_empty));
    }

    #[test]
    fn test_duplicates_resolved_by_position() {
        let table = resolve(&["kat", "kat"], &["cat", "cat"], 2).unwrap();
        assert_eq!(table.len(), 2);
        for result in &table {
            let indexes: Vec<usize> = result.candidates.iter().map(|c| c.index).collect();
            assert_eq!(indexes, vec![0, 1]);
        }
    }

    #[test]
    fn test_normalization_keeps_original_text() {
        let options = MatchOptions::default()
            .with_k(1)
            .with_normalization(Normalization::Full);
        let matcher = Matcher::new(options).unwrap();
        let result = matcher.top_k("  ACME corp", &["Acme   Corp", "Apex Co"]);
        assert_eq!(texts(&result), vec!["Acme   Corp"]);
        assert_eq!(result.candidates[0].score, 1.0);
    }

    #[test]
    fn test_literal_by_default() {
        let matcher = Matcher::new(MatchOptions::default()).unwrap();
        let result = matcher.top_k("ACME", &["acme"]);
        assert!(result.candidates[0].score < 1.0);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let source = ["appel", "orange", "banan", "grape", "kiwi", "melon"];
        let target = ["apple", "orage", "banana", "grapefruit", "kiwi", "lemon"];
        let sequential = Matcher::new(MatchOptions::default().with_parallel(false))
            .unwrap()
            .resolve(&source, &target)
            .unwrap();
        let parallel = Matcher::new(MatchOptions::default().with_parallel(true))
            .unwrap()
            .resolve(&source, &target)
            .unwrap();
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_cancelled_before_start() {
        let cancel = AtomicBool::new(true);
        for parallel in [false, true] {
            let matcher = Matcher::new(MatchOptions::default().with_parallel(parallel)).unwrap();
            let err = matcher
                .resolve_cancellable(&["a", "b"], &["a"], &cancel)
                .unwrap_err();
            assert!(matches!(err, MatchError::Cancelled { completed: 0 }));
        }
    }

    /// Source item that raises the cancel flag when its text is read.
    struct Tripwire<'a> {
        text: &'static str,
        flag: Option<&'a AtomicBool>,
    }

    impl AsRef<str> for Tripwire<'_> {
        fn as_ref(&self) -> &str {
            if let Some(flag) = self.flag {
                flag.store(true, Ordering::Relaxed);
            }
            self.text
        }
    }

    #[test]
    fn test_cancelled_between_items() {
        let cancel = AtomicBool::new(false);
        let source = [
            Tripwire { text: "appel", flag: None },
            Tripwire { text: "orange", flag: Some(&cancel) },
            Tripwire { text: "banan", flag: None },
            Tripwire { text: "grape", flag: None },
        ];
        let matcher = Matcher::new(MatchOptions::default().with_parallel(false)).unwrap();
        let err = matcher
            .resolve_cancellable(&source, &["apple", "orage"], &cancel)
            .unwrap_err();
        assert!(matches!(err, MatchError::Cancelled { completed: 2 }), "{err:?}");
    }

    #[test]
    fn test_not_cancelled_runs_to_completion() {
        let cancel = AtomicBool::new(false);
        let matcher = Matcher::new(MatchOptions::default()).unwrap();
        let table = matcher
            .resolve_cancellable(&["a", "b"], &["a"], &cancel)
            .unwrap();
        assert_eq!(table.len(), 2);
    }
}
