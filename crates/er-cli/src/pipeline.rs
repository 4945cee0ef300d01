//! Match pipeline with explicit stages.
//!
//! 1. **Load**: read the source and target columns from CSV
//! 2. **Resolve**: rank candidates, going through the result cache when one is configured
//! 3. **Output**: flatten the results and write them to disk
//!
//! Each stage takes the output of the previous stage and returns typed results.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tracing::{debug, info, info_span, trace};

use er_cache::{CacheKey, CacheStatus, ResultCache};
use er_core::input::Side;
use er_core::{MatchOptions, Matcher, ResultTable};
use er_ingest::read_csv;
use er_output::{MatchTable, OutputFormat, write_to_path};

use crate::logging::redact_value;

// ============================================================================
// Stage 1: Load
// ============================================================================

/// Location of one input column.
#[derive(Debug, Clone)]
pub struct ColumnSource {
    pub path: PathBuf,
    pub column: String,
}

/// Both sides of a match, read as text.
#[derive(Debug)]
pub struct LoadResult {
    pub source: Vec<String>,
    pub target: Vec<String>,
}

/// Read one column of a CSV file as text.
pub fn load_column(input: &ColumnSource, side: Side) -> Result<Vec<String>> {
    let table = read_csv(&input.path)
        .with_context(|| format!("read {side} file {}", input.path.display()))?;
    let values = table
        .text_column(&input.column, side)
        .with_context(|| format!("load {side} column '{}'", input.column))?;
    info!(
        %side,
        path = %input.path.display(),
        column = %input.column,
        rows = values.len(),
        "loaded column"
    );
    if let Some(first) = values.first() {
        trace!(%side, first = redact_value(first), "first value");
    }
    Ok(values)
}

/// Load the source and target columns.
pub fn load(source: &ColumnSource, target: &ColumnSource) -> Result<LoadResult> {
    Ok(LoadResult {
        source: load_column(source, Side::Source)?,
        target: load_column(target, Side::Target)?,
    })
}

// ============================================================================
// Stage 2: Resolve
// ============================================================================

/// Outcome of the resolve stage.
#[derive(Debug)]
pub struct ResolveResult {
    pub results: ResultTable,
    /// `None` when no cache directory was configured.
    pub cache: Option<CacheStatus>,
    pub elapsed: Duration,
}

/// Rank the `k` best targets for every source value.
///
/// With a cache directory, results for identical inputs and options are
/// reused instead of recomputed.
pub fn resolve(
    loaded: &LoadResult,
    options: MatchOptions,
    cache_dir: Option<&Path>,
) -> Result<ResolveResult> {
    let span = info_span!(
        "resolve",
        source = loaded.source.len(),
        target = loaded.target.len(),
        k = options.k,
        metric = %options.metric,
    );
    let _guard = span.enter();
    let start = Instant::now();

    let matcher = Matcher::new(options).context("invalid match options")?;
    let compute = || matcher.resolve(&loaded.source, &loaded.target);

    let (results, cache) = match cache_dir {
        Some(dir) => {
            let mut cache = ResultCache::with_dir(dir)
                .with_context(|| format!("open cache directory {}", dir.display()))?;
            let key = CacheKey::new(&loaded.source, &loaded.target, &options);
            let (results, status) = cache.get_or_compute(key, compute)?;
            (results, Some(status))
        }
        None => (compute()?, None),
    };

    let elapsed = start.elapsed();
    debug!(
        elapsed_ms = elapsed.as_millis() as u64,
        cached = ?cache,
        "resolve complete"
    );
    Ok(ResolveResult {
        results,
        cache,
        elapsed,
    })
}

// ============================================================================
// Stage 3: Output
// ============================================================================

/// Pick the output format: explicit choice, then file extension, then CSV.
pub fn output_format(path: &Path, explicit: Option<OutputFormat>) -> OutputFormat {
    explicit
        .or_else(|| OutputFormat::from_path(path))
        .unwrap_or_default()
}

/// Flatten the results next to their original values.
pub fn build_table(loaded: &LoadResult, resolved: &ResolveResult) -> Result<MatchTable> {
    MatchTable::from_results(&loaded.source, &resolved.results).context("flatten results")
}

/// Write the flattened table to `path`.
pub fn output(table: &MatchTable, path: &Path, format: OutputFormat) -> Result<()> {
    write_to_path(table, format, path)
        .with_context(|| format!("write results to {}", path.display()))
}
