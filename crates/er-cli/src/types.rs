use std::path::PathBuf;
use std::time::Duration;

use er_cache::CacheStatus;
use er_core::{MatchOptions, ResultTable};

#[derive(Debug)]
pub struct MatchSummary {
    pub source: PathBuf,
    pub source_column: String,
    pub target: PathBuf,
    pub target_column: String,
    pub target_rows: usize,
    pub options: MatchOptions,
    pub results: ResultTable,
    pub cache: Option<CacheStatus>,
    pub elapsed: Duration,
    pub output: Option<PathBuf>,
}
