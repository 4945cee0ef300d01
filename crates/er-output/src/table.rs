//! Flattening of a [`ResultTable`] into a rectangular table.
//!
//! Layout: `Original`, then for each rank `i` in `1..=k` a
//! `{i} Closest Match` column and a `{i} Similarity Score (%)` column, with
//! ranks written as English ordinals (`1st`, `2nd`, `3rd`, ...).

use er_core::ResultTable;

use crate::error::{OutputError, Result};

/// Header of the first column.
pub const ORIGINAL_HEADER: &str = "Original";

/// English ordinal for a 1-based rank: `1st`, `2nd`, `3rd`, `4th`, `11th`, `21st`.
pub fn ordinal(n: usize) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

/// Column headers for a table holding `k` ranks.
pub fn column_headers(k: usize) -> Vec<String> {
    let mut headers = Vec::with_capacity(1 + 2 * k);
    headers.push(ORIGINAL_HEADER.to_string());
    for rank in 1..=k {
        let ord = ordinal(rank);
        headers.push(format!("{ord} Closest Match"));
        headers.push(format!("{ord} Similarity Score (%)"));
    }
    headers
}

/// A single non-empty cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    /// Similarity as a percentage, already rounded to two decimals.
    Percent(f64),
}

impl Cell {
    /// Text rendering used for CSV and console output.
    pub fn render(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Percent(value) => format!("{value:.2}"),
        }
    }
}

/// Results flattened to one row per source item; `None` marks an absent slot.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchTable {
    headers: Vec<String>,
    rows: Vec<Vec<Option<Cell>>>,
}

impl MatchTable {
    /// Pair each original value with its result row.
    ///
    /// `originals` must be index-aligned with `results`.
    pub fn from_results<S: AsRef<str>>(originals: &[S], results: &ResultTable) -> Result<Self> {
        if originals.len() != results.len() {
            return Err(OutputError::RowMismatch {
                originals: originals.len(),
                results: results.len(),
            });
        }

        let k = results.k;
        let rows = originals
            .iter()
            .zip(results.iter())
            .map(|(original, result)| {
                let mut row = Vec::with_capacity(1 + 2 * k);
                row.push(Some(Cell::Text(original.as_ref().to_string())));
                for rank in 0..k {
                    let slot = result.slot(rank);
                    row.push(slot.map(|c| Cell::Text(c.text.clone())));
                    row.push(slot.map(|c| Cell::Percent(c.percent())));
                }
                row
            })
            .collect();

        Ok(Self {
            headers: column_headers(k),
            rows,
        })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<Option<Cell>>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
