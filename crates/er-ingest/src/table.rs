//! In-memory CSV table and column extraction.

use std::path::{Path, PathBuf};

use csv::ByteRecord;
use er_core::input::{Side, coerce_fields};

use crate::error::{IngestError, Result};

/// A loaded CSV file: header names plus raw records.
#[derive(Debug, Clone)]
pub struct CsvTable {
    path: PathBuf,
    headers: Vec<String>,
    records: Vec<ByteRecord>,
}

impl CsvTable {
    pub(crate) fn new(path: PathBuf, headers: Vec<String>, records: Vec<ByteRecord>) -> Self {
        Self {
            path,
            headers,
            records,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Locate a column by name.
    ///
    /// Exact matches win; otherwise the first header equal to `name` after
    /// trimming and ASCII case folding is used.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name).or_else(|| {
            let wanted = name.trim();
            self.headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(wanted))
        })
    }

    /// Raw cell bytes of one column, one entry per row.
    ///
    /// Rows shorter than the header contribute an empty cell.
    pub fn column(&self, name: &str) -> Result<Vec<&[u8]>> {
        let index = self.require_column(name)?;
        Ok(self
            .records
            .iter()
            .map(|record| record.get(index).unwrap_or_default())
            .collect())
    }

    /// One column as text, ready to hand to the matcher.
    pub fn text_column(&self, name: &str, side: Side) -> Result<Vec<String>> {
        let cells = self.column(name)?;
        coerce_fields(side, cells).map_err(|source| IngestError::Text {
            column: name.to_string(),
            path: self.path.clone(),
            source,
        })
    }

    fn require_column(&self, name: &str) -> Result<usize> {
        self.column_index(name)
            .ok_or_else(|| IngestError::ColumnNotFound {
                column: name.to_string(),
                path: self.path.clone(),
                available: self.headers.join(", "),
            })
    }
}
