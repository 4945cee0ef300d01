//! Export of entity resolution results.
//!
//! A [`er_core::ResultTable`] is flattened into a [`MatchTable`] with one row
//! per source item (`Original`, then a match and a score column per rank) and
//! written as CSV or JSON.

mod error;
mod table;
mod writer;

pub use error::{OutputError, Result};
pub use table::{Cell, MatchTable, ORIGINAL_HEADER, column_headers, ordinal};
pub use writer::{OutputFormat, write_csv, write_json, write_table, write_to_path};
