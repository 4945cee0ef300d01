//! CSV ingestion for entity resolution.
//!
//! Loads a CSV file and extracts one column as the source or target sequence
//! handed to the matcher.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use er_core::input::Side;
//! use er_ingest::read_csv;
//!
//! let table = read_csv(Path::new("customers.csv"))?;
//! let source = table.text_column("Company", Side::Source)?;
//! ```

mod error;
mod reader;
mod table;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use reader::{
    MAX_CSV_FILE_SIZE, check_file_size, check_file_size_with_limit, read_csv, validate_encoding,
};

// === Column Extraction ===
pub use table::CsvTable;
