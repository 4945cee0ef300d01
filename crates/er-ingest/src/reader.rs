//! CSV file reading.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ByteRecord, ReaderBuilder};

use crate::error::{IngestError, Result};
use crate::table::CsvTable;

/// Maximum file size for CSV loading (500 MB default).
pub const MAX_CSV_FILE_SIZE: u64 = 500 * 1024 * 1024;

/// Files wider than this are loaded but logged.
const WIDE_COLUMN_WARNING: usize = 500;

/// Check file size before loading.
pub fn check_file_size(path: &Path) -> Result<()> {
    check_file_size_with_limit(path, MAX_CSV_FILE_SIZE)
}

/// Check file size against a custom limit.
pub fn check_file_size_with_limit(path: &Path, max_size: u64) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| io_error(path, e))?;

    if metadata.len() == 0 {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }

    if metadata.len() > max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }

    Ok(())
}

/// Detect encoding and validate it's supported (UTF-8 only).
///
/// Checks for UTF-16 BOM markers which are not supported.
pub fn validate_encoding(path: &Path) -> Result<()> {
    let mut file = File::open(path).map_err(|e| io_error(path, e))?;

    let mut buffer = [0u8; 2];
    let bytes_read = file.read(&mut buffer).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    if bytes_read == 2 {
        let encoding = match buffer {
            [0xFF, 0xFE] => Some("UTF-16 LE"),
            [0xFE, 0xFF] => Some("UTF-16 BE"),
            _ => None,
        };
        if let Some(encoding) = encoding {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding,
            });
        }
    }

    // UTF-8 BOM is acceptable (stripped from the first header)
    Ok(())
}

/// Reads a CSV file with a single header row.
///
/// Rows may have fewer fields than the header; missing cells read as empty.
/// Cell values are kept as raw bytes until a column is requested as text.
pub fn read_csv(path: &Path) -> Result<CsvTable> {
    check_file_size(path)?;
    validate_encoding(path)?;

    let csv_error = |source: csv::Error| IngestError::CsvParse {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(csv_error)?;

    let headers = parse_headers(path, reader.byte_headers().map_err(csv_error)?)?;

    let mut records = Vec::new();
    for result in reader.byte_records() {
        records.push(result.map_err(csv_error)?);
    }

    if headers.len() > WIDE_COLUMN_WARNING {
        tracing::warn!(
            path = %path.display(),
            columns = headers.len(),
            "CSV has more than {WIDE_COLUMN_WARNING} columns"
        );
    }
    tracing::debug!(
        path = %path.display(),
        columns = headers.len(),
        rows = records.len(),
        "loaded CSV"
    );

    Ok(CsvTable::new(path.to_path_buf(), headers, records))
}

fn parse_headers(path: &Path, record: &ByteRecord) -> Result<Vec<String>> {
    let no_header = || IngestError::NoHeaderDetected {
        path: path.to_path_buf(),
    };

    let mut headers = Vec::with_capacity(record.len());
    for (index, field) in record.iter().enumerate() {
        let text = std::str::from_utf8(field).map_err(|_| no_header())?;
        let text = if index == 0 {
            text.strip_prefix('\u{feff}').unwrap_or(text)
        } else {
            text
        };
        headers.push(text.to_string());
    }

    if headers.is_empty() || headers.iter().all(|h| h.trim().is_empty()) {
        return Err(no_header());
    }
    Ok(headers)
}

fn io_error(path: &Path, e: std::io::Error) -> IngestError {
    if e.kind() == std::io::ErrorKind::NotFound {
        IngestError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else {
        IngestError::FileRead {
            path: path.to_path_buf(),
            source: e,
        }
    }
}
