//! CSV and JSON writers for flattened match tables.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use serde::Serialize;
use serde::ser::{SerializeMap, SerializeSeq, Serializer};

use crate::error::{OutputError, Result};
use crate::table::{Cell, MatchTable};

/// Supported export formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

impl OutputFormat {
    /// Infer the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        ext.parse().ok()
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = OutputError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => Err(OutputError::UnknownFormat(other.to_string())),
        }
    }
}

/// Write the table as CSV; absent slots become empty cells.
pub fn write_csv<W: Write>(table: &MatchTable, writer: W) -> Result<()> {
    let mut out = csv::WriterBuilder::new().from_writer(writer);
    out.write_record(table.headers())?;
    for row in table.rows() {
        out.write_record(
            row.iter()
                .map(|cell| cell.as_ref().map(Cell::render).unwrap_or_default()),
        )?;
    }
    out.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Write the table as a pretty-printed JSON array of objects.
///
/// Keys follow the header order; absent slots are `null` and scores are numbers.
pub fn write_json<W: Write>(table: &MatchTable, writer: W) -> Result<()> {
    serde_json::to_writer_pretty(writer, &JsonRows(table))?;
    Ok(())
}

/// Write the table in `format`, chosen by the caller.
pub fn write_table<W: Write>(table: &MatchTable, format: OutputFormat, writer: W) -> Result<()> {
    match format {
        OutputFormat::Csv => write_csv(table, writer),
        OutputFormat::Json => write_json(table, writer),
    }
}

/// Write the table to `path`.
///
/// Writes to a temp file first, then renames it into place.
pub fn write_to_path(table: &MatchTable, format: OutputFormat, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| OutputError::Io {
            operation: "create directory",
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    let temp_path = path.with_extension(format!("{}.tmp", format.extension()));
    let file = File::create(&temp_path).map_err(|e| OutputError::Io {
        operation: "create",
        path: temp_path.clone(),
        source: e,
    })?;

    let mut writer = BufWriter::new(file);
    let written = write_table(table, format, &mut writer).and_then(|()| {
        writer.flush().map_err(|e| OutputError::Io {
            operation: "write",
            path: temp_path.clone(),
            source: e,
        })
    });
    drop(writer);
    if let Err(error) = written {
        let _ = fs::remove_file(&temp_path);
        return Err(error);
    }

    fs::rename(&temp_path, path).map_err(|e| OutputError::Io {
        operation: "rename",
        path: path.to_path_buf(),
        source: e,
    })?;

    tracing::info!(path = %path.display(), rows = table.len(), "wrote results");
    Ok(())
}

struct JsonRows<'a>(&'a MatchTable);

struct JsonRow<'a> {
    headers: &'a [String],
    cells: &'a [Option<Cell>],
}

impl Serialize for JsonRows<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let table = self.0;
        let mut seq = serializer.serialize_seq(Some(table.len()))?;
        for cells in table.rows() {
            seq.serialize_element(&JsonRow {
                headers: table.headers(),
                cells,
            })?;
        }
        seq.end()
    }
}

impl Serialize for JsonRow<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.headers.len()))?;
        for (header, cell) in self.headers.iter().zip(self.cells) {
            match cell {
                Some(Cell::Text(text)) => map.serialize_entry(header, text)?,
                Some(Cell::Percent(value)) => map.serialize_entry(header, value)?,
                None => map.serialize_entry(header, &Option::<()>::None)?,
            }
        }
        map.end()
    }
}
