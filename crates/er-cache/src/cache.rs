//! Result memoization owned by the caller.
//!
//! The matcher itself never caches. Callers that re-run the same resolution
//! (same inputs, same options) look results up here first.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use er_core::ResultTable;
use serde::{Deserialize, Serialize};

use crate::error::{CacheError, Result};
use crate::key::CacheKey;

/// Whether a lookup was served from the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    Hit,
    Miss,
}

/// On-disk representation of one entry.
#[derive(Debug, Serialize, Deserialize)]
struct CacheEntry {
    key: CacheKey,
    table: ResultTable,
}

/// In-memory cache with an optional directory of JSON entries behind it.
#[derive(Debug, Default)]
pub struct ResultCache {
    entries: HashMap<CacheKey, ResultTable>,
    dir: Option<PathBuf>,
}

impl ResultCache {
    /// Cache that lives only as long as this value.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Cache persisted under `dir` (created if missing).
    pub fn with_dir(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| CacheError::Io {
            operation: "create directory",
            path: dir.clone(),
            source: e,
        })?;
        Ok(Self {
            entries: HashMap::new(),
            dir: Some(dir),
        })
    }

    pub fn dir(&self) -> Option<&Path> {
        self.dir.as_deref()
    }

    /// Number of entries held in memory.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop in-memory entries. Files on disk are kept.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Look up a table, falling back to disk.
    ///
    /// Unreadable or mismatched disk entries are logged and treated as misses.
    pub fn get(&mut self, key: &CacheKey) -> Option<ResultTable> {
        if let Some(table) = self.entries.get(key) {
            return Some(table.clone());
        }
        let path = self.entry_path(key)?;
        if !path.exists() {
            return None;
        }
        match read_entry(&path) {
            Ok(entry) if entry.key == *key => {
                self.entries.insert(key.clone(), entry.table.clone());
                Some(entry.table)
            }
            Ok(_) => {
                tracing::warn!(path = %path.display(), "cache entry key mismatch, ignoring");
                None
            }
            Err(error) => {
                tracing::warn!(path = %path.display(), %error, "unreadable cache entry, ignoring");
                None
            }
        }
    }

    /// Store a table in memory and, when configured, on disk.
    pub fn insert(&mut self, key: CacheKey, table: ResultTable) -> Result<()> {
        if let Some(path) = self.entry_path(&key) {
            let entry = CacheEntry { key, table };
            write_entry(&path, &entry)?;
            self.entries.insert(entry.key, entry.table);
        } else {
            self.entries.insert(key, table);
        }
        Ok(())
    }

    /// Return the cached table for `key`, or compute and store it.
    ///
    /// A failure to persist the computed table is logged, not returned: the
    /// caller still gets its result.
    pub fn get_or_compute<E, F>(
        &mut self,
        key: CacheKey,
        compute: F,
    ) -> std::result::Result<(ResultTable, CacheStatus), E>
    where
        F: FnOnce() -> std::result::Result<ResultTable, E>,
    {
        if let Some(table) = self.get(&key) {
            tracing::debug!(%key, "cache hit");
            return Ok((table, CacheStatus::Hit));
        }
        tracing::debug!(%key, "cache miss");
        let table = compute()?;
        if let Err(error) = self.insert(key, table.clone()) {
            tracing::warn!(%error, "failed to store result in cache");
        }
        Ok((table, CacheStatus::Miss))
    }

    fn entry_path(&self, key: &CacheKey) -> Option<PathBuf> {
        self.dir.as_ref().map(|dir| dir.join(key.file_name()))
    }
}

fn read_entry(path: &Path) -> Result<CacheEntry> {
    let file = File::open(path).map_err(|e| CacheError::Io {
        operation: "open",
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

/// Write an entry via temp file + rename so readers never see partial files.
fn write_entry(path: &Path, entry: &CacheEntry) -> Result<()> {
    let temp_path = path.with_extension("json.tmp");
    let file = File::create(&temp_path).map_err(|e| CacheError::Io {
        operation: "create",
        path: temp_path.clone(),
        source: e,
    })?;
    let mut writer = BufWriter::new(file);
    let written = serde_json::to_writer(&mut writer, entry)
        .map_err(CacheError::from)
        .and_then(|()| {
            writer.flush().map_err(|e| CacheError::Io {
                operation: "write",
                path: temp_path.clone(),
                source: e,
            })
        });
    drop(writer);

    let renamed = written.and_then(|()| {
        fs::rename(&temp_path, path).map_err(|e| CacheError::Io {
            operation: "rename",
            path: path.to_path_buf(),
            source: e,
        })
    });
    if renamed.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    renamed
}
