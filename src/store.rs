use crate::error::StorageError;
use crate::record::SightingRecord;
use log::debug;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::NamedTempFile;

pub trait SightingStore: Send + Sync {
    /// Persist one record after the existing ones. On error nothing is stored.
    fn append(&self, record: SightingRecord) -> Result<SightingRecord, StorageError>;

    /// Every stored record, oldest first.
    fn list_all(&self) -> Result<Vec<SightingRecord>, StorageError>;
}

#[derive(Default)]
pub struct MemoryStore {
    sightings: Mutex<Vec<SightingRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SightingStore for MemoryStore {
    fn append(&self, record: SightingRecord) -> Result<SightingRecord, StorageError> {
        let mut sightings = self.sightings.lock().map_err(|_| StorageError::Poisoned)?;
        sightings.push(record.clone());
        Ok(record)
    }

    fn list_all(&self) -> Result<Vec<SightingRecord>, StorageError> {
        let sightings = self.sightings.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(sightings.clone())
    }
}

/// Sightings kept as one pretty-printed JSON array, rewritten on every append.
///
/// The read-modify-write cycle is not locked, so overlapping appends are last
/// write wins: one of them may be dropped from the file even though it
/// reported success.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn display_path(&self) -> String {
        self.path.display().to_string()
    }

    fn io_error(&self, source: std::io::Error) -> StorageError {
        StorageError::Io {
            path: self.display_path(),
            source,
        }
    }

    fn read_sightings(&self) -> Result<Vec<SightingRecord>, StorageError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("{} does not exist yet, starting empty", self.display_path());
                return Ok(Vec::new());
            }
            Err(e) => return Err(self.io_error(e)),
        };

        serde_json::from_str(&contents).map_err(|source| StorageError::Json {
            path: self.display_path(),
            source,
        })
    }

    /// Each write goes to its own temp file in the same directory, then
    /// replaces the data file in one rename. A failed write leaves the old
    /// file intact and never publishes another writer's data.
    fn write_sightings(&self, sightings: &[SightingRecord]) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(sightings).map_err(|source| StorageError::Json {
            path: self.display_path(),
            source,
        })?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| self.io_error(e))?;
        tmp.write_all(json.as_bytes())
            .and_then(|_| tmp.as_file().sync_all())
            .map_err(|e| self.io_error(e))?;
        tmp.persist(&self.path).map_err(|e| self.io_error(e.error))?;

        Ok(())
    }
}

impl SightingStore for JsonFileStore {
    fn append(&self, record: SightingRecord) -> Result<SightingRecord, StorageError> {
        let mut sightings = self.read_sightings()?;
        sightings.push(record.clone());
        self.write_sightings(&sightings)?;
        Ok(record)
    }

    fn list_all(&self) -> Result<Vec<SightingRecord>, StorageError> {
        self.read_sightings()
    }
}
