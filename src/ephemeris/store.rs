use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use thiserror::Error;

use super::record::StateVector;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("index {0} out of bounds")]
    OutOfBounds(usize),
    #[error("snapshot IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("snapshot encoding error: {0}")]
    Encoding(#[from] serde_json::Error),
}

/// Read/write contract over the ordered, densely indexed record collection.
///
/// Indices are contiguous `0..count-1` and insertion order is assumed to
/// coincide with chronological order. Records are written once, in bulk,
/// during ingestion and never mutated afterwards. Reads may fail when the
/// backing store is unreachable; callers degrade rather than crash.
pub trait VectorStore: Send + Sync {
    fn count(&self) -> Result<usize, StoreError>;
    fn get(&self, index: usize) -> Result<StateVector, StoreError>;
    fn replace_all(&self, records: Vec<StateVector>) -> Result<(), StoreError>;
}

/// In-memory record collection with an optional JSON snapshot on disk, so
/// a restarted process serves the previous ephemeris without re-fetching.
pub struct MemoryStore {
    records: RwLock<Vec<StateVector>>,
    snapshot: Option<PathBuf>,
}

impl MemoryStore {
    /// Opens the store, loading the snapshot when one exists. A snapshot
    /// that fails to load is logged and ignored; the store starts empty.
    pub fn open(snapshot: Option<PathBuf>) -> Self {
        let records = match snapshot.as_deref() {
            Some(path) if path.exists() => match load_snapshot(path) {
                Ok(records) => {
                    log::info!(
                        "loaded {} ephemeris records from {}",
                        records.len(),
                        path.display()
                    );
                    records
                }
                Err(e) => {
                    log::warn!("failed to load snapshot {}: {}", path.display(), e);
                    Vec::new()
                }
            },
            _ => Vec::new(),
        };
        MemoryStore {
            records: RwLock::new(records),
            snapshot,
        }
    }

    fn persist(&self, records: &[StateVector]) -> Result<(), StoreError> {
        let path = match self.snapshot.as_deref() {
            Some(path) => path,
            None => return Ok(()),
        };
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, serde_json::to_string(records)?)?;
        Ok(())
    }
}

impl VectorStore for MemoryStore {
    fn count(&self) -> Result<usize, StoreError> {
        Ok(self.records.read().unwrap().len())
    }

    fn get(&self, index: usize) -> Result<StateVector, StoreError> {
        self.records
            .read()
            .unwrap()
            .get(index)
            .cloned()
            .ok_or(StoreError::OutOfBounds(index))
    }

    fn replace_all(&self, records: Vec<StateVector>) -> Result<(), StoreError> {
        let persisted = self.persist(&records);
        // memory is updated even when the snapshot write fails
        *self.records.write().unwrap() = records;
        persisted
    }
}

fn load_snapshot(path: &Path) -> Result<Vec<StateVector>, StoreError> {
    Ok(serde_json::from_str(&fs::read_to_string(path)?)?)
}
