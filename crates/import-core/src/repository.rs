//! Persistence collaborators for imported records
//!
//! The save call is a single blocking batch operation: either the whole
//! batch lands or the failure is reported as a whole. No partial commit or
//! retry semantics.

use crate::error::{Error, Result};
use crate::record::Person;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// A batch persistence target for imported person records
pub trait Repository {
    /// Persist all records as one batch
    fn save_all(&mut self, records: &[Person]) -> Result<()>;
}

/// One persisted import batch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedBatch {
    /// When the batch was saved
    pub saved_at: DateTime<Utc>,
    /// The records in the batch, in row order
    pub records: Vec<Person>,
}

/// Store holding every saved batch, serialized as one JSON file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchStore {
    /// Saved batches, oldest first
    pub batches: Vec<SavedBatch>,
}

impl BatchStore {
    /// Load a store from a file, or create empty if not exists
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| Error::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::from_str(&content).map_err(Error::Json)
    }

    /// Save the store to a file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Total number of records across all batches
    pub fn record_count(&self) -> usize {
        self.batches.iter().map(|b| b.records.len()).sum()
    }
}

/// Repository appending timestamped batches to a JSON file
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    /// Create a repository backed by the given file path
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// The backing file path
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Repository for JsonFileRepository {
    fn save_all(&mut self, records: &[Person]) -> Result<()> {
        let mut store = BatchStore::load(&self.path).map_err(|e| Error::Persistence {
            message: e.to_string(),
        })?;

        store.batches.push(SavedBatch {
            saved_at: Utc::now(),
            records: records.to_vec(),
        });

        store.save(&self.path).map_err(|e| Error::Persistence {
            message: e.to_string(),
        })?;

        info!(
            count = records.len(),
            path = %self.path.display(),
            "saved import batch"
        );
        Ok(())
    }
}

/// In-memory repository for tests and dry runs
#[derive(Debug, Clone, Default)]
pub struct MemoryRepository {
    /// Every record handed to save_all, in order
    pub records: Vec<Person>,
}

impl MemoryRepository {
    /// Create an empty in-memory repository
    pub fn new() -> Self {
        Self::default()
    }
}

impl Repository for MemoryRepository {
    fn save_all(&mut self, records: &[Person]) -> Result<()> {
        self.records.extend_from_slice(records);
        Ok(())
    }
}
