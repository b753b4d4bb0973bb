//! Persistence for the last spin date.
//!
//! The gate only needs to remember one calendar day, so the record is tiny.
//! [`JsonFileStore`] keeps it in `.dinewheel/spin_record.json`;
//! [`MemoryStore`] keeps it in memory for tests and throwaway sessions.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::SPIN_RECORD_FILE;

/// The persisted spin record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpinRecord {
    /// Local calendar day of the most recent spin request.
    pub last_spin_date: NaiveDate,
}

/// Error type for spin record persistence.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Error reading or writing the record file.
    #[error("Failed to access spin record: {0}")]
    Io(#[from] io::Error),
    /// The record file exists but is not valid JSON.
    #[error("Failed to parse spin record: {0}")]
    Parse(#[from] serde_json::Error),
    /// The store refused the operation.
    #[error("Spin record store unavailable: {0}")]
    Unavailable(String),
}

/// Where the last spin date is kept between runs.
pub trait SpinRecordStore {
    /// Read the record, or `None` if nothing has been saved.
    fn load(&self) -> Result<Option<SpinRecord>, StoreError>;

    /// Replace the record.
    fn save(&mut self, record: &SpinRecord) -> Result<(), StoreError>;

    /// Remove the record. Clearing an empty store succeeds.
    fn clear(&mut self) -> Result<(), StoreError>;
}

/// Spin record stored as a JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl Default for JsonFileStore {
    fn default() -> Self {
        Self::new(SPIN_RECORD_FILE)
    }
}

impl JsonFileStore {
    /// Create a store backed by the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the record file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "spin_record.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl SpinRecordStore for JsonFileStore {
    fn load(&self) -> Result<Option<SpinRecord>, StoreError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&self.path)?;
        let record = serde_json::from_str(&contents)?;
        Ok(Some(record))
    }

    fn save(&mut self, record: &SpinRecord) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        // Write then rename so a crash never leaves a half-written record
        let temp = self.temp_path();
        let contents = serde_json::to_string_pretty(record)?;
        fs::write(&temp, contents)?;
        fs::rename(&temp, &self.path)?;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Spin record held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    record: Option<SpinRecord>,
    fail_writes: bool,
}

impl MemoryStore {
    /// Create a store that already holds `record`.
    pub fn with_record(record: SpinRecord) -> Self {
        Self {
            record: Some(record),
            fail_writes: false,
        }
    }

    /// Create a store whose writes always fail.
    pub fn failing() -> Self {
        Self {
            record: None,
            fail_writes: true,
        }
    }

    /// The record currently held.
    pub fn record(&self) -> Option<SpinRecord> {
        self.record
    }
}

impl SpinRecordStore for MemoryStore {
    fn load(&self) -> Result<Option<SpinRecord>, StoreError> {
        Ok(self.record)
    }

    fn save(&mut self, record: &SpinRecord) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(StoreError::Unavailable("writes disabled".into()));
        }
        self.record = Some(*record);
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(StoreError::Unavailable("writes disabled".into()));
        }
        self.record = None;
        Ok(())
    }
}
