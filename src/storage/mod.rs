pub mod json_backend;

use std::sync::{Arc, Mutex};

use crate::errors::LedgerError;

pub type Result<T> = std::result::Result<T, LedgerError>;

/// Abstraction over the single-blob store a ledger persists into.
pub trait StorageBackend: Send + Sync {
    /// Returns the stored blob, or `None` when nothing has been written yet.
    fn read(&self) -> Result<Option<String>>;
    /// Replaces the stored blob wholesale.
    fn write(&self, blob: &str) -> Result<()>;
    /// Sets aside a copy of a blob that could not be loaded, so a later
    /// `write` does not lose it.
    fn backup(&self, blob: &str) -> Result<()>;
}

/// In-process store. Clones share the same cell, so a test can keep a handle
/// and inspect (or reopen) what the ledger wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    cell: Arc<Mutex<Option<String>>>,
    backups: Arc<Mutex<Vec<String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_blob(blob: impl Into<String>) -> Self {
        Self {
            cell: Arc::new(Mutex::new(Some(blob.into()))),
            backups: Arc::default(),
        }
    }

    pub fn contents(&self) -> Option<String> {
        self.cell.lock().ok().and_then(|guard| guard.clone())
    }

    /// Blobs set aside by [`StorageBackend::backup`], oldest first.
    pub fn backups(&self) -> Vec<String> {
        self.backups
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

impl StorageBackend for MemoryStorage {
    fn read(&self) -> Result<Option<String>> {
        let guard = self
            .cell
            .lock()
            .map_err(|_| LedgerError::Storage("memory storage lock poisoned".into()))?;
        Ok(guard.clone())
    }

    fn write(&self, blob: &str) -> Result<()> {
        let mut guard = self
            .cell
            .lock()
            .map_err(|_| LedgerError::Storage("memory storage lock poisoned".into()))?;
        *guard = Some(blob.to_string());
        Ok(())
    }

    fn backup(&self, blob: &str) -> Result<()> {
        self.backups
            .lock()
            .map_err(|_| LedgerError::Storage("memory storage lock poisoned".into()))?
            .push(blob.to_string());
        Ok(())
    }
}

pub use json_backend::JsonFileStorage;
