use std::{
    fs::{self, File},
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};

use chrono::Local;

use super::{Result, StorageBackend};

const TMP_SUFFIX: &str = "tmp";
const BACKUP_EXTENSION: &str = "json";
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Keeps the ledger blob in a single JSON file on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling file a backup taken now would be written to,
    /// e.g. `financial_data_20240131_094500.json`.
    pub fn backup_path(&self) -> PathBuf {
        let stem = self
            .path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("ledger");
        let timestamp = Local::now().format(BACKUP_TIMESTAMP_FORMAT);
        self.path
            .with_file_name(format!("{}_{}.{}", stem, timestamp, BACKUP_EXTENSION))
    }
}

impl StorageBackend for JsonFileStorage {
    fn read(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(data) => Ok(Some(data)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn write(&self, blob: &str) -> Result<()> {
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, blob)?;
        fs::rename(&tmp, &self.path)?;
        tracing::debug!(path = %self.path.display(), bytes = blob.len(), "ledger blob written");
        Ok(())
    }

    fn backup(&self, blob: &str) -> Result<()> {
        let path = self.backup_path();
        write_atomic(&path, blob)?;
        tracing::warn!(path = %path.display(), "kept a copy of the unreadable ledger blob");
        Ok(())
    }
}

pub(crate) fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

pub(crate) fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
