use serde::{Deserialize, Serialize};
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use thiserror::Error;

use crate::{
    errors::LedgerError,
    storage::json_backend::{tmp_path, write_atomic},
    utils::paths,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl From<LedgerError> for ConfigError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::Io(err) => ConfigError::Io(err),
            LedgerError::Serde(err) => ConfigError::Serde(err),
            other => ConfigError::Io(io::Error::new(io::ErrorKind::Other, other.to_string())),
        }
    }
}

/// Application-level preferences that live outside the ledger blob.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Overrides where the ledger blob is stored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,
    /// `tracing` filter directive, e.g. `finance_core=debug`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_filter: Option<String>,
}

pub struct ConfigManager {
    base: PathBuf,
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self::with_base_dir(paths::app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Self {
        Self {
            path: paths::config_file_in(&base),
            base,
        }
    }

    /// Reads the config file; a missing file yields the defaults.
    pub fn load(&self) -> Result<Config, ConfigError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    /// Ledger blob location: the configured override, else the default file in the base dir.
    pub fn resolve_data_file(&self, config: &Config) -> PathBuf {
        config
            .data_file
            .clone()
            .unwrap_or_else(|| paths::data_file_in(&self.base))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
