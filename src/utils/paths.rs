use dirs::home_dir;
use std::{env, path::PathBuf};

const DEFAULT_DIR_NAME: &str = ".finance_core";
const DATA_FILE: &str = "financial_data.json";
const CONFIG_FILE: &str = "config.json";

pub const HOME_ENV: &str = "FINANCE_CORE_HOME";

/// Returns the application data directory, defaulting to `~/.finance_core`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Default location of the ledger blob inside `base`.
pub fn data_file_in(base: &std::path::Path) -> PathBuf {
    base.join(DATA_FILE)
}

pub fn config_file_in(base: &std::path::Path) -> PathBuf {
    base.join(CONFIG_FILE)
}
