use thiserror::Error;

/// Error type that captures common ledger failures.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Invalid transaction value: {0} (must be a finite, non-negative amount)")]
    InvalidValue(f64),
    #[error("Duplicate transaction id: {0}")]
    DuplicateId(u64),
    #[error("Transaction ids exhausted: no id is available after {0}")]
    IdsExhausted(u64),
    #[error("Unsupported format for this operation: {0}")]
    UnsupportedFormat(String),
    #[error("Storage error: {0}")]
    Storage(String),
}
