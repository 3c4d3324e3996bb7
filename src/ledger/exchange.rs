//! Serializers for the persisted blob and the JSON/CSV exchange formats.

use std::{collections::HashSet, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::{
    settings::{Settings, SettingsPatch},
    transaction::Transaction,
};
use crate::errors::LedgerError;

pub const CSV_HEADER: [&str; 6] = ["Date", "Description", "Category", "Type", "Value", "Notes"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl FromStr for ExportFormat {
    type Err = LedgerError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            other => Err(LedgerError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        };
        f.write_str(label)
    }
}

/// Full ledger state as written to the storage backend.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PersistedState<'a> {
    transactions: &'a [Transaction],
    next_id: u64,
    settings: &'a Settings,
}

/// Ledger state as read back; every key may be missing. Settings stay untyped
/// here and are read with [`SettingsPatch::from_stored`].
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredState {
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub next_id: Option<u64>,
    #[serde(default)]
    pub settings: Option<serde_json::Value>,
}

impl StoredState {
    pub fn settings_patch(&self) -> SettingsPatch {
        self.settings
            .as_ref()
            .map(SettingsPatch::from_stored)
            .unwrap_or_default()
    }
}

#[derive(Debug, Serialize)]
struct ExportDocument<'a> {
    transactions: &'a [Transaction],
    settings: &'a Settings,
}

/// Parsed import document. Absent keys leave the matching ledger state alone.
#[derive(Debug, Default, Deserialize)]
pub struct ImportPayload {
    #[serde(default)]
    pub transactions: Option<Vec<Transaction>>,
    #[serde(default)]
    pub settings: Option<SettingsPatch>,
}

pub fn encode_state(
    transactions: &[Transaction],
    next_id: u64,
    settings: &Settings,
) -> Result<String, LedgerError> {
    let state = PersistedState {
        transactions,
        next_id,
        settings,
    };
    Ok(serde_json::to_string_pretty(&state)?)
}

pub fn decode_state(blob: &str) -> Result<StoredState, LedgerError> {
    let state: StoredState = serde_json::from_str(blob)?;
    ensure_unique_ids(&state.transactions)?;
    next_id_after(&state.transactions)?;
    Ok(state)
}

pub fn export_json(transactions: &[Transaction], settings: &Settings) -> Result<String, LedgerError> {
    let document = ExportDocument {
        transactions,
        settings,
    };
    Ok(serde_json::to_string_pretty(&document)?)
}

pub fn export_csv(transactions: &[Transaction], settings: &Settings) -> Result<String, LedgerError> {
    let language = settings.locale_config().language;
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;
    for txn in transactions {
        writer.write_record([
            txn.formatted_date(settings),
            txn.description.clone(),
            txn.category_name(settings),
            txn.kind.label(language).to_string(),
            txn.value.to_string(),
            txn.notes.clone(),
        ])?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|err| LedgerError::Io(err.into_error()))?;
    String::from_utf8(bytes).map_err(|err| LedgerError::Storage(err.to_string()))
}

pub fn parse_import(data: &str) -> Result<ImportPayload, LedgerError> {
    let payload: ImportPayload = serde_json::from_str(data)?;
    if let Some(transactions) = &payload.transactions {
        ensure_unique_ids(transactions)?;
        next_id_after(transactions)?;
    }
    Ok(payload)
}

pub fn ensure_unique_ids(transactions: &[Transaction]) -> Result<(), LedgerError> {
    let mut seen = HashSet::with_capacity(transactions.len());
    for txn in transactions {
        if !seen.insert(txn.id) {
            return Err(LedgerError::DuplicateId(txn.id));
        }
    }
    Ok(())
}

/// First id above every id in `transactions` (1 for an empty slice). Fails when
/// the highest id leaves no room for another one.
pub fn next_id_after(transactions: &[Transaction]) -> Result<u64, LedgerError> {
    let max = transactions.iter().map(|txn| txn.id).max().unwrap_or(0);
    max.checked_add(1).ok_or(LedgerError::IdsExhausted(max))
}
