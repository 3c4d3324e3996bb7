use std::{collections::BTreeMap, fmt};

use super::{
    category::Category,
    exchange::{self, ExportFormat},
    filter::TransactionFilter,
    report::{FinancialReport, ReportPeriod},
    settings::{Settings, SettingsPatch},
    summary::{self, CategoryTotals, GoalProgress, MonthKey, MonthlyTotals},
    transaction::{Transaction, TransactionKind},
};
use crate::{
    errors::LedgerError,
    storage::{MemoryStorage, StorageBackend},
};

/// Owns the transaction sequence, the id counter and the settings, and writes
/// the whole state back to its storage backend after every mutation.
pub struct Ledger {
    transactions: Vec<Transaction>,
    next_id: u64,
    settings: Settings,
    storage: Box<dyn StorageBackend>,
    /// Set when the stored blob could not be loaded nor copied aside;
    /// automatic writes are skipped so it is not overwritten.
    keep_stored: bool,
}

impl fmt::Debug for Ledger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ledger")
            .field("transactions", &self.transactions.len())
            .field("next_id", &self.next_id)
            .field("settings", &self.settings)
            .field("keep_stored", &self.keep_stored)
            .finish_non_exhaustive()
    }
}

impl Ledger {
    /// Opens the ledger stored in `storage`. Missing or unreadable state yields
    /// an empty ledger with default settings; this never fails. A blob that
    /// cannot be decoded is handed to [`StorageBackend::backup`] first.
    pub fn open(storage: Box<dyn StorageBackend>) -> Self {
        let mut ledger = Self {
            transactions: Vec::new(),
            next_id: 1,
            settings: Settings::default(),
            storage,
            keep_stored: false,
        };
        ledger.load();
        ledger
    }

    /// Ledger backed by a fresh [`MemoryStorage`].
    pub fn in_memory() -> Self {
        Self::open(Box::new(MemoryStorage::new()))
    }

    fn load(&mut self) {
        let blob = match self.storage.read() {
            Ok(Some(blob)) => blob,
            Ok(None) => {
                tracing::debug!("no stored ledger found; starting empty");
                return;
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to read stored ledger; starting empty");
                self.keep_stored = true;
                return;
            }
        };
        let decoded = exchange::decode_state(&blob).and_then(|state| {
            let floor = exchange::next_id_after(&state.transactions)?;
            Ok((state, floor))
        });
        let (state, floor) = match decoded {
            Ok(decoded) => decoded,
            Err(err) => {
                tracing::warn!(error = %err, "stored ledger is corrupt; starting empty");
                if let Err(err) = self.storage.backup(&blob) {
                    tracing::error!(
                        error = %err,
                        "could not copy the corrupt ledger aside; automatic saves are off"
                    );
                    self.keep_stored = true;
                }
                return;
            }
        };
        let stored_next = state.next_id.filter(|id| *id > 0).unwrap_or(1);
        if stored_next < floor {
            tracing::warn!(stored_next, floor, "stored nextId is stale; raising it");
        }
        self.next_id = stored_next.max(floor);
        self.settings = Settings::default().merged(state.settings_patch());
        self.transactions = state.transactions;
        tracing::info!(
            transactions = self.transactions.len(),
            next_id = self.next_id,
            "ledger loaded"
        );
    }

    /// Writes the full state to storage, replacing whatever was there.
    pub fn save(&self) -> Result<(), LedgerError> {
        let blob = exchange::encode_state(&self.transactions, self.next_id, &self.settings)?;
        self.storage.write(&blob)
    }

    fn persist(&self) {
        if self.keep_stored {
            tracing::warn!("stored ledger was not loaded; skipping automatic save");
            return;
        }
        if let Err(err) = self.save() {
            tracing::error!(error = %err, "failed to persist ledger");
        }
    }

    /// Stores `transaction` under the next free id and returns the stored copy.
    /// Fails without changing anything once the id space is used up.
    pub fn add(&mut self, mut transaction: Transaction) -> Result<Transaction, LedgerError> {
        let following = self
            .next_id
            .checked_add(1)
            .ok_or(LedgerError::IdsExhausted(self.next_id))?;
        transaction.id = self.next_id;
        self.next_id = following;
        tracing::debug!(id = transaction.id, "transaction added");
        self.transactions.push(transaction.clone());
        self.persist();
        Ok(transaction)
    }

    /// Replaces the entry carrying `transaction.id`; returns `false` when absent.
    pub fn update(&mut self, transaction: Transaction) -> bool {
        let Some(slot) = self
            .transactions
            .iter_mut()
            .find(|txn| txn.id == transaction.id)
        else {
            tracing::debug!(id = transaction.id, "update skipped: unknown id");
            return false;
        };
        *slot = transaction;
        tracing::debug!(id = slot.id, "transaction updated");
        self.persist();
        true
    }

    pub fn remove(&mut self, id: u64) -> bool {
        let Some(index) = self.transactions.iter().position(|txn| txn.id == id) else {
            tracing::debug!(id, "remove skipped: unknown id");
            return false;
        };
        self.transactions.remove(index);
        tracing::debug!(id, "transaction removed");
        self.persist();
        true
    }

    pub fn get(&self, id: u64) -> Option<&Transaction> {
        self.transactions.iter().find(|txn| txn.id == id)
    }

    pub fn list(&self, filter: &TransactionFilter) -> Vec<Transaction> {
        filter.apply(&self.transactions, &self.settings)
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn update_settings(&mut self, patch: SettingsPatch) {
        self.settings.merge(patch);
        tracing::debug!(settings = ?self.settings, "settings updated");
        self.persist();
    }

    pub fn total_income(&self) -> f64 {
        summary::total_for(&self.transactions, TransactionKind::Income)
    }

    pub fn total_expenses(&self) -> f64 {
        summary::total_for(&self.transactions, TransactionKind::Expense)
    }

    pub fn balance(&self) -> f64 {
        self.total_income() - self.total_expenses()
    }

    pub fn monthly_data(&self) -> BTreeMap<MonthKey, MonthlyTotals> {
        summary::monthly_totals(&self.transactions)
    }

    pub fn category_data(&self) -> BTreeMap<Category, CategoryTotals> {
        summary::category_totals(&self.transactions, &self.settings)
    }

    pub fn goal_progress(&self) -> GoalProgress {
        summary::goal_progress(self.total_expenses(), &self.settings)
    }

    pub fn report(&self, period: ReportPeriod) -> FinancialReport {
        FinancialReport {
            balance: self.balance(),
            income: self.total_income(),
            expenses: self.total_expenses(),
            goal: self.goal_progress(),
            transaction_count: self.transactions.len(),
            period,
            settings: self.settings.clone(),
        }
    }

    pub fn export(&self, format: ExportFormat) -> Result<String, LedgerError> {
        match format {
            ExportFormat::Json => exchange::export_json(&self.transactions, &self.settings),
            ExportFormat::Csv => exchange::export_csv(&self.transactions, &self.settings),
        }
    }

    /// Applies a JSON export to this ledger. The payload is fully parsed and
    /// validated before anything changes, so a failed import leaves the ledger as it was.
    pub fn import(&mut self, data: &str, format: ExportFormat) -> Result<(), LedgerError> {
        if format != ExportFormat::Json {
            return Err(LedgerError::UnsupportedFormat(format.to_string()));
        }
        let payload = exchange::parse_import(data).map_err(|err| {
            tracing::warn!(error = %err, "import rejected");
            err
        })?;
        if let Some(transactions) = payload.transactions {
            self.next_id = exchange::next_id_after(&transactions)?;
            self.transactions = transactions;
        }
        if let Some(patch) = payload.settings {
            self.settings.merge(patch);
        }
        tracing::info!(
            transactions = self.transactions.len(),
            next_id = self.next_id,
            "import applied"
        );
        self.persist();
        Ok(())
    }
}
