//! Ledger domain: transactions, settings, queries, rollups and exchange formats.

pub mod category;
pub mod exchange;
pub mod filter;
#[allow(clippy::module_inception)]
pub mod ledger;
pub mod report;
pub mod settings;
pub mod summary;
pub mod transaction;

pub use category::Category;
pub use exchange::{ExportFormat, CSV_HEADER};
pub use filter::{SortField, SortOrder, TransactionFilter};
pub use ledger::Ledger;
pub use report::{FinancialReport, ReportPeriod};
pub use settings::{Settings, SettingsPatch, DEFAULT_MONTHLY_GOAL};
pub use summary::{CategoryTotals, GoalProgress, MonthKey, MonthlyTotals};
pub use transaction::{Amount, Transaction, TransactionKind};
