use std::cmp::Ordering;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

use super::{category::Category, settings::Settings, transaction::Transaction, TransactionKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    Date,
    Value,
    Description,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// Declarative predicates plus optional ordering applied to a read of the ledger.
///
/// Every populated field narrows the result (logical AND); `None` leaves that
/// dimension unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransactionFilter {
    pub category: Option<Category>,
    #[serde(rename = "type")]
    pub kind: Option<TransactionKind>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub search: Option<String>,
    pub sort_by: Option<SortField>,
    pub sort_order: Option<SortOrder>,
}

impl TransactionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn kind(mut self, kind: TransactionKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn between(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.start_date = start;
        self.end_date = end;
        self
    }

    /// Window covering the `days` days before `today`, both ends included.
    pub fn last_days(self, today: NaiveDate, days: u32) -> Self {
        let start = today
            .checked_sub_days(Days::new(u64::from(days)))
            .unwrap_or(NaiveDate::MIN);
        self.between(Some(start), Some(today))
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn sort(mut self, field: SortField, order: SortOrder) -> Self {
        self.sort_by = Some(field);
        self.sort_order = Some(order);
        self
    }

    pub fn matches(&self, txn: &Transaction, settings: &Settings) -> bool {
        if let Some(category) = &self.category {
            if &txn.category != category {
                return false;
            }
        }
        if let Some(kind) = self.kind {
            if txn.kind != kind {
                return false;
            }
        }
        if let Some(start) = self.start_date {
            if txn.date < start {
                return false;
            }
        }
        if let Some(end) = self.end_date {
            if txn.date > end {
                return false;
            }
        }
        match self.search.as_deref() {
            Some(term) if !term.is_empty() => {
                let needle = term.to_lowercase();
                txn.description.to_lowercase().contains(&needle)
                    || txn.category_name(settings).to_lowercase().contains(&needle)
                    || txn.notes.to_lowercase().contains(&needle)
            }
            _ => true,
        }
    }

    /// Returns a filtered, optionally sorted copy; the input slice is never touched.
    pub fn apply(&self, transactions: &[Transaction], settings: &Settings) -> Vec<Transaction> {
        let mut filtered: Vec<Transaction> = transactions
            .iter()
            .filter(|txn| self.matches(txn, settings))
            .cloned()
            .collect();
        if let Some(field) = self.sort_by {
            let order = self.sort_order.unwrap_or_default();
            filtered.sort_by(|a, b| {
                let ordering = compare_by(field, a, b);
                match order {
                    SortOrder::Asc => ordering,
                    SortOrder::Desc => ordering.reverse(),
                }
            });
        }
        filtered
    }
}

fn compare_by(field: SortField, a: &Transaction, b: &Transaction) -> Ordering {
    match field {
        SortField::Date => a.date.cmp(&b.date),
        SortField::Value => a.value.get().total_cmp(&b.value.get()),
        SortField::Description => collate(&a.description, &b.description),
    }
}

/// Locale-friendly text ordering: accents and case are folded first, raw text breaks ties.
pub fn collate(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.cmp(b))
}

fn collation_key(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}
