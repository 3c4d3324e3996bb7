use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use super::{category::Category, settings::Settings};
use crate::currency::{format_currency_value, format_date, Language};
use crate::errors::LedgerError;

/// Non-negative monetary magnitude; direction lives in [`TransactionKind`].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Amount(f64);

impl Amount {
    pub const ZERO: Amount = Amount(0.0);

    pub fn new(value: f64) -> Result<Self, LedgerError> {
        if value.is_finite() && value >= 0.0 {
            Ok(Self(value))
        } else {
            Err(LedgerError::InvalidValue(value))
        }
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Amount {
    type Error = LedgerError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Amount::new(value)
    }
}

impl From<Amount> for f64 {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn label(self, language: Language) -> &'static str {
        match (language, self) {
            (Language::Portuguese, TransactionKind::Income) => "Receita",
            (Language::Portuguese, TransactionKind::Expense) => "Despesa",
            (Language::English, TransactionKind::Income) => "Income",
            (Language::English, TransactionKind::Expense) => "Expense",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: u64,
    #[serde(deserialize_with = "deserialize_date")]
    pub date: NaiveDate,
    pub description: String,
    pub category: Category,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub value: Amount,
    #[serde(default, deserialize_with = "deserialize_notes")]
    pub notes: String,
}

impl Transaction {
    /// Builds an unsaved transaction; the ledger assigns the id on add.
    pub fn new(
        date: NaiveDate,
        description: impl Into<String>,
        category: Category,
        kind: TransactionKind,
        value: Amount,
    ) -> Self {
        Self {
            id: 0,
            date,
            description: description.into(),
            category,
            kind,
            value,
            notes: String::new(),
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn with_id(mut self, id: u64) -> Self {
        self.id = id;
        self
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    pub fn formatted_date(&self, settings: &Settings) -> String {
        format_date(&settings.locale_config(), self.date)
    }

    pub fn formatted_value(&self, settings: &Settings) -> String {
        format_currency_value(
            self.value.get(),
            &settings.currency_code(),
            &settings.locale_config(),
        )
    }

    pub fn category_name(&self, settings: &Settings) -> String {
        let language = settings.locale_config().language;
        self.category.display_name(language).to_string()
    }
}

/// Accepts `YYYY-MM-DD` as well as ISO date-times, keeping only the calendar date.
fn deserialize_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    let trimmed = raw.trim();
    let date_part = trimmed.get(..10).unwrap_or(trimmed);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .map_err(|err| serde::de::Error::custom(format!("invalid date `{raw}`: {err}")))
}

fn deserialize_notes<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
