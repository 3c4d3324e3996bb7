use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::currency::{CurrencyCode, LocaleConfig};

pub const DEFAULT_CURRENCY: &str = "BRL";
pub const DEFAULT_LOCALE: &str = "pt-BR";
pub const DEFAULT_MONTHLY_GOAL: f64 = 1000.0;
pub const DEFAULT_SHOW_CHARTS: bool = true;

/// Process-wide display and goal preferences stored alongside the transactions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub currency: String,
    pub locale: String,
    pub monthly_goal: f64,
    pub show_charts: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            currency: DEFAULT_CURRENCY.into(),
            locale: DEFAULT_LOCALE.into(),
            monthly_goal: DEFAULT_MONTHLY_GOAL,
            show_charts: DEFAULT_SHOW_CHARTS,
        }
    }
}

impl Settings {
    /// Overwrites only the fields present in `patch`.
    pub fn merge(&mut self, patch: SettingsPatch) {
        if let Some(currency) = patch.currency {
            self.currency = currency;
        }
        if let Some(locale) = patch.locale {
            self.locale = locale;
        }
        if let Some(goal) = patch.monthly_goal {
            self.monthly_goal = goal;
        }
        if let Some(show) = patch.show_charts {
            self.show_charts = show;
        }
    }

    pub fn merged(mut self, patch: SettingsPatch) -> Self {
        self.merge(patch);
        self
    }

    /// Monthly goal used for progress math; non-positive goals fall back to the default.
    pub fn effective_goal(&self) -> f64 {
        if self.monthly_goal.is_finite() && self.monthly_goal > 0.0 {
            self.monthly_goal
        } else {
            DEFAULT_MONTHLY_GOAL
        }
    }

    pub fn locale_config(&self) -> LocaleConfig {
        LocaleConfig::from_tag(&self.locale)
    }

    pub fn currency_code(&self) -> CurrencyCode {
        CurrencyCode::new(self.currency.as_str())
    }
}

/// Partial settings, as found in stored blobs, imports and user updates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, alias = "language", skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_goal: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_charts: Option<bool>,
}

impl SettingsPatch {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Reads stored settings field by field. A field with the wrong type is
    /// skipped with a warning instead of rejecting the whole object.
    pub fn from_stored(value: &Value) -> Self {
        let Some(fields) = value.as_object() else {
            tracing::warn!(settings = %value, "stored settings are not an object; using defaults");
            return Self::default();
        };
        Self {
            currency: stored_field(fields, "currency"),
            locale: stored_field(fields, "locale").or_else(|| stored_field(fields, "language")),
            monthly_goal: stored_field(fields, "monthlyGoal"),
            show_charts: stored_field(fields, "showCharts"),
        }
    }
}

fn stored_field<T: DeserializeOwned>(fields: &Map<String, Value>, key: &str) -> Option<T> {
    let value = fields.get(key).filter(|value| !value.is_null())?;
    match serde_json::from_value(value.clone()) {
        Ok(parsed) => Some(parsed),
        Err(err) => {
            tracing::warn!(field = key, value = %value, error = %err, "ignoring stored setting");
            None
        }
    }
}
