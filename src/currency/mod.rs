use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// ISO 4217 currency representation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CurrencyCode(pub String);

impl CurrencyCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().trim().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        Self::new("BRL")
    }
}

/// Language family used to pick label tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Portuguese,
    English,
}

impl Language {
    pub fn from_tag(tag: &str) -> Self {
        let primary = tag.split(['-', '_']).next().unwrap_or_default();
        if primary.eq_ignore_ascii_case("pt") {
            Language::Portuguese
        } else {
            Language::English
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFormatStyle {
    /// `dd/mm/yyyy`
    DayMonthYear,
    /// `mm/dd/yyyy`
    MonthDayYear,
    /// `yyyy-mm-dd`
    Iso,
}

/// Locale-aware formatting preferences derived from a BCP 47 style tag.
#[derive(Debug, Clone, PartialEq)]
pub struct LocaleConfig {
    pub language_tag: String,
    pub language: Language,
    pub decimal_separator: char,
    pub grouping_separator: char,
    pub date_format: DateFormatStyle,
    /// Whether a space separates the currency symbol from the amount.
    pub symbol_spacing: bool,
}

impl LocaleConfig {
    pub fn from_tag(tag: &str) -> Self {
        let normalized = tag.trim().replace('_', "-");
        let language = Language::from_tag(&normalized);
        let region = normalized
            .split('-')
            .nth(1)
            .map(|region| region.to_ascii_uppercase());
        match (language, region.as_deref()) {
            (Language::Portuguese, _) => Self {
                language_tag: normalized,
                language,
                decimal_separator: ',',
                grouping_separator: '.',
                date_format: DateFormatStyle::DayMonthYear,
                symbol_spacing: true,
            },
            (Language::English, Some("US")) => Self {
                language_tag: normalized,
                language,
                decimal_separator: '.',
                grouping_separator: ',',
                date_format: DateFormatStyle::MonthDayYear,
                symbol_spacing: false,
            },
            (Language::English, Some("GB")) => Self {
                language_tag: normalized,
                language,
                decimal_separator: '.',
                grouping_separator: ',',
                date_format: DateFormatStyle::DayMonthYear,
                symbol_spacing: false,
            },
            _ => Self {
                language_tag: normalized,
                language,
                decimal_separator: '.',
                grouping_separator: ',',
                date_format: DateFormatStyle::Iso,
                symbol_spacing: false,
            },
        }
    }
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self::from_tag("pt-BR")
    }
}

pub fn symbol_for(code: &str) -> String {
    match code {
        "BRL" => "R$".into(),
        "USD" => "$".into(),
        "EUR" => "€".into(),
        "GBP" => "£".into(),
        "JPY" => "¥".into(),
        "AUD" => "A$".into(),
        _ => code.into(),
    }
}

pub fn minor_units_for(code: &str) -> u8 {
    match code {
        "JPY" => 0,
        "KWD" | "BHD" => 3,
        _ => 2,
    }
}

pub fn format_number(locale: &LocaleConfig, value: f64, precision: u8) -> String {
    let body = format!("{:.*}", precision as usize, value);
    let (int_part, frac_part) = match body.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (body.as_str(), None),
    };
    let grouped = match int_part.strip_prefix('-') {
        Some(digits) => format!("-{}", group_digits(digits, locale.grouping_separator)),
        None => group_digits(int_part, locale.grouping_separator),
    };
    match frac_part {
        Some(frac) => format!("{}{}{}", grouped, locale.decimal_separator, frac),
        None => grouped,
    }
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (count, ch) in digits.chars().rev().enumerate() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, separator);
        }
        grouped.insert(0, ch);
    }
    grouped
}

/// Renders `amount` the way the locale writes money, e.g. `R$ 1.234,50` or `-$12.00`.
pub fn format_currency_value(amount: f64, code: &CurrencyCode, locale: &LocaleConfig) -> String {
    let precision = minor_units_for(code.as_str());
    let body = format_number(locale, amount.abs(), precision);
    let symbol = symbol_for(code.as_str());
    let sign = if amount < 0.0 && body.chars().any(|c| c.is_ascii_digit() && c != '0') {
        "-"
    } else {
        ""
    };
    if locale.symbol_spacing {
        format!("{}{} {}", sign, symbol, body)
    } else {
        format!("{}{}{}", sign, symbol, body)
    }
}

pub fn format_date(locale: &LocaleConfig, date: NaiveDate) -> String {
    match locale.date_format {
        DateFormatStyle::DayMonthYear => date.format("%d/%m/%Y").to_string(),
        DateFormatStyle::MonthDayYear => date.format("%m/%d/%Y").to_string(),
        DateFormatStyle::Iso => date.format("%Y-%m-%d").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands_with_locale_separators() {
        let br = LocaleConfig::from_tag("pt-BR");
        assert_eq!(format_number(&br, 1234567.891, 2), "1.234.567,89");
        let us = LocaleConfig::from_tag("en-US");
        assert_eq!(format_number(&us, 999.0, 2), "999.00");
        assert_eq!(format_number(&us, -1000.0, 0), "-1,000");
    }

    #[test]
    fn language_follows_primary_subtag() {
        assert_eq!(Language::from_tag("pt-PT"), Language::Portuguese);
        assert_eq!(Language::from_tag("pt_BR"), Language::Portuguese);
        assert_eq!(Language::from_tag("en-GB"), Language::English);
        assert_eq!(Language::from_tag(""), Language::English);
    }

    #[test]
    fn negative_zero_renders_without_sign() {
        let us = LocaleConfig::from_tag("en-US");
        let code = CurrencyCode::new("USD");
        assert_eq!(format_currency_value(-0.001, &code, &us), "$0.00");
    }
}
