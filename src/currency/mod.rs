use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Closed set of currencies the agency sells in.
///
/// A currency acts as a hard partition key: amounts are never combined
/// across variants. See
/// [`crate::engine::aggregate::combine_currency_summaries`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Currency {
    #[serde(rename = "USD")]
    Usd,
    #[serde(rename = "ARS")]
    Ars,
}

impl Currency {
    /// ISO 4217 code.
    pub fn code(self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Ars => "ARS",
        }
    }

    /// Display symbol used by the formatting boundary.
    pub fn symbol(self) -> &'static str {
        match self {
            Currency::Usd => "US$",
            Currency::Ars => "$",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown currency code: {0}")]
pub struct UnknownCurrency(pub String);

impl FromStr for Currency {
    type Err = UnknownCurrency;

    // Case-sensitive exact match; "usd" is not a currency the API emits.
    fn from_str(code: &str) -> Result<Self, Self::Err> {
        match code {
            "USD" => Ok(Currency::Usd),
            "ARS" => Ok(Currency::Ars),
            other => Err(UnknownCurrency(other.to_string())),
        }
    }
}

/// Locale-aware numeric formatting preferences, injected by the caller.
///
/// The engine itself never reads locale state; only the formatting
/// boundary consumes this.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LocaleConfig {
    pub decimal_separator: char,
    pub grouping_separator: char,
}

impl LocaleConfig {
    /// `1,234.56`
    pub fn en_us() -> Self {
        Self {
            decimal_separator: '.',
            grouping_separator: ',',
        }
    }

    /// `1.234,56`
    pub fn es_ar() -> Self {
        Self {
            decimal_separator: ',',
            grouping_separator: '.',
        }
    }
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self::en_us()
    }
}

/// Formats a monetary amount with the currency symbol and grouped digits.
///
/// Formatting consumes numbers already guarded by the engine; it adds no
/// numeric behavior of its own.
pub fn format_amount(amount: f64, currency: Currency, locale: &LocaleConfig) -> String {
    let body = format_number(locale, amount.abs(), 2);
    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{}{}{}", sign, currency.symbol(), body)
}

/// Formats a guarded ratio as a percentage with one decimal place.
pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

fn format_number(locale: &LocaleConfig, value: f64, precision: usize) -> String {
    let body = format!("{:.*}", precision, value);
    let (int_part, frac_part) = match body.split_once('.') {
        Some((int_part, frac)) => (int_part, Some(frac)),
        None => (body.as_str(), None),
    };
    let grouped = group_digits(int_part, locale.grouping_separator);
    match frac_part {
        Some(frac) => format!("{}{}{}", grouped, locale.decimal_separator, frac),
        None => grouped,
    }
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::new();
    let mut count = 0;
    for ch in digits.chars().rev() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, separator);
        }
        grouped.insert(0, ch);
        count += 1;
    }
    grouped
}
