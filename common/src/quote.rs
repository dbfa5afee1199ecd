//! Currency pairs and live quotes.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Separator used in request pair codes.
pub const PAIR_SEPARATOR: char = '-';

/// A currency pair for live quote lookups.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CurrencyPair {
    /// Currency being converted from.
    pub base: String,
    /// Currency being converted to.
    pub quote: String,
}

impl CurrencyPair {
    /// Create a new currency pair.
    pub fn new(base: impl Into<String>, quote: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            quote: quote.into(),
        }
    }

    /// Pair code sent to the price source, e.g. `"USD-EUR"`.
    pub fn code(&self) -> String {
        format!("{}{}{}", self.base, PAIR_SEPARATOR, self.quote)
    }

    /// Key the price source uses in its response, e.g. `"USDEUR"`.
    pub fn response_key(&self) -> String {
        self.code().replace(PAIR_SEPARATOR, "")
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A live quote for a currency pair as reported by the price source.
///
/// Only `low` is used for conversion; the rest is carried for callers that
/// want the full quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub codein: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub high: Option<Decimal>,
    #[serde(default)]
    pub low: Option<Decimal>,
    #[serde(default, rename = "varBid")]
    pub var_bid: Option<String>,
    #[serde(default, rename = "pctChange")]
    pub pct_change: Option<String>,
    #[serde(default)]
    pub bid: Option<Decimal>,
    #[serde(default)]
    pub ask: Option<Decimal>,
    /// Unix seconds, as a string.
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub create_date: Option<String>,
}

impl Quote {
    /// Quote carrying only a low price.
    pub fn with_low(low: Decimal) -> Self {
        Self {
            code: None,
            codein: None,
            name: None,
            high: None,
            low: Some(low),
            var_bid: None,
            pct_change: None,
            bid: None,
            ask: None,
            timestamp: None,
            create_date: None,
        }
    }

    /// When the quote was produced, if the source reported a valid timestamp.
    pub fn quoted_at(&self) -> Option<DateTime<Utc>> {
        let secs = self.timestamp.as_deref()?.trim().parse::<i64>().ok()?;
        DateTime::from_timestamp(secs, 0)
    }
}
