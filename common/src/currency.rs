//! Currency records and conversion payloads.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::CurrencyId;

/// Static exchange table: target currency name to rate.
///
/// A rate `r` under key `T` on currency `C` means 1 unit of `C` equals `r`
/// units of `T`.
pub type ExchangeTable = HashMap<String, Decimal>;

/// A stored currency record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    /// Store-assigned identifier.
    pub id: CurrencyId,
    /// Unique, case-sensitive currency name (e.g. "USD").
    pub name: String,
    /// Free text description.
    pub description: Option<String>,
    /// Static rates to other currencies.
    #[serde(default)]
    pub exchanges: ExchangeTable,
}

impl Currency {
    /// Static rate to `target`, if one is stored.
    pub fn rate_to(&self, target: &str) -> Option<Decimal> {
        self.exchanges.get(target).copied()
    }

    /// Listing label, `"{id} - {name}"`.
    pub fn label(&self) -> CurrencyLabel {
        CurrencyLabel {
            label: format!("{} - {}", self.id, self.name),
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

/// A currency record that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCurrency {
    pub name: String,
    pub description: Option<String>,
    pub exchanges: ExchangeTable,
}

impl NewCurrency {
    /// Create a record with no description and no static rates.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            exchanges: ExchangeTable::new(),
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Add a static rate to `target`.
    pub fn with_exchange(mut self, target: impl Into<String>, rate: Decimal) -> Self {
        self.exchanges.insert(target.into(), rate);
        self
    }

    /// Attach the store-assigned id.
    pub fn into_currency(self, id: CurrencyId) -> Currency {
        Currency {
            id,
            name: self.name,
            description: self.description,
            exchanges: self.exchanges,
        }
    }
}

/// Create payload as received from callers.
///
/// Every field is optional on the wire; `name` is validated by the
/// registry, a missing `exchanges` table is treated as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub exchanges: Option<ExchangeTable>,
}

impl CurrencyRequest {
    /// Request with only a name set.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }
}

/// One entry of the currency listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyLabel {
    pub label: String,
}

/// Request to convert an amount between two named currencies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionRequest {
    /// Source currency name.
    pub from: String,
    /// Target currency name.
    pub to: String,
    /// Amount in the source currency.
    pub amount: Decimal,
}

impl ConversionRequest {
    pub fn new(from: impl Into<String>, to: impl Into<String>, amount: Decimal) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            amount,
        }
    }
}

/// Converted amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionResult {
    pub amount: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn usd() -> Currency {
        NewCurrency::new("USD")
            .with_description("US Dollar")
            .with_exchange("EUR", dec!(2.0))
            .into_currency(CurrencyId::new(1))
    }

    #[test]
    fn test_label_format() {
        assert_eq!(usd().label().label, "1 - USD");
    }

    #[test]
    fn test_rate_lookup() {
        let currency = usd();
        assert_eq!(currency.rate_to("EUR"), Some(dec!(2.0)));
        assert_eq!(currency.rate_to("eur"), None);
        assert_eq!(currency.rate_to("BRL"), None);
    }

    #[test]
    fn test_request_without_exchanges_deserializes() {
        let request: CurrencyRequest = serde_json::from_str(r#"{"name":"RUB"}"#).unwrap();
        assert_eq!(request, CurrencyRequest::named("RUB"));
    }

    #[test]
    fn test_request_exchanges_accept_strings_and_numbers() {
        let request: CurrencyRequest =
            serde_json::from_str(r#"{"name":"USD","exchanges":{"EUR":"0.92","BRL":5}}"#).unwrap();
        let exchanges = request.exchanges.unwrap();
        assert_eq!(exchanges["EUR"], dec!(0.92));
        assert_eq!(exchanges["BRL"], dec!(5));
    }
}
