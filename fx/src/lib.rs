//! CurrencyApi FX
//!
//! Currency conversion against either the static exchange tables kept on
//! each stored currency or live quotes from an external price source.
//!
//! # Example
//!
//! ```rust,ignore
//! use currencyapi_fx::{ConversionEngine, HttpQuoteClient, HttpQuoteClientConfig};
//! use currencyapi_common::ConversionRequest;
//!
//! let quotes = Arc::new(HttpQuoteClient::new(HttpQuoteClientConfig::default())?);
//! let engine = ConversionEngine::new(store, quotes);
//!
//! let request = ConversionRequest::new("USD", "EUR", "100".parse()?);
//! let stored = engine.convert_static(&request).await?;
//! let live = engine.convert_live(&request).await?;
//! ```

pub mod engine;
pub mod provider;
pub mod http_client;
pub mod conversion;
pub mod error;

pub use engine::ConversionEngine;
pub use provider::QuoteClient;
#[cfg(any(test, feature = "test-utils"))]
pub use provider::MockQuoteClient;
pub use http_client::{HttpQuoteClient, HttpQuoteClientConfig};
pub use conversion::RateSource;
pub use error::{QuoteError, QuoteResult};
