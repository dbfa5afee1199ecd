//! Conversion engine.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{debug, info, instrument, warn};

use currencyapi_common::{
    ConversionRequest, ConversionResult, Currency, CurrencyError, CurrencyPair, Result,
};
use currencyapi_store::CurrencyStore;

use crate::conversion::RateSource;
use crate::provider::QuoteClient;

/// Converts amounts using either a currency's static exchange table or a
/// live quote.
///
/// Both paths require the source currency to be stored; they only differ in
/// where the rate comes from.
pub struct ConversionEngine {
    store: Arc<dyn CurrencyStore>,
    quotes: Arc<dyn QuoteClient>,
}

impl ConversionEngine {
    /// Create a new engine.
    pub fn new(store: Arc<dyn CurrencyStore>, quotes: Arc<dyn QuoteClient>) -> Self {
        Self { store, quotes }
    }

    /// Convert using the source currency's static exchange table.
    pub async fn convert_static(&self, request: &ConversionRequest) -> Result<ConversionResult> {
        self.convert(request, RateSource::Static).await
    }

    /// Convert using the `low` price of a live quote.
    pub async fn convert_live(&self, request: &ConversionRequest) -> Result<ConversionResult> {
        self.convert(request, RateSource::Live).await
    }

    /// Convert `request.amount` with a rate from `source`.
    #[instrument(skip(self, request), fields(
        from = %request.from,
        to = %request.to,
        amount = %request.amount
    ))]
    pub async fn convert(
        &self,
        request: &ConversionRequest,
        source: RateSource,
    ) -> Result<ConversionResult> {
        let currency = self
            .store
            .find_by_name(&request.from)
            .await?
            .ok_or_else(|| CurrencyError::coin_not_found_named(&request.from))?;

        let rate = match source {
            RateSource::Static => Self::static_rate(&currency, &request.to)?,
            RateSource::Live => self.live_rate(&request.from, &request.to).await?,
        };

        let amount = request.amount.checked_mul(rate).ok_or_else(|| {
            warn!(rate = %rate, "Converted amount overflows");
            CurrencyError::amount_out_of_range()
        })?;

        info!(rate = %rate, converted = %amount, "Conversion completed");

        Ok(ConversionResult { amount })
    }

    fn static_rate(currency: &Currency, to: &str) -> Result<Decimal> {
        currency
            .rate_to(to)
            .ok_or_else(|| CurrencyError::exchange_not_found(to, &currency.name))
    }

    /// Every failure here, transport or lookup, surfaces as "exchange not
    /// found". The underlying cause is only logged.
    async fn live_rate(&self, from: &str, to: &str) -> Result<Decimal> {
        let pair = CurrencyPair::new(from, to);

        let quotes = match self.quotes.get_quote(&pair.code()).await {
            Ok(quotes) => quotes,
            Err(e) => {
                warn!(
                    client = self.quotes.name(),
                    pair = %pair,
                    unknown_pair = e.is_unknown_pair(),
                    error = %e,
                    "Quote request failed"
                );
                return Err(CurrencyError::exchange_not_found(to, from));
            }
        };

        let low = quotes.get(&pair.response_key()).and_then(|q| q.low);

        match low {
            Some(low) => {
                debug!(pair = %pair, low = %low, "Using live quote");
                Ok(low)
            }
            None => {
                warn!(
                    client = self.quotes.name(),
                    pair = %pair,
                    "Quote response has no low price for pair"
                );
                Err(CurrencyError::exchange_not_found(to, from))
            }
        }
    }
}
