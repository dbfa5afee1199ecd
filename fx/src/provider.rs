//! Live quote client trait and test double.

use std::collections::HashMap;

use async_trait::async_trait;
use currencyapi_common::Quote;

use crate::error::QuoteResult;

/// Client for an external price source.
#[async_trait]
pub trait QuoteClient: Send + Sync {
    /// Get the client name.
    fn name(&self) -> &str;

    /// Fetch the latest quote for a pair code such as `"USD-EUR"`.
    ///
    /// The response maps the pair code without separator (`"USDEUR"`) to
    /// its quote.
    async fn get_quote(&self, pair_code: &str) -> QuoteResult<HashMap<String, Quote>>;
}

/// Mock quote client for testing.
#[cfg(any(test, feature = "test-utils"))]
pub struct MockQuoteClient {
    name: String,
    responses: dashmap::DashMap<String, HashMap<String, Quote>>,
    failing: std::sync::atomic::AtomicBool,
    calls: std::sync::atomic::AtomicUsize,
}

#[cfg(any(test, feature = "test-utils"))]
impl MockQuoteClient {
    /// Create a new mock client with no canned responses.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            responses: dashmap::DashMap::new(),
            failing: std::sync::atomic::AtomicBool::new(false),
            calls: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    /// Set the full response body returned for a pair code.
    pub fn set_response(&self, pair_code: impl Into<String>, body: HashMap<String, Quote>) {
        self.responses.insert(pair_code.into(), body);
    }

    /// Answer `"{base}-{quote}"` with a well-formed quote whose low is `low`.
    pub fn set_low(&self, base: &str, quote: &str, low: rust_decimal::Decimal) {
        let pair = currencyapi_common::CurrencyPair::new(base, quote);
        let mut body = HashMap::new();
        body.insert(pair.response_key(), Quote::with_low(low));
        self.set_response(pair.code(), body);
    }

    /// Make every call fail with a transport error.
    pub fn fail_all(&self) {
        self.failing.store(true, std::sync::atomic::Ordering::SeqCst);
    }

    /// Number of calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(std::sync::atomic::Ordering::SeqCst)
    }
}

#[cfg(any(test, feature = "test-utils"))]
#[async_trait]
impl QuoteClient for MockQuoteClient {
    fn name(&self) -> &str {
        &self.name
    }

    async fn get_quote(&self, pair_code: &str) -> QuoteResult<HashMap<String, Quote>> {
        use crate::error::QuoteError;

        self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);

        if self.failing.load(std::sync::atomic::Ordering::SeqCst) {
            return Err(QuoteError::Transport("connection refused".to_string()));
        }

        self.responses
            .get(pair_code)
            .map(|r| r.clone())
            .ok_or_else(|| QuoteError::Status {
                status: 404,
                body: format!("moeda nao encontrada {}", pair_code),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QuoteError;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_mock_client() {
        let client = MockQuoteClient::new("test");
        client.set_low("USD", "EUR", dec!(0.91));

        let body = client.get_quote("USD-EUR").await.unwrap();

        assert_eq!(body["USDEUR"].low, Some(dec!(0.91)));
        assert_eq!(client.calls(), 1);
    }

    #[tokio::test]
    async fn test_mock_client_unknown_pair() {
        let client = MockQuoteClient::new("test");

        let err = client.get_quote("USD-XYZ").await.unwrap_err();

        assert!(err.is_unknown_pair());
    }

    #[tokio::test]
    async fn test_mock_client_failure() {
        let client = MockQuoteClient::new("test");
        client.set_low("USD", "EUR", dec!(0.91));
        client.fail_all();

        let err = client.get_quote("USD-EUR").await.unwrap_err();

        assert!(matches!(err, QuoteError::Transport(_)));
    }
}
