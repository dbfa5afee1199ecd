//! HTTP quote client for the AwesomeAPI price source.
//!
//! `GET {base_url}/last/{pair_code}` answers with a JSON object keyed by the
//! pair code without separator:
//!
//! ```text
//! GET /json/last/USD-BRL
//! {"USDBRL": {"code": "USD", "codein": "BRL", "low": "4.98", ...}}
//! ```

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument};

use currencyapi_common::Quote;

use crate::error::{QuoteError, QuoteResult};
use crate::provider::QuoteClient;

/// Default price source.
pub const DEFAULT_BASE_URL: &str = "https://economia.awesomeapi.com.br/json";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Configuration for [`HttpQuoteClient`].
#[derive(Debug, Clone)]
pub struct HttpQuoteClientConfig {
    /// Base URL without trailing slash.
    pub base_url: String,
    /// Whole-request timeout.
    pub timeout: Duration,
}

impl Default for HttpQuoteClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Quote client backed by `reqwest`.
pub struct HttpQuoteClient {
    client: Client,
    config: HttpQuoteClientConfig,
}

impl HttpQuoteClient {
    /// Create a client with the given configuration.
    pub fn new(config: HttpQuoteClientConfig) -> QuoteResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| QuoteError::Transport(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn url_for(&self, pair_code: &str) -> String {
        format!("{}/last/{}", self.config.base_url.trim_end_matches('/'), pair_code)
    }

    fn map_send_error(&self, err: reqwest::Error) -> QuoteError {
        if err.is_timeout() {
            QuoteError::Timeout {
                timeout_ms: self.config.timeout.as_millis() as u64,
            }
        } else {
            QuoteError::Transport(err.to_string())
        }
    }
}

#[async_trait]
impl QuoteClient for HttpQuoteClient {
    fn name(&self) -> &str {
        "AWESOMEAPI"
    }

    #[instrument(skip(self))]
    async fn get_quote(&self, pair_code: &str) -> QuoteResult<HashMap<String, Quote>> {
        let url = self.url_for(pair_code);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.map_send_error(e))?;

        if !status.is_success() {
            return Err(QuoteError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let quotes: HashMap<String, Quote> =
            serde_json::from_str(&body).map_err(|e| QuoteError::Decode(e.to_string()))?;

        debug!(pairs = quotes.len(), "Received quotes");
        Ok(quotes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::Path, http::StatusCode, routing::get, Router};
    use rust_decimal_macros::dec;

    async fn last(Path(pair): Path<String>) -> (StatusCode, String) {
        match pair.as_str() {
            "USD-EUR" => (
                StatusCode::OK,
                r#"{"USDEUR":{"code":"USD","codein":"EUR","low":"0.9127","bid":"0.9131","ask":"0.9135","timestamp":"1700000000"}}"#
                    .to_string(),
            ),
            "USD-BAD" => (StatusCode::OK, "not json".to_string()),
            "USD-SLOW" => {
                tokio::time::sleep(Duration::from_millis(500)).await;
                (StatusCode::OK, "{}".to_string())
            }
            other => (
                StatusCode::NOT_FOUND,
                format!(r#"{{"status":404,"code":"CoinNotExists","message":"moeda nao encontrada {}"}}"#, other),
            ),
        }
    }

    async fn spawn_source() -> String {
        let app = Router::new().route("/json/last/{pair}", get(last));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}/json", addr)
    }

    fn client_for(base_url: String, timeout: Duration) -> HttpQuoteClient {
        HttpQuoteClient::new(HttpQuoteClientConfig { base_url, timeout }).unwrap()
    }

    #[tokio::test]
    async fn test_fetches_and_decodes_quote() {
        let client = client_for(spawn_source().await, Duration::from_secs(2));

        let quotes = client.get_quote("USD-EUR").await.unwrap();

        let quote = &quotes["USDEUR"];
        assert_eq!(quote.low, Some(dec!(0.9127)));
        assert_eq!(quote.ask, Some(dec!(0.9135)));
        assert_eq!(quote.codein.as_deref(), Some("EUR"));
    }

    #[tokio::test]
    async fn test_unknown_pair_is_status_error() {
        let client = client_for(spawn_source().await, Duration::from_secs(2));

        let err = client.get_quote("USD-ETH").await.unwrap_err();

        assert!(err.is_unknown_pair());
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let client = client_for(spawn_source().await, Duration::from_secs(2));

        let err = client.get_quote("USD-BAD").await.unwrap_err();

        assert!(matches!(err, QuoteError::Decode(_)));
    }

    #[tokio::test]
    async fn test_slow_source_times_out() {
        let client = client_for(spawn_source().await, Duration::from_millis(50));

        let err = client.get_quote("USD-SLOW").await.unwrap_err();

        assert!(matches!(err, QuoteError::Timeout { timeout_ms: 50 }));
    }

    #[tokio::test]
    async fn test_unreachable_source_is_transport_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let client = client_for(format!("http://{}/json", addr), Duration::from_secs(2));

        let err = client.get_quote("USD-EUR").await.unwrap_err();

        assert!(matches!(err, QuoteError::Transport(_)));
    }

    #[test]
    fn test_url_for_trims_trailing_slash() {
        let client = client_for("http://localhost/json/".to_string(), DEFAULT_TIMEOUT);
        assert_eq!(client.url_for("USD-EUR"), "http://localhost/json/last/USD-EUR");
    }
}
