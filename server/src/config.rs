//! Server configuration.

use std::time::Duration;

use currencyapi_fx::http_client::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
use currencyapi_fx::HttpQuoteClientConfig;

/// Live quote source configuration.
#[derive(Debug, Clone)]
pub struct QuoteConfig {
    /// Price source base URL.
    pub base_url: String,
    /// Request timeout. A timed out request counts as a failed quote.
    pub timeout: Duration,
}

impl Default for QuoteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl From<&QuoteConfig> for HttpQuoteClientConfig {
    fn from(config: &QuoteConfig) -> Self {
        HttpQuoteClientConfig {
            base_url: config.base_url.clone(),
            timeout: config.timeout,
        }
    }
}

/// Main server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Listen address.
    pub listen_addr: String,
    /// Listen port.
    pub listen_port: u16,
    /// PostgreSQL URL. Records are kept in memory when unset.
    pub database_url: Option<String>,
    /// Maximum pooled database connections.
    pub database_max_connections: u32,
    /// Live quote source.
    pub quote: QuoteConfig,
    /// Log level used when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0".to_string(),
            listen_port: 8080,
            database_url: None,
            database_max_connections: 5,
            quote: QuoteConfig::default(),
            log_level: "info".to_string(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(addr) = std::env::var("CURRENCYAPI_LISTEN_ADDR") {
            config.listen_addr = addr;
        }

        if let Ok(port) = std::env::var("CURRENCYAPI_LISTEN_PORT") {
            if let Ok(port) = port.parse() {
                config.listen_port = port;
            }
        }

        if let Ok(url) = std::env::var("DATABASE_URL") {
            config.database_url = Some(url);
        }

        if let Ok(max) = std::env::var("DATABASE_MAX_CONNECTIONS") {
            if let Ok(max) = max.parse() {
                config.database_max_connections = max;
            }
        }

        if let Ok(url) = std::env::var("QUOTE_API_URL") {
            config.quote.base_url = url;
        }

        if let Ok(ms) = std::env::var("QUOTE_API_TIMEOUT_MS") {
            if let Ok(ms) = ms.parse() {
                config.quote.timeout = Duration::from_millis(ms);
            }
        }

        if let Ok(level) = std::env::var("LOG_LEVEL") {
            config.log_level = level;
        }

        config
    }

    /// `addr:port` to bind.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.listen_addr, self.listen_port)
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.listen_port == 0 {
            return Err("Listen port cannot be 0".to_string());
        }

        if matches!(&self.database_url, Some(url) if url.is_empty()) {
            return Err("Database URL cannot be empty".to_string());
        }

        if self.database_max_connections == 0 {
            return Err("Database pool needs at least one connection".to_string());
        }

        if self.quote.base_url.is_empty() {
            return Err("Quote API URL cannot be empty".to_string());
        }

        if self.quote.timeout.is_zero() {
            return Err("Quote API timeout cannot be 0".to_string());
        }

        Ok(())
    }
}
