//! Shared application state.

use std::sync::Arc;

use tracing::{info, warn};

use currencyapi_fx::{ConversionEngine, HttpQuoteClient, QuoteClient};
use currencyapi_registry::CurrencyRegistry;
use currencyapi_store::{CurrencyStore, MemoryStore, PgCurrencyStore};

use crate::config::ServerConfig;

/// Services shared by all request handlers.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<CurrencyRegistry>,
    pub engine: Arc<ConversionEngine>,
}

impl AppState {
    /// Wire the registry and the engine over one store.
    pub fn new(store: Arc<dyn CurrencyStore>, quotes: Arc<dyn QuoteClient>) -> Self {
        Self {
            registry: Arc::new(CurrencyRegistry::new(store.clone())),
            engine: Arc::new(ConversionEngine::new(store, quotes)),
        }
    }
}

/// Build the state described by `config`.
///
/// Uses PostgreSQL when a database URL is configured, otherwise an in-memory
/// store.
pub async fn build_state(config: &ServerConfig) -> anyhow::Result<AppState> {
    let store: Arc<dyn CurrencyStore> = match &config.database_url {
        Some(url) => {
            let store = PgCurrencyStore::connect(url, config.database_max_connections).await?;
            info!("Using PostgreSQL currency store");
            Arc::new(store)
        }
        None => {
            warn!("DATABASE_URL not set, currencies are kept in memory");
            Arc::new(MemoryStore::new())
        }
    };

    let quotes = HttpQuoteClient::new((&config.quote).into())?;
    info!(
        base_url = %config.quote.base_url,
        timeout_ms = config.quote.timeout.as_millis() as u64,
        "Live quote client ready"
    );

    Ok(AppState::new(store, Arc::new(quotes)))
}
