//! In-memory currency store.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::debug;

use currencyapi_common::{Currency, CurrencyId, NewCurrency, Result};

use crate::traits::CurrencyStore;

/// Thread-safe in-memory store.
///
/// Records are kept ordered by id, so `find_all` returns them in creation
/// order. Clones share the same underlying map.
#[derive(Clone, Default)]
pub struct MemoryStore {
    currencies: Arc<RwLock<BTreeMap<CurrencyId, Currency>>>,
    next_id: Arc<AtomicI64>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with the given records, in order.
    ///
    /// Records whose name is already taken are skipped.
    pub fn with_currencies(currencies: impl IntoIterator<Item = NewCurrency>) -> Self {
        let store = Self::new();
        for currency in currencies {
            store.insert_unique(currency);
        }
        store
    }

    fn insert_unique(&self, currency: NewCurrency) -> Option<Currency> {
        let mut currencies = self.currencies.write();

        if currencies.values().any(|c| c.name == currency.name) {
            debug!(name = %currency.name, "Name already taken, skipping insert");
            return None;
        }

        let id = CurrencyId::new(self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        let saved = currency.into_currency(id);
        currencies.insert(id, saved.clone());

        debug!(id = %id, name = %saved.name, "Currency inserted");
        Some(saved)
    }
}

#[async_trait]
impl CurrencyStore for MemoryStore {
    async fn find_all(&self) -> Result<Vec<Currency>> {
        Ok(self.currencies.read().values().cloned().collect())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Currency>> {
        Ok(self
            .currencies
            .read()
            .values()
            .find(|c| c.name == name)
            .cloned())
    }

    async fn find_by_id(&self, id: CurrencyId) -> Result<Option<Currency>> {
        Ok(self.currencies.read().get(&id).cloned())
    }

    async fn save(&self, currency: NewCurrency) -> Result<Option<Currency>> {
        Ok(self.insert_unique(currency))
    }

    async fn delete_by_id(&self, id: CurrencyId) -> Result<bool> {
        Ok(self.currencies.write().remove(&id).is_some())
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.currencies.read().len())
    }
}
