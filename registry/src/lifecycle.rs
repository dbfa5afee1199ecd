//! Create, list and delete operations on currency records.

use std::sync::Arc;

use tracing::{info, instrument};

use currencyapi_common::{
    CurrencyError, CurrencyId, CurrencyLabel, CurrencyRequest, NewCurrency, Result,
};
use currencyapi_store::CurrencyStore;

/// Currency record lifecycle over a [`CurrencyStore`].
pub struct CurrencyRegistry {
    store: Arc<dyn CurrencyStore>,
}

impl CurrencyRegistry {
    /// Create a new registry.
    pub fn new(store: Arc<dyn CurrencyStore>) -> Self {
        Self { store }
    }

    /// Labels of all stored currencies, `"{id} - {name}"`, in store order.
    pub async fn list(&self) -> Result<Vec<CurrencyLabel>> {
        let currencies = self.store.find_all().await?;
        Ok(currencies.iter().map(|c| c.label()).collect())
    }

    /// Store a new currency and return its id.
    ///
    /// Fails when the name is missing or already taken. The store's `save`
    /// re-checks the name atomically, so a concurrent create of the same
    /// name also reports "Coin already exists".
    #[instrument(skip(self, request), fields(name = ?request.name))]
    pub async fn create(&self, request: CurrencyRequest) -> Result<CurrencyId> {
        let name = request.name.ok_or_else(CurrencyError::null_name)?;

        if self.store.find_by_name(&name).await?.is_some() {
            return Err(CurrencyError::already_exists());
        }

        let new = NewCurrency {
            name,
            description: request.description,
            exchanges: request.exchanges.unwrap_or_default(),
        };

        let saved = self
            .store
            .save(new)
            .await?
            .ok_or_else(CurrencyError::already_exists)?;

        info!(id = %saved.id, exchanges = saved.exchanges.len(), "Currency created");
        Ok(saved.id)
    }

    /// Remove the currency with the given id.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: CurrencyId) -> Result<()> {
        let currency = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(CurrencyError::coin_not_found)?;

        if !self.store.delete_by_id(id).await? {
            return Err(CurrencyError::coin_not_found());
        }

        info!(name = %currency.name, "Currency deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use currencyapi_common::Currency;
    use currencyapi_store::MemoryStore;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;

    fn seeded_store() -> Arc<MemoryStore> {
        Arc::new(MemoryStore::with_currencies(
            ["USD", "EUR", "JPY"].into_iter().map(NewCurrency::new),
        ))
    }

    #[tokio::test]
    async fn test_list_labels() {
        let registry = CurrencyRegistry::new(seeded_store());

        let labels: Vec<String> = registry
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|l| l.label)
            .collect();

        assert_eq!(labels, vec!["1 - USD", "2 - EUR", "3 - JPY"]);
    }

    #[tokio::test]
    async fn test_list_empty() {
        let registry = CurrencyRegistry::new(Arc::new(MemoryStore::new()));

        assert!(registry.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create() {
        let store = seeded_store();
        let registry = CurrencyRegistry::new(store.clone());

        let mut exchanges = HashMap::new();
        exchanges.insert("USD".to_string(), dec!(0.19));
        let id = registry
            .create(CurrencyRequest {
                name: Some("R$".to_string()),
                description: Some("Real coin of Brazil".to_string()),
                exchanges: Some(exchanges),
            })
            .await
            .unwrap();

        assert_eq!(id, CurrencyId::new(4));
        let saved = store.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(saved.name, "R$");
        assert_eq!(saved.description.as_deref(), Some("Real coin of Brazil"));
        assert_eq!(saved.rate_to("USD"), Some(dec!(0.19)));
        assert_eq!(store.count().await.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_create_without_exchanges() {
        let store = seeded_store();
        let registry = CurrencyRegistry::new(store.clone());

        let id = registry.create(CurrencyRequest::named("RUB")).await.unwrap();

        let saved = store.find_by_id(id).await.unwrap().unwrap();
        assert!(saved.exchanges.is_empty());
        assert!(saved.description.is_none());
    }

    #[tokio::test]
    async fn test_create_null_name() {
        let store = seeded_store();
        let registry = CurrencyRegistry::new(store.clone());

        let mut exchanges = HashMap::new();
        exchanges.insert("USD".to_string(), dec!(1));
        let err = registry
            .create(CurrencyRequest {
                name: None,
                description: Some("nameless".to_string()),
                exchanges: Some(exchanges),
            })
            .await
            .unwrap_err();

        assert_eq!(err, CurrencyError::Validation("Coin name cannot be null".into()));
        assert_eq!(store.count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_create_already_exists() {
        let store = seeded_store();
        let registry = CurrencyRegistry::new(store.clone());

        let err = registry.create(CurrencyRequest::named("USD")).await.unwrap_err();

        assert_eq!(err, CurrencyError::AlreadyExists);
        assert_eq!(store.count().await.unwrap(), 3);
    }

    /// Store whose name lookup always misses, as if another caller inserted
    /// the same name between the check and the save.
    struct LateDuplicateStore(MemoryStore);

    #[async_trait]
    impl CurrencyStore for LateDuplicateStore {
        async fn find_all(&self) -> Result<Vec<Currency>> {
            self.0.find_all().await
        }

        async fn find_by_name(&self, _name: &str) -> Result<Option<Currency>> {
            Ok(None)
        }

        async fn find_by_id(&self, id: CurrencyId) -> Result<Option<Currency>> {
            self.0.find_by_id(id).await
        }

        async fn save(&self, currency: NewCurrency) -> Result<Option<Currency>> {
            self.0.save(currency).await
        }

        async fn delete_by_id(&self, id: CurrencyId) -> Result<bool> {
            self.0.delete_by_id(id).await
        }

        async fn count(&self) -> Result<usize> {
            self.0.count().await
        }
    }

    #[tokio::test]
    async fn test_create_lost_race_reports_already_exists() {
        let store = Arc::new(LateDuplicateStore(MemoryStore::with_currencies(vec![
            NewCurrency::new("USD"),
        ])));
        let registry = CurrencyRegistry::new(store.clone());

        let err = registry.create(CurrencyRequest::named("USD")).await.unwrap_err();

        assert_eq!(err, CurrencyError::already_exists());
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_delete() {
        let store = seeded_store();
        let registry = CurrencyRegistry::new(store.clone());

        registry.delete(CurrencyId::new(1)).await.unwrap();

        let remaining = store.find_all().await.unwrap();
        assert_eq!(remaining.len(), 2);
        assert_eq!(remaining[0].name, "EUR");
    }

    #[tokio::test]
    async fn test_delete_not_found() {
        let store = seeded_store();
        let registry = CurrencyRegistry::new(store.clone());

        let err = registry.delete(CurrencyId::new(11)).await.unwrap_err();

        assert_eq!(err, CurrencyError::NotFound("Coin not found".into()));
        assert_eq!(store.count().await.unwrap(), 3);
    }

    proptest! {
        #[test]
        fn prop_create_fails_iff_name_taken(names in prop::collection::vec("[A-D]{1,2}", 1..30)) {
            let registry = CurrencyRegistry::new(Arc::new(MemoryStore::new()));
            let mut seen = std::collections::HashSet::new();

            for name in names {
                let result = tokio_test::block_on(registry.create(CurrencyRequest::named(name.clone())));
                if seen.insert(name) {
                    prop_assert!(result.is_ok());
                } else {
                    prop_assert_eq!(result, Err(CurrencyError::already_exists()));
                }
            }

            let labels = tokio_test::block_on(registry.list()).unwrap();
            prop_assert_eq!(labels.len(), seen.len());
        }
    }
}
