//! Persistence trait for currency records.

use async_trait::async_trait;
use currencyapi_common::{Currency, CurrencyId, NewCurrency, Result};

/// Storage backend for currency records.
///
/// Implementations keep `name` unique across all records.
#[async_trait]
pub trait CurrencyStore: Send + Sync {
    /// All records in ascending id order.
    async fn find_all(&self) -> Result<Vec<Currency>>;

    /// Look up a record by its exact, case-sensitive name.
    async fn find_by_name(&self, name: &str) -> Result<Option<Currency>>;

    /// Look up a record by id.
    async fn find_by_id(&self, id: CurrencyId) -> Result<Option<Currency>>;

    /// Persist a new record and assign its id.
    ///
    /// Returns `None` without writing anything when a record with the same
    /// name already exists. The name check and the insert are atomic.
    async fn save(&self, currency: NewCurrency) -> Result<Option<Currency>>;

    /// Remove a record. Returns whether a record was removed.
    async fn delete_by_id(&self, id: CurrencyId) -> Result<bool>;

    /// Number of stored records.
    async fn count(&self) -> Result<usize>;
}
