//! PostgreSQL currency store.

use std::collections::HashMap;

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::Row;
use tracing::{debug, info, instrument};

use currencyapi_common::{
    Currency, CurrencyError, CurrencyId, ExchangeTable, NewCurrency, Result,
};

use crate::traits::CurrencyStore;

/// Currency store backed by PostgreSQL.
///
/// Static rates live in a separate `exchanges` table keyed by
/// `(currency_id, currency_name)`; deleting a currency cascades to its rates.
#[derive(Clone)]
pub struct PgCurrencyStore {
    pool: PgPool,
}

fn storage_error(err: sqlx::Error) -> CurrencyError {
    CurrencyError::Storage(err.to_string())
}

/// One row of the `exchanges` table.
#[derive(Debug, Clone, PartialEq)]
struct ExchangeRow {
    currency_id: i64,
    currency_name: String,
    rate: Decimal,
}

/// One row of the `currency` table.
#[derive(Debug, Clone, PartialEq)]
struct CurrencyRow {
    id: i64,
    name: String,
    description: Option<String>,
}

impl CurrencyRow {
    fn from_row(row: &PgRow) -> Result<Self> {
        Ok(Self {
            id: row.try_get("id").map_err(storage_error)?,
            name: row.try_get("name").map_err(storage_error)?,
            description: row.try_get("description").map_err(storage_error)?,
        })
    }
}

/// Attach exchange rows to their currencies, keeping the currency order.
fn assemble(currencies: Vec<CurrencyRow>, exchanges: Vec<ExchangeRow>) -> Vec<Currency> {
    let mut by_currency: HashMap<i64, ExchangeTable> = HashMap::new();
    for exchange in exchanges {
        by_currency
            .entry(exchange.currency_id)
            .or_default()
            .insert(exchange.currency_name, exchange.rate);
    }

    currencies
        .into_iter()
        .map(|row| Currency {
            id: CurrencyId::new(row.id),
            exchanges: by_currency.remove(&row.id).unwrap_or_default(),
            name: row.name,
            description: row.description,
        })
        .collect()
}

/// Bind value for a single-currency lookup.
enum JoinKey<'a> {
    Name(&'a str),
    Id(i64),
}

/// One row of `currency LEFT JOIN exchanges`.
#[derive(Debug, Clone, PartialEq)]
struct JoinedRow {
    currency: CurrencyRow,
    exchange: Option<(String, Decimal)>,
}

impl JoinedRow {
    fn from_row(row: &PgRow) -> Result<Self> {
        let currency = CurrencyRow::from_row(row)?;
        let target: Option<String> = row.try_get("currency_name").map_err(storage_error)?;
        let rate: Option<Decimal> = row.try_get("rate").map_err(storage_error)?;
        Ok(Self {
            currency,
            exchange: target.zip(rate),
        })
    }
}

/// Split joined rows, ordered by currency id, back into currency and exchange rows.
fn split_joined(rows: Vec<JoinedRow>) -> (Vec<CurrencyRow>, Vec<ExchangeRow>) {
    let mut currencies: Vec<CurrencyRow> = Vec::new();
    let mut exchanges = Vec::new();

    for row in rows {
        let id = row.currency.id;
        if currencies.last().map(|c| c.id) != Some(id) {
            currencies.push(row.currency);
        }
        if let Some((currency_name, rate)) = row.exchange {
            exchanges.push(ExchangeRow {
                currency_id: id,
                currency_name,
                rate,
            });
        }
    }

    (currencies, exchanges)
}

impl PgCurrencyStore {
    /// Wrap an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect to `database_url` and apply pending migrations.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .map_err(storage_error)?;

        let store = Self::new(pool);
        store.migrate().await?;
        Ok(store)
    }

    /// Apply the embedded schema migrations.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| CurrencyError::Storage(e.to_string()))?;
        info!("Currency schema up to date");
        Ok(())
    }

    /// Fetch currencies matching `filter` with their rates in one statement.
    async fn load_joined(&self, filter: &str, bind: Option<JoinKey<'_>>) -> Result<Vec<Currency>> {
        let sql = format!(
            "SELECT c.id, c.name, c.description, e.currency_name, e.rate \
             FROM currency c LEFT JOIN exchanges e ON e.currency_id = c.id \
             {} ORDER BY c.id",
            filter
        );
        let query = sqlx::query(&sql);
        let query = match bind {
            Some(JoinKey::Name(name)) => query.bind(name),
            Some(JoinKey::Id(id)) => query.bind(id),
            None => query,
        };

        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(storage_error)?
            .iter()
            .map(JoinedRow::from_row)
            .collect::<Result<Vec<_>>>()?;

        let (currencies, exchanges) = split_joined(rows);
        Ok(assemble(currencies, exchanges))
    }
}

#[async_trait]
impl CurrencyStore for PgCurrencyStore {
    async fn find_all(&self) -> Result<Vec<Currency>> {
        self.load_joined("", None).await
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Currency>> {
        let mut found = self
            .load_joined("WHERE c.name = $1", Some(JoinKey::Name(name)))
            .await?;
        Ok(found.pop())
    }

    async fn find_by_id(&self, id: CurrencyId) -> Result<Option<Currency>> {
        let mut found = self
            .load_joined("WHERE c.id = $1", Some(JoinKey::Id(id.value())))
            .await?;
        Ok(found.pop())
    }

    #[instrument(skip(self, currency), fields(name = %currency.name))]
    async fn save(&self, currency: NewCurrency) -> Result<Option<Currency>> {
        let mut tx = self.pool.begin().await.map_err(storage_error)?;

        let inserted = sqlx::query(
            "INSERT INTO currency (name, description) VALUES ($1, $2) \
             ON CONFLICT (name) DO NOTHING RETURNING id",
        )
        .bind(&currency.name)
        .bind(&currency.description)
        .fetch_optional(&mut *tx)
        .await
        .map_err(storage_error)?;

        let Some(row) = inserted else {
            debug!("Name already taken, nothing inserted");
            tx.rollback().await.map_err(storage_error)?;
            return Ok(None);
        };
        let id: i64 = row.try_get("id").map_err(storage_error)?;

        for (target, rate) in &currency.exchanges {
            sqlx::query(
                "INSERT INTO exchanges (currency_id, currency_name, rate) VALUES ($1, $2, $3)",
            )
            .bind(id)
            .bind(target)
            .bind(rate)
            .execute(&mut *tx)
            .await
            .map_err(storage_error)?;
        }

        tx.commit().await.map_err(storage_error)?;

        debug!(id, "Currency inserted");
        Ok(Some(currency.into_currency(CurrencyId::new(id))))
    }

    async fn delete_by_id(&self, id: CurrencyId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM currency WHERE id = $1")
            .bind(id.value())
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> Result<usize> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM currency")
            .fetch_one(&self.pool)
            .await
            .map_err(storage_error)?;

        Ok(count as usize)
    }
}
