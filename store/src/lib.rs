//! CurrencyApi Store
//!
//! Persistence for currency records. [`CurrencyStore`] is the contract the
//! registry and the conversion engine depend on; [`MemoryStore`] and
//! [`PgCurrencyStore`] implement it.

pub mod traits;
pub mod memory;
pub mod postgres;

pub use traits::CurrencyStore;
pub use memory::MemoryStore;
pub use postgres::PgCurrencyStore;
