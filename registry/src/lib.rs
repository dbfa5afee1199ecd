//! CurrencyApi Registry
//!
//! Lifecycle of currency records: listing, creation with name uniqueness,
//! and deletion.

pub mod lifecycle;

pub use lifecycle::CurrencyRegistry;
