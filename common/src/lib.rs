//! CurrencyApi Common Types
//!
//! Shared types used across the CurrencyApi crates: currency records,
//! conversion payloads, live quote records and the error kinds surfaced to
//! callers.

pub mod identifiers;
pub mod currency;
pub mod quote;
pub mod error;

pub use identifiers::*;
pub use currency::*;
pub use quote::*;
pub use error::*;
