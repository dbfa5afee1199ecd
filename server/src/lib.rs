//! CurrencyApi Server
//!
//! HTTP surface over the currency registry and the conversion engine.

pub mod api;
pub mod config;
pub mod error;
pub mod state;

pub use api::app_router;
pub use config::ServerConfig;
pub use state::{build_state, AppState};
