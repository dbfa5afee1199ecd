//! Error types for CurrencyApi.

use thiserror::Error;

/// Main error type for currency operations.
///
/// `Display` renders the caller-facing message as-is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CurrencyError {
    /// Rejected request (null name, out-of-range amount).
    #[error("{0}")]
    Validation(String),

    /// Create of a name that is already taken.
    #[error("Coin already exists")]
    AlreadyExists,

    /// Unknown currency id or name, or no rate for the requested target.
    #[error("{0}")]
    NotFound(String),

    /// Persistence collaborator failure.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl CurrencyError {
    pub fn null_name() -> Self {
        CurrencyError::Validation("Coin name cannot be null".to_string())
    }

    pub fn already_exists() -> Self {
        CurrencyError::AlreadyExists
    }

    /// Whether this is a rejected create of a taken name.
    pub fn is_conflict(&self) -> bool {
        matches!(self, CurrencyError::AlreadyExists)
    }

    /// `amount * rate` does not fit the decimal range.
    pub fn amount_out_of_range() -> Self {
        CurrencyError::Validation("Converted amount is out of range".to_string())
    }

    /// Unknown id on delete.
    pub fn coin_not_found() -> Self {
        CurrencyError::NotFound("Coin not found".to_string())
    }

    /// Unknown source currency on convert.
    pub fn coin_not_found_named(name: &str) -> Self {
        CurrencyError::NotFound(format!("Coin not found: {}", name))
    }

    pub fn exchange_not_found(to: &str, from: &str) -> Self {
        CurrencyError::NotFound(format!("Exchange {} not found for {}", to, from))
    }

    /// Check if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(self, CurrencyError::Storage(_))
    }

    /// Get error code for API responses.
    pub fn error_code(&self) -> &'static str {
        match self {
            CurrencyError::Validation(_) => "VALIDATION_ERROR",
            CurrencyError::AlreadyExists => "ALREADY_EXISTS",
            CurrencyError::NotFound(_) => "NOT_FOUND",
            CurrencyError::Storage(_) => "STORAGE_ERROR",
        }
    }
}

/// Result type alias for currency operations.
pub type Result<T> = std::result::Result<T, CurrencyError>;
