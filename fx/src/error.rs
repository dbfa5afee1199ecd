//! Live quote client error types.

use thiserror::Error;

/// Errors returned by a [`QuoteClient`](crate::QuoteClient).
#[derive(Debug, Error)]
pub enum QuoteError {
    /// Request could not be sent or the connection failed.
    #[error("Quote transport error: {0}")]
    Transport(String),

    /// Price source did not answer within the configured timeout.
    #[error("Quote request timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    /// Price source answered with a non-success status.
    #[error("Quote source returned {status}: {body}")]
    Status { status: u16, body: String },

    /// Response body could not be decoded.
    #[error("Malformed quote response: {0}")]
    Decode(String),
}

impl QuoteError {
    /// Whether the price source rejected the pair itself rather than failing
    /// to answer.
    pub fn is_unknown_pair(&self) -> bool {
        matches!(self, QuoteError::Status { status: 404, .. })
    }
}

/// Result type for quote client calls.
pub type QuoteResult<T> = Result<T, QuoteError>;
