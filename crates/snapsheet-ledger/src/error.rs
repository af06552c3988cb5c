//! Ledger error types

use thiserror::Error;

/// Result type for ledger operations
pub type LedgerResult<T> = std::result::Result<T, LedgerError>;

/// Errors that can occur while appending to a ledger
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The remote service answered with a non-2xx status
    #[error("{message}")]
    Remote { status: u16, message: String },

    /// Transport failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Malformed response body
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The target cannot be addressed
    #[error("Invalid ledger target: {0}")]
    InvalidTarget(String),
}
