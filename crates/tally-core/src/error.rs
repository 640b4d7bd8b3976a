//! Error types for Tally core operations.
//!
//! All four user-correctable conditions (bad amount, failed validation,
//! irreconcilable custom split, missing id) are distinct variants so the
//! caller can show a specific message. None of them is fatal; store-level
//! failures pass through as `Storage` without retries.

use thiserror::Error;

/// Result type alias for Tally operations.
pub type Result<T> = std::result::Result<T, TallyError>;

/// Core error type for Tally operations.
#[derive(Debug, Error)]
pub enum TallyError {
    /// Malformed or non-positive money input
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Entry validation error (missing description, payer, etc.)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Custom split shares do not reconcile to the entry total
    #[error(
        "Split mismatch: shares {share_a_cents} + {share_b_cents} do not \
         reconcile to total {total_cents} (tolerance 2 cents)"
    )]
    SplitMismatch {
        total_cents: i64,
        share_a_cents: i64,
        share_b_cents: i64,
    },

    /// Operation referenced an id no longer in the store
    #[error("Not found: {0}")]
    NotFound(String),

    /// Storage backend error
    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<std::io::Error> for TallyError {
    fn from(err: std::io::Error) -> Self {
        TallyError::Storage(err.to_string())
    }
}

impl From<rusqlite::Error> for TallyError {
    fn from(err: rusqlite::Error) -> Self {
        TallyError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for TallyError {
    fn from(err: serde_json::Error) -> Self {
        TallyError::Validation(err.to_string())
    }
}
