//! Error types for the persistence layer.
//!
//! These are infrastructure failures only. Domain conditions (duplicate
//! usernames, full clubs) are reported by the identity and membership
//! error enums and never surface here.

use thiserror::Error;

/// Error type for store operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error from `SQLite`.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A stored value could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A lock guarding the store was poisoned.
    #[error("Lock error: {0}")]
    Lock(String),

    /// Filesystem error while preparing the store.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
