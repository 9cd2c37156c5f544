//! Storage error types.

use thiserror::Error;

/// Errors that can occur in storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The database could not be opened.
    #[error("failed to open database: {0}")]
    Open(String),

    /// A transaction could not be started or committed.
    #[error("transaction error: {0}")]
    Transaction(String),

    /// A write was attempted through a read-only transaction.
    #[error("cannot write in read-only transaction")]
    ReadOnly,

    /// A concurrent writer invalidated this transaction.
    #[error("transaction conflict: {0}")]
    Conflict(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A serialization error occurred.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The backend reported an unexpected failure.
    #[error("internal storage error: {0}")]
    Internal(String),
}

/// Result type alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;
