//! Error types for `valuectx`.

use thiserror::Error;

/// The main error type for `valuectx` operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// The database could not be opened.
    #[error("failed to open database: {0}")]
    Open(String),

    /// A storage backend error.
    #[error("storage error: {0}")]
    Storage(#[from] valuectx_storage::StorageError),

    /// A transaction or store error, passed through from the graph layer.
    #[error("transaction error: {0}")]
    Transaction(#[from] valuectx_core::TransactionError),

    /// No endpoint with this name exists.
    #[error("unknown endpoint: {0}")]
    UnknownEndpoint(String),

    /// Endpoint parameters or source could not be used.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

impl Error {
    /// Create an invalid parameter error.
    #[must_use]
    pub fn invalid_parameter(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }

    /// Returns `true` if this error came from a transaction or the store.
    #[must_use]
    pub const fn is_transaction_error(&self) -> bool {
        matches!(self, Self::Transaction(_))
    }
}

/// Result type alias for `valuectx` operations.
pub type Result<T> = std::result::Result<T, Error>;
