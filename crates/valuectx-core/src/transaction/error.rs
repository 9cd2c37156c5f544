//! Transaction error types.

use thiserror::Error;

/// Errors that can occur during transaction operations.
#[derive(Debug, Error)]
pub enum TransactionError {
    /// The storage layer returned an error.
    #[error("storage error: {0}")]
    Storage(String),

    /// Attempted a write operation on a read-only transaction.
    #[error("cannot write in read-only transaction")]
    ReadOnly,

    /// The transaction has already been committed or rolled back.
    #[error("transaction already completed")]
    AlreadyCompleted,

    /// A conflict occurred due to concurrent modification.
    #[error("transaction conflict: {0}")]
    Conflict(String),

    /// An entity was not found.
    #[error("entity not found: {0}")]
    EntityNotFound(String),

    /// An edge was not found.
    #[error("edge not found: {0}")]
    EdgeNotFound(String),

    /// A named index was not found.
    #[error("index not found: {0}")]
    IndexNotFound(String),

    /// Caller input was rejected by the store.
    #[error("validation error: {0}")]
    Validation(String),

    /// A serialization or deserialization error occurred.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// An internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}

impl TransactionError {
    /// Returns `true` if this is a "not found" type error.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::EntityNotFound(_) | Self::EdgeNotFound(_) | Self::IndexNotFound(_))
    }
}

/// Result type alias for transaction operations.
pub type TransactionResult<T> = Result<T, TransactionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification() {
        assert!(TransactionError::IndexNotFound("time".into()).is_not_found());
        assert!(!TransactionError::AlreadyCompleted.is_not_found());
    }
}
