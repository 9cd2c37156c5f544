//! Error types for graph storage operations.

use thiserror::Error;
use valuectx_core::{CoreError, EdgeId, EntityId, IndexTarget};
use valuectx_storage::StorageError;

/// Errors that can occur in graph storage operations.
#[derive(Debug, Error)]
pub enum GraphError {
    /// An entity (node) was not found.
    #[error("entity not found: {0}")]
    EntityNotFound(EntityId),

    /// An edge was not found.
    #[error("edge not found: {0}")]
    EdgeNotFound(EdgeId),

    /// Referenced entity does not exist when creating an edge.
    #[error("referenced entity does not exist: {0}")]
    InvalidEntityReference(EntityId),

    /// A named index is not registered.
    #[error("{target} index not found: {name}")]
    IndexNotFound {
        /// Node or relationship namespace.
        target: IndexTarget,
        /// The index name.
        name: String,
    },

    /// Caller input was rejected, such as an index name that is too long.
    #[error("validation error: {0}")]
    Validation(String),

    /// An encoding or decoding error occurred.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// A storage backend error occurred.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Data corruption detected in storage.
    #[error("data corruption: {0}")]
    DataCorruption(String),
}

impl From<CoreError> for GraphError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Encoding(msg) => Self::Encoding(msg),
            err @ CoreError::TypeMismatch { .. } => Self::Encoding(err.to_string()),
            CoreError::Validation(msg) => Self::Validation(msg),
        }
    }
}

/// Result type for graph operations.
pub type GraphResult<T> = Result<T, GraphError>;
