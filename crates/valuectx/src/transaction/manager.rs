//! Transaction manager implementation.

use std::sync::atomic::{AtomicU64, Ordering};

use tracing::trace;
use valuectx_core::TransactionError;
use valuectx_storage::{StorageEngine, StorageError};

use super::handle::DatabaseTransaction;

/// Starts transactions against a storage engine.
///
/// # Transaction Semantics
///
/// - **Read transactions** see a consistent snapshot; any number may run at once
/// - **Write transactions** are serialized by the storage engine
///
/// Every transaction gets an id from a process-local counter, used only in
/// log output.
pub struct TransactionManager<E: StorageEngine> {
    engine: E,
    next_tx_id: AtomicU64,
}

impl<E: StorageEngine> TransactionManager<E> {
    /// Create a transaction manager over `engine`.
    pub const fn new(engine: E) -> Self {
        Self { engine, next_tx_id: AtomicU64::new(1) }
    }

    /// Begin a read-only transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction cannot be started.
    pub fn begin_read(&self) -> Result<DatabaseTransaction<E::Transaction<'_>>, TransactionError> {
        let tx_id = self.next_tx_id.fetch_add(1, Ordering::Relaxed);
        let storage_tx = self.engine.begin_read().map_err(|e| storage_error_to_tx_error(&e))?;
        trace!(tx_id, "began read transaction");

        Ok(DatabaseTransaction::new_read(tx_id, storage_tx))
    }

    /// Begin a read-write transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction cannot be started.
    pub fn begin_write(&self) -> Result<DatabaseTransaction<E::Transaction<'_>>, TransactionError> {
        let tx_id = self.next_tx_id.fetch_add(1, Ordering::Relaxed);
        let storage_tx = self.engine.begin_write().map_err(|e| storage_error_to_tx_error(&e))?;
        trace!(tx_id, "began write transaction");

        Ok(DatabaseTransaction::new_write(tx_id, storage_tx))
    }

    /// Flush buffered data to durable storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the flush fails.
    pub fn flush(&self) -> Result<(), TransactionError> {
        self.engine.flush().map_err(|e| storage_error_to_tx_error(&e))
    }

    /// The underlying storage engine.
    #[must_use]
    pub const fn engine(&self) -> &E {
        &self.engine
    }
}

/// Convert a storage error to a transaction error.
pub(crate) fn storage_error_to_tx_error(err: &StorageError) -> TransactionError {
    match err {
        StorageError::ReadOnly => TransactionError::ReadOnly,
        StorageError::Conflict(msg) => TransactionError::Conflict(msg.clone()),
        StorageError::Serialization(msg) => TransactionError::Serialization(msg.clone()),
        _ => TransactionError::Storage(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use valuectx_storage::backends::RedbEngine;

    #[test]
    fn transaction_ids_increase() {
        let manager = TransactionManager::new(RedbEngine::in_memory().unwrap());
        let first = manager.begin_read().unwrap();
        let second = manager.begin_write().unwrap();
        assert!(second.id() > first.id());
        assert!(first.is_read_only());
        assert!(!second.is_read_only());
    }

    #[test]
    fn storage_error_mapping() {
        assert!(matches!(storage_error_to_tx_error(&StorageError::ReadOnly), TransactionError::ReadOnly));
        assert!(matches!(
            storage_error_to_tx_error(&StorageError::Conflict("w".into())),
            TransactionError::Conflict(_)
        ));
        assert!(matches!(
            storage_error_to_tx_error(&StorageError::Internal("x".into())),
            TransactionError::Storage(_)
        ));
    }
}
