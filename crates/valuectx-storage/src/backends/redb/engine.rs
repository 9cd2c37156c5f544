//! Redb storage engine implementation.

use std::path::Path;

use redb::Database;
use tracing::debug;

use crate::engine::{StorageEngine, StorageError};

use super::transaction::RedbTransaction;

/// Configuration options for the Redb storage engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct RedbConfig {
    /// Cache size in bytes. If not set, uses Redb's default.
    pub cache_size: Option<usize>,
}

impl RedbConfig {
    /// Create a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the cache size.
    #[must_use]
    pub const fn cache_size(mut self, size: usize) -> Self {
        self.cache_size = Some(size);
        self
    }
}

/// A storage engine backed by Redb.
///
/// # Example
///
/// ```
/// use valuectx_storage::backends::RedbEngine;
/// use valuectx_storage::{StorageEngine, Transaction};
///
/// let engine = RedbEngine::in_memory().unwrap();
///
/// let mut tx = engine.begin_write().unwrap();
/// tx.put("nodes", b"n:1", b"payload").unwrap();
/// tx.commit().unwrap();
///
/// let tx = engine.begin_read().unwrap();
/// assert_eq!(tx.get("nodes", b"n:1").unwrap(), Some(b"payload".to_vec()));
/// ```
pub struct RedbEngine {
    db: Database,
}

impl RedbEngine {
    /// Open or create a database at the given path with default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Open`] if the database cannot be opened or created.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        Self::open_with_config(path, RedbConfig::default())
    }

    /// Open or create a database at the given path with custom configuration.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Open`] if the database cannot be opened or created.
    pub fn open_with_config(path: impl AsRef<Path>, config: RedbConfig) -> Result<Self, StorageError> {
        let mut builder = Database::builder();

        if let Some(cache_size) = config.cache_size {
            builder.set_cache_size(cache_size);
        }

        let db = builder.create(path.as_ref()).map_err(|e| StorageError::Open(e.to_string()))?;
        debug!(path = %path.as_ref().display(), "opened redb database");

        Ok(Self { db })
    }

    /// Create an in-memory database.
    ///
    /// The database is lost when the engine is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Open`] if the database cannot be created.
    pub fn in_memory() -> Result<Self, StorageError> {
        let db = Database::builder()
            .create_with_backend(redb::backends::InMemoryBackend::new())
            .map_err(|e| StorageError::Open(e.to_string()))?;

        Ok(Self { db })
    }
}

impl StorageEngine for RedbEngine {
    type Transaction<'a> = RedbTransaction;

    fn begin_read(&self) -> Result<Self::Transaction<'_>, StorageError> {
        let tx = self.db.begin_read().map_err(|e| StorageError::Transaction(e.to_string()))?;
        Ok(RedbTransaction::new_read(tx))
    }

    fn begin_write(&self) -> Result<Self::Transaction<'_>, StorageError> {
        let tx = self.db.begin_write().map_err(|e| StorageError::Transaction(e.to_string()))?;
        Ok(RedbTransaction::new_write(tx))
    }

    fn flush(&self) -> Result<(), StorageError> {
        // Commits are already durable in redb.
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Transaction;

    #[test]
    fn in_memory_creation() {
        let engine = RedbEngine::in_memory().expect("failed to create in-memory db");
        let tx = engine.begin_read().expect("failed to begin read");
        assert!(tx.is_read_only());
    }

    #[test]
    fn config_builder() {
        let config = RedbConfig::new().cache_size(1024 * 1024 * 10);
        assert_eq!(config.cache_size, Some(10 * 1024 * 1024));
    }
}
