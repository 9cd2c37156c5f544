//! Main database interface.
//!
//! [`Database`] owns the storage engine and hands out transactions. Open it
//! once and pass a reference wherever it is needed; nothing is looked up
//! through process-wide state.
//!
//! ```
//! use valuectx::Database;
//!
//! let db = Database::in_memory().unwrap();
//!
//! let mut tx = db.begin().unwrap();
//! let alice = tx.create_entity(|e| e.with_label("Person")).unwrap();
//! tx.commit().unwrap();
//!
//! let tx = db.begin_read().unwrap();
//! assert!(tx.get_entity(alice.id).unwrap().is_some());
//! ```

use std::path::Path;

use tracing::info;
use valuectx_storage::backends::redb::{RedbConfig, RedbEngine};
use valuectx_storage::StorageEngine;

use crate::config::{Config, DatabaseBuilder};
use crate::error::{Error, Result};
use crate::transaction::{DatabaseTransaction, TransactionManager};

/// Transaction handle type produced by [`Database`].
pub type DbTransaction<'db> = DatabaseTransaction<<RedbEngine as StorageEngine>::Transaction<'db>>;

/// A `valuectx` database handle.
pub struct Database {
    manager: TransactionManager<RedbEngine>,
    config: Config,
}

impl Database {
    /// Open or create a database file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or created.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        DatabaseBuilder::new().path(path).open()
    }

    /// Create an in-memory database. Its contents are lost when it is dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be created.
    pub fn in_memory() -> Result<Self> {
        DatabaseBuilder::in_memory().open()
    }

    /// Open a database with the given configuration.
    ///
    /// This is typically called through [`DatabaseBuilder::open()`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the configuration is invalid or
    /// [`Error::Open`] if the storage cannot be opened.
    pub fn open_with_config(config: Config) -> Result<Self> {
        config.validate()?;

        let engine = if config.in_memory {
            RedbEngine::in_memory().map_err(|e| Error::Open(e.to_string()))?
        } else {
            let mut redb_config = RedbConfig::new();
            if let Some(cache_size) = config.cache_size {
                redb_config = redb_config.cache_size(cache_size);
            }
            RedbEngine::open_with_config(&config.path, redb_config)
                .map_err(|e| Error::Open(e.to_string()))?
        };

        if config.in_memory {
            info!("opened in-memory database");
        } else {
            info!(path = %config.path.display(), "opened database");
        }

        Ok(Self { manager: TransactionManager::new(engine), config })
    }

    /// Returns a builder for opening a database with custom configuration.
    #[must_use]
    pub fn builder() -> DatabaseBuilder {
        DatabaseBuilder::new()
    }

    /// The configuration used to open this database.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Begin a read-write transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction cannot be started.
    pub fn begin(&self) -> Result<DbTransaction<'_>> {
        self.manager.begin_write().map_err(Error::Transaction)
    }

    /// Begin a read-only transaction over a consistent snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction cannot be started.
    pub fn begin_read(&self) -> Result<DbTransaction<'_>> {
        self.manager.begin_read().map_err(Error::Transaction)
    }

    /// Flush buffered data to durable storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the flush fails.
    pub fn flush(&self) -> Result<()> {
        self.manager.flush().map_err(Error::Transaction)
    }

    /// The transaction manager.
    #[must_use]
    pub const fn transaction_manager(&self) -> &TransactionManager<RedbEngine> {
        &self.manager
    }
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database").field("config", &self.config).finish_non_exhaustive()
    }
}
