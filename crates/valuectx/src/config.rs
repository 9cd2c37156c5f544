//! Database configuration and builder.

use std::path::{Path, PathBuf};

use crate::database::Database;
use crate::error::{Error, Result};

/// Options used to open a [`Database`].
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Path to the database file. Ignored for in-memory databases.
    pub path: PathBuf,
    /// Keep everything in memory; nothing is written to disk.
    pub in_memory: bool,
    /// Storage cache size in bytes. `None` uses the backend default.
    pub cache_size: Option<usize>,
}

impl Config {
    /// Configuration for a file-backed database at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), ..Self::default() }
    }

    /// Configuration for an in-memory database.
    #[must_use]
    pub fn in_memory() -> Self {
        Self { in_memory: true, ..Self::default() }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if !self.in_memory && self.path.as_os_str().is_empty() {
            return Err(Error::Config("a path is required unless the database is in memory".into()));
        }
        if self.cache_size == Some(0) {
            return Err(Error::Config("cache size must be greater than zero".into()));
        }
        Ok(())
    }
}

/// Builder for opening a [`Database`].
///
/// # Example
///
/// ```
/// use valuectx::DatabaseBuilder;
///
/// let db = DatabaseBuilder::in_memory().cache_size(8 * 1024 * 1024).open().unwrap();
/// assert!(db.config().in_memory);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DatabaseBuilder {
    config: Config,
}

impl DatabaseBuilder {
    /// Create a builder with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder for an in-memory database.
    #[must_use]
    pub fn in_memory() -> Self {
        Self { config: Config::in_memory() }
    }

    /// Set the database file path.
    #[must_use]
    pub fn path(mut self, path: impl AsRef<Path>) -> Self {
        self.config.path = path.as_ref().to_path_buf();
        self
    }

    /// Set the storage cache size in bytes.
    #[must_use]
    pub const fn cache_size(mut self, bytes: usize) -> Self {
        self.config.cache_size = Some(bytes);
        self
    }

    /// Open the database.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for an invalid configuration or
    /// [`Error::Open`] if the storage cannot be opened.
    pub fn open(self) -> Result<Database> {
        Database::open_with_config(self.config)
    }
}
