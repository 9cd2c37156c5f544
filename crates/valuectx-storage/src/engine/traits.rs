//! Core storage engine traits.

use std::ops::Bound;

use super::StorageError;

/// An owned key-value pair.
pub type KeyValue = (Vec<u8>, Vec<u8>);

/// Result of a cursor movement: the entry the cursor now points at, if any.
pub type CursorResult = Result<Option<KeyValue>, StorageError>;

/// A transactional key-value storage engine.
///
/// Data is organized into logical tables identified by name. Keys within a
/// table are kept in byte order.
pub trait StorageEngine: Send + Sync {
    /// The transaction type produced by this engine.
    type Transaction<'a>: Transaction
    where
        Self: 'a;

    /// Begin a read-only transaction over a consistent snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction cannot be started.
    fn begin_read(&self) -> Result<Self::Transaction<'_>, StorageError>;

    /// Begin a read-write transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction cannot be started.
    fn begin_write(&self) -> Result<Self::Transaction<'_>, StorageError>;

    /// Make committed data durable.
    ///
    /// # Errors
    ///
    /// Returns an error if the flush fails.
    fn flush(&self) -> Result<(), StorageError>;
}

/// A storage transaction.
///
/// Dropping a write transaction without calling [`Transaction::commit`]
/// discards its changes.
pub trait Transaction {
    /// The cursor type produced by range scans.
    type Cursor<'a>: Cursor
    where
        Self: 'a;

    /// Get the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails.
    fn get(&self, table: &str, key: &[u8]) -> Result<Option<Vec<u8>>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::ReadOnly`] on a read-only transaction.
    fn put(&mut self, table: &str, key: &[u8], value: &[u8]) -> Result<(), StorageError>;

    /// Delete `key`, returning `true` if it existed.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::ReadOnly`] on a read-only transaction.
    fn delete(&mut self, table: &str, key: &[u8]) -> Result<bool, StorageError>;

    /// Open a cursor over the keys of `table` between `start` and `end`.
    ///
    /// # Errors
    ///
    /// Returns an error if the cursor cannot be created.
    fn range(
        &self,
        table: &str,
        start: Bound<&[u8]>,
        end: Bound<&[u8]>,
    ) -> Result<Self::Cursor<'_>, StorageError>;

    /// Commit the transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the commit fails; the changes are then discarded.
    fn commit(self) -> Result<(), StorageError>;

    /// Discard the transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the rollback fails.
    fn rollback(self) -> Result<(), StorageError>;

    /// Returns `true` if this transaction cannot write.
    fn is_read_only(&self) -> bool;
}

/// A forward cursor over key-value pairs.
///
/// A fresh cursor is unpositioned; the first call to [`Cursor::next`] moves
/// it to the first entry in range.
pub trait Cursor {
    /// Position the cursor at the first key `>= key` that is in range.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying read fails.
    fn seek(&mut self, key: &[u8]) -> CursorResult;

    /// Advance to the next entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying read fails.
    fn next(&mut self) -> CursorResult;

    /// The entry the cursor currently points at.
    fn current(&self) -> Option<(&[u8], &[u8])>;
}
