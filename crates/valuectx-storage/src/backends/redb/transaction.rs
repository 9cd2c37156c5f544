//! Redb transaction implementation.
//!
//! # Batched cursors
//!
//! Range cursors never materialize a whole table. They load at most
//! `DEFAULT_BATCH_SIZE` entries at a time and fetch the next batch, starting
//! just past the last key seen, when the current one runs out.

use std::ops::Bound;

use redb::{ReadTransaction, ReadableTable, WriteTransaction};

use crate::engine::{Cursor, CursorResult, KeyValue, StorageError, Transaction};

use super::tables::{decode_key, encode_key, table_end_key, table_start_key, DATA_TABLE};

/// Default batch size for cursor operations.
const DEFAULT_BATCH_SIZE: usize = 1000;

/// A transaction for the Redb storage engine.
#[allow(clippy::large_enum_variant)]
pub enum RedbTransaction {
    /// A read-only transaction.
    Read(ReadTransaction),
    /// A read-write transaction.
    Write(WriteTransaction),
}

impl RedbTransaction {
    /// Create a new read-only transaction.
    pub const fn new_read(tx: ReadTransaction) -> Self {
        Self::Read(tx)
    }

    /// Create a new read-write transaction.
    pub const fn new_write(tx: WriteTransaction) -> Self {
        Self::Write(tx)
    }

    /// Fetch up to `batch_size` entries of `table` between two logical bounds.
    fn fetch_batch(
        &self,
        table: &str,
        start: &Bound<Vec<u8>>,
        end: &Bound<Vec<u8>>,
        batch_size: usize,
    ) -> Result<Vec<KeyValue>, StorageError> {
        let start = match start {
            Bound::Included(k) => Bound::Included(encode_key(table, k)),
            Bound::Excluded(k) => Bound::Excluded(encode_key(table, k)),
            Bound::Unbounded => Bound::Included(table_start_key(table)),
        };
        let end = match end {
            Bound::Included(k) => Bound::Included(encode_key(table, k)),
            Bound::Excluded(k) => Bound::Excluded(encode_key(table, k)),
            Bound::Unbounded => Bound::Excluded(table_end_key(table)),
        };

        if bounds_are_empty(&start, &end) {
            return Ok(Vec::new());
        }

        let start = start.as_ref().map(Vec::as_slice);
        let end = end.as_ref().map(Vec::as_slice);

        match self {
            Self::Read(tx) => match tx.open_table(DATA_TABLE) {
                Ok(t) => scan_batch(&t, start, end, batch_size),
                Err(redb::TableError::TableDoesNotExist(_)) => {
                    // No data table means no data, which is not an error
                    Ok(Vec::new())
                }
                Err(e) => Err(StorageError::Internal(e.to_string())),
            },
            Self::Write(tx) => match tx.open_table(DATA_TABLE) {
                Ok(t) => scan_batch(&t, start, end, batch_size),
                Err(e) => Err(StorageError::Internal(e.to_string())),
            },
        }
    }
}

fn bounds_are_empty(start: &Bound<Vec<u8>>, end: &Bound<Vec<u8>>) -> bool {
    match (start, end) {
        (Bound::Included(s), Bound::Included(e)) => s > e,
        (Bound::Included(s) | Bound::Excluded(s), Bound::Excluded(e))
        | (Bound::Excluded(s), Bound::Included(e)) => s >= e,
        _ => false,
    }
}

fn scan_batch<T>(
    table: &T,
    start: Bound<&[u8]>,
    end: Bound<&[u8]>,
    batch_size: usize,
) -> Result<Vec<KeyValue>, StorageError>
where
    T: ReadableTable<&'static [u8], &'static [u8]>,
{
    let range = table.range::<&[u8]>((start, end)).map_err(|e| StorageError::Internal(e.to_string()))?;

    let mut entries = Vec::with_capacity(batch_size.min(1024));
    for result in range {
        if entries.len() >= batch_size {
            break;
        }
        let (k, v) = result.map_err(|e| StorageError::Internal(e.to_string()))?;
        if let Some((_, original_key)) = decode_key(k.value()) {
            entries.push((original_key.to_vec(), v.value().to_vec()));
        }
    }
    Ok(entries)
}

impl Transaction for RedbTransaction {
    type Cursor<'a>
        = RedbCursor<'a>
    where
        Self: 'a;

    fn get(&self, table: &str, key: &[u8]) -> Result<Option<Vec<u8>>, StorageError> {
        let encoded_key = encode_key(table, key);

        let value = match self {
            Self::Read(tx) => match tx.open_table(DATA_TABLE) {
                Ok(t) => t.get(encoded_key.as_slice()).map(|v| v.map(|v| v.value().to_vec())),
                Err(redb::TableError::TableDoesNotExist(_)) => return Ok(None),
                Err(e) => return Err(StorageError::Internal(e.to_string())),
            },
            Self::Write(tx) => {
                let t =
                    tx.open_table(DATA_TABLE).map_err(|e| StorageError::Internal(e.to_string()))?;
                let value = t.get(encoded_key.as_slice()).map(|v| v.map(|v| v.value().to_vec()));
                value
            }
        };
        value.map_err(|e| StorageError::Internal(e.to_string()))
    }

    fn put(&mut self, table: &str, key: &[u8], value: &[u8]) -> Result<(), StorageError> {
        match self {
            Self::Read(_) => Err(StorageError::ReadOnly),
            Self::Write(tx) => {
                let encoded_key = encode_key(table, key);
                let mut t =
                    tx.open_table(DATA_TABLE).map_err(|e| StorageError::Internal(e.to_string()))?;
                t.insert(encoded_key.as_slice(), value)
                    .map_err(|e| StorageError::Internal(e.to_string()))?;
                Ok(())
            }
        }
    }

    fn delete(&mut self, table: &str, key: &[u8]) -> Result<bool, StorageError> {
        match self {
            Self::Read(_) => Err(StorageError::ReadOnly),
            Self::Write(tx) => {
                let encoded_key = encode_key(table, key);
                let mut t =
                    tx.open_table(DATA_TABLE).map_err(|e| StorageError::Internal(e.to_string()))?;
                let removed = t
                    .remove(encoded_key.as_slice())
                    .map_err(|e| StorageError::Internal(e.to_string()))?
                    .is_some();
                Ok(removed)
            }
        }
    }

    fn range(
        &self,
        table: &str,
        start: Bound<&[u8]>,
        end: Bound<&[u8]>,
    ) -> Result<Self::Cursor<'_>, StorageError> {
        Ok(RedbCursor::new(
            self,
            table.to_owned(),
            start.map(<[u8]>::to_vec),
            end.map(<[u8]>::to_vec),
            DEFAULT_BATCH_SIZE,
        ))
    }

    fn commit(self) -> Result<(), StorageError> {
        match self {
            Self::Read(_) => Ok(()),
            Self::Write(tx) => tx.commit().map_err(|e| StorageError::Transaction(e.to_string())),
        }
    }

    fn rollback(self) -> Result<(), StorageError> {
        match self {
            Self::Read(_) => Ok(()),
            Self::Write(tx) => tx.abort().map_err(|e| StorageError::Transaction(e.to_string())),
        }
    }

    fn is_read_only(&self) -> bool {
        matches!(self, Self::Read(_))
    }
}

/// A forward cursor over a key range of one logical table.
///
/// At most `batch_size` entries are held in memory at a time.
pub struct RedbCursor<'a> {
    tx: &'a RedbTransaction,
    table: String,
    start: Bound<Vec<u8>>,
    end: Bound<Vec<u8>>,
    batch: Vec<KeyValue>,
    position: Option<usize>,
    batch_size: usize,
    /// `false` once a batch came back short, meaning the range is exhausted.
    has_more: bool,
    started: bool,
}

impl<'a> RedbCursor<'a> {
    /// Create an unpositioned cursor.
    pub fn new(
        tx: &'a RedbTransaction,
        table: String,
        start: Bound<Vec<u8>>,
        end: Bound<Vec<u8>>,
        batch_size: usize,
    ) -> Self {
        Self {
            tx,
            table,
            start,
            end,
            batch: Vec::new(),
            position: None,
            batch_size: batch_size.max(1),
            has_more: true,
            started: false,
        }
    }

    /// Replace the current batch with entries starting at `from`.
    fn load_batch(&mut self, from: &Bound<Vec<u8>>) -> Result<(), StorageError> {
        self.started = true;
        self.batch = self.tx.fetch_batch(&self.table, from, &self.end, self.batch_size)?;
        self.has_more = self.batch.len() >= self.batch_size;
        self.position = if self.batch.is_empty() { None } else { Some(0) };
        Ok(())
    }

    fn current_owned(&self) -> Option<KeyValue> {
        self.position.and_then(|pos| self.batch.get(pos).cloned())
    }
}

impl Cursor for RedbCursor<'_> {
    fn seek(&mut self, key: &[u8]) -> CursorResult {
        let from = match &self.start {
            Bound::Included(s) if s.as_slice() > key => Bound::Included(s.clone()),
            Bound::Excluded(s) if s.as_slice() >= key => Bound::Excluded(s.clone()),
            _ => Bound::Included(key.to_vec()),
        };
        self.load_batch(&from)?;
        Ok(self.current_owned())
    }

    fn next(&mut self) -> CursorResult {
        if !self.started {
            let from = self.start.clone();
            self.load_batch(&from)?;
            return Ok(self.current_owned());
        }

        let Some(pos) = self.position else {
            return Ok(None);
        };

        if pos + 1 < self.batch.len() {
            self.position = Some(pos + 1);
        } else if self.has_more {
            let from = match self.batch.last() {
                Some((k, _)) => Bound::Excluded(k.clone()),
                None => return Ok(None),
            };
            self.load_batch(&from)?;
        } else {
            self.position = None;
        }
        Ok(self.current_owned())
    }

    fn current(&self) -> Option<(&[u8], &[u8])> {
        self.position
            .and_then(|pos| self.batch.get(pos))
            .map(|(k, v)| (k.as_slice(), v.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_bounds() {
        let a = vec![1u8];
        let b = vec![2u8];
        assert!(bounds_are_empty(&Bound::Included(b.clone()), &Bound::Included(a.clone())));
        assert!(bounds_are_empty(&Bound::Included(a.clone()), &Bound::Excluded(a.clone())));
        assert!(!bounds_are_empty(&Bound::Included(a.clone()), &Bound::Included(a.clone())));
        assert!(!bounds_are_empty(&Bound::Included(a), &Bound::Excluded(b)));
    }
}
