//! A handle to one named numeric index.

use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;
use std::ops::Bound;

use tracing::trace;
use valuectx_core::encoding::keys::increment_prefix;
use valuectx_core::index::{encode_key_prefix, NumericIndexEntry, NumericRangeScan};
use valuectx_core::{Numeric, NumericValue};
use valuectx_storage::{Cursor, Transaction};

use super::query::NumericRangeQuery;
use super::store::IndexStore;
use crate::store::metadata::{self, INDEX_SEQUENCE};
use crate::store::{GraphElement, GraphError, GraphResult};

/// Table name for numeric index entries.
pub const TABLE_NUMERIC_INDEX: &str = "numeric_index";

/// A named numeric index over nodes (`E = EntityId`) or relationships
/// (`E = EdgeId`).
///
/// The handle only carries the name; every operation takes the transaction
/// to run in.
pub struct NumericIndex<E> {
    name: String,
    _element: PhantomData<fn() -> E>,
}

impl<E> Clone for NumericIndex<E> {
    fn clone(&self) -> Self {
        Self { name: self.name.clone(), _element: PhantomData }
    }
}

impl<E: GraphElement> fmt::Debug for NumericIndex<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NumericIndex").field("name", &self.name).field("target", &E::TARGET).finish()
    }
}

impl<E: GraphElement> NumericIndex<E> {
    pub(crate) fn new(name: &str) -> Self {
        Self { name: name.to_owned(), _element: PhantomData }
    }

    /// The index name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Record `value` for `element` under `key`.
    ///
    /// The index is registered if this is its first entry. Recording the same
    /// value twice keeps both entries.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::EntityNotFound`] or [`GraphError::EdgeNotFound`]
    /// if the element does not exist, or a storage error.
    pub fn add<T: Transaction, N: Numeric>(
        &self,
        tx: &mut T,
        element: E,
        key: &str,
        value: N,
    ) -> GraphResult<()> {
        if !element.exists(tx)? {
            return Err(element.not_found());
        }

        IndexStore::create::<E, T>(tx, &self.name)?;

        let sequence = metadata::next(tx, INDEX_SEQUENCE)?;
        let entry = NumericIndexEntry::new(
            E::TARGET,
            self.name.as_str(),
            key,
            value.into_numeric(),
            element.raw_id(),
            sequence,
        );
        tx.put(TABLE_NUMERIC_INDEX, &entry.encode_key()?, &[])?;

        trace!(index_name = %self.name, key, kind = %N::KIND, %value, element = %element, "recorded numeric value");
        Ok(())
    }

    /// Elements whose value under `query.key` falls in the query range.
    ///
    /// Results are ordered by value (ascending unless `query.sort.reverse`),
    /// then by element id, then by insertion order. An element appears once
    /// per matching entry. Entries of elements deleted since they were
    /// recorded are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::Validation`] if `query.sort` names a different
    /// key or kind than the query itself, or an error if the scan fails or an
    /// entry is corrupt.
    pub fn query<T: Transaction, N: Numeric>(
        &self,
        tx: &T,
        query: &NumericRangeQuery<N>,
    ) -> GraphResult<Vec<E>> {
        if query.sort.key != query.key || query.sort.kind != N::KIND {
            return Err(GraphError::Validation(format!(
                "cannot sort a {} query on `{}` by {} `{}`",
                N::KIND,
                query.key,
                query.sort.kind,
                query.sort.key
            )));
        }

        let scan = query.scan(E::TARGET, &self.name)?;
        let mut live = LiveElements::default();
        let mut hits = Vec::new();
        for_each_key(tx, &scan, |key| {
            let raw = NumericIndexEntry::decode_element(key)
                .ok_or_else(|| GraphError::DataCorruption("truncated numeric index key".to_owned()))?;
            let element = E::from_raw_id(raw);
            if live.check(tx, element)? {
                hits.push(element);
            }
            Ok(())
        })?;

        if query.sort.reverse {
            hits.reverse();
        }
        Ok(hits)
    }

    /// Every entry recorded under `key` for an element that still exists,
    /// grouped by numeric kind and ascending within each kind.
    ///
    /// # Errors
    ///
    /// Returns an error if the scan fails or an entry is corrupt.
    pub fn entries<T: Transaction>(&self, tx: &T, key: &str) -> GraphResult<Vec<(E, NumericValue)>> {
        let scan = self.key_scan(key)?;
        let mut live = LiveElements::default();
        let mut entries = Vec::new();
        for_each_key(tx, &scan, |raw| {
            let entry = NumericIndexEntry::decode_key(raw)
                .map_err(|e| GraphError::DataCorruption(e.to_string()))?;
            let element = E::from_raw_id(entry.element);
            if live.check(tx, element)? {
                entries.push((element, entry.value));
            }
            Ok(())
        })?;
        Ok(entries)
    }

    /// Number of entries recorded under `key`, of any numeric kind, for
    /// elements that still exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the scan fails.
    pub fn count<T: Transaction>(&self, tx: &T, key: &str) -> GraphResult<usize> {
        let scan = self.key_scan(key)?;
        let mut live = LiveElements::default();
        let mut count = 0;
        for_each_key(tx, &scan, |raw| {
            let raw_id = NumericIndexEntry::decode_element(raw)
                .ok_or_else(|| GraphError::DataCorruption("truncated numeric index key".to_owned()))?;
            if live.check(tx, E::from_raw_id(raw_id))? {
                count += 1;
            }
            Ok(())
        })?;
        Ok(count)
    }

    /// Remove every entry of `element` under `key`, returning how many were
    /// removed. This also clears entries left by a deleted element.
    ///
    /// # Errors
    ///
    /// Returns an error if the scan or a delete fails.
    pub fn remove<T: Transaction>(&self, tx: &mut T, element: E, key: &str) -> GraphResult<usize> {
        let scan = self.key_scan(key)?;
        let raw_id = element.raw_id();
        let mut doomed = Vec::new();
        for_each_key(&*tx, &scan, |raw| {
            if NumericIndexEntry::decode_element(raw) == Some(raw_id) {
                doomed.push(raw.to_vec());
            }
            Ok(())
        })?;

        for raw in &doomed {
            tx.delete(TABLE_NUMERIC_INDEX, raw)?;
        }
        trace!(index_name = %self.name, key, element = %element, removed = doomed.len(), "removed numeric values");
        Ok(doomed.len())
    }

    fn key_scan(&self, key: &str) -> GraphResult<NumericRangeScan> {
        let start = encode_key_prefix(E::TARGET, &self.name, key)?;
        let end = increment_prefix(&start);
        Ok(NumericRangeScan { start, end })
    }
}

/// Existence checks for the elements seen during one scan.
///
/// Deleting a node or relationship leaves its index entries in place, so
/// every read path filters them here.
struct LiveElements<E> {
    seen: BTreeMap<E, bool>,
}

impl<E> Default for LiveElements<E> {
    fn default() -> Self {
        Self { seen: BTreeMap::new() }
    }
}

impl<E: GraphElement> LiveElements<E> {
    fn check<T: Transaction>(&mut self, tx: &T, element: E) -> GraphResult<bool> {
        if let Some(&live) = self.seen.get(&element) {
            return Ok(live);
        }
        let live = element.exists(tx)?;
        if !live {
            trace!(element = %element, "skipping entry of deleted element");
        }
        self.seen.insert(element, live);
        Ok(live)
    }
}

fn for_each_key<T, F>(tx: &T, scan: &NumericRangeScan, mut visit: F) -> GraphResult<()>
where
    T: Transaction,
    F: FnMut(&[u8]) -> GraphResult<()>,
{
    if scan.is_empty() {
        return Ok(());
    }

    let mut cursor = tx.range(
        TABLE_NUMERIC_INDEX,
        Bound::Included(scan.start.as_slice()),
        Bound::Excluded(scan.end.as_slice()),
    )?;
    while let Some((key, _)) = cursor.next()? {
        visit(&key)?;
    }
    Ok(())
}
