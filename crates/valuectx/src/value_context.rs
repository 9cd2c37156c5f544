//! The numeric index facade.
//!
//! [`ValueContext`] records numeric values against nodes and relationships
//! and answers inclusive range queries over them. Each call runs in exactly
//! one transaction that is finished before the call returns.

use serde::Serialize;
use tracing::debug;
use valuectx_core::{IndexTarget, Numeric};
use valuectx_graph::{GraphElement, NumericRangeQuery};

use crate::database::Database;
use crate::error::Result;

/// Elements returned by a facade call.
///
/// Results are collected while the transaction is open, so the sequence can
/// be iterated any number of times after the call returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Hits<E> {
    elements: Vec<E>,
}

impl<E> Hits<E> {
    /// A result with no elements.
    #[must_use]
    pub const fn empty() -> Self {
        Self { elements: Vec::new() }
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether there are no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Iterate over the elements in result order.
    pub fn iter(&self) -> std::slice::Iter<'_, E> {
        self.elements.iter()
    }

    /// The elements as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[E] {
        &self.elements
    }

    /// Take the elements out.
    #[must_use]
    pub fn into_vec(self) -> Vec<E> {
        self.elements
    }
}

impl<E> Default for Hits<E> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<E> From<Vec<E>> for Hits<E> {
    fn from(elements: Vec<E>) -> Self {
        Self { elements }
    }
}

impl<E> IntoIterator for Hits<E> {
    type Item = E;
    type IntoIter = std::vec::IntoIter<E>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.into_iter()
    }
}

impl<'a, E> IntoIterator for &'a Hits<E> {
    type Item = &'a E;
    type IntoIter = std::slice::Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

/// Numeric write and range-query operations over one database.
///
/// `E` is [`EntityId`](valuectx_core::EntityId) for node indexes and
/// [`EdgeId`](valuectx_core::EdgeId) for relationship indexes. Node and
/// relationship indexes with the same name are independent.
///
/// # Example
///
/// ```
/// use valuectx::{Database, ValueContext};
/// use valuectx_core::EntityId;
///
/// let db = Database::in_memory().unwrap();
/// let mut tx = db.begin().unwrap();
/// let event = tx.create_entity(|e| e.with_label("Event")).unwrap();
/// tx.commit().unwrap();
///
/// let ctx = ValueContext::new(&db);
/// assert!(ctx.post_numeric(event.id, "time", "timestamp", 25i64).unwrap().is_empty());
///
/// let hits = ctx.range::<EntityId, i64>("time", "timestamp", Some(8), Some(30)).unwrap();
/// assert_eq!(hits.as_slice(), &[event.id]);
/// assert!(ctx.range::<EntityId, i64>("time", "timestamp", Some(26), Some(30)).unwrap().is_empty());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ValueContext<'db> {
    db: &'db Database,
}

impl<'db> ValueContext<'db> {
    /// Borrow `db` for facade calls.
    #[must_use]
    pub const fn new(db: &'db Database) -> Self {
        Self { db }
    }

    /// The database this context operates on.
    #[must_use]
    pub const fn database(&self) -> &'db Database {
        self.db
    }

    /// Record `value` for `element` under `key` in the named index.
    ///
    /// The index is created on first use. Writing the same value twice keeps
    /// two entries. Always returns an empty result.
    ///
    /// # Errors
    ///
    /// Fails if the element does not exist or the store rejects the write; in
    /// that case nothing is recorded.
    pub fn post_numeric<E: GraphElement, N: Numeric>(
        &self,
        element: E,
        index: &str,
        key: &str,
        value: N,
    ) -> Result<Hits<E>> {
        let mut tx = self.db.begin()?;
        tx.add_numeric(index, element, key, value)?;
        tx.commit()?;

        debug!(
            index_target = %E::TARGET,
            index_name = index,
            key,
            kind = %N::KIND,
            %value,
            element = %element,
            "posted numeric value"
        );
        Ok(Hits::empty())
    }

    /// Elements whose value under `key` lies in `[min, max]`, ascending by
    /// value.
    ///
    /// A missing bound is replaced by `N::MIN` or `N::MAX`. An unknown index
    /// or key yields an empty result.
    ///
    /// # Errors
    ///
    /// Fails if the store cannot be read.
    pub fn range<E: GraphElement, N: Numeric>(
        &self,
        index: &str,
        key: &str,
        min: Option<N>,
        max: Option<N>,
    ) -> Result<Hits<E>> {
        let query = NumericRangeQuery::new_range(key, min, max);

        let tx = self.db.begin_read()?;
        let hits = tx.query_numeric::<E, N>(index, &query)?;
        tx.commit()?;

        debug!(
            index_target = %E::TARGET,
            index_name = index,
            key,
            kind = %N::KIND,
            min = %query.min,
            max = %query.max,
            hits = hits.len(),
            "numeric range query"
        );
        Ok(Hits::from(hits))
    }

    /// Shorthand for a node range query.
    ///
    /// # Errors
    ///
    /// Fails if the store cannot be read.
    pub fn range_nodes<N: Numeric>(
        &self,
        index: &str,
        key: &str,
        min: Option<N>,
        max: Option<N>,
    ) -> Result<Hits<valuectx_core::EntityId>> {
        self.range(index, key, min, max)
    }

    /// Shorthand for a relationship range query.
    ///
    /// # Errors
    ///
    /// Fails if the store cannot be read.
    pub fn range_relationships<N: Numeric>(
        &self,
        index: &str,
        key: &str,
        min: Option<N>,
        max: Option<N>,
    ) -> Result<Hits<valuectx_core::EdgeId>> {
        self.range(index, key, min, max)
    }

    /// Registered index names of one target.
    ///
    /// # Errors
    ///
    /// Fails if the registry cannot be read.
    pub fn indexes(&self, target: IndexTarget) -> Result<Vec<String>> {
        let tx = self.db.begin_read()?;
        let names = tx.list_indexes(target)?.into_iter().map(|meta| meta.name).collect();
        tx.commit()?;
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hits_helpers() {
        let hits: Hits<u64> = Hits::empty();
        assert!(hits.is_empty());
        assert_eq!(hits, Hits::default());

        let hits = Hits::from(vec![3u64, 1, 3]);
        assert_eq!(hits.len(), 3);
        assert_eq!(hits.iter().copied().sum::<u64>(), 7);
        assert_eq!((&hits).into_iter().count(), 3);
        assert_eq!(hits.into_vec(), vec![3, 1, 3]);
    }

    #[test]
    fn hits_serialize_as_array() {
        let hits = Hits::from(vec![1u64, 2]);
        assert_eq!(serde_json::to_string(&hits).unwrap(), "[1,2]");
    }
}
