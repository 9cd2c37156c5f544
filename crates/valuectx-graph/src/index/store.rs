//! Registry of named numeric indexes.

use std::ops::Bound;

use serde::{Deserialize, Serialize};
use tracing::debug;
use valuectx_core::encoding::keys::increment_prefix;
use valuectx_core::index::encode_index_prefix;
use valuectx_core::{EdgeId, EntityId, IndexTarget};
use valuectx_storage::{Cursor, Transaction};

use super::numeric::{NumericIndex, TABLE_NUMERIC_INDEX};
use crate::store::{GraphElement, GraphError, GraphResult};

/// Table name for index registrations.
pub const TABLE_INDEX_REGISTRY: &str = "index_registry";

/// A registered named index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexMeta {
    /// The index name.
    pub name: String,
    /// Node or relationship namespace.
    pub target: IndexTarget,
}

fn encode_meta(meta: &IndexMeta) -> GraphResult<Vec<u8>> {
    bincode::serde::encode_to_vec(meta, bincode::config::standard())
        .map_err(|e| GraphError::Encoding(e.to_string()))
}

fn decode_meta(bytes: &[u8]) -> GraphResult<IndexMeta> {
    let (meta, _) = bincode::serde::decode_from_slice(bytes, bincode::config::standard())
        .map_err(|e| GraphError::DataCorruption(format!("index registration: {e}")))?;
    Ok(meta)
}

/// Index management operations.
///
/// Like the graph stores this is stateless; all state lives in the
/// transaction passed to each call.
pub struct IndexStore;

impl IndexStore {
    /// Resolve a node index for writing, registering it if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the registration cannot be written.
    pub fn for_nodes<T: Transaction>(tx: &mut T, name: &str) -> GraphResult<NumericIndex<EntityId>> {
        Self::create(tx, name)
    }

    /// Resolve a relationship index for writing, registering it if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the registration cannot be written.
    pub fn for_relationships<T: Transaction>(
        tx: &mut T,
        name: &str,
    ) -> GraphResult<NumericIndex<EdgeId>> {
        Self::create(tx, name)
    }

    /// Resolve an index handle without touching storage.
    ///
    /// Queries through a handle for an index that was never written to
    /// return no results.
    #[must_use]
    pub fn open<E: GraphElement>(name: &str) -> NumericIndex<E> {
        NumericIndex::new(name)
    }

    /// Register an index. Registering an existing index is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::Validation`] if the name is too long, or a
    /// storage error if the registration cannot be written.
    pub fn create<E: GraphElement, T: Transaction>(
        tx: &mut T,
        name: &str,
    ) -> GraphResult<NumericIndex<E>> {
        let key = encode_index_prefix(E::TARGET, name)?;
        if tx.get(TABLE_INDEX_REGISTRY, &key)?.is_none() {
            let meta = IndexMeta { name: name.to_owned(), target: E::TARGET };
            tx.put(TABLE_INDEX_REGISTRY, &key, &encode_meta(&meta)?)?;
            debug!(index_name = %name, index_target = %E::TARGET, "registered numeric index");
        }
        Ok(NumericIndex::new(name))
    }

    /// Check whether an index is registered.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup fails.
    pub fn exists<E: GraphElement, T: Transaction>(tx: &T, name: &str) -> GraphResult<bool> {
        let key = encode_index_prefix(E::TARGET, name)?;
        Ok(tx.get(TABLE_INDEX_REGISTRY, &key)?.is_some())
    }

    /// List registered indexes of one target, ordered by name length then name.
    ///
    /// # Errors
    ///
    /// Returns an error if the registry cannot be read.
    pub fn list<T: Transaction>(tx: &T, target: IndexTarget) -> GraphResult<Vec<IndexMeta>> {
        let start = [target.tag()];
        let end = increment_prefix(&start);
        let mut cursor =
            tx.range(TABLE_INDEX_REGISTRY, Bound::Included(&start[..]), Bound::Excluded(&end[..]))?;

        let mut indexes = Vec::new();
        while let Some((_, value)) = cursor.next()? {
            indexes.push(decode_meta(&value)?);
        }
        Ok(indexes)
    }

    /// Drop an index and every entry recorded in it.
    ///
    /// Returns the number of entries removed.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::IndexNotFound`] if the index is not registered.
    pub fn delete<E: GraphElement, T: Transaction>(tx: &mut T, name: &str) -> GraphResult<usize> {
        let prefix = encode_index_prefix(E::TARGET, name)?;
        if !tx.delete(TABLE_INDEX_REGISTRY, &prefix)? {
            return Err(GraphError::IndexNotFound { target: E::TARGET, name: name.to_owned() });
        }

        let end = increment_prefix(&prefix);
        let keys = {
            let mut cursor = tx.range(
                TABLE_NUMERIC_INDEX,
                Bound::Included(prefix.as_slice()),
                Bound::Excluded(end.as_slice()),
            )?;
            let mut keys = Vec::new();
            while let Some((key, _)) = cursor.next()? {
                keys.push(key);
            }
            keys
        };

        for key in &keys {
            tx.delete(TABLE_NUMERIC_INDEX, key)?;
        }

        debug!(index_name = %name, index_target = %E::TARGET, entries = keys.len(), "deleted numeric index");
        Ok(keys.len())
    }
}
