//! Edge (relationship) storage operations.

use tracing::trace;
use valuectx_core::encoding::keys::encode_edge_key;
use valuectx_core::encoding::{Decoder, Encoder};
use valuectx_core::{Edge, EdgeId, EdgeType, EntityId};
use valuectx_storage::Transaction;

use super::error::{GraphError, GraphResult};
use super::metadata::{self, EDGE_COUNTER};
use super::NodeStore;

/// Table name for edge data.
pub const TABLE_EDGES: &str = "edges";

/// Edge storage operations.
pub struct EdgeStore;

impl EdgeStore {
    /// Create a new edge between two existing entities.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::InvalidEntityReference`] if either endpoint is
    /// missing.
    pub fn create<T, F>(
        tx: &mut T,
        source: EntityId,
        target: EntityId,
        edge_type: impl Into<EdgeType>,
        builder: F,
    ) -> GraphResult<Edge>
    where
        T: Transaction,
        F: FnOnce(Edge) -> Edge,
    {
        for endpoint in [source, target] {
            if !NodeStore::exists(tx, endpoint)? {
                return Err(GraphError::InvalidEntityReference(endpoint));
            }
        }

        let id = EdgeId::new(metadata::next(tx, EDGE_COUNTER)?);
        let mut edge = builder(Edge::new(id, source, target, edge_type));
        edge.id = id;
        edge.source = source;
        edge.target = target;

        tx.put(TABLE_EDGES, &encode_edge_key(id), &edge.encode()?)?;
        trace!(edge_id = %id, source_id = %source, target_id = %target, "created edge");

        Ok(edge)
    }

    /// Get an edge by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the edge cannot be decoded.
    pub fn get<T: Transaction>(tx: &T, id: EdgeId) -> GraphResult<Option<Edge>> {
        match tx.get(TABLE_EDGES, &encode_edge_key(id))? {
            Some(value) => Ok(Some(Edge::decode(&value)?)),
            None => Ok(None),
        }
    }

    /// Get an edge by ID, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::EdgeNotFound`] if the edge doesn't exist.
    pub fn get_or_error<T: Transaction>(tx: &T, id: EdgeId) -> GraphResult<Edge> {
        Self::get(tx, id)?.ok_or(GraphError::EdgeNotFound(id))
    }

    /// Check if an edge exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup fails.
    pub fn exists<T: Transaction>(tx: &T, id: EdgeId) -> GraphResult<bool> {
        Ok(tx.get(TABLE_EDGES, &encode_edge_key(id))?.is_some())
    }

    /// Delete an edge, returning `true` if it existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete<T: Transaction>(tx: &mut T, id: EdgeId) -> GraphResult<bool> {
        let deleted = tx.delete(TABLE_EDGES, &encode_edge_key(id))?;
        if deleted {
            trace!(edge_id = %id, "deleted edge");
        }
        Ok(deleted)
    }
}
