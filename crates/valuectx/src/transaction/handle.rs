//! Database transaction handle.

use valuectx_core::{
    Edge, EdgeId, EdgeType, Entity, EntityId, IndexTarget, Numeric, NumericValue, TransactionError,
};
use valuectx_graph::index::IndexMeta;
use valuectx_graph::{
    EdgeStore, GraphElement, GraphError, IndexStore, NodeStore, NumericRangeQuery,
};
use valuectx_storage::Transaction;

use super::manager::storage_error_to_tx_error;

/// A transaction over the graph store and its numeric indexes.
///
/// The handle owns the storage transaction. [`commit`](Self::commit) and
/// [`rollback`](Self::rollback) consume it; a handle dropped while still
/// open rolls back, so no exit path leaves a transaction dangling.
pub struct DatabaseTransaction<T: Transaction> {
    tx_id: u64,
    /// `None` once committed or rolled back.
    storage: Option<T>,
    read_only: bool,
}

impl<T: Transaction> DatabaseTransaction<T> {
    pub(crate) const fn new_read(tx_id: u64, storage: T) -> Self {
        Self { tx_id, storage: Some(storage), read_only: true }
    }

    pub(crate) const fn new_write(tx_id: u64, storage: T) -> Self {
        Self { tx_id, storage: Some(storage), read_only: false }
    }

    /// The transaction id.
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.tx_id
    }

    /// Whether this is a read-only transaction.
    #[must_use]
    pub const fn is_read_only(&self) -> bool {
        self.read_only
    }

    fn storage(&self) -> Result<&T, TransactionError> {
        self.storage.as_ref().ok_or(TransactionError::AlreadyCompleted)
    }

    /// The underlying storage transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction has already been committed or rolled back.
    pub fn storage_ref(&self) -> Result<&T, TransactionError> {
        self.storage()
    }

    /// The underlying storage transaction, for writing.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The transaction is read-only
    /// - The transaction has already been committed or rolled back
    pub fn storage_mut(&mut self) -> Result<&mut T, TransactionError> {
        if self.read_only {
            return Err(TransactionError::ReadOnly);
        }
        self.storage.as_mut().ok_or(TransactionError::AlreadyCompleted)
    }

    // ========================================================================
    // Graph Operations
    // ========================================================================

    /// Create a node. `build` fills in labels and properties.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction is read-only or the write fails.
    pub fn create_entity<F>(&mut self, build: F) -> Result<Entity, TransactionError>
    where
        F: FnOnce(Entity) -> Entity,
    {
        let storage = self.storage_mut()?;
        NodeStore::create(storage, |id| build(Entity::new(id))).map_err(graph_error_to_tx_error)
    }

    /// Get a node by id. Returns `Ok(None)` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup fails.
    pub fn get_entity(&self, id: EntityId) -> Result<Option<Entity>, TransactionError> {
        NodeStore::get(self.storage()?, id).map_err(graph_error_to_tx_error)
    }

    /// Create a relationship between two existing nodes.
    ///
    /// # Errors
    ///
    /// Returns [`TransactionError::EntityNotFound`] if either node is missing.
    pub fn create_edge(
        &mut self,
        source: EntityId,
        target: EntityId,
        edge_type: impl Into<EdgeType>,
    ) -> Result<Edge, TransactionError> {
        let storage = self.storage_mut()?;
        EdgeStore::create(storage, source, target, edge_type, |edge| edge)
            .map_err(graph_error_to_tx_error)
    }

    /// Get a relationship by id. Returns `Ok(None)` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup fails.
    pub fn get_edge(&self, id: EdgeId) -> Result<Option<Edge>, TransactionError> {
        EdgeStore::get(self.storage()?, id).map_err(graph_error_to_tx_error)
    }

    // ========================================================================
    // Numeric Index Operations
    // ========================================================================

    /// Record `value` for `element` under `key` in the named index,
    /// registering the index on first use.
    ///
    /// # Errors
    ///
    /// Returns [`TransactionError::EntityNotFound`] or
    /// [`TransactionError::EdgeNotFound`] if the element does not exist.
    pub fn add_numeric<E: GraphElement, N: Numeric>(
        &mut self,
        index: &str,
        element: E,
        key: &str,
        value: N,
    ) -> Result<(), TransactionError> {
        let storage = self.storage_mut()?;
        IndexStore::open::<E>(index)
            .add(storage, element, key, value)
            .map_err(graph_error_to_tx_error)
    }

    /// Elements matching a range query on the named index.
    ///
    /// An index that was never written to yields no results.
    ///
    /// # Errors
    ///
    /// Returns an error if the scan fails.
    pub fn query_numeric<E: GraphElement, N: Numeric>(
        &self,
        index: &str,
        query: &NumericRangeQuery<N>,
    ) -> Result<Vec<E>, TransactionError> {
        IndexStore::open::<E>(index).query(self.storage()?, query).map_err(graph_error_to_tx_error)
    }

    /// Number of entries recorded under `key` in the named index.
    ///
    /// # Errors
    ///
    /// Returns an error if the scan fails.
    pub fn count_numeric<E: GraphElement>(&self, index: &str, key: &str) -> Result<usize, TransactionError> {
        IndexStore::open::<E>(index).count(self.storage()?, key).map_err(graph_error_to_tx_error)
    }

    /// Every value recorded under `key` in the named index, with its element.
    ///
    /// # Errors
    ///
    /// Returns an error if the scan fails.
    pub fn numeric_entries<E: GraphElement>(
        &self,
        index: &str,
        key: &str,
    ) -> Result<Vec<(E, NumericValue)>, TransactionError> {
        IndexStore::open::<E>(index).entries(self.storage()?, key).map_err(graph_error_to_tx_error)
    }

    /// Drop a named index with all its entries. Returns the number of
    /// entries removed.
    ///
    /// # Errors
    ///
    /// Returns [`TransactionError::IndexNotFound`] if the index is not registered.
    pub fn delete_index<E: GraphElement>(&mut self, index: &str) -> Result<usize, TransactionError> {
        let storage = self.storage_mut()?;
        IndexStore::delete::<E, T>(storage, index).map_err(graph_error_to_tx_error)
    }

    /// Registered indexes of one target, ordered by name length then name.
    ///
    /// # Errors
    ///
    /// Returns an error if the registry cannot be read.
    pub fn list_indexes(&self, target: IndexTarget) -> Result<Vec<IndexMeta>, TransactionError> {
        IndexStore::list(self.storage()?, target).map_err(graph_error_to_tx_error)
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Commit the transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the commit fails.
    pub fn commit(mut self) -> Result<(), TransactionError> {
        let storage = self.storage.take().ok_or(TransactionError::AlreadyCompleted)?;

        storage.commit().map_err(|e| storage_error_to_tx_error(&e))
    }

    /// Roll back the transaction, discarding its writes.
    ///
    /// # Errors
    ///
    /// Returns an error if the rollback fails.
    pub fn rollback(mut self) -> Result<(), TransactionError> {
        let storage = self.storage.take().ok_or(TransactionError::AlreadyCompleted)?;

        storage.rollback().map_err(|e| storage_error_to_tx_error(&e))
    }
}

impl<T: Transaction> Drop for DatabaseTransaction<T> {
    fn drop(&mut self) {
        // Errors cannot be reported from drop.
        if let Some(storage) = self.storage.take() {
            let _ = storage.rollback();
        }
    }
}

/// Convert a graph store error to a transaction error.
fn graph_error_to_tx_error(err: GraphError) -> TransactionError {
    match err {
        GraphError::EntityNotFound(id) | GraphError::InvalidEntityReference(id) => {
            TransactionError::EntityNotFound(id.to_string())
        }
        GraphError::EdgeNotFound(id) => TransactionError::EdgeNotFound(id.to_string()),
        GraphError::IndexNotFound { target, name } => {
            TransactionError::IndexNotFound(format!("{target} index {name}"))
        }
        GraphError::Validation(msg) => TransactionError::Validation(msg),
        GraphError::Encoding(msg) => TransactionError::Serialization(msg),
        GraphError::DataCorruption(msg) => TransactionError::Internal(msg),
        GraphError::Storage(e) => storage_error_to_tx_error(&e),
    }
}
