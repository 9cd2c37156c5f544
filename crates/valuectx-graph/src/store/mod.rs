//! Node and edge storage.
//!
//! [`NodeStore`] and [`EdgeStore`] are stateless; every operation runs inside
//! the transaction it is given. Ids come from counters kept in the metadata
//! table of that same transaction, so an aborted create never consumes an id
//! that a later commit could observe.

mod edge;
mod error;
pub(crate) mod metadata;
mod node;

use valuectx_core::{EdgeId, EntityId, IndexedElement};
use valuectx_storage::Transaction;

pub use edge::{EdgeStore, TABLE_EDGES};
pub use error::{GraphError, GraphResult};
pub use metadata::TABLE_METADATA;
pub use node::{NodeStore, TABLE_ENTITIES};

/// A graph element that can be the subject of a named index entry.
pub trait GraphElement: IndexedElement {
    /// Check whether the element exists in the store.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup fails.
    fn exists<T: Transaction>(self, tx: &T) -> GraphResult<bool>;

    /// The error reported when the element does not exist.
    fn not_found(self) -> GraphError;
}

impl GraphElement for EntityId {
    fn exists<T: Transaction>(self, tx: &T) -> GraphResult<bool> {
        NodeStore::exists(tx, self)
    }

    fn not_found(self) -> GraphError {
        GraphError::EntityNotFound(self)
    }
}

impl GraphElement for EdgeId {
    fn exists<T: Transaction>(self, tx: &T) -> GraphResult<bool> {
        EdgeStore::exists(tx, self)
    }

    fn not_found(self) -> GraphError {
        GraphError::EdgeNotFound(self)
    }
}
