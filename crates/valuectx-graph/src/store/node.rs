//! Node (entity) storage operations.

use tracing::trace;
use valuectx_core::encoding::keys::encode_entity_key;
use valuectx_core::encoding::{Decoder, Encoder};
use valuectx_core::{Entity, EntityId};
use valuectx_storage::Transaction;

use super::error::{GraphError, GraphResult};
use super::metadata::{self, ENTITY_COUNTER};

/// Table name for entity data.
pub const TABLE_ENTITIES: &str = "entities";

/// Node storage operations.
///
/// # Example
///
/// ```
/// use valuectx_core::Entity;
/// use valuectx_graph::store::NodeStore;
/// use valuectx_storage::backends::RedbEngine;
/// use valuectx_storage::StorageEngine;
///
/// let engine = RedbEngine::in_memory().unwrap();
/// let mut tx = engine.begin_write().unwrap();
///
/// let entity = NodeStore::create(&mut tx, |id| Entity::new(id).with_label("Event")).unwrap();
/// let retrieved = NodeStore::get(&tx, entity.id).unwrap();
/// assert_eq!(retrieved, Some(entity));
/// ```
pub struct NodeStore;

impl NodeStore {
    /// Create a new entity in the store.
    ///
    /// The builder receives the newly allocated id and returns the entity to
    /// store; the id it returns is overwritten with the allocated one.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity cannot be stored.
    pub fn create<T, F>(tx: &mut T, builder: F) -> GraphResult<Entity>
    where
        T: Transaction,
        F: FnOnce(EntityId) -> Entity,
    {
        let id = EntityId::new(metadata::next(tx, ENTITY_COUNTER)?);
        let mut entity = builder(id);
        entity.id = id;

        tx.put(TABLE_ENTITIES, &encode_entity_key(id), &entity.encode()?)?;
        trace!(entity_id = %id, "created entity");

        Ok(entity)
    }

    /// Get an entity by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity cannot be decoded.
    pub fn get<T: Transaction>(tx: &T, id: EntityId) -> GraphResult<Option<Entity>> {
        match tx.get(TABLE_ENTITIES, &encode_entity_key(id))? {
            Some(value) => Ok(Some(Entity::decode(&value)?)),
            None => Ok(None),
        }
    }

    /// Get an entity by ID, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::EntityNotFound`] if the entity doesn't exist.
    pub fn get_or_error<T: Transaction>(tx: &T, id: EntityId) -> GraphResult<Entity> {
        Self::get(tx, id)?.ok_or(GraphError::EntityNotFound(id))
    }

    /// Check if an entity exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup fails.
    pub fn exists<T: Transaction>(tx: &T, id: EntityId) -> GraphResult<bool> {
        Ok(tx.get(TABLE_ENTITIES, &encode_entity_key(id))?.is_some())
    }

    /// Delete an entity, returning `true` if it existed.
    ///
    /// Numeric index entries that reference the entity are left in place;
    /// remove them with [`NumericIndex::remove`](crate::index::NumericIndex::remove).
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete<T: Transaction>(tx: &mut T, id: EntityId) -> GraphResult<bool> {
        let deleted = tx.delete(TABLE_ENTITIES, &encode_entity_key(id))?;
        if deleted {
            trace!(entity_id = %id, "deleted entity");
        }
        Ok(deleted)
    }
}
