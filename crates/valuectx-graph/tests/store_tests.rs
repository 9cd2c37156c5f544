//! Integration tests for NodeStore and EdgeStore.

use valuectx_core::{EdgeId, Entity, EntityId, Value};
use valuectx_graph::store::{EdgeStore, GraphError, NodeStore};
use valuectx_storage::backends::RedbEngine;
use valuectx_storage::{StorageEngine, Transaction};

fn create_test_engine() -> RedbEngine {
    RedbEngine::in_memory().expect("Failed to create in-memory engine")
}

#[test]
fn create_and_get_entity() {
    let engine = create_test_engine();

    let mut tx = engine.begin_write().unwrap();
    let entity = NodeStore::create(&mut tx, |id| {
        Entity::new(id).with_label("Event").with_property("name", "launch")
    })
    .unwrap();
    tx.commit().unwrap();

    let tx = engine.begin_read().unwrap();
    let retrieved = NodeStore::get(&tx, entity.id).unwrap().unwrap();
    assert_eq!(retrieved.id, entity.id);
    assert!(retrieved.has_label("Event"));
    assert_eq!(retrieved.get_property("name"), Some(&Value::String("launch".to_owned())));
}

#[test]
fn ids_are_sequential_and_start_at_one() {
    let engine = create_test_engine();

    let mut tx = engine.begin_write().unwrap();
    let a = NodeStore::create(&mut tx, Entity::new).unwrap();
    let b = NodeStore::create(&mut tx, Entity::new).unwrap();
    tx.commit().unwrap();

    assert_eq!(a.id, EntityId::new(1));
    assert_eq!(b.id, EntityId::new(2));
}

#[test]
fn builder_cannot_override_id() {
    let engine = create_test_engine();

    let mut tx = engine.begin_write().unwrap();
    let entity = NodeStore::create(&mut tx, |_| Entity::new(EntityId::new(999))).unwrap();
    assert_eq!(entity.id, EntityId::new(1));
    assert!(NodeStore::exists(&tx, EntityId::new(1)).unwrap());
    assert!(!NodeStore::exists(&tx, EntityId::new(999)).unwrap());
}

#[test]
fn rolled_back_create_does_not_consume_id() {
    let engine = create_test_engine();

    {
        let mut tx = engine.begin_write().unwrap();
        NodeStore::create(&mut tx, Entity::new).unwrap();
        tx.rollback().unwrap();
    }

    let mut tx = engine.begin_write().unwrap();
    let entity = NodeStore::create(&mut tx, Entity::new).unwrap();
    assert_eq!(entity.id, EntityId::new(1));
}

#[test]
fn get_or_error_on_missing_entity() {
    let engine = create_test_engine();

    let tx = engine.begin_read().unwrap();
    assert!(NodeStore::get(&tx, EntityId::new(5)).unwrap().is_none());
    let result = NodeStore::get_or_error(&tx, EntityId::new(5));
    assert!(matches!(result, Err(GraphError::EntityNotFound(id)) if id == EntityId::new(5)));
}

#[test]
fn delete_entity() {
    let engine = create_test_engine();

    let mut tx = engine.begin_write().unwrap();
    let entity = NodeStore::create(&mut tx, Entity::new).unwrap();
    assert!(NodeStore::delete(&mut tx, entity.id).unwrap());
    assert!(!NodeStore::delete(&mut tx, entity.id).unwrap());
    assert!(!NodeStore::exists(&tx, entity.id).unwrap());
}

#[test]
fn create_and_get_edge() {
    let engine = create_test_engine();

    let mut tx = engine.begin_write().unwrap();
    let a = NodeStore::create(&mut tx, Entity::new).unwrap();
    let b = NodeStore::create(&mut tx, Entity::new).unwrap();
    let edge =
        EdgeStore::create(&mut tx, a.id, b.id, "FOLLOWS", |e| e.with_property("since", 2019i64))
            .unwrap();
    tx.commit().unwrap();

    let tx = engine.begin_read().unwrap();
    let retrieved = EdgeStore::get_or_error(&tx, edge.id).unwrap();
    assert_eq!(retrieved.source, a.id);
    assert_eq!(retrieved.target, b.id);
    assert_eq!(retrieved.edge_type.as_str(), "FOLLOWS");
    assert_eq!(retrieved.get_property("since"), Some(&Value::Int(2019)));
}

#[test]
fn edge_requires_existing_endpoints() {
    let engine = create_test_engine();

    let mut tx = engine.begin_write().unwrap();
    let a = NodeStore::create(&mut tx, Entity::new).unwrap();
    let missing = EntityId::new(77);

    let result = EdgeStore::create(&mut tx, a.id, missing, "KNOWS", |e| e);
    assert!(matches!(result, Err(GraphError::InvalidEntityReference(id)) if id == missing));

    let result = EdgeStore::create(&mut tx, missing, a.id, "KNOWS", |e| e);
    assert!(matches!(result, Err(GraphError::InvalidEntityReference(id)) if id == missing));
}

#[test]
fn delete_edge() {
    let engine = create_test_engine();

    let mut tx = engine.begin_write().unwrap();
    let a = NodeStore::create(&mut tx, Entity::new).unwrap();
    let edge = EdgeStore::create(&mut tx, a.id, a.id, "SELF", |e| e).unwrap();
    assert!(EdgeStore::exists(&tx, edge.id).unwrap());
    assert!(EdgeStore::delete(&mut tx, edge.id).unwrap());
    assert!(matches!(
        EdgeStore::get_or_error(&tx, edge.id),
        Err(GraphError::EdgeNotFound(id)) if id == edge.id
    ));
    assert!(!EdgeStore::exists(&tx, EdgeId::new(100)).unwrap());
}
