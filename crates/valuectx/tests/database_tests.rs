//! Integration tests for opening databases.

use valuectx::{Database, DatabaseBuilder, EntityId, Error, IndexTarget, ValueContext};

#[test]
fn test_file_database_persists_values() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let path = dir.path().join("values.redb");

    let event = {
        let db = Database::open(&path).expect("failed to open database");
        let mut tx = db.begin().expect("failed to begin write");
        let event = tx.create_entity(|e| e.with_label("Event")).expect("failed to create node").id;
        tx.commit().expect("failed to commit");

        ValueContext::new(&db).post_numeric(event, "time", "timestamp", 25i64).expect("post failed");
        db.flush().expect("failed to flush");
        event
    };

    let db = Database::open(&path).expect("failed to reopen database");
    let ctx = ValueContext::new(&db);
    let hits = ctx.range::<EntityId, i64>("time", "timestamp", Some(8), Some(30)).expect("range failed");
    assert_eq!(hits.into_vec(), vec![event]);
    assert_eq!(ctx.indexes(IndexTarget::Node).expect("list failed"), vec!["time".to_owned()]);

    // Ids keep counting after a reopen.
    let mut tx = db.begin().expect("failed to begin write");
    let next = tx.create_entity(|e| e).expect("failed to create node").id;
    assert!(next > event);
}

#[test]
fn test_builder_options() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let path = dir.path().join("cached.redb");

    let db = DatabaseBuilder::new().path(&path).cache_size(4 * 1024 * 1024).open().expect("failed to open");
    assert_eq!(db.config().cache_size, Some(4 * 1024 * 1024));
    assert_eq!(db.config().path, path);
    assert!(!db.config().in_memory);

    let db = Database::builder().path(dir.path().join("other.redb")).open().expect("failed to open");
    assert!(db.config().cache_size.is_none());
}

#[test]
fn test_builder_without_path_is_rejected() {
    let err = DatabaseBuilder::new().open().unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}

#[test]
fn test_in_memory_databases_are_independent() {
    let first = Database::in_memory().expect("failed to open");
    let second = Database::in_memory().expect("failed to open");

    let mut tx = first.begin().expect("failed to begin write");
    let id = tx.create_entity(|e| e).expect("failed to create node").id;
    tx.commit().expect("failed to commit");

    let tx = second.begin_read().expect("failed to begin read");
    assert!(tx.get_entity(id).expect("lookup failed").is_none());
}
