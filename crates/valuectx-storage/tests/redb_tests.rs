//! Tests for the Redb storage backend.

use std::ops::Bound;

use valuectx_storage::backends::{RedbConfig, RedbEngine};
use valuectx_storage::{Cursor, StorageEngine, StorageError, Transaction};

fn collect_keys<C: Cursor>(mut cursor: C) -> Vec<Vec<u8>> {
    let mut keys = Vec::new();
    while let Some((k, _)) = cursor.next().expect("cursor next") {
        keys.push(k);
    }
    keys
}

#[test]
fn test_multiple_tables() {
    let engine = RedbEngine::in_memory().expect("failed to create engine");

    {
        let mut tx = engine.begin_write().expect("failed to begin write");
        tx.put("nodes", b"n:1", b"Alice").expect("failed to put");
        tx.put("edges", b"e:1", b"KNOWS").expect("failed to put");
        tx.put("nodes", b"n:2", b"Bob").expect("failed to put");
        tx.commit().expect("failed to commit");
    }

    let tx = engine.begin_read().expect("failed to begin read");
    assert_eq!(tx.get("nodes", b"n:1").expect("get"), Some(b"Alice".to_vec()));
    assert_eq!(tx.get("edges", b"e:1").expect("get"), Some(b"KNOWS".to_vec()));
    assert_eq!(tx.get("edges", b"n:1").expect("get"), None);

    let nodes = collect_keys(tx.range("nodes", Bound::Unbounded, Bound::Unbounded).expect("range"));
    assert_eq!(nodes, vec![b"n:1".to_vec(), b"n:2".to_vec()]);
}

#[test]
fn test_read_from_empty_database() {
    let engine = RedbEngine::in_memory().expect("failed to create engine");
    let tx = engine.begin_read().expect("failed to begin read");
    assert_eq!(tx.get("nodes", b"missing").expect("get"), None);
    let keys = collect_keys(tx.range("nodes", Bound::Unbounded, Bound::Unbounded).expect("range"));
    assert!(keys.is_empty());
}

#[test]
fn test_read_only_rejects_writes() {
    let engine = RedbEngine::in_memory().expect("failed to create engine");
    let mut tx = engine.begin_read().expect("failed to begin read");
    assert!(matches!(tx.put("t", b"k", b"v"), Err(StorageError::ReadOnly)));
    assert!(matches!(tx.delete("t", b"k"), Err(StorageError::ReadOnly)));
}

#[test]
fn test_rollback_discards_changes() {
    let engine = RedbEngine::in_memory().expect("failed to create engine");

    let mut tx = engine.begin_write().expect("begin write");
    tx.put("t", b"k", b"v").expect("put");
    tx.rollback().expect("rollback");

    {
        let mut tx = engine.begin_write().expect("begin write");
        tx.put("t", b"dropped", b"v").expect("put");
        // dropped without commit
    }

    let tx = engine.begin_read().expect("begin read");
    assert_eq!(tx.get("t", b"k").expect("get"), None);
    assert_eq!(tx.get("t", b"dropped").expect("get"), None);
}

#[test]
fn test_delete() {
    let engine = RedbEngine::in_memory().expect("failed to create engine");
    let mut tx = engine.begin_write().expect("begin write");
    tx.put("t", b"k", b"v").expect("put");
    assert!(tx.delete("t", b"k").expect("delete"));
    assert!(!tx.delete("t", b"k").expect("delete"));
    assert_eq!(tx.get("t", b"k").expect("get"), None);
    tx.commit().expect("commit");
}

#[test]
fn test_range_bounds() {
    let engine = RedbEngine::in_memory().expect("failed to create engine");
    let mut tx = engine.begin_write().expect("begin write");
    for i in 0u8..10 {
        tx.put("t", &[i], &[i]).expect("put");
    }
    tx.put("u", &[5], b"other").expect("put");
    tx.commit().expect("commit");

    let tx = engine.begin_read().expect("begin read");

    let keys = collect_keys(
        tx.range("t", Bound::Included(&[3u8][..]), Bound::Excluded(&[6u8][..])).expect("range"),
    );
    assert_eq!(keys, vec![vec![3], vec![4], vec![5]]);

    let keys = collect_keys(
        tx.range("t", Bound::Excluded(&[3u8][..]), Bound::Included(&[6u8][..])).expect("range"),
    );
    assert_eq!(keys, vec![vec![4], vec![5], vec![6]]);

    let inverted = collect_keys(
        tx.range("t", Bound::Included(&[8u8][..]), Bound::Excluded(&[2u8][..])).expect("range"),
    );
    assert!(inverted.is_empty());
}

#[test]
fn test_range_spans_batches() {
    let engine = RedbEngine::in_memory().expect("failed to create engine");
    let mut tx = engine.begin_write().expect("begin write");
    for i in 0u32..2500 {
        tx.put("big", &i.to_be_bytes(), b"").expect("put");
    }
    tx.commit().expect("commit");

    let tx = engine.begin_read().expect("begin read");
    let keys = collect_keys(tx.range("big", Bound::Unbounded, Bound::Unbounded).expect("range"));
    assert_eq!(keys.len(), 2500);
    assert!(keys.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_cursor_seek_and_current() {
    let engine = RedbEngine::in_memory().expect("failed to create engine");
    let mut tx = engine.begin_write().expect("begin write");
    for i in [1u8, 3, 5, 7] {
        tx.put("t", &[i], &[i * 10]).expect("put");
    }

    // Uncommitted writes are visible inside the same transaction.
    let mut cursor = tx.range("t", Bound::Unbounded, Bound::Excluded(&[7u8][..])).expect("range");
    assert!(cursor.current().is_none());
    let found = cursor.seek(&[4]).expect("seek");
    assert_eq!(found, Some((vec![5], vec![50])));
    assert_eq!(cursor.current(), Some((&[5u8][..], &[50u8][..])));
    assert_eq!(cursor.next().expect("next"), None);
    assert_eq!(cursor.next().expect("next"), None);
}

#[test]
fn test_file_backed_persistence() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("store.redb");

    {
        let engine = RedbEngine::open_with_config(&path, RedbConfig::new().cache_size(1 << 20))
            .expect("open");
        let mut tx = engine.begin_write().expect("begin write");
        tx.put("t", b"k", b"v").expect("put");
        tx.commit().expect("commit");
        engine.flush().expect("flush");
    }

    let engine = RedbEngine::open(&path).expect("reopen");
    let tx = engine.begin_read().expect("begin read");
    assert_eq!(tx.get("t", b"k").expect("get"), Some(b"v".to_vec()));
}
