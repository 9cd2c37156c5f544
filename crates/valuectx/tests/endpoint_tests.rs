//! Integration tests for the named endpoint surface.

use serde_json::json;
use valuectx::{invoke, Database, EdgeId, Element, Endpoint, EntityId, Error, NumericKind, Source};

fn create_test_db() -> Database {
    Database::in_memory().expect("failed to create in-memory database")
}

fn setup_graph(db: &Database) -> (EntityId, EntityId, EdgeId) {
    let mut tx = db.begin().expect("failed to begin write");
    let a = tx.create_entity(|e| e.with_label("Stop")).expect("failed to create node");
    let b = tx.create_entity(|e| e.with_label("Stop")).expect("failed to create node");
    let edge = tx.create_edge(a.id, b.id, "NEXT").expect("failed to create edge");
    tx.commit().expect("failed to commit");
    (a.id, b.id, edge.id)
}

// ============================================================================
// Endpoint Names
// ============================================================================

#[test]
fn test_all_endpoints_round_trip_names() {
    let endpoints = Endpoint::all();
    assert_eq!(endpoints.len(), 12);

    let names: Vec<String> = endpoints.iter().map(|e| e.name()).collect();
    assert_eq!(&names[..4], &["post_int", "post_long", "post_float", "post_double"]);
    assert!(names.contains(&"get_int_range_node".to_owned()));
    assert!(names.contains(&"get_double_range_relationship".to_owned()));

    for endpoint in endpoints {
        assert_eq!(endpoint.name().parse::<Endpoint>().expect("name should parse"), endpoint);
    }
}

#[test]
fn test_unknown_endpoint() {
    let db = create_test_db();
    let err = invoke(&db, Source::Graph, "get_short_range_node", json!({})).unwrap_err();
    assert!(matches!(err, Error::UnknownEndpoint(name) if name == "get_short_range_node"));
}

// ============================================================================
// Invocation
// ============================================================================

#[test]
fn test_post_then_range_for_every_kind() {
    let db = create_test_db();
    let (a, _, _) = setup_graph(&db);

    for kind in NumericKind::ALL {
        let post = Endpoint::Post(kind).name();
        let hits = invoke(&db, Source::Node(a), &post, json!({ "index": "time", "key": "timestamp", "value": 25 }))
            .expect("post failed");
        assert!(hits.is_empty());

        let range = Endpoint::RangeNode(kind).name();
        let hits = invoke(&db, Source::Graph, &range, json!({ "index": "time", "key": "timestamp", "min": 8, "max": 30 }))
            .expect("range failed");
        assert_eq!(hits, vec![Element::Node(a)], "{range}");

        let hits = invoke(&db, Source::Graph, &range, json!({ "index": "time", "key": "timestamp", "min": 26 }))
            .expect("range failed");
        assert!(hits.is_empty(), "{range}");
    }
}

#[test]
fn test_relationship_endpoints() {
    let db = create_test_db();
    let (_, _, edge) = setup_graph(&db);

    invoke(&db, Source::Relationship(edge), "post_double", json!({ "index": "travel", "key": "minutes", "value": 12.5 }))
        .expect("post failed");

    let hits = invoke(
        &db,
        Source::Graph,
        "get_double_range_relationship",
        json!({ "index": "travel", "key": "minutes", "min": null, "max": 15 }),
    )
    .expect("range failed");
    assert_eq!(hits, vec![Element::Relationship(edge)]);

    let nodes = invoke(&db, Source::Graph, "get_double_range_node", json!({ "index": "travel", "key": "minutes" }))
        .expect("range failed");
    assert!(nodes.is_empty());
}

#[test]
fn test_element_json_format() {
    let db = create_test_db();
    let (a, b, _) = setup_graph(&db);

    for (node, value) in [(b, 2), (a, 1)] {
        invoke(&db, Source::Node(node), "post_int", json!({ "index": "rank", "key": "position", "value": value }))
            .expect("post failed");
    }

    let hits = invoke(&db, Source::Graph, "get_int_range_node", json!({ "index": "rank", "key": "position" }))
        .expect("range failed");
    assert_eq!(
        serde_json::to_value(&hits).expect("serialize failed"),
        json!([{ "node": a.as_u64() }, { "node": b.as_u64() }])
    );
}

// ============================================================================
// Parameter Errors
// ============================================================================

#[test]
fn test_parameters_must_fit_the_endpoint_type() {
    let db = create_test_db();
    let (a, _, _) = setup_graph(&db);

    for value in [json!(1.5), json!(3_000_000_000i64), json!("25")] {
        let err = invoke(&db, Source::Node(a), "post_int", json!({ "index": "i", "key": "k", "value": value }))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidParameter(_)), "{value}");
    }

    let err = invoke(&db, Source::Node(a), "post_long", json!({ "index": "i", "value": 1 })).unwrap_err();
    assert!(matches!(err, Error::InvalidParameter(_)));

    let err =
        invoke(&db, Source::Graph, "get_long_range_node", json!({ "index": "i", "key": "k", "limit": 3 }))
            .unwrap_err();
    assert!(matches!(err, Error::InvalidParameter(_)));
}

#[test]
fn test_source_must_fit_the_endpoint() {
    let db = create_test_db();
    let (a, _, edge) = setup_graph(&db);
    let post = json!({ "index": "i", "key": "k", "value": 1 });
    let range = json!({ "index": "i", "key": "k" });

    let err = invoke(&db, Source::Graph, "post_long", post).unwrap_err();
    assert!(matches!(err, Error::InvalidParameter(_)));

    let err = invoke(&db, Source::Node(a), "get_long_range_node", range.clone()).unwrap_err();
    assert!(matches!(err, Error::InvalidParameter(_)));

    let err = invoke(&db, Source::Relationship(edge), "get_long_range_relationship", range).unwrap_err();
    assert!(matches!(err, Error::InvalidParameter(_)));
}

#[test]
fn test_store_errors_pass_through() {
    let db = create_test_db();
    let err = invoke(
        &db,
        Source::Node(EntityId::new(99)),
        "post_long",
        json!({ "index": "i", "key": "k", "value": 1 }),
    )
    .unwrap_err();
    assert!(err.is_transaction_error());
}
