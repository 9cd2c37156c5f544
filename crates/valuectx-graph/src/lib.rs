//! `valuectx` Graph
//!
//! Graph storage and named numeric indexes on top of `valuectx-storage`.
//!
//! # Modules
//!
//! - [`store`] - Node and edge storage with persistent id counters
//! - [`index`] - Named numeric indexes over nodes and relationships
//!
//! Every operation takes the storage transaction explicitly, so several
//! operations compose into one atomic unit:
//!
//! ```
//! use valuectx_core::{Entity, EntityId};
//! use valuectx_graph::index::{IndexStore, NumericRangeQuery};
//! use valuectx_graph::store::NodeStore;
//! use valuectx_storage::backends::RedbEngine;
//! use valuectx_storage::{StorageEngine, Transaction};
//!
//! let engine = RedbEngine::in_memory().unwrap();
//! let mut tx = engine.begin_write().unwrap();
//! let event = NodeStore::create(&mut tx, Entity::new).unwrap();
//! let index = IndexStore::for_nodes(&mut tx, "time").unwrap();
//! index.add(&mut tx, event.id, "timestamp", 25i64).unwrap();
//! tx.commit().unwrap();
//!
//! let tx = engine.begin_read().unwrap();
//! let index = IndexStore::open::<EntityId>("time");
//! let hits = index.query(&tx, &NumericRangeQuery::new_range("timestamp", Some(8i64), Some(30))).unwrap();
//! assert_eq!(hits, vec![event.id]);
//! ```

// Deny unwrap in library code to ensure proper error handling
#![deny(clippy::unwrap_used)]

pub mod index;
pub mod store;

pub use index::{IndexStore, NumericIndex, NumericRangeQuery, SortField};
pub use store::{EdgeStore, GraphElement, GraphError, GraphResult, NodeStore};
