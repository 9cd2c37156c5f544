//! Transaction management.
//!
//! [`TransactionManager`] hands out [`DatabaseTransaction`] handles. A handle
//! owns one storage transaction and exposes the node, relationship and
//! numeric index operations that run inside it.
//!
//! # Example
//!
//! ```
//! use valuectx::Database;
//! use valuectx_core::EntityId;
//! use valuectx_graph::NumericRangeQuery;
//!
//! let db = Database::in_memory().unwrap();
//!
//! let mut tx = db.begin().unwrap();
//! let event = tx.create_entity(|e| e.with_label("Event")).unwrap();
//! tx.add_numeric("time", event.id, "timestamp", 25i64).unwrap();
//! tx.commit().unwrap();
//!
//! let tx = db.begin_read().unwrap();
//! let query = NumericRangeQuery::new_range("timestamp", Some(8i64), Some(30));
//! assert_eq!(tx.query_numeric::<EntityId, _>("time", &query).unwrap(), vec![event.id]);
//! ```

mod handle;
mod manager;

pub use handle::DatabaseTransaction;
pub use manager::TransactionManager;
