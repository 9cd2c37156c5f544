//! `valuectx` - Numeric range indexes over a graph
//!
//! `valuectx` attaches numeric values to nodes and relationships in named
//! indexes and answers inclusive range queries over them, ordered by value.
//!
//! # Quick Start
//!
//! ```
//! use valuectx::{Database, ValueContext};
//! use valuectx_core::EdgeId;
//!
//! let db = Database::in_memory().unwrap();
//!
//! let mut tx = db.begin().unwrap();
//! let a = tx.create_entity(|e| e.with_label("Stop")).unwrap();
//! let b = tx.create_entity(|e| e.with_label("Stop")).unwrap();
//! let leg = tx.create_edge(a.id, b.id, "NEXT").unwrap();
//! tx.commit().unwrap();
//!
//! let ctx = ValueContext::new(&db);
//! ctx.post_numeric(leg.id, "travel", "minutes", 12.5f64).unwrap();
//!
//! let hits = ctx.range::<EdgeId, f64>("travel", "minutes", None, Some(15.0)).unwrap();
//! assert_eq!(hits.into_vec(), vec![leg.id]);
//! ```
//!
//! # Modules
//!
//! - [`config`] - Database configuration and builder
//! - [`database`] - Main database interface
//! - [`endpoint`] - Named endpoints with JSON parameters
//! - [`error`] - Error types
//! - [`transaction`] - Transaction management
//! - [`value_context`] - The numeric write and range query operations

// Deny unwrap in library code to ensure proper error handling
#![deny(clippy::unwrap_used)]

// Re-export core types
pub use valuectx_core::{
    Edge, EdgeId, EdgeType, Entity, EntityId, IndexTarget, Label, Numeric, NumericKind,
    NumericValue, TransactionError, TransactionResult, Value,
};

pub mod config;
pub mod database;
pub mod endpoint;
pub mod error;
pub mod transaction;
pub mod value_context;

pub use config::{Config, DatabaseBuilder};
pub use database::{Database, DbTransaction};
pub use endpoint::{invoke, Element, Endpoint, Source};
pub use error::{Error, Result};
pub use transaction::{DatabaseTransaction, TransactionManager};
pub use value_context::{Hits, ValueContext};
