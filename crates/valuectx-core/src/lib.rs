//! `valuectx` Core
//!
//! This crate provides the fundamental types shared by every layer of `valuectx`.
//!
//! # Overview
//!
//! - **Identifiers**: [`EntityId`] and [`EdgeId`] for referencing graph elements
//! - **Graph primitives**: [`Entity`] (nodes) and [`Edge`] (relationships)
//! - **Values**: [`Value`] for properties stored on entities and edges
//! - **Numeric types**: the [`Numeric`] bound over `i32`, `i64`, `f32` and `f64`,
//!   with an encoding whose byte order matches numeric order
//! - **Index keys**: [`index`] describes how named numeric indexes lay out their
//!   entries so that a range scan returns values in ascending order
//!
//! # Example
//!
//! ```
//! use valuectx_core::{Edge, EdgeId, Entity, EntityId, Numeric, NumericKind};
//!
//! let alice = Entity::new(EntityId::new(1)).with_label("Person").with_property("name", "Alice");
//! let bob = Entity::new(EntityId::new(2)).with_label("Person");
//! let knows = Edge::new(EdgeId::new(1), alice.id, bob.id, "KNOWS");
//!
//! assert_eq!(knows.source, alice.id);
//! assert_eq!(<i64 as Numeric>::KIND, NumericKind::Long);
//! ```
//!
//! # Modules
//!
//! - [`types`] - Core data types ([`Entity`], [`Edge`], [`Value`], IDs)
//! - [`numeric`] - The [`Numeric`] bound and [`NumericKind`] tags
//! - [`encoding`] - Record serialization and storage keys
//! - [`index`] - Numeric index entries and range scan bounds
//! - [`error`] - Error types ([`CoreError`])
//! - [`transaction`] - Transaction error types ([`TransactionError`])

// Deny unwrap in library code to ensure proper error handling
#![deny(clippy::unwrap_used)]

pub mod encoding;
pub mod error;
pub mod index;
pub mod numeric;
pub mod transaction;
pub mod types;

pub use error::CoreError;
pub use index::{IndexTarget, IndexedElement, NumericIndexEntry, NumericRangeScan};
pub use numeric::{Numeric, NumericKind, NumericValue};
pub use transaction::{TransactionError, TransactionResult};
pub use types::{Edge, EdgeId, EdgeType, Entity, EntityId, Label, Value};
