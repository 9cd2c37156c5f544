//! `valuectx` Storage
//!
//! This crate provides the transactional, ordered key-value layer that the
//! graph store and numeric indexes are built on.
//!
//! # Modules
//!
//! - [`engine`] - Storage engine traits and abstractions
//! - [`backends`] - Concrete storage backend implementations

// Deny unwrap in library code to ensure proper error handling
#![deny(clippy::unwrap_used)]

pub mod backends;
pub mod engine;

pub use engine::{
    Cursor, CursorResult, KeyValue, StorageEngine, StorageError, StorageResult, Transaction,
};
