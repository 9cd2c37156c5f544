//! Redb storage backend.
//!
//! Redb is a pure-Rust embedded database with ACID transactions. It supports
//! a file-backed and an in-memory mode; both are exposed through
//! [`RedbEngine`].

mod engine;
mod tables;
mod transaction;

pub use engine::{RedbConfig, RedbEngine};
pub use transaction::{RedbCursor, RedbTransaction};
