//! Transaction error types shared across the `valuectx` crates.
//!
//! The concrete `TransactionManager` and `DatabaseTransaction` live in the
//! `valuectx` crate; storage transactions live in `valuectx-storage`.
//!
//! ```text
//! TransactionManager      (valuectx)          owns the storage engine
//!        │
//!        ▼
//! DatabaseTransaction     (valuectx)          scoped guard, graph + index ops
//!        │
//!        ▼
//! Transaction             (valuectx-storage)  ordered key-value operations
//! ```
//!
//! A write transaction that is dropped without `commit()` is rolled back, so
//! a failed index write never leaves a partial entry behind.

mod error;

pub use error::{TransactionError, TransactionResult};
