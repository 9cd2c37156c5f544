//! Named numeric indexes.
//!
//! A named index records numbers against graph elements under string keys.
//! Nodes and relationships have separate index namespaces. Indexes are
//! registered on first write through [`IndexStore::for_nodes`] or
//! [`IndexStore::for_relationships`]; read paths use [`IndexStore::open`],
//! which never registers anything, and an index that was never written to
//! simply yields no results.
//!
//! Entries live in the [`TABLE_NUMERIC_INDEX`] table under keys laid out by
//! [`valuectx_core::index`], so a range scan visits them in ascending numeric
//! order. The same value recorded twice for the same element produces two
//! entries.

mod numeric;
mod query;
mod store;

pub use numeric::{NumericIndex, TABLE_NUMERIC_INDEX};
pub use query::{NumericRangeQuery, SortField};
pub use store::{IndexMeta, IndexStore, TABLE_INDEX_REGISTRY};
