//! Core data types for `valuectx`.
//!
//! This module defines the graph elements that numeric values are attached to.

mod edge;
mod entity;
mod id;
mod value;

pub use edge::{Edge, EdgeType};
pub use entity::{Entity, Label};
pub use id::{EdgeId, EntityId};
pub use value::Value;
