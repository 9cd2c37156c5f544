//! Edge (relationship) types for the graph.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{EdgeId, EntityId, Value};

/// The type of an edge, such as `KNOWS` or `FOLLOWS`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EdgeType(String);

impl EdgeType {
    /// Create a new edge type.
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the edge type name as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EdgeType {
    #[inline]
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for EdgeType {
    #[inline]
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// A directed edge (relationship) between two entities.
///
/// # Example
///
/// ```
/// use valuectx_core::types::{Edge, EdgeId, EntityId};
///
/// let edge = Edge::new(EdgeId::new(1), EntityId::new(10), EntityId::new(20), "FOLLOWS")
///     .with_property("since", 2019i64);
///
/// assert_eq!(edge.edge_type.as_str(), "FOLLOWS");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// The unique identifier for this edge.
    pub id: EdgeId,
    /// The entity this edge starts from.
    pub source: EntityId,
    /// The entity this edge points to.
    pub target: EntityId,
    /// The type of relationship.
    pub edge_type: EdgeType,
    /// Properties stored on this edge, ordered by key.
    pub properties: BTreeMap<String, Value>,
}

impl Edge {
    /// Create a new edge with no properties.
    #[must_use]
    pub fn new(
        id: EdgeId,
        source: EntityId,
        target: EntityId,
        edge_type: impl Into<EdgeType>,
    ) -> Self {
        Self { id, source, target, edge_type: edge_type.into(), properties: BTreeMap::new() }
    }

    /// Set a property.
    #[must_use]
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Get a property by key.
    #[must_use]
    pub fn get_property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_endpoints() {
        let e = Edge::new(EdgeId::new(3), EntityId::new(1), EntityId::new(2), "KNOWS");
        assert_eq!(e.source, EntityId::new(1));
        assert_eq!(e.target, EntityId::new(2));
        assert!(e.get_property("since").is_none());
    }
}
