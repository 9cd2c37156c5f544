//! Entity (node) types for the graph.
//!
//! # Example
//!
//! ```
//! use valuectx_core::types::{Entity, EntityId};
//!
//! let entity = Entity::new(EntityId::new(1))
//!     .with_label("Event")
//!     .with_property("name", "launch");
//!
//! assert!(entity.has_label("Event"));
//! assert_eq!(entity.get_property("name").and_then(|v| v.as_str()), Some("launch"));
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{EntityId, Value};

/// A label that categorizes an entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Label(String);

impl Label {
    /// Create a new label.
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the label name as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Label {
    #[inline]
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Label {
    #[inline]
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// An entity (node) in the graph.
///
/// Numeric index entries reference entities by [`EntityId`]; the entity record
/// itself only carries labels and properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// The unique identifier for this entity.
    pub id: EntityId,
    /// Labels attached to this entity.
    pub labels: Vec<Label>,
    /// Properties stored on this entity, ordered by key.
    pub properties: BTreeMap<String, Value>,
}

impl Entity {
    /// Create a new entity with no labels or properties.
    #[must_use]
    pub fn new(id: EntityId) -> Self {
        Self { id, labels: Vec::new(), properties: BTreeMap::new() }
    }

    /// Add a label, ignoring duplicates.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<Label>) -> Self {
        let label = label.into();
        if !self.labels.contains(&label) {
            self.labels.push(label);
        }
        self
    }

    /// Set a property.
    #[must_use]
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Check whether the entity has the given label.
    #[must_use]
    pub fn has_label(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l.as_str() == label)
    }

    /// Get a property by key.
    #[must_use]
    pub fn get_property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    /// Set a property, returning the previous value if any.
    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.properties.insert(key.into(), value.into())
    }
}
