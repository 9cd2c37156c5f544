//! Named endpoints over the numeric index facade.
//!
//! A host routes calls by name: `post_{kind}` records a value for the node or
//! relationship the call is made on, `get_{kind}_range_node` and
//! `get_{kind}_range_relationship` query the whole graph. Parameters arrive
//! as JSON and are decoded into the endpoint's numeric type.
//!
//! ```
//! use serde_json::json;
//! use valuectx::endpoint::{invoke, Source};
//! use valuectx::Database;
//!
//! let db = Database::in_memory().unwrap();
//! let mut tx = db.begin().unwrap();
//! let event = tx.create_entity(|e| e).unwrap();
//! tx.commit().unwrap();
//!
//! let params = json!({ "index": "time", "key": "timestamp", "value": 25 });
//! assert!(invoke(&db, Source::Node(event.id), "post_long", params).unwrap().is_empty());
//!
//! let params = json!({ "index": "time", "key": "timestamp", "min": 8, "max": null });
//! let hits = invoke(&db, Source::Graph, "get_long_range_node", params).unwrap();
//! assert_eq!(serde_json::to_value(&hits).unwrap(), json!([{ "node": event.id }]));
//! ```

use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use valuectx_core::{EdgeId, EntityId, Numeric, NumericKind};

use crate::database::Database;
use crate::error::{Error, Result};
use crate::value_context::ValueContext;

/// One of the twelve named endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// `post_{kind}`: record a value for the calling node or relationship.
    Post(NumericKind),
    /// `get_{kind}_range_node`: range query over a node index.
    RangeNode(NumericKind),
    /// `get_{kind}_range_relationship`: range query over a relationship index.
    RangeRelationship(NumericKind),
}

impl Endpoint {
    /// Every endpoint: the four writes, then node queries, then relationship queries.
    #[must_use]
    pub fn all() -> Vec<Self> {
        let kinds = NumericKind::ALL;
        kinds
            .into_iter()
            .map(Self::Post)
            .chain(kinds.into_iter().map(Self::RangeNode))
            .chain(kinds.into_iter().map(Self::RangeRelationship))
            .collect()
    }

    /// The numeric kind the endpoint works with.
    #[must_use]
    pub const fn kind(self) -> NumericKind {
        match self {
            Self::Post(kind) | Self::RangeNode(kind) | Self::RangeRelationship(kind) => kind,
        }
    }

    /// The wire name, e.g. `post_int` or `get_double_range_relationship`.
    #[must_use]
    pub fn name(self) -> String {
        match self {
            Self::Post(kind) => format!("post_{kind}"),
            Self::RangeNode(kind) => format!("get_{kind}_range_node"),
            Self::RangeRelationship(kind) => format!("get_{kind}_range_relationship"),
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl FromStr for Endpoint {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let unknown = || Error::UnknownEndpoint(s.to_owned());

        if let Some(kind) = s.strip_prefix("post_") {
            return kind.parse().map(Self::Post).map_err(|_| unknown());
        }

        let rest = s.strip_prefix("get_").ok_or_else(unknown)?;
        if let Some(kind) = rest.strip_suffix("_range_node") {
            kind.parse().map(Self::RangeNode).map_err(|_| unknown())
        } else if let Some(kind) = rest.strip_suffix("_range_relationship") {
            kind.parse().map(Self::RangeRelationship).map_err(|_| unknown())
        } else {
            Err(unknown())
        }
    }
}

/// What an endpoint is invoked on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// A single node.
    Node(EntityId),
    /// A single relationship.
    Relationship(EdgeId),
    /// The graph as a whole.
    Graph,
}

/// A node or relationship in an endpoint result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    /// A node.
    Node(EntityId),
    /// A relationship.
    Relationship(EdgeId),
}

/// Parameters of a `post_*` call.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PostParams<N> {
    /// Index name.
    pub index: String,
    /// Key the value is recorded under.
    pub key: String,
    /// The value.
    pub value: N,
}

/// Parameters of a `get_*_range_*` call. Missing or `null` bounds are open.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields, bound(deserialize = "N: Deserialize<'de>"))]
pub struct RangeParams<N> {
    /// Index name.
    pub index: String,
    /// Key to query.
    pub key: String,
    /// Inclusive lower bound.
    #[serde(default)]
    pub min: Option<N>,
    /// Inclusive upper bound.
    #[serde(default)]
    pub max: Option<N>,
}

/// Call the endpoint named `name` on `source` with JSON `params`.
///
/// # Errors
///
/// - [`Error::UnknownEndpoint`] if no endpoint has this name
/// - [`Error::InvalidParameter`] if `params` do not decode into the
///   endpoint's parameter type, or `source` does not suit the endpoint
/// - Store errors are returned unchanged
pub fn invoke(db: &Database, source: Source, name: &str, params: serde_json::Value) -> Result<Vec<Element>> {
    let endpoint: Endpoint = name.parse()?;
    let ctx = ValueContext::new(db);

    match endpoint.kind() {
        NumericKind::Int => dispatch::<i32>(&ctx, endpoint, source, params),
        NumericKind::Long => dispatch::<i64>(&ctx, endpoint, source, params),
        NumericKind::Float => dispatch::<f32>(&ctx, endpoint, source, params),
        NumericKind::Double => dispatch::<f64>(&ctx, endpoint, source, params),
    }
}

fn dispatch<N: Numeric + DeserializeOwned>(
    ctx: &ValueContext<'_>,
    endpoint: Endpoint,
    source: Source,
    params: serde_json::Value,
) -> Result<Vec<Element>> {
    match (endpoint, source) {
        (Endpoint::Post(_), Source::Node(id)) => {
            let p: PostParams<N> = decode(endpoint, params)?;
            let hits = ctx.post_numeric(id, &p.index, &p.key, p.value)?;
            Ok(hits.into_iter().map(Element::Node).collect())
        }
        (Endpoint::Post(_), Source::Relationship(id)) => {
            let p: PostParams<N> = decode(endpoint, params)?;
            let hits = ctx.post_numeric(id, &p.index, &p.key, p.value)?;
            Ok(hits.into_iter().map(Element::Relationship).collect())
        }
        (Endpoint::RangeNode(_), Source::Graph) => {
            let p: RangeParams<N> = decode(endpoint, params)?;
            let hits = ctx.range_nodes(&p.index, &p.key, p.min, p.max)?;
            Ok(hits.into_iter().map(Element::Node).collect())
        }
        (Endpoint::RangeRelationship(_), Source::Graph) => {
            let p: RangeParams<N> = decode(endpoint, params)?;
            let hits = ctx.range_relationships(&p.index, &p.key, p.min, p.max)?;
            Ok(hits.into_iter().map(Element::Relationship).collect())
        }
        (Endpoint::Post(_), Source::Graph) => {
            Err(Error::invalid_parameter(format!("{endpoint} must be called on a node or relationship")))
        }
        (_, _) => Err(Error::invalid_parameter(format!("{endpoint} must be called on the graph"))),
    }
}

fn decode<P: DeserializeOwned>(endpoint: Endpoint, params: serde_json::Value) -> Result<P> {
    serde_json::from_value(params).map_err(|e| Error::invalid_parameter(format!("{endpoint}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_names() {
        assert_eq!(Endpoint::Post(NumericKind::Int).name(), "post_int");
        assert_eq!(Endpoint::RangeNode(NumericKind::Double).to_string(), "get_double_range_node");
        assert_eq!(
            "get_float_range_relationship".parse::<Endpoint>().unwrap(),
            Endpoint::RangeRelationship(NumericKind::Float)
        );
    }

    #[test]
    fn unknown_names_are_rejected() {
        for name in ["post_short", "get_long_range", "get_long_range_edge", "range_long_node", ""] {
            assert!(matches!(name.parse::<Endpoint>(), Err(Error::UnknownEndpoint(n)) if n == name));
        }
    }

    #[test]
    fn range_params_default_to_open_bounds() {
        let p: RangeParams<i64> = serde_json::from_value(serde_json::json!({"index": "i", "key": "k"})).unwrap();
        assert_eq!((p.min, p.max), (None, None));

        let p: RangeParams<i64> =
            serde_json::from_value(serde_json::json!({"index": "i", "key": "k", "min": null, "max": 4})).unwrap();
        assert_eq!((p.min, p.max), (None, Some(4)));
    }
}
