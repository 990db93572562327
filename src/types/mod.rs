pub mod hydra;
pub mod traits;

use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Ordered raw query-string parameters, in caller-supplied key order.
pub type RawParams = IndexMap<String, String>;

/// Materialized property map of one instance, in edge-processing order.
pub type PropertyMap = IndexMap<String, serde_json::Value>;

/// A class definition row (reference data).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassRecord {
    pub id: i64,
    pub name: String,
}

/// A property definition row (reference data).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyRecord {
    pub id: i64,
    pub name: String,
    pub kind: PropertyKind,
}

/// An instance row. Ids are opaque integers assigned by the store unless
/// the caller supplies one explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceRecord {
    pub id: i64,
    pub class_id: i64,
}

/// A terminal (literal) value row. The value column is nullable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalRecord {
    pub id: i64,
    pub value: Option<String>,
}

/// Instance -> abstract property -> class edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassEdge {
    pub subject: i64,
    pub predicate: i64,
    pub object: i64,
}

/// Instance -> instance property -> instance edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityEdge {
    pub subject: i64,
    pub predicate: i64,
    pub object: i64,
}

/// Instance -> instance property -> terminal edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralEdge {
    pub subject: i64,
    pub predicate: i64,
    pub object: i64,
}

/// One modification-log record, ordered by monotonically increasing job id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModificationRecord {
    pub job_id: i64,
    pub method: String,
    pub resource_url: String,
}

/// Result of an exactly-one edge lookup.
///
/// Distinguishes "no edge of this kind" from "schema invariant violated
/// (multiple edges for one (subject, predicate) pair)" instead of collapsing
/// both into a single error kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EdgeLookup<T> {
    Found(T),
    NotFound,
    Ambiguous,
}

impl<T> EdgeLookup<T> {
    /// Returns the edge if exactly one matched, `None` otherwise.
    pub fn found(self) -> Option<T> {
        match self {
            Self::Found(edge) => Some(edge),
            Self::NotFound | Self::Ambiguous => None,
        }
    }
}

/// Kind of a property definition.
///
/// A freshly defined property is `Unspecified` and is specialized to
/// `Instance` or `Abstract` the first time an insert uses it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKind {
    Unspecified,
    Instance,
    Abstract,
}

impl PropertyKind {
    /// Convert to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unspecified => "PROPERTY",
            Self::Instance => "INSTANCE",
            Self::Abstract => "ABSTRACT",
        }
    }
}

impl std::fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parse from database string representation.
impl FromStr for PropertyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PROPERTY" => Ok(Self::Unspecified),
            "INSTANCE" => Ok(Self::Instance),
            "ABSTRACT" => Ok(Self::Abstract),
            _ => Err(format!("'{}' is not a valid property kind", s)),
        }
    }
}
