//! Hydra document types produced by the collection and pagination logic.
//!
//! These serialize straight to the JSON-LD shapes consumed by the
//! surrounding HTTP layer; field order follows the wire format.

use serde::Serialize;

/// `hydra:view` navigation descriptor attached to a paginated collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartialCollectionView {
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(rename = "@type")]
    pub type_: String,
    #[serde(rename = "hydra:first")]
    pub first: String,
    #[serde(rename = "hydra:last")]
    pub last: String,
    #[serde(rename = "hydra:previous", skip_serializing_if = "Option::is_none")]
    pub previous: Option<String>,
    #[serde(rename = "hydra:next", skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
}

impl PartialCollectionView {
    pub const TYPE: &'static str = "hydra:PartialCollectionView";
}

/// One member entry of a collection page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectionMember {
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(rename = "@type")]
    pub type_: String,
}

/// A typed collection document, optionally carrying a pagination view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Collection {
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(rename = "@context")]
    pub context: Option<serde_json::Value>,
    #[serde(rename = "@type")]
    pub type_: String,
    pub members: Vec<CollectionMember>,
    #[serde(rename = "hydra:totalItems", skip_serializing_if = "Option::is_none")]
    pub total_items: Option<i64>,
    #[serde(rename = "hydra:view", skip_serializing_if = "Option::is_none")]
    pub view: Option<PartialCollectionView>,
}
