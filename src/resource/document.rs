//! Wire envelopes for resource documents.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::ResourceIdentifier;

/// Top-level `{"data": ...}` document.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct Document<D> {
    pub data: D,
}

/// A resource object as served by the API.
#[derive(Debug, Deserialize)]
pub(crate) struct ResourceObject {
    #[serde(rename = "type")]
    pub resource_type: String,
    pub id: String,
    #[serde(default)]
    pub attributes: Map<String, Value>,
    /// Kept as raw values so entry order survives until conversion.
    #[serde(default)]
    pub relationships: Map<String, Value>,
}

/// A relationship object: `{"links": {...}, "data": ...}`.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct RelationshipObject {
    #[serde(default)]
    pub links: Links,
    #[serde(default)]
    pub data: Option<Linkage>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Links {
    #[serde(rename = "self")]
    pub self_link: Option<String>,
    pub related: Option<String>,
}

/// Resource linkage: one identifier or many.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum Linkage {
    One(ResourceIdentifier),
    Many(Vec<ResourceIdentifier>),
}

impl Linkage {
    pub fn into_vec(self) -> Vec<ResourceIdentifier> {
        match self {
            Self::One(id) => vec![id],
            Self::Many(ids) => ids,
        }
    }
}

/// Body of a create request.
#[derive(Debug, Serialize)]
pub(crate) struct NewResource<'a> {
    pub attributes: &'a Map<String, Value>,
}

/// Body of an update request.
#[derive(Debug, Serialize)]
pub(crate) struct ResourcePatch<'a> {
    #[serde(rename = "type")]
    pub resource_type: &'a str,
    pub attributes: &'a Map<String, Value>,
    pub relationships: Map<String, Value>,
}
