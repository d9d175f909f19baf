//! Resource identifier objects.

use serde::{Deserialize, Serialize};

/// A JSON:API resource identifier: `{"type": ..., "id": ...}`.
///
/// Relationships hold these rather than whole resources.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceIdentifier {
    #[serde(rename = "type")]
    resource_type: String,
    id: String,
}

impl ResourceIdentifier {
    /// Creates an identifier for `resource_type`/`id`.
    pub fn new(resource_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            id: id.into(),
        }
    }

    /// The resource type, e.g. `"rooms"`.
    pub fn resource_type(&self) -> &str {
        &self.resource_type
    }

    /// The resource ID.
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl std::fmt::Display for ResourceIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.resource_type, self.id)
    }
}

/// Anything that can be referenced from a relationship.
///
/// Implemented by [`ResourceIdentifier`], [`Resource`](crate::Resource), every
/// entity wrapper, and references and boxes of those, so relationship
/// mutations accept whichever the caller has at hand.
pub trait Linkable {
    /// The identifier sent in relationship payloads.
    fn relationship_identifier(&self) -> ResourceIdentifier;
}

impl Linkable for ResourceIdentifier {
    fn relationship_identifier(&self) -> ResourceIdentifier {
        self.clone()
    }
}

impl<T: Linkable + ?Sized> Linkable for &T {
    fn relationship_identifier(&self) -> ResourceIdentifier {
        (**self).relationship_identifier()
    }
}

impl<T: Linkable + ?Sized> Linkable for Box<T> {
    fn relationship_identifier(&self) -> ResourceIdentifier {
        (**self).relationship_identifier()
    }
}
