//! Generic resource objects.

use std::{fmt, sync::Weak};

use serde_json::{Map, Value};

use super::{Linkable, Relationship, ResourceIdentifier};
use crate::{
    Client,
    client::WeakClient,
    error::{Error, Result},
};

/// One resource object: type, ID, attributes and relationships.
///
/// Resources are produced by [`Client`] calls and keep a non-owning handle
/// back to it, so [`refresh`](Self::refresh), [`update_attributes`](Self::update_attributes)
/// and [`delete`](Self::delete) work without passing the client around.
/// Once every `Client` handle is gone those calls fail with
/// [`ErrorKind::Closed`](crate::ErrorKind::Closed).
///
/// Attributes are replaced wholesale from the server's response; local state
/// never changes before a remote call succeeds.
#[derive(Clone)]
pub struct Resource {
    client: WeakClient,
    resource_type: String,
    id: String,
    attributes: Map<String, Value>,
    relationships: Vec<Relationship>,
    deleted: bool,
}

impl Resource {
    pub(crate) fn from_parts(
        client: WeakClient,
        resource_type: String,
        id: String,
        attributes: Map<String, Value>,
        relationships: Vec<Relationship>,
    ) -> Self {
        Self {
            client,
            resource_type,
            id,
            attributes,
            relationships,
            deleted: false,
        }
    }

    /// A resource bound to `client` with no attributes loaded yet.
    ///
    /// Call [`refresh`](Self::refresh) to load it, or use it directly as a
    /// relationship target.
    pub fn new(client: &Client, resource_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self::from_parts(client.downgrade(), resource_type.into(), id.into(), Map::new(), Vec::new())
    }

    /// A resource with no client; remote operations fail with
    /// [`ErrorKind::Closed`](crate::ErrorKind::Closed).
    pub fn detached(
        resource_type: impl Into<String>,
        id: impl Into<String>,
        attributes: Map<String, Value>,
    ) -> Self {
        Self::from_parts(Weak::new(), resource_type.into(), id.into(), attributes, Vec::new())
    }

    /// The resource type, e.g. `"rooms"`.
    pub fn resource_type(&self) -> &str {
        &self.resource_type
    }

    /// The resource ID.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// All attributes as last confirmed by the server.
    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }

    #[cfg(test)]
    pub(crate) fn attributes_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.attributes
    }

    /// A single attribute.
    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    /// Relationships in the order the server listed them.
    pub fn relationships(&self) -> &[Relationship] {
        &self.relationships
    }

    /// The relationship named `name`.
    pub fn relationship(&self, name: &str) -> Option<&Relationship> {
        self.relationships.iter().find(|r| r.relation_type() == name)
    }

    /// The relationship named `name`, for mutation.
    pub fn relationship_mut(&mut self, name: &str) -> Option<&mut Relationship> {
        self.relationships.iter_mut().find(|r| r.relation_type() == name)
    }

    /// Returns `true` once [`delete`](Self::delete) has succeeded.
    pub fn is_deleted(&self) -> bool {
        self.deleted
    }

    /// Re-reads the resource and replaces attributes and relationships.
    pub async fn refresh(&mut self) -> Result<()> {
        let client = self.client.upgrade().ok_or_else(Error::closed)?;
        let fresh = client.fetch_one(&self.resource_type, &self.id).await?;
        self.attributes = fresh.attributes;
        self.relationships = fresh.relationships;
        self.deleted = false;
        Ok(())
    }

    /// Sends `attributes` as an update, then adopts the attributes the server
    /// returned.
    pub async fn update_attributes(&mut self, attributes: Map<String, Value>) -> Result<()> {
        let client = self.client.upgrade().ok_or_else(Error::closed)?;
        let confirmed = client.update(&self.resource_type, &self.id, &attributes).await?;
        self.attributes = confirmed.attributes;
        Ok(())
    }

    /// Deletes the resource remotely and marks it deleted.
    pub async fn delete(&mut self) -> Result<()> {
        let client = self.client.upgrade().ok_or_else(Error::closed)?;
        client.delete(&self.resource_type, &self.id).await?;
        self.deleted = true;
        Ok(())
    }
}

impl Linkable for Resource {
    fn relationship_identifier(&self) -> ResourceIdentifier {
        ResourceIdentifier::new(self.resource_type.clone(), self.id.clone())
    }
}

impl fmt::Debug for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resource")
            .field("resource_type", &self.resource_type)
            .field("id", &self.id)
            .field("attributes", &self.attributes)
            .field("relationships", &self.relationships)
            .field("deleted", &self.deleted)
            .finish_non_exhaustive()
    }
}
