//! Relationship objects and their link-based mutations.

use std::{fmt, sync::Arc};

use reqwest::Method;
use serde_json::Value;

use super::{
    Linkable, ResourceIdentifier,
    document::{Document, RelationshipObject},
};
use crate::{
    client::{ClientInner, WeakClient},
    error::{Error, Result},
};

/// A named relationship of a [`Resource`](crate::Resource).
///
/// Holds the relationship's links and the identifiers it currently points
/// to. Mutations are sent to the `self` link first; the local list only
/// changes once the server has accepted the request.
///
/// ## Example
///
/// ```rust,ignore
/// let mut room = client.get("rooms", "1").await?;
/// let vent = client.get("vents", "7").await?;
///
/// let vents = room.relationship_mut("vents").expect("rooms have vents");
/// vents.add([&vent]).await?;
/// assert!(vents.contains(&vent));
/// ```
#[derive(Clone)]
pub struct Relationship {
    client: WeakClient,
    relation_type: String,
    self_link: Option<String>,
    related_link: Option<String>,
    linked: Vec<ResourceIdentifier>,
}

impl Relationship {
    /// Converts one entry of a resource's `relationships` map.
    pub(crate) fn from_value(client: WeakClient, relation_type: String, value: Value) -> Result<Self> {
        let object: RelationshipObject = serde_json::from_value(value).map_err(|e| {
            Error::misc(format!("malformed relationship '{}': {}", relation_type, e)).with_source(e)
        })?;

        Ok(Self {
            client,
            relation_type,
            self_link: object.links.self_link,
            related_link: object.links.related,
            linked: object.data.map(|d| d.into_vec()).unwrap_or_default(),
        })
    }

    #[cfg(test)]
    pub(crate) fn from_parts(
        client: WeakClient,
        relation_type: impl Into<String>,
        self_link: Option<String>,
        linked: Vec<ResourceIdentifier>,
    ) -> Self {
        Self {
            client,
            relation_type: relation_type.into(),
            self_link,
            related_link: None,
            linked,
        }
    }

    /// The relationship name, e.g. `"vents"`.
    pub fn relation_type(&self) -> &str {
        &self.relation_type
    }

    /// The relationship's own URL, if the server sent one.
    pub fn self_link(&self) -> Option<&str> {
        self.self_link.as_deref()
    }

    /// The URL of the related resources, if the server sent one.
    pub fn related_link(&self) -> Option<&str> {
        self.related_link.as_deref()
    }

    /// The identifiers this relationship currently points to.
    pub fn linked(&self) -> &[ResourceIdentifier] {
        &self.linked
    }

    /// Returns `true` if `resource` is linked.
    pub fn contains<L: Linkable + ?Sized>(&self, resource: &L) -> bool {
        let id = resource.relationship_identifier();
        self.linked.contains(&id)
    }

    /// GETs the `self` link and returns the decoded body as-is.
    pub async fn fetch(&self) -> Result<Value> {
        let (client, link) = self.target(self.self_link.as_deref(), "self")?;
        let url = client.resolve(link)?;
        client.request_json(Method::GET, url, None).await
    }

    /// GETs the `related` link and returns the decoded body as-is.
    pub async fn fetch_related(&self) -> Result<Value> {
        let (client, link) = self.target(self.related_link.as_deref(), "related")?;
        let url = client.resolve(link)?;
        client.request_json(Method::GET, url, None).await
    }

    /// Links `resources`, then appends them locally.
    pub async fn add<I>(&mut self, resources: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Linkable,
    {
        let ids = identifiers(resources);
        self.send(Method::POST, &ids).await?;
        tracing::debug!(relationship = %self.relation_type, count = ids.len(), "linked resources");
        self.linked.extend(ids);
        Ok(())
    }

    /// Replaces the linked set with `resources`, remotely then locally.
    pub async fn update<I>(&mut self, resources: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Linkable,
    {
        let ids = identifiers(resources);
        self.send(Method::PATCH, &ids).await?;
        tracing::debug!(relationship = %self.relation_type, count = ids.len(), "replaced links");
        self.linked = ids;
        Ok(())
    }

    /// Unlinks `resource`, then removes its first local occurrence.
    pub async fn delete<L: Linkable + ?Sized>(&mut self, resource: &L) -> Result<()> {
        let id = resource.relationship_identifier();
        self.send(Method::DELETE, std::slice::from_ref(&id)).await?;
        tracing::debug!(relationship = %self.relation_type, resource = %id, "unlinked resource");
        self.remove_first(&id);
        Ok(())
    }

    fn remove_first(&mut self, id: &ResourceIdentifier) -> bool {
        match self.linked.iter().position(|linked| linked == id) {
            Some(index) => {
                self.linked.remove(index);
                true
            },
            None => false,
        }
    }

    async fn send(&self, method: Method, ids: &[ResourceIdentifier]) -> Result<()> {
        let (client, link) = self.target(self.self_link.as_deref(), "self")?;
        let url = client.resolve(link)?;
        let body = serde_json::to_value(Document { data: ids })?;
        client.request(method, url, Some(&body)).await?;
        Ok(())
    }

    fn target<'a>(&self, link: Option<&'a str>, which: &str) -> Result<(Arc<ClientInner>, &'a str)> {
        let link = link.ok_or_else(|| {
            Error::misc(format!("relationship '{}' has no {} link", self.relation_type, which))
        })?;
        let client = self.client.upgrade().ok_or_else(Error::closed)?;
        Ok((client, link))
    }
}

fn identifiers<I>(resources: I) -> Vec<ResourceIdentifier>
where
    I: IntoIterator,
    I::Item: Linkable,
{
    resources.into_iter().map(|r| r.relationship_identifier()).collect()
}

impl fmt::Debug for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Relationship")
            .field("relation_type", &self.relation_type)
            .field("self_link", &self.self_link)
            .field("related_link", &self.related_link)
            .field("linked", &self.linked)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use std::sync::Weak;

    use proptest::prelude::*;
    use serde_json::json;

    use super::*;
    use crate::ErrorKind;

    fn vent(id: &str) -> ResourceIdentifier {
        ResourceIdentifier::new("vents", id)
    }

    #[test]
    fn test_from_value_reads_links_and_data() {
        let rel = Relationship::from_value(
            Weak::new(),
            "vents".into(),
            json!({
                "links": {"self": "/api/rooms/1/relationships/vents", "related": "/api/rooms/1/vents"},
                "data": [{"type": "vents", "id": "1"}, {"type": "vents", "id": "2"}]
            }),
        )
        .unwrap();

        assert_eq!(rel.relation_type(), "vents");
        assert_eq!(rel.self_link(), Some("/api/rooms/1/relationships/vents"));
        assert_eq!(rel.related_link(), Some("/api/rooms/1/vents"));
        assert_eq!(rel.linked(), &[vent("1"), vent("2")]);
    }

    #[test]
    fn test_from_value_null_data() {
        let rel = Relationship::from_value(
            Weak::new(),
            "structure".into(),
            json!({"links": {"related": "/api/rooms/1/structure"}, "data": null}),
        )
        .unwrap();
        assert!(rel.linked().is_empty());
        assert!(rel.self_link().is_none());
    }

    #[test]
    fn test_from_value_rejects_garbage() {
        let err = Relationship::from_value(Weak::new(), "vents".into(), json!({"data": 5}))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Misc);
    }

    #[tokio::test]
    async fn test_mutation_without_self_link_is_misc() {
        let mut rel = Relationship::from_parts(Weak::new(), "vents", None, vec![vent("1")]);
        let err = rel.add([vent("2")]).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Misc);
        assert_eq!(rel.linked(), &[vent("1")]);
    }

    #[tokio::test]
    async fn test_mutation_after_client_dropped_is_closed() {
        let mut rel = Relationship::from_parts(
            Weak::new(),
            "vents",
            Some("/api/rooms/1/relationships/vents".into()),
            vec![vent("1")],
        );
        let err = rel.delete(&vent("1")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Closed);
        assert_eq!(rel.linked(), &[vent("1")]);
    }

    proptest! {
        #[test]
        fn prop_remove_first_drops_exactly_one(
            ids in prop::collection::vec(0u8..4, 0..12),
            target in 0u8..4,
        ) {
            let linked: Vec<_> = ids.iter().map(|i| vent(&i.to_string())).collect();
            let target = vent(&target.to_string());
            let mut rel = Relationship::from_parts(Weak::new(), "vents", None, linked.clone());

            let removed = rel.remove_first(&target);

            let mut expected = linked.clone();
            if let Some(index) = linked.iter().position(|id| *id == target) {
                expected.remove(index);
            }
            prop_assert_eq!(removed, linked.contains(&target));
            prop_assert_eq!(rel.linked(), expected.as_slice());
        }
    }
}
