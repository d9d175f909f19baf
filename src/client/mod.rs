//! The Flair API client.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use ignis::prelude::*;
//!
//! let client = Client::builder()
//!     .client_credentials(ClientCredentialsConfig::from_env()?)
//!     .build()
//!     .await?;
//!
//! for room in client.list_typed::<Room>().await? {
//!     println!("{:?}: {}", room.name(), room.set_point_c());
//! }
//!
//! client.close().await;
//! ```

mod builder;
mod inner;

pub use builder::{ClientBuilder, DEFAULT_HOST};
pub(crate) use inner::{ClientInner, WeakClient};

use std::sync::Arc;

use serde_json::{Map, Value};
use url::Url;

use crate::{
    auth::{ApiCredentials, AuthKind},
    error::{Error, Result},
    resource::{ApiResource, Resource, TypeMapper, TypedResource},
};

/// An authenticated Flair API client.
///
/// A `Client` only exists once authentication has succeeded; build one with
/// [`Client::builder()`]. Every call checks the token first and refreshes it
/// when it has expired.
///
/// ## Thread Safety
///
/// `Client` is `Clone` and thread-safe. Clones share one HTTP session, one
/// credential store and one background refresh task.
///
/// ## Lifecycle
///
/// [`close`](Self::close) stops the refresh task and releases the HTTP
/// session for every clone; afterwards calls fail with
/// [`ErrorKind::Closed`](crate::ErrorKind::Closed). Dropping the last clone
/// cancels the refresh task without waiting for it.
///
/// ## Example
///
/// ```rust,ignore
/// use ignis::{Client, ClientCredentialsConfig, Room};
///
/// let client = Client::builder()
///     .client_credentials(ClientCredentialsConfig::new("id", "secret"))
///     .build()
///     .await?;
///
/// let mut office = client
///     .find_by_name::<Room>("Office")
///     .await?
///     .expect("room exists");
/// office.set_temp(21.5).await?;
/// ```
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

impl Client {
    /// Creates a new client builder.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    pub(crate) fn from_inner(inner: ClientInner) -> Self {
        Self {
            inner: Arc::new(inner),
        }
    }

    pub(crate) fn downgrade(&self) -> WeakClient {
        Arc::downgrade(&self.inner)
    }

    /// The host requests are sent to.
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// The authentication flow this client uses.
    pub fn auth_mode(&self) -> AuthKind {
        self.inner.auth_mode
    }

    /// A snapshot of the current credentials.
    pub fn credentials(&self) -> Arc<ApiCredentials> {
        self.inner.credentials.load()
    }

    /// The type mapper used to wrap deserialized resources.
    pub fn mapper(&self) -> &TypeMapper {
        &self.inner.mapper
    }

    /// Refreshes the credentials if they have expired; a no-op otherwise.
    ///
    /// Every request does this on its own; call it to front-load the cost.
    pub async fn refresh_token(&self) -> Result<()> {
        if self.inner.is_closed() {
            return Err(Error::closed());
        }
        self.inner.refresh_token().await
    }

    /// Fetches one resource, wrapped by the mapper.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::NotFound`](crate::ErrorKind::NotFound) if it does not
    /// exist, or any other HTTP-boundary error.
    pub async fn get(&self, resource_type: &str, id: &str) -> Result<Box<dyn ApiResource>> {
        let resource = self.inner.fetch_one(resource_type, id).await?;
        Ok(self.inner.mapper.build(resource))
    }

    /// Lists every resource of a type, wrapped by the mapper.
    pub async fn list(&self, resource_type: &str) -> Result<Vec<Box<dyn ApiResource>>> {
        let resources = self.inner.fetch_all(resource_type).await?;
        Ok(resources.into_iter().map(|r| self.inner.mapper.build(r)).collect())
    }

    /// Fetches one resource as `T`, bypassing the mapper.
    pub async fn get_typed<T: TypedResource>(&self, id: &str) -> Result<T> {
        let resource = self.inner.fetch_one(T::RESOURCE_TYPE, id).await?;
        typed(resource)
    }

    /// Lists every resource of `T`'s type as `T`, bypassing the mapper.
    pub async fn list_typed<T: TypedResource>(&self) -> Result<Vec<T>> {
        self.inner
            .fetch_all(T::RESOURCE_TYPE)
            .await?
            .into_iter()
            .map(typed)
            .collect()
    }

    /// The first resource of `T`'s type whose `name` attribute is `name`.
    pub async fn find_by_name<T: TypedResource>(&self, name: &str) -> Result<Option<T>> {
        let found = self
            .inner
            .fetch_all(T::RESOURCE_TYPE)
            .await?
            .into_iter()
            .find(|r| r.attribute("name").and_then(Value::as_str) == Some(name));
        found.map(typed).transpose()
    }

    /// Creates a resource and returns the server's version of it.
    pub async fn create(
        &self,
        resource_type: &str,
        attributes: Map<String, Value>,
    ) -> Result<Box<dyn ApiResource>> {
        let resource = self.inner.create(resource_type, &attributes).await?;
        Ok(self.inner.mapper.build(resource))
    }

    /// Updates a resource's attributes and returns the server's version of it.
    pub async fn update(
        &self,
        resource_type: &str,
        id: &str,
        attributes: Map<String, Value>,
    ) -> Result<Box<dyn ApiResource>> {
        let resource = self.inner.update(resource_type, id, &attributes).await?;
        Ok(self.inner.mapper.build(resource))
    }

    /// Deletes a resource.
    pub async fn delete(&self, resource_type: &str, id: &str) -> Result<()> {
        self.inner.delete(resource_type, id).await
    }

    /// A resource handle bound to this client, without fetching it.
    pub fn resource(&self, resource_type: impl Into<String>, id: impl Into<String>) -> Resource {
        Resource::new(self, resource_type, id)
    }

    /// A typed handle bound to this client, without fetching it.
    pub fn resource_typed<T: TypedResource>(&self, id: impl Into<String>) -> T {
        T::from_resource(self.resource(T::RESOURCE_TYPE, id))
    }

    /// Stops background refresh and releases the HTTP session.
    ///
    /// Idempotent. Affects every clone of this client.
    pub async fn close(&self) {
        self.inner.close().await;
    }

    /// Returns `true` once [`close`](Self::close) has run.
    pub fn is_closed(&self) -> bool {
        self.inner.is_closed()
    }
}

fn typed<T: TypedResource>(resource: Resource) -> Result<T> {
    if resource.resource_type() != T::RESOURCE_TYPE {
        return Err(Error::misc(format!(
            "expected a '{}' resource, got '{}'",
            T::RESOURCE_TYPE,
            resource.resource_type()
        )));
    }
    Ok(T::from_resource(resource))
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.inner.base_url.as_str())
            .field("auth_mode", &self.inner.auth_mode)
            .field("closed", &self.is_closed())
            .finish_non_exhaustive()
    }
}
