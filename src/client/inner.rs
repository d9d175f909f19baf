//! Internal client implementation.

use std::sync::{
    Arc, Weak,
    atomic::{AtomicBool, Ordering},
};

use futures::future::try_join_all;
use parking_lot::{Mutex, RwLock};
use reqwest::{
    Method, Response,
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT},
};
use serde_json::{Map, Value};
use url::Url;

use crate::{
    auth::{
        ApiCredentials, AuthKind, ClientCredentialsConfig, OAuthHandler, refresh::RefreshTask,
        store::CredentialStore,
    },
    error::{Error, ErrorKind, Result},
    http::{self, JSON_API},
    resource::{
        Relationship, Resource, TypeMapper,
        document::{Document, NewResource, ResourceObject, ResourcePatch},
    },
    user_agent,
};

/// Non-owning handle held by resources and relationships.
pub(crate) type WeakClient = Weak<ClientInner>;

pub(crate) struct ClientInner {
    /// Host every path and relative link resolves against.
    pub base_url: Url,

    /// HTTP session; taken on close.
    pub http: RwLock<Option<reqwest::Client>>,

    pub auth_mode: AuthKind,

    /// Grant configuration for the client-credentials modes.
    pub client_credentials: Option<ClientCredentialsConfig>,

    /// Handler for the authorization-code mode.
    pub handler: Option<Arc<dyn OAuthHandler>>,

    pub credentials: Arc<CredentialStore>,

    pub mapper: Arc<TypeMapper>,

    /// Background refresh loop, authorization mode only.
    pub refresh_task: Mutex<Option<RefreshTask>>,

    pub closed: AtomicBool,
}

impl ClientInner {
    /// Returns the HTTP session, or `Closed` once the client is closed.
    fn http_client(&self) -> Result<reqwest::Client> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(Error::closed());
        }
        self.http.read().clone().ok_or_else(Error::closed)
    }

    /// Resolves an absolute or host-relative link.
    ///
    /// Links come from response documents, so a bad one is an API error.
    pub(crate) fn resolve(&self, link: &str) -> Result<Url> {
        self.base_url
            .join(link)
            .map_err(|e| Error::misc(format!("invalid link '{}': {}", link, e)).with_source(e))
    }

    fn endpoint(&self, resource_type: &str, id: Option<&str>) -> Result<Url> {
        match id {
            Some(id) => self.resolve(&format!("/api/{}/{}", resource_type, id)),
            None => self.resolve(&format!("/api/{}", resource_type)),
        }
    }

    fn build_headers(&self, token: &str) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static(JSON_API));
        headers.insert(USER_AGENT, HeaderValue::from_static(user_agent::user_agent()));
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|_| {
                Error::new(ErrorKind::InvalidAuth, "access token is not a valid header value")
            })?,
        );
        Ok(headers)
    }

    /// Ensures the held credentials are valid, refreshing them if not.
    ///
    /// Concurrent callers serialize on the store's refresh lock; whoever gets
    /// it second sees the fresh token and returns.
    pub(crate) async fn refresh_token(&self) -> Result<()> {
        if !self.credentials.load().is_expired() {
            return Ok(());
        }

        let _guard = self.credentials.lock_refresh().await;
        let current = self.credentials.load();
        if !current.is_expired() {
            return Ok(());
        }

        tracing::debug!(mode = ?self.auth_mode, "access token expired, refreshing");

        let fresh = match self.auth_mode {
            AuthKind::Authorization => {
                let handler = self.handler.as_ref().ok_or_else(|| {
                    Error::configuration("the authorization flow requires an OAuth handler")
                })?;
                handler.refresh(&current).await?
            },
            AuthKind::ClientCredentials | AuthKind::Legacy => {
                let config = self
                    .client_credentials
                    .as_ref()
                    .ok_or_else(|| Error::configuration("client credentials are required"))?;
                let http = self.http_client()?;
                ApiCredentials::with_authentication(
                    &http,
                    config,
                    self.auth_mode == AuthKind::Legacy,
                    &self.base_url,
                )
                .await?
            },
        };

        self.credentials.replace(fresh);
        Ok(())
    }

    /// Sends an authenticated request and checks its status.
    pub(crate) async fn request(&self, method: Method, url: Url, body: Option<&Value>) -> Result<Response> {
        let http = self.http_client()?;
        self.refresh_token().await?;

        let credentials = self.credentials.load();
        let headers = self.build_headers(credentials.token())?;

        tracing::debug!(method = %method, url = %url, "sending request");

        let mut request = http.request(method, url).headers(headers);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        http::check_status(response).await
    }

    /// Sends a request and returns the decoded body as-is.
    pub(crate) async fn request_json(&self, method: Method, url: Url, body: Option<&Value>) -> Result<Value> {
        let response = self.request(method, url, body).await?;
        http::read_json(response).await
    }

    /// Deserializes a resource document.
    ///
    /// A single-resource document yields exactly one resource. For a
    /// collection, resources come back in document order. Relationships of
    /// every resource are converted concurrently.
    pub(crate) async fn handle_response(
        self: &Arc<Self>,
        response: Response,
        expect_collection: bool,
    ) -> Result<Vec<Resource>> {
        if expect_collection {
            let document: Document<Vec<ResourceObject>> = http::read_json(response).await?;
            try_join_all(document.data.into_iter().map(|object| self.convert(object))).await
        } else {
            let document: Document<ResourceObject> = http::read_json(response).await?;
            Ok(vec![self.convert(document.data).await?])
        }
    }

    async fn convert(self: &Arc<Self>, object: ResourceObject) -> Result<Resource> {
        let client = Arc::downgrade(self);

        let relationships = try_join_all(object.relationships.into_iter().map(|(name, value)| {
            let client = client.clone();
            async move { Relationship::from_value(client, name, value) }
        }))
        .await?;

        Ok(Resource::from_parts(
            client,
            object.resource_type,
            object.id,
            object.attributes,
            relationships,
        ))
    }

    async fn single(self: &Arc<Self>, response: Response) -> Result<Resource> {
        self.handle_response(response, false)
            .await?
            .pop()
            .ok_or_else(|| Error::misc("document contained no resource"))
    }

    pub(crate) async fn fetch_one(self: &Arc<Self>, resource_type: &str, id: &str) -> Result<Resource> {
        let url = self.endpoint(resource_type, Some(id))?;
        let response = self.request(Method::GET, url, None).await?;
        self.single(response).await
    }

    pub(crate) async fn fetch_all(self: &Arc<Self>, resource_type: &str) -> Result<Vec<Resource>> {
        let url = self.endpoint(resource_type, None)?;
        let response = self.request(Method::GET, url, None).await?;
        self.handle_response(response, true).await
    }

    pub(crate) async fn create(
        self: &Arc<Self>,
        resource_type: &str,
        attributes: &Map<String, Value>,
    ) -> Result<Resource> {
        let url = self.endpoint(resource_type, None)?;
        let body = serde_json::to_value(Document {
            data: NewResource { attributes },
        })?;
        let response = self.request(Method::POST, url, Some(&body)).await?;
        self.single(response).await
    }

    pub(crate) async fn update(
        self: &Arc<Self>,
        resource_type: &str,
        id: &str,
        attributes: &Map<String, Value>,
    ) -> Result<Resource> {
        let url = self.endpoint(resource_type, Some(id))?;
        let body = serde_json::to_value(Document {
            data: ResourcePatch {
                resource_type,
                attributes,
                relationships: Map::new(),
            },
        })?;
        let response = self.request(Method::PATCH, url, Some(&body)).await?;
        self.single(response).await
    }

    pub(crate) async fn delete(&self, resource_type: &str, id: &str) -> Result<()> {
        let url = self.endpoint(resource_type, Some(id))?;
        self.request(Method::DELETE, url, None).await?;
        Ok(())
    }

    /// Stops the refresh loop and releases the HTTP session. Idempotent.
    pub(crate) async fn close(&self) {
        if self.closed.swap(true, Ordering::SeqCst) {
            return;
        }

        let task = self.refresh_task.lock().take();
        if let Some(task) = task {
            task.shutdown().await;
        }
        self.http.write().take();

        tracing::info!(host = %self.base_url, "client closed");
    }

    pub(crate) fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}
