//! Client builder.

use std::{
    future::Future,
    sync::{Arc, atomic::AtomicBool},
};

use parking_lot::{Mutex, RwLock};
use url::Url;

use super::inner::ClientInner;
use crate::{
    Client, Error,
    auth::{
        ApiCredentials, AuthKind, ClientCredentialsConfig, OAuthHandler, refresh::RefreshTask,
        store::CredentialStore,
    },
    config::HttpConfig,
    error::Result,
    resource::TypeMapper,
};

/// Default API host.
pub const DEFAULT_HOST: &str = "https://api.flair.co";

/// Builder for creating [`Client`] instances.
///
/// Authentication happens in [`build`](Self::build), so a `Client` value is
/// always authenticated.
///
/// ## Authentication
///
/// - [`AuthKind::ClientCredentials`] (default) and [`AuthKind::Legacy`]:
///   require [`client_credentials`](Self::client_credentials)
/// - [`AuthKind::Authorization`]: requires [`oauth_handler`](Self::oauth_handler);
///   a background task keeps the token fresh unless
///   [`background_refresh(false)`](Self::background_refresh)
///
/// ## Optional Configuration
///
/// - `host()`: API host, default `https://api.flair.co`
/// - `mapper()`: type mapper, default [`TypeMapper::with_entities`]
/// - `http_config()` or `http_client()`: HTTP settings or a ready session
/// - `insecure()`: allow plain HTTP and invalid certificates
///
/// ## Example
///
/// ```rust,ignore
/// use ignis::{Client, ClientCredentialsConfig, HttpConfig};
/// use std::time::Duration;
///
/// let client = Client::builder()
///     .client_credentials(ClientCredentialsConfig::new("client_id", "secret"))
///     .http_config(HttpConfig::builder().timeout(Duration::from_secs(10)).build())
///     .build()
///     .await?;
/// ```
pub struct ClientBuilder {
    host: String,
    auth_mode: AuthKind,
    client_credentials: Option<ClientCredentialsConfig>,
    handler: Option<Arc<dyn OAuthHandler>>,
    mapper: TypeMapper,
    http_config: HttpConfig,
    http_client: Option<reqwest::Client>,
    background_refresh: bool,
    insecure: bool,
}

impl ClientBuilder {
    /// Creates a new client builder.
    pub fn new() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            auth_mode: AuthKind::default(),
            client_credentials: None,
            handler: None,
            mapper: TypeMapper::with_entities(),
            http_config: HttpConfig::default(),
            http_client: None,
            background_refresh: true,
            insecure: false,
        }
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientBuilder {
    /// Sets the API host.
    #[must_use]
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Sets the client-credentials grant configuration.
    ///
    /// ```rust,ignore
    /// let builder = Client::builder()
    ///     .client_credentials(ClientCredentialsConfig::from_env()?);
    /// ```
    #[must_use]
    pub fn client_credentials(mut self, config: ClientCredentialsConfig) -> Self {
        self.client_credentials = Some(config);
        self
    }

    /// Selects the authentication flow.
    #[must_use]
    pub fn auth_mode(mut self, mode: AuthKind) -> Self {
        self.auth_mode = mode;
        self
    }

    /// Sets the handler for [`AuthKind::Authorization`].
    #[must_use]
    pub fn oauth_handler<H: OAuthHandler + 'static>(mut self, handler: H) -> Self {
        self.handler = Some(Arc::new(handler));
        self
    }

    /// Replaces the type mapper.
    #[must_use]
    pub fn mapper(mut self, mapper: TypeMapper) -> Self {
        self.mapper = mapper;
        self
    }

    /// Sets timeouts and TLS options for the HTTP session.
    #[must_use]
    pub fn http_config(mut self, config: HttpConfig) -> Self {
        self.http_config = config;
        self
    }

    /// Uses a caller-supplied HTTP session; `http_config` is then ignored.
    #[must_use]
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Enables or disables the background refresh task (authorization flow).
    #[must_use]
    pub fn background_refresh(mut self, enabled: bool) -> Self {
        self.background_refresh = enabled;
        self
    }

    /// Allows plain HTTP hosts and accepts invalid certificates.
    ///
    /// **WARNING**: For local development and tests only.
    #[must_use]
    pub fn insecure(mut self) -> Self {
        self.insecure = true;
        self.http_config.accept_invalid_certs = true;
        self
    }

    /// Authenticates and returns the client.
    ///
    /// # Errors
    ///
    /// - [`ErrorKind::Configuration`](crate::ErrorKind::Configuration): invalid
    ///   or non-HTTPS host, missing credentials or handler for the chosen flow
    /// - any error from the token endpoint or from
    ///   [`OAuthHandler::authorize`]
    pub async fn build(self) -> Result<Client> {
        let base_url = Url::parse(&self.host)
            .map_err(|e| Error::configuration(format!("invalid host URL: {}", e)))?;

        if base_url.scheme() != "https" && !self.insecure {
            return Err(Error::configuration(
                "HTTPS is required. Use .insecure() for development with HTTP.",
            ));
        }

        match self.auth_mode {
            AuthKind::Authorization if self.handler.is_none() => {
                return Err(Error::configuration(
                    "the authorization flow requires an OAuth handler",
                ));
            },
            AuthKind::ClientCredentials | AuthKind::Legacy if self.client_credentials.is_none() => {
                return Err(Error::configuration("client credentials are required"));
            },
            _ => {},
        }

        let http = match self.http_client {
            Some(client) => client,
            None => self.http_config.build_client()?,
        };

        let initial = match (&self.handler, &self.client_credentials, self.auth_mode) {
            (Some(handler), _, AuthKind::Authorization) => handler.authorize().await?,
            (_, Some(config), mode) if mode.is_client_credentials() => {
                ApiCredentials::with_authentication(&http, config, mode == AuthKind::Legacy, &base_url)
                    .await?
            },
            _ => return Err(Error::configuration("no way to authenticate")),
        };

        let credentials = Arc::new(CredentialStore::new(initial));

        let refresh_task = match &self.handler {
            Some(handler) if self.auth_mode == AuthKind::Authorization && self.background_refresh => {
                Some(RefreshTask::spawn(handler.clone(), credentials.clone()))
            },
            _ => None,
        };

        tracing::info!(
            host = %base_url,
            mode = ?self.auth_mode,
            background_refresh = refresh_task.is_some(),
            "client ready"
        );

        Ok(Client::from_inner(ClientInner {
            base_url,
            http: RwLock::new(Some(http)),
            auth_mode: self.auth_mode,
            client_credentials: self.client_credentials,
            handler: self.handler,
            credentials,
            mapper: Arc::new(self.mapper),
            refresh_task: Mutex::new(refresh_task),
            closed: AtomicBool::new(false),
        }))
    }

    /// Builds a client, runs `f` with it and closes it afterwards, whether
    /// `f` succeeded or not.
    ///
    /// ```rust,ignore
    /// let rooms = Client::builder()
    ///     .client_credentials(config)
    ///     .run(|client| async move { client.list_typed::<Room>().await })
    ///     .await?;
    /// ```
    pub async fn run<F, Fut, T>(self, f: F) -> Result<T>
    where
        F: FnOnce(Client) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let client = self.build().await?;
        let outcome = f(client.clone()).await;
        client.close().await;
        outcome
    }
}

impl std::fmt::Debug for ClientBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientBuilder")
            .field("host", &self.host)
            .field("auth_mode", &self.auth_mode)
            .field("client_credentials", &self.client_credentials)
            .field("has_handler", &self.handler.is_some())
            .field("mapper", &self.mapper)
            .field("background_refresh", &self.background_refresh)
            .field("insecure", &self.insecure)
            .finish_non_exhaustive()
    }
}
