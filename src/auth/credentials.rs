//! Bearer credentials and the client-credentials grant.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::Deserialize;
use url::Url;
use zeroize::Zeroizing;

use crate::error::{Error, Result};
use crate::http;

/// Token endpoint of the current API.
const TOKEN_PATH: &str = "/oauth2/token";

/// Token endpoint of the legacy API.
const LEGACY_TOKEN_PATH: &str = "/oauth/token";

/// How a set of credentials was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AuthKind {
    /// OAuth 2.0 client-credentials grant against `/oauth2/token`.
    #[default]
    ClientCredentials,
    /// Authorization-code flow driven by an [`OAuthHandler`](crate::OAuthHandler).
    Authorization,
    /// Client-credentials grant against the legacy `/oauth/token` endpoint.
    Legacy,
}

impl AuthKind {
    /// Returns `true` for both client-credentials variants.
    pub fn is_client_credentials(&self) -> bool {
        matches!(self, AuthKind::ClientCredentials | AuthKind::Legacy)
    }
}

/// A bearer token together with its issuance time and lifetime.
///
/// Credentials are immutable. A refresh produces a new value that replaces the
/// old one wholesale.
///
/// ```rust
/// use chrono::{TimeDelta, Utc};
/// use ignis::{ApiCredentials, AuthKind};
///
/// let creds = ApiCredentials::new("abc", 3600, AuthKind::ClientCredentials);
/// assert!(!creds.is_expired());
/// assert!(creds.is_expired_at(Utc::now() + TimeDelta::seconds(3601)));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ApiCredentials {
    token: String,
    issued: DateTime<Utc>,
    expires_in: i64,
    kind: AuthKind,
}

impl ApiCredentials {
    /// Creates credentials issued now.
    pub fn new(token: impl Into<String>, expires_in: i64, kind: AuthKind) -> Self {
        Self::issued_at(token, Utc::now(), expires_in, kind)
    }

    /// Creates credentials with an explicit issuance time.
    pub fn issued_at(
        token: impl Into<String>,
        issued: DateTime<Utc>,
        expires_in: i64,
        kind: AuthKind,
    ) -> Self {
        Self {
            token: token.into(),
            issued,
            expires_in,
            kind,
        }
    }

    /// Obtains credentials with the client-credentials grant.
    ///
    /// Posts a form-encoded grant to `{host}/oauth2/token`, or to
    /// `{host}/oauth/token` when `legacy` is set. A missing `access_token` or
    /// `expires_in` in the response defaults to an empty token or a zero
    /// lifetime.
    pub async fn with_authentication(
        http_client: &reqwest::Client,
        config: &ClientCredentialsConfig,
        legacy: bool,
        host: &Url,
    ) -> Result<Self> {
        let (path, kind) = if legacy {
            (LEGACY_TOKEN_PATH, AuthKind::Legacy)
        } else {
            (TOKEN_PATH, AuthKind::ClientCredentials)
        };
        let url = host.join(path)?;

        tracing::debug!(url = %url, client_id = %config.client_id, "requesting client-credentials token");

        let response = http_client
            .post(url)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .header(ACCEPT, "application/json")
            .body(config.form_body())
            .send()
            .await?;

        let response = http::check_status(response).await?;
        let body: TokenResponse = http::read_json(response).await?;

        tracing::info!(expires_in = body.expires_in, ?kind, "authenticated");
        Ok(Self::new(body.access_token, body.expires_in, kind))
    }

    /// Returns the bearer token.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Returns when the token was issued.
    pub fn issued(&self) -> DateTime<Utc> {
        self.issued
    }

    /// Returns the token lifetime in seconds.
    pub fn expires_in(&self) -> i64 {
        self.expires_in
    }

    /// Returns how the credentials were obtained.
    pub fn kind(&self) -> AuthKind {
        self.kind
    }

    /// Returns the instant the token stops being valid.
    ///
    /// Lifetimes beyond chrono's range saturate: a huge positive `expires_in`
    /// never expires, a huge negative one is already expired.
    pub fn expires_at(&self) -> DateTime<Utc> {
        TimeDelta::try_seconds(self.expires_in)
            .and_then(|ttl| self.issued.checked_add_signed(ttl))
            .unwrap_or(if self.expires_in < 0 {
                DateTime::<Utc>::MIN_UTC
            } else {
                DateTime::<Utc>::MAX_UTC
            })
    }

    /// Returns `true` once `issued + expires_in` is not in the future.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Returns `true` if the token is expired at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at() <= now
    }

    /// Returns how long to wait before refreshing, `margin` ahead of expiry.
    pub fn refresh_delay(&self, margin: Duration) -> Duration {
        self.refresh_delay_at(Utc::now(), margin)
    }

    /// Like [`refresh_delay`](Self::refresh_delay), measured from `now`.
    pub fn refresh_delay_at(&self, now: DateTime<Utc>, margin: Duration) -> Duration {
        let margin = TimeDelta::from_std(margin).unwrap_or(TimeDelta::MAX);
        let refresh_at = self
            .expires_at()
            .checked_sub_signed(margin)
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        refresh_at
            .signed_duration_since(now)
            .to_std()
            .unwrap_or(Duration::ZERO)
    }
}

impl fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiCredentials")
            .field("token", &"[REDACTED]")
            .field("issued", &self.issued)
            .field("expires_in", &self.expires_in)
            .field("kind", &self.kind)
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: String,
    #[serde(default)]
    expires_in: i64,
}

/// OAuth 2.0 client-credentials configuration.
///
/// ## Example
///
/// ```rust,ignore
/// use ignis::{Client, ClientCredentialsConfig};
///
/// let client = Client::builder()
///     .client_credentials(ClientCredentialsConfig::new("client_id", "secret"))
///     .build()
///     .await?;
/// ```
#[derive(Clone)]
pub struct ClientCredentialsConfig {
    /// The OAuth client ID.
    pub client_id: String,

    /// The OAuth client secret. Wiped from memory on drop.
    pub client_secret: Zeroizing<String>,

    /// Optional space-separated scope list sent with the grant.
    pub scope: Option<String>,
}

impl ClientCredentialsConfig {
    /// Environment variable holding the client ID.
    pub const CLIENT_ID_VAR: &'static str = "FLAIR_CLIENT_ID";
    /// Environment variable holding the client secret.
    pub const CLIENT_SECRET_VAR: &'static str = "FLAIR_CLIENT_SECRET";
    /// Environment variable holding an optional scope list.
    pub const SCOPE_VAR: &'static str = "FLAIR_SCOPE";

    /// Creates a new client credentials configuration.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: Zeroizing::new(client_secret.into()),
            scope: None,
        }
    }

    /// Reads the configuration from `FLAIR_CLIENT_ID`, `FLAIR_CLIENT_SECRET`
    /// and, optionally, `FLAIR_SCOPE`.
    pub fn from_env() -> Result<Self> {
        let read = |name: &str| {
            std::env::var(name)
                .map_err(|_| Error::configuration(format!("environment variable {} not set", name)))
        };

        let mut config = Self::new(read(Self::CLIENT_ID_VAR)?, read(Self::CLIENT_SECRET_VAR)?);
        config.scope = std::env::var(Self::SCOPE_VAR).ok().filter(|s| !s.is_empty());
        Ok(config)
    }

    /// Sets the scope requested with the grant.
    #[must_use]
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    fn form_body(&self) -> String {
        let mut params = vec![
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("grant_type", "client_credentials"),
        ];
        if let Some(ref scope) = self.scope {
            params.push(("scope", scope.as_str()));
        }

        params
            .into_iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl fmt::Debug for ClientCredentialsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientCredentialsConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("scope", &self.scope)
            .finish()
    }
}
