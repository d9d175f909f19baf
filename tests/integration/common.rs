//! Common test harness: a mock Flair API and helpers to build clients for it.

use std::sync::Once;

use anyhow::{Context, Result};
use ignis::{ApiCredentials, AuthKind, Client, ClientCredentialsConfig, testing::MockOAuthHandler};
use serde_json::{Value, json};
use tracing_subscriber::EnvFilter;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_string_contains, method, path},
};

pub const CLIENT_ID: &str = "integration-client";
pub const CLIENT_SECRET: &str = "integration-secret";

static TRACING: Once = Once::new();

/// Installs a test-friendly subscriber once, honouring `RUST_LOG`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// A mock Flair API.
pub struct FlairServer {
    pub server: MockServer,
}

impl FlairServer {
    pub async fn start() -> Self {
        init_tracing();
        Self {
            server: MockServer::start().await,
        }
    }

    /// Serves the client-credentials grant, expecting `calls` token requests.
    pub async fn mount_token(&self, token: &str, expires_in: i64, calls: u64) {
        Mock::given(method("POST"))
            .and(path("/oauth2/token"))
            .and(body_string_contains(format!("client_id={}", CLIENT_ID)))
            .and(body_string_contains("grant_type=client_credentials"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": token,
                "expires_in": expires_in,
                "token_type": "bearer"
            })))
            .expect(calls)
            .mount(&self.server)
            .await;
    }

    /// Builds a client-credentials client against this server.
    pub async fn client(&self) -> Result<Client> {
        Client::builder()
            .host(self.server.uri())
            .insecure()
            .client_credentials(ClientCredentialsConfig::new(CLIENT_ID, CLIENT_SECRET))
            .build()
            .await
            .context("client-credentials client should build")
    }

    /// Builds an authorization-flow client with a scripted handler.
    pub async fn authorized_client(&self, handler: MockOAuthHandler) -> Result<Client> {
        Client::builder()
            .host(self.server.uri())
            .insecure()
            .auth_mode(AuthKind::Authorization)
            .oauth_handler(handler)
            .background_refresh(false)
            .build()
            .await
            .context("authorization client should build")
    }
}

/// A handler that authorizes once with a long-lived token.
pub fn long_lived_handler(token: &str) -> MockOAuthHandler {
    MockOAuthHandler::new(ApiCredentials::new(token, 3600, AuthKind::Authorization))
}

/// A room resource object.
pub fn room(id: &str, name: &str, set_point: f64) -> Value {
    json!({
        "type": "rooms",
        "id": id,
        "attributes": {
            "name": name,
            "set-point-c": set_point,
            "current-temperature-c": 20.5,
            "active": true
        },
        "relationships": {
            "vents": {
                "links": {
                    "self": format!("/api/rooms/{}/relationships/vents", id),
                    "related": format!("/api/rooms/{}/vents", id)
                },
                "data": [{"type": "vents", "id": format!("{}-v1", id)}]
            },
            "structure": {
                "links": {"related": format!("/api/rooms/{}/structure", id)},
                "data": {"type": "structures", "id": "home"}
            }
        }
    })
}

/// Converts a JSON object literal into an attribute map.
pub fn attributes(value: Value) -> serde_json::Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => serde_json::Map::new(),
    }
}
