//! Token lifecycle scenarios.

use std::{sync::Arc, time::Duration};

use ignis::{ApiCredentials, AuthKind, Client, ErrorKind, testing::MockOAuthHandler};
use serde_json::json;
use wiremock::{
    Mock, ResponseTemplate,
    matchers::{header, method, path},
};

use crate::common::FlairServer;

/// A zero-lifetime token is re-requested before the next call.
#[tokio::test]
async fn test_expired_client_credentials_reauthenticate() {
    let api = FlairServer::start().await;
    api.mount_token("short", 0, 2).await;

    Mock::given(method("GET"))
        .and(path("/api/structures"))
        .and(header("Authorization", "Bearer short"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(1)
        .mount(&api.server)
        .await;

    let client = api.client().await.expect("client should authenticate");
    assert!(client.credentials().is_expired());

    client.list("structures").await.expect("list should succeed");
}

/// The background task swaps in refreshed credentials ahead of expiry.
#[tokio::test]
async fn test_background_refresh_swaps_token() {
    let api = FlairServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/rooms"))
        .and(header("Authorization", "Bearer refreshed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(1)
        .mount(&api.server)
        .await;

    let handler = Arc::new(
        MockOAuthHandler::new(ApiCredentials::new("initial", 2, AuthKind::Authorization))
            .with_refreshed(ApiCredentials::new("refreshed", 3600, AuthKind::Authorization)),
    );

    let client = Client::builder()
        .host(api.server.uri())
        .insecure()
        .auth_mode(AuthKind::Authorization)
        .oauth_handler(handler.clone())
        .build()
        .await
        .expect("client should build");

    for _ in 0..100 {
        if client.credentials().token() == "refreshed" {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    assert_eq!(client.credentials().token(), "refreshed");
    assert_eq!(handler.authorize_count(), 1);
    assert_eq!(handler.refresh_count(), 1);

    client.list("rooms").await.expect("list should succeed");
    client.close().await;
}

/// A handler without refresh support surfaces NotImplemented once the token expires.
#[tokio::test]
async fn test_expired_token_without_refresh_support() {
    struct AuthorizeOnly;

    impl ignis::OAuthHandler for AuthorizeOnly {
        fn authorize(&self) -> ignis::auth::CredentialsFuture<'_> {
            Box::pin(async { Ok(ApiCredentials::new("once", 0, AuthKind::Authorization)) })
        }
    }

    let api = FlairServer::start().await;
    let client = Client::builder()
        .host(api.server.uri())
        .insecure()
        .auth_mode(AuthKind::Authorization)
        .oauth_handler(AuthorizeOnly)
        .background_refresh(false)
        .build()
        .await
        .expect("client should build");

    let err = client.get("rooms", "1").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotImplemented);
}

#[tokio::test]
async fn test_rejected_credentials_fail_build() {
    let api = FlairServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth2/token"))
        .respond_with(ResponseTemplate::new(400).set_body_string("invalid_scope"))
        .mount(&api.server)
        .await;

    let err = api.client().await.unwrap_err();
    let err = err.downcast::<ignis::Error>().expect("client error");
    assert_eq!(err.kind(), ErrorKind::InvalidScope);
}
