//! End-to-end client scenarios.

use ignis::{ErrorKind, Room, TypeMapper};
use serde_json::json;
use wiremock::{
    Mock, ResponseTemplate,
    matchers::{header, method, path},
};

use crate::common::{FlairServer, attributes, long_lived_handler, room};

/// Authenticates with client credentials and lists rooms as typed wrappers.
#[tokio::test]
async fn test_client_credentials_list_rooms() {
    let api = FlairServer::start().await;
    api.mount_token("abc", 3600, 1).await;

    Mock::given(method("GET"))
        .and(path("/api/rooms"))
        .and(header("Authorization", "Bearer abc"))
        .and(header("Accept", "application/vnd.api+json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [room("1", "Office", 21.0), room("2", "Kitchen", 19.5)]
        })))
        .expect(1)
        .mount(&api.server)
        .await;

    let client = api.client().await.expect("client should authenticate");
    assert_eq!(client.credentials().token(), "abc");

    let rooms = client.list("rooms").await.expect("list should succeed");
    assert_eq!(rooms.len(), 2);

    let office = rooms[0].downcast_ref::<Room>().expect("rooms map to Room");
    assert_eq!(office.name(), Some("Office"));
    assert_eq!(office.set_point_c(), 21.0);
    assert_eq!(office.relationship("vents").map(|r| r.linked().len()), Some(1));

    let kitchen = rooms[1].downcast_ref::<Room>().expect("rooms map to Room");
    assert_eq!(kitchen.name(), Some("Kitchen"));

    client.close().await;
}

/// An empty mapper hands back generic resources for every type.
#[tokio::test]
async fn test_custom_mapper_falls_back() {
    let api = FlairServer::start().await;
    api.mount_token("abc", 3600, 1).await;

    Mock::given(method("GET"))
        .and(path("/api/rooms/1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"data": room("1", "Office", 21.0)})),
        )
        .mount(&api.server)
        .await;

    let client = ignis::Client::builder()
        .host(api.server.uri())
        .insecure()
        .client_credentials(ignis::ClientCredentialsConfig::new(
            crate::common::CLIENT_ID,
            crate::common::CLIENT_SECRET,
        ))
        .mapper(TypeMapper::new())
        .build()
        .await
        .expect("client should authenticate");

    let resource = client.get("rooms", "1").await.expect("get should succeed");
    assert!(resource.is::<ignis::Resource>());
    assert!(resource.downcast_ref::<Room>().is_none());
}

#[tokio::test]
async fn test_not_found_builds_nothing() {
    let api = FlairServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/vents/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"errors": ["not found"]})))
        .expect(1)
        .mount(&api.server)
        .await;

    let client = api
        .authorized_client(long_lived_handler("tok"))
        .await
        .expect("client should build");

    let err = client.get("vents", "missing").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn test_update_conflict_surfaces() {
    let api = FlairServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/api/rooms/1"))
        .respond_with(ResponseTemplate::new(409).set_body_string("stale"))
        .mount(&api.server)
        .await;

    let client = api
        .authorized_client(long_lived_handler("tok"))
        .await
        .expect("client should build");

    let err = client
        .update("rooms", "1", attributes(json!({"set-point-c": 23.0})))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert!(!err.is_retriable());
}

#[tokio::test]
async fn test_server_error_is_retriable() {
    let api = FlairServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/pucks"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&api.server)
        .await;

    let client = api
        .authorized_client(long_lived_handler("tok"))
        .await
        .expect("client should build");

    let err = client.list("pucks").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InternalServer);
    assert!(err.is_retriable());
    assert_eq!(err.body(), Some("maintenance"));
}

#[tokio::test]
async fn test_scoped_run_closes() {
    let api = FlairServer::start().await;
    api.mount_token("abc", 3600, 1).await;

    Mock::given(method("GET"))
        .and(path("/api/rooms"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .mount(&api.server)
        .await;

    let (rooms, client) = ignis::Client::builder()
        .host(api.server.uri())
        .insecure()
        .client_credentials(ignis::ClientCredentialsConfig::new(
            crate::common::CLIENT_ID,
            crate::common::CLIENT_SECRET,
        ))
        .run(|client| async move {
            let rooms = client.list_typed::<Room>().await?;
            Ok((rooms, client))
        })
        .await
        .expect("scoped run should succeed");

    assert!(rooms.is_empty());
    assert!(client.is_closed());
    assert_eq!(client.list("rooms").await.unwrap_err().kind(), ErrorKind::Closed);
}
