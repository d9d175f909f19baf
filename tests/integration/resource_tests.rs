//! Resource and relationship round trips.

use ignis::{Linkable, ResourceIdentifier, Room, Vent};
use serde_json::json;
use wiremock::{
    Mock, ResponseTemplate,
    matchers::{body_json, method, path},
};

use crate::common::{FlairServer, attributes, long_lived_handler, room};

/// Updating then refreshing yields exactly what the server holds.
#[tokio::test]
async fn test_update_then_refresh_round_trip() {
    let api = FlairServer::start().await;
    let updated = room("1", "Office", 23.0);

    Mock::given(method("GET"))
        .and(path("/api/rooms/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": updated})))
        .mount(&api.server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/api/rooms/1"))
        .and(body_json(json!({
            "data": {"type": "rooms", "attributes": {"set-point-c": 23.0}, "relationships": {}}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": updated})))
        .expect(1)
        .mount(&api.server)
        .await;

    let client = api
        .authorized_client(long_lived_handler("tok"))
        .await
        .expect("client should build");

    let mut office: Room = client.get_typed("1").await.expect("get should succeed");
    office.set_temp(23.0).await.expect("update should succeed");
    let after_update = office.attributes().clone();

    office.refresh().await.expect("refresh should succeed");

    assert_eq!(office.attributes(), &after_update);
    assert_eq!(office.attributes(), &attributes(updated["attributes"].clone()));
    assert_eq!(office.set_point_c(), 23.0);
}

/// Relationship mutations go to the self link and update the local list.
#[tokio::test]
async fn test_relationship_mutations() {
    let api = FlairServer::start().await;
    let link = "/api/rooms/1/relationships/vents";

    Mock::given(method("GET"))
        .and(path("/api/rooms/1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"data": room("1", "Office", 21.0)})),
        )
        .mount(&api.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/vents/v2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"type": "vents", "id": "v2", "attributes": {"name": "Desk", "percent-open": 100}}
        })))
        .mount(&api.server)
        .await;
    Mock::given(method("POST"))
        .and(path(link))
        .and(body_json(json!({"data": [{"type": "vents", "id": "v2"}]})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&api.server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(link))
        .and(body_json(json!({"data": [{"type": "vents", "id": "1-v1"}]})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&api.server)
        .await;

    let client = api
        .authorized_client(long_lived_handler("tok"))
        .await
        .expect("client should build");

    let mut office = client.get("rooms", "1").await.expect("get should succeed");
    let desk: Vent = client.get_typed("v2").await.expect("get should succeed");
    assert!(desk.is_open());

    let vents = office.relationship_mut("vents").expect("rooms have vents");
    vents.add([&desk]).await.expect("add should succeed");
    assert!(vents.contains(&desk));

    vents
        .delete(&ResourceIdentifier::new("vents", "1-v1"))
        .await
        .expect("delete should succeed");
    assert_eq!(vents.linked(), &[desk.relationship_identifier()]);
}

#[tokio::test]
async fn test_delete_marks_resource() {
    let api = FlairServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/pucks/p1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&api.server)
        .await;

    let client = api
        .authorized_client(long_lived_handler("tok"))
        .await
        .expect("client should build");

    let mut puck = client.resource("pucks", "p1");
    puck.delete().await.expect("delete should succeed");
    assert!(puck.is_deleted());
}
