//! Rooms.

use serde_json::json;

use super::{attributes, bool_attr, entity, f64_attr};
use crate::error::Result;

entity! {
    /// A room: the unit Flair schedules and sets temperatures for.
    Room => "rooms"
}

impl Room {
    /// The set point in °C, or `-1.0` when none is set.
    pub fn set_point_c(&self) -> f64 {
        f64_attr(self, "set-point-c").unwrap_or(-1.0)
    }

    /// The measured temperature in °C.
    pub fn current_temperature_c(&self) -> Option<f64> {
        f64_attr(self, "current-temperature-c")
    }

    /// The measured relative humidity.
    pub fn current_humidity(&self) -> Option<f64> {
        f64_attr(self, "current-humidity")
    }

    /// Whether the room is actively conditioned.
    pub fn is_active(&self) -> Option<bool> {
        bool_attr(self, "active")
    }

    /// Sets the room's set point in °C.
    pub async fn set_temp(&mut self, temp_c: f64) -> Result<()> {
        self.update_attributes(attributes([("set-point-c", json!(temp_c))])).await
    }
}


#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod wiremock_tests {
    use serde_json::json;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{body_json, method, path},
    };

    use super::*;
    use crate::client::tests::create_mock_client;

    #[tokio::test]
    async fn test_set_temp_patches_set_point() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/api/rooms/1"))
            .and(body_json(json!({
                "data": {"type": "rooms", "attributes": {"set-point-c": 22.5}, "relationships": {}}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {"type": "rooms", "id": "1", "attributes": {"name": "Office", "set-point-c": 22.5}}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = create_mock_client(&server).await;
        let mut room: Room = client.resource_typed("1");
        room.set_temp(22.5).await.unwrap();

        assert_eq!(room.set_point_c(), 22.5);
        assert_eq!(room.name(), Some("Office"));
    }
}
