//! HVAC units (mini-splits and similar).

use serde_json::json;

use super::{attributes, entity, f64_attr, str_attr};
use crate::error::Result;

entity! {
    /// An HVAC unit controlled through Flair, typically a mini-split.
    HvacUnit => "hvac-units"
}

/// Maps a Home Assistant HVAC mode to the Flair mode name.
fn flair_mode(mode: &str) -> Option<&'static str> {
    match mode {
        "auto" => Some("Auto"),
        "cool" => Some("Cool"),
        "heat" => Some("Heat"),
        "fan_only" => Some("Fan"),
        _ => None,
    }
}

impl HvacUnit {
    /// The Flair mode: `Auto`, `Cool`, `Heat` or `Fan`.
    pub fn mode(&self) -> Option<&str> {
        str_attr(self, "mode")
    }

    /// `On` or `Off`.
    pub fn power(&self) -> Option<&str> {
        str_attr(self, "power")
    }

    /// The target temperature, or `-1.0` when none is set.
    pub fn temperature(&self) -> f64 {
        f64_attr(self, "temperature").unwrap_or(-1.0)
    }

    /// The fan speed setting.
    pub fn fan_speed(&self) -> Option<&str> {
        str_attr(self, "fan-speed")
    }

    /// The effective mode: `Off` while powered off, otherwise [`mode`](Self::mode).
    pub fn hvac_mode(&self) -> Option<&str> {
        if self.power() == Some("Off") {
            Some("Off")
        } else {
            self.mode()
        }
    }

    /// Switches to a Home Assistant mode: `auto`, `cool`, `heat`, `fan_only`
    /// or `off`.
    ///
    /// `off` powers the unit down and keeps its mode. Any other mode powers
    /// it on. Unknown mode names keep the current mode.
    pub async fn set_hvac_mode(&mut self, mode: &str) -> Result<()> {
        let current_mode = self.mode().unwrap_or("Auto").to_string();
        let mut power = self.power().unwrap_or("Off").to_string();

        if mode == "off" {
            power = "Off".to_string();
        } else if power == "Off" {
            power = "On".to_string();
        }

        let new_mode = flair_mode(mode).map(str::to_string).unwrap_or(current_mode);
        self.update_attributes(attributes([("mode", json!(new_mode)), ("power", json!(power))]))
            .await
    }
}
