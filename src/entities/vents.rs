//! Vents.

use serde_json::json;

use super::{attributes, entity, i64_attr};
use crate::error::Result;

/// Reason attached to vent changes when the caller gives none.
const DEFAULT_REASON: &str = "ignis";

entity! {
    /// A smart vent.
    Vent => "vents"
}

impl Vent {
    /// How far open the vent is, 0 to 100.
    pub fn percent_open(&self) -> Option<i64> {
        i64_attr(self, "percent-open")
    }

    /// Returns `true` if the vent is fully open.
    pub fn is_open(&self) -> bool {
        self.percent_open() == Some(100)
    }

    /// Opens the vent to `percent`, recording `reason` (default `"ignis"`)
    /// as who asked.
    pub async fn set_percent_open(&mut self, percent: u8, reason: Option<&str>) -> Result<()> {
        let reason = format!("{} by {}", percent, reason.unwrap_or(DEFAULT_REASON));
        self.update_attributes(attributes([
            ("percent-open", json!(percent)),
            ("percent-open-reason", json!(reason)),
        ]))
        .await
    }
}
