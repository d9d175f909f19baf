//! Structures (homes).

use serde_json::json;

use super::{attributes, bool_attr, entity, str_attr};
use crate::error::Result;

entity! {
    /// A structure: the home that owns rooms, vents and pucks.
    Structure => "structures"
}

impl Structure {
    /// `"C"` or `"F"`.
    pub fn temperature_scale(&self) -> Option<&str> {
        str_attr(self, "temperature-scale")
    }

    /// Whether anyone is home.
    pub fn is_home(&self) -> Option<bool> {
        bool_attr(self, "home")
    }

    /// The structure-wide heat/cool mode.
    pub fn structure_heat_cool_mode(&self) -> Option<&str> {
        str_attr(self, "structure-heat-cool-mode")
    }

    /// The control mode, e.g. `"auto"` or `"manual"`.
    pub fn mode(&self) -> Option<&str> {
        str_attr(self, "mode")
    }

    /// Marks the home occupied or away.
    pub async fn set_home(&mut self, home: bool) -> Result<()> {
        self.update_attributes(attributes([("home", json!(home))])).await
    }

    /// Switches the control mode.
    pub async fn set_mode(&mut self, mode: &str) -> Result<()> {
        self.update_attributes(attributes([("mode", json!(mode))])).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::entities::test_support::detached;

    #[test]
    fn test_accessors() {
        let home: Structure = detached(json!({
            "name": "Home",
            "temperature-scale": "C",
            "home": true,
            "structure-heat-cool-mode": "heat",
            "mode": "auto"
        }));
        assert_eq!(home.temperature_scale(), Some("C"));
        assert_eq!(home.is_home(), Some(true));
        assert_eq!(home.structure_heat_cool_mode(), Some("heat"));
        assert_eq!(home.mode(), Some("auto"));
    }
}
