//! Pucks.

use super::{bool_attr, entity, f64_attr, str_attr};

entity! {
    /// A puck: the room sensor and, for gateways, the hub.
    Puck => "pucks"
}

impl Puck {
    /// The LED colour.
    pub fn display_color(&self) -> Option<&str> {
        str_attr(self, "display-color")
    }

    /// Whether this puck is the home's gateway.
    pub fn is_gateway(&self) -> Option<bool> {
        bool_attr(self, "is-gateway")
    }

    /// The measured temperature in °C.
    pub fn temperature_c(&self) -> Option<f64> {
        f64_attr(self, "temperature-c")
    }
}
