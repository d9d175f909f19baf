//! Thermostats.

use super::{entity, i64_attr};

entity! {
    /// A wall thermostat linked to the home.
    Thermostat => "thermostats"
}

impl Thermostat {
    /// Number of vents kept static for this thermostat.
    pub fn static_vents(&self) -> Option<i64> {
        i64_attr(self, "static-vents")
    }
}
