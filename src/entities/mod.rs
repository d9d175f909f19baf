//! Typed wrappers for the Flair resource types.
//!
//! Each wrapper is a newtype over [`Resource`] that dereferences to it, so
//! `refresh`, `update_attributes`, `delete` and relationship access work
//! unchanged. The wrappers only add attribute accessors and setters named
//! after what they control.
//!
//! | Wrapper | Resource type |
//! |---------|---------------|
//! | [`Structure`] | `structures` |
//! | [`Room`] | `rooms` |
//! | [`Vent`] | `vents` |
//! | [`Puck`] | `pucks` |
//! | [`Thermostat`] | `thermostats` |
//! | [`HvacUnit`] | `hvac-units` |

mod hvac;
mod pucks;
mod rooms;
mod structures;
mod thermostats;
mod vents;

pub use hvac::HvacUnit;
pub use pucks::Puck;
pub use rooms::Room;
pub use structures::Structure;
pub use thermostats::Thermostat;
pub use vents::Vent;

use serde_json::{Map, Value};

use crate::resource::Resource;

macro_rules! entity {
    ($(#[$meta:meta])* $name:ident => $resource_type:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $name(crate::resource::Resource);

        impl $name {
            /// The display name.
            pub fn name(&self) -> Option<&str> {
                self.0.attribute("name").and_then(serde_json::Value::as_str)
            }
        }

        impl std::ops::Deref for $name {
            type Target = crate::resource::Resource;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl std::ops::DerefMut for $name {
            fn deref_mut(&mut self) -> &mut Self::Target {
                &mut self.0
            }
        }

        impl crate::resource::Linkable for $name {
            fn relationship_identifier(&self) -> crate::resource::ResourceIdentifier {
                crate::resource::Linkable::relationship_identifier(&self.0)
            }
        }

        impl crate::resource::ApiResource for $name {
            fn resource(&self) -> &crate::resource::Resource {
                &self.0
            }

            fn resource_mut(&mut self) -> &mut crate::resource::Resource {
                &mut self.0
            }

            fn into_resource(self: Box<Self>) -> crate::resource::Resource {
                self.0
            }
        }

        impl crate::resource::FromResource for $name {
            fn from_resource(resource: crate::resource::Resource) -> Self {
                Self(resource)
            }
        }

        impl crate::resource::TypedResource for $name {
            const RESOURCE_TYPE: &'static str = $resource_type;
        }
    };
}

pub(crate) use entity;

fn str_attr<'a>(resource: &'a Resource, key: &str) -> Option<&'a str> {
    resource.attribute(key).and_then(Value::as_str)
}

fn f64_attr(resource: &Resource, key: &str) -> Option<f64> {
    resource.attribute(key).and_then(Value::as_f64)
}

fn bool_attr(resource: &Resource, key: &str) -> Option<bool> {
    resource.attribute(key).and_then(Value::as_bool)
}

fn i64_attr(resource: &Resource, key: &str) -> Option<i64> {
    resource.attribute(key).and_then(Value::as_i64)
}

fn attributes<const N: usize>(pairs: [(&str, Value); N]) -> Map<String, Value> {
    pairs.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
pub(crate) mod test_support {
    use serde_json::{Map, Value};

    use crate::resource::{FromResource, Resource, TypedResource};

    /// A detached wrapper with the given attributes.
    pub(crate) fn detached<T: TypedResource>(attributes: Value) -> T {
        let Value::Object(attributes) = attributes else {
            panic!("attributes must be an object");
        };
        T::from_resource(Resource::detached(T::RESOURCE_TYPE, "1", attributes))
    }

    pub(crate) fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("not an object: {}", other),
        }
    }
}
