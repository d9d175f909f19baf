//! Prelude module for convenient imports.
//!
//! ```rust
//! use ignis::prelude::*;
//! ```

pub use crate::{
    auth::{ApiCredentials, AuthKind, ClientCredentialsConfig, OAuthHandler},
    client::{Client, ClientBuilder},
    config::HttpConfig,
    entities::{HvacUnit, Puck, Room, Structure, Thermostat, Vent},
    error::{Error, ErrorKind, Result},
    resource::{
        ApiResource, FromResource, Linkable, Relationship, Resource, ResourceIdentifier,
        TypeMapper, TypedResource,
    },
};
