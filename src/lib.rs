//! # Ignis
//!
//! Typed async client for the Flair smart-vent API.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use ignis::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> ignis::Result<()> {
//!     let client = Client::builder()
//!         .client_credentials(ClientCredentialsConfig::from_env()?)
//!         .build()
//!         .await?;
//!
//!     for mut room in client.list_typed::<Room>().await? {
//!         if room.name() == Some("Office") {
//!             room.set_temp(21.0).await?;
//!         }
//!     }
//!
//!     client.close().await;
//!     Ok(())
//! }
//! ```
//!
//! ## Key Concepts
//!
//! - **Authenticated by construction**: `ClientBuilder::build` runs the
//!   chosen OAuth flow, so every `Client` holds a token
//! - **Resources**: `Client::get`/`list` return `Box<dyn ApiResource>`, the
//!   typed wrapper the [`TypeMapper`] picked, or a generic [`Resource`]
//! - **Remote first**: `update_attributes`, `delete` and relationship
//!   mutations change local state only after the server accepts them
//!
//! ## Features
//!
//! - `rustls` (default): Use rustls for TLS
//! - `native-tls`: Use native TLS (OpenSSL on Linux, Secure Transport on macOS)

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

// Core modules
pub mod auth;
pub mod client;
pub mod config;
pub mod entities;
pub mod error;
pub mod resource;

// Testing utilities
pub mod testing;

// Prelude for convenient imports
pub mod prelude;

pub(crate) mod http;
pub(crate) mod user_agent;

// Re-export main types at crate root for convenience
pub use auth::{ApiCredentials, AuthKind, ClientCredentialsConfig, OAuthHandler};
pub use client::{Client, ClientBuilder};
pub use config::HttpConfig;
pub use entities::{HvacUnit, Puck, Room, Structure, Thermostat, Vent};
pub use error::{Error, ErrorKind};
pub use resource::{
    ApiResource, FromResource, Linkable, Relationship, Resource, ResourceIdentifier, TypeMapper,
    TypedResource,
};
