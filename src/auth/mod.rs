//! Authentication and credentials.
//!
//! - [`ApiCredentials`]: a bearer token with issuance time and lifetime
//! - [`AuthKind`]: how credentials were obtained, and which flow a client uses
//! - [`ClientCredentialsConfig`]: client ID and secret for the built-in grant
//! - [`OAuthHandler`]: pluggable authorization-code flow with background refresh
//!
//! ## Client Credentials
//!
//! ```rust,ignore
//! use ignis::{Client, ClientCredentialsConfig};
//!
//! let client = Client::builder()
//!     .client_credentials(ClientCredentialsConfig::from_env()?)
//!     .build()
//!     .await?;
//! ```
//!
//! ## Authorization Code
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use ignis::{AuthKind, Client};
//!
//! let client = Client::builder()
//!     .auth_mode(AuthKind::Authorization)
//!     .oauth_handler(Arc::new(MyRedirectHandler::new()))
//!     .build()
//!     .await?;
//! ```

mod credentials;
mod handler;
pub(crate) mod refresh;
pub(crate) mod store;

pub use credentials::{ApiCredentials, AuthKind, ClientCredentialsConfig};
pub use handler::{CredentialsFuture, DEFAULT_REFRESH_MARGIN, OAuthHandler};
