//! Configuration types.
//!
//! - [`HttpConfig`]: timeouts and TLS settings for the built-in HTTP client
//! - [`ClientCredentialsConfig`](crate::ClientCredentialsConfig): lives in
//!   [`auth`](crate::auth) next to the grant that uses it

mod http;

pub use http::HttpConfig;
