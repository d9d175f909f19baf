//! Error types for the client.
//!
//! Every fallible operation returns [`Error`], which carries an [`ErrorKind`]
//! for matching and, for HTTP failures, the status and response body.
//!
//! HTTP statuses map to kinds the same way for the token endpoint and for
//! every resource call:
//!
//! ```rust
//! use ignis::ErrorKind;
//!
//! assert_eq!(ErrorKind::from_http_status(204), None);
//! assert_eq!(ErrorKind::from_http_status(404), Some(ErrorKind::NotFound));
//! assert_eq!(ErrorKind::from_http_status(503), Some(ErrorKind::InternalServer));
//! ```

mod core;
mod kind;

pub use self::core::Error;
pub use kind::ErrorKind;

/// A specialized `Result` type for client operations.
pub type Result<T> = std::result::Result<T, Error>;
