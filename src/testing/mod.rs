//! Testing utilities for the Flair client.
//!
//! - [`MockOAuthHandler`]: a scripted [`OAuthHandler`](crate::OAuthHandler)
//!   for exercising the authorization-code flow without a browser
//!
//! ## Quick Start
//!
//! ```rust
//! use ignis::{ApiCredentials, AuthKind};
//! use ignis::testing::MockOAuthHandler;
//!
//! let handler = MockOAuthHandler::new(ApiCredentials::new("first", 3600, AuthKind::Authorization))
//!     .with_refreshed(ApiCredentials::new("second", 3600, AuthKind::Authorization));
//!
//! assert_eq!(handler.authorize_count(), 0);
//! ```

mod mock_handler;

pub use mock_handler::MockOAuthHandler;
