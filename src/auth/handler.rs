//! Pluggable handler for the authorization-code flow.

use std::{future::Future, pin::Pin, sync::Arc, time::Duration};

use super::ApiCredentials;
use crate::Error;

/// A type alias for the boxed future returned by OAuth handlers.
pub type CredentialsFuture<'a> =
    Pin<Box<dyn Future<Output = Result<ApiCredentials, Error>> + Send + 'a>>;

/// Default lead time between a refresh and the token's expiry.
pub const DEFAULT_REFRESH_MARGIN: Duration = Duration::from_secs(5);

/// Strategy for obtaining and refreshing credentials interactively.
///
/// The client-credentials grant is built into the client. Applications that
/// authenticate end users with the authorization-code flow implement this
/// trait and pass it to
/// [`ClientBuilder::oauth_handler`](crate::ClientBuilder::oauth_handler).
/// The client calls [`authorize`](Self::authorize) once while building, then
/// keeps the token fresh from a background task that wakes
/// [`refresh_margin`](Self::refresh_margin) before each expiry.
///
/// ## Object Safety
///
/// This trait is object-safe and is stored as `Arc<dyn OAuthHandler>`.
///
/// ## Example
///
/// ```rust
/// use ignis::{ApiCredentials, AuthKind, OAuthHandler};
/// use ignis::auth::CredentialsFuture;
///
/// struct RedirectHandler {
///     refresh_token: String,
/// }
///
/// impl OAuthHandler for RedirectHandler {
///     fn authorize(&self) -> CredentialsFuture<'_> {
///         Box::pin(async move {
///             // Open a browser, wait for the redirect, exchange the code...
///             Ok(ApiCredentials::new("access", 3600, AuthKind::Authorization))
///         })
///     }
///
///     fn refresh<'a>(&'a self, _current: &'a ApiCredentials) -> CredentialsFuture<'a> {
///         Box::pin(async move {
///             // Exchange self.refresh_token for a new access token...
///             let _ = &self.refresh_token;
///             Ok(ApiCredentials::new("access-2", 3600, AuthKind::Authorization))
///         })
///     }
/// }
/// ```
pub trait OAuthHandler: Send + Sync {
    /// Runs the authorization flow and returns the first credentials.
    fn authorize(&self) -> CredentialsFuture<'_>;

    /// Exchanges the current credentials for new ones.
    ///
    /// The default implementation fails with
    /// [`ErrorKind::NotImplemented`](crate::ErrorKind::NotImplemented).
    fn refresh<'a>(&'a self, current: &'a ApiCredentials) -> CredentialsFuture<'a> {
        let _ = current;
        Box::pin(async {
            Err(Error::not_implemented(
                "this OAuth handler does not support refreshing credentials",
            ))
        })
    }

    /// How long before expiry the background task refreshes.
    fn refresh_margin(&self) -> Duration {
        DEFAULT_REFRESH_MARGIN
    }
}

impl<T: OAuthHandler + ?Sized> OAuthHandler for Arc<T> {
    fn authorize(&self) -> CredentialsFuture<'_> {
        (**self).authorize()
    }

    fn refresh<'a>(&'a self, current: &'a ApiCredentials) -> CredentialsFuture<'a> {
        (**self).refresh(current)
    }

    fn refresh_margin(&self) -> Duration {
        (**self).refresh_margin()
    }
}

impl<T: OAuthHandler + ?Sized> OAuthHandler for Box<T> {
    fn authorize(&self) -> CredentialsFuture<'_> {
        (**self).authorize()
    }

    fn refresh<'a>(&'a self, current: &'a ApiCredentials) -> CredentialsFuture<'a> {
        (**self).refresh(current)
    }

    fn refresh_margin(&self) -> Duration {
        (**self).refresh_margin()
    }
}
