//! Scripted OAuth handler.

use std::{
    collections::VecDeque,
    sync::atomic::{AtomicUsize, Ordering},
    time::Duration,
};

use parking_lot::Mutex;

use crate::{
    ApiCredentials, Error, ErrorKind, OAuthHandler,
    auth::{CredentialsFuture, DEFAULT_REFRESH_MARGIN},
};

/// An [`OAuthHandler`] that replays scripted credentials.
///
/// [`authorize`](OAuthHandler::authorize) always returns the initial
/// credentials. Each [`refresh`](OAuthHandler::refresh) pops the next
/// scripted credentials, and fails with [`ErrorKind::InvalidAuth`] once the
/// script runs out.
///
/// ## Example
///
/// ```rust
/// use ignis::{ApiCredentials, AuthKind};
/// use ignis::testing::MockOAuthHandler;
///
/// let handler = MockOAuthHandler::new(ApiCredentials::new("a", 10, AuthKind::Authorization))
///     .with_refreshed(ApiCredentials::new("b", 3600, AuthKind::Authorization));
///
/// assert_eq!(handler.initial().token(), "a");
/// assert_eq!(handler.refresh_count(), 0);
/// ```
pub struct MockOAuthHandler {
    initial: ApiCredentials,
    refreshed: Mutex<VecDeque<ApiCredentials>>,
    margin: Duration,
    authorize_calls: AtomicUsize,
    refresh_calls: AtomicUsize,
}

impl MockOAuthHandler {
    /// Creates a handler that authorizes with `initial`.
    pub fn new(initial: ApiCredentials) -> Self {
        Self {
            initial,
            refreshed: Mutex::new(VecDeque::new()),
            margin: DEFAULT_REFRESH_MARGIN,
            authorize_calls: AtomicUsize::new(0),
            refresh_calls: AtomicUsize::new(0),
        }
    }

    /// Queues credentials for the next refresh.
    #[must_use]
    pub fn with_refreshed(self, credentials: ApiCredentials) -> Self {
        self.refreshed.lock().push_back(credentials);
        self
    }

    /// Overrides the refresh margin.
    #[must_use]
    pub fn with_margin(mut self, margin: Duration) -> Self {
        self.margin = margin;
        self
    }

    /// The credentials returned by `authorize`.
    pub fn initial(&self) -> &ApiCredentials {
        &self.initial
    }

    /// Number of `authorize` calls so far.
    pub fn authorize_count(&self) -> usize {
        self.authorize_calls.load(Ordering::SeqCst)
    }

    /// Number of `refresh` calls so far, successful or not.
    pub fn refresh_count(&self) -> usize {
        self.refresh_calls.load(Ordering::SeqCst)
    }
}

impl std::fmt::Debug for MockOAuthHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockOAuthHandler")
            .field("remaining", &self.refreshed.lock().len())
            .field("authorize_calls", &self.authorize_count())
            .field("refresh_calls", &self.refresh_count())
            .finish()
    }
}

impl OAuthHandler for MockOAuthHandler {
    fn authorize(&self) -> CredentialsFuture<'_> {
        self.authorize_calls.fetch_add(1, Ordering::SeqCst);
        let credentials = self.initial.clone();
        Box::pin(async move { Ok(credentials) })
    }

    fn refresh<'a>(&'a self, _current: &'a ApiCredentials) -> CredentialsFuture<'a> {
        self.refresh_calls.fetch_add(1, Ordering::SeqCst);
        let next = self.refreshed.lock().pop_front();
        Box::pin(async move {
            next.ok_or_else(|| {
                Error::new(ErrorKind::InvalidAuth, "no refreshed credentials scripted")
            })
        })
    }

    fn refresh_margin(&self) -> Duration {
        self.margin
    }
}
