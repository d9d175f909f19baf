//! Background token refresh for the authorization-code flow.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::{OAuthHandler, store::CredentialStore};

/// Wait before retrying after a failed refresh.
pub(crate) const RETRY_DELAY: Duration = Duration::from_secs(60);

/// Shortest wait between two successful refreshes.
///
/// Credentials that expire within the refresh margin would otherwise be
/// refreshed back to back.
pub(crate) const MIN_REFRESH_INTERVAL: Duration = Duration::from_secs(30);

/// A running refresh loop owned by a client.
///
/// The loop sleeps until the handler's refresh margin before the current
/// token expires, asks the handler for new credentials and swaps them in. It
/// never terminates on its own; [`shutdown`](Self::shutdown) cancels and joins
/// it, and dropping the task cancels it.
pub(crate) struct RefreshTask {
    cancel: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl RefreshTask {
    /// Spawns the loop on the current tokio runtime.
    pub(crate) fn spawn(handler: Arc<dyn OAuthHandler>, store: Arc<CredentialStore>) -> Self {
        let cancel = CancellationToken::new();
        let handle = tokio::spawn(run(handler, store, cancel.clone()));
        Self {
            cancel,
            handle: Some(handle),
        }
    }

    /// Cancels the loop and waits for it to exit.
    pub(crate) async fn shutdown(mut self) {
        self.cancel.cancel();
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                tracing::warn!(error = %e, "token refresh task ended abnormally");
            }
        }
    }
}

impl Drop for RefreshTask {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn run(handler: Arc<dyn OAuthHandler>, store: Arc<CredentialStore>, cancel: CancellationToken) {
    tracing::debug!("token refresh task started");

    let mut floor = Duration::ZERO;

    loop {
        let current = store.load();
        let wait = current.refresh_delay(handler.refresh_margin()).max(floor);
        tracing::debug!(seconds = wait.as_secs(), "sleeping until next token refresh");

        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = tokio::time::sleep(wait) => {},
        }

        let guard = tokio::select! {
            _ = cancel.cancelled() => break,
            guard = store.lock_refresh() => guard,
        };

        // An on-demand refresh may have won the race while we slept.
        if !Arc::ptr_eq(&current, &store.load()) {
            continue;
        }

        let outcome = tokio::select! {
            _ = cancel.cancelled() => break,
            outcome = handler.refresh(&current) => outcome,
        };

        match outcome {
            Ok(fresh) => {
                tracing::info!(expires_in = fresh.expires_in(), "refreshed access token");
                store.replace(fresh);
                floor = MIN_REFRESH_INTERVAL;
            },
            Err(e) => {
                tracing::warn!(error = %e, "token refresh failed, retrying in {:?}", RETRY_DELAY);
                drop(guard);
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    _ = tokio::time::sleep(RETRY_DELAY) => {},
                }
            },
        }
    }

    tracing::debug!("token refresh task stopped");
}
