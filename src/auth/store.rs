//! Shared holder for the current credentials.

use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::{Mutex, MutexGuard};

use super::ApiCredentials;

/// Holds the live credentials of one client.
///
/// Readers take a snapshot `Arc`; writers swap in a whole new value, so a
/// reader never observes a half-updated credential. Refreshes are serialized
/// through [`lock_refresh`](Self::lock_refresh).
pub(crate) struct CredentialStore {
    current: RwLock<Arc<ApiCredentials>>,
    refresh_lock: Mutex<()>,
}

impl CredentialStore {
    pub(crate) fn new(initial: ApiCredentials) -> Self {
        Self {
            current: RwLock::new(Arc::new(initial)),
            refresh_lock: Mutex::new(()),
        }
    }

    /// Returns a snapshot of the current credentials.
    pub(crate) fn load(&self) -> Arc<ApiCredentials> {
        self.current.read().clone()
    }

    /// Replaces the current credentials.
    pub(crate) fn replace(&self, credentials: ApiCredentials) {
        *self.current.write() = Arc::new(credentials);
    }

    /// Waits for exclusive refresh rights.
    pub(crate) async fn lock_refresh(&self) -> MutexGuard<'_, ()> {
        self.refresh_lock.lock().await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::AuthKind;

    #[test]
    fn test_replace_swaps_snapshot() {
        let store = CredentialStore::new(ApiCredentials::new("one", 60, AuthKind::Authorization));
        let before = store.load();

        store.replace(ApiCredentials::new("two", 60, AuthKind::Authorization));

        assert_eq!(before.token(), "one");
        assert_eq!(store.load().token(), "two");
        assert!(!Arc::ptr_eq(&before, &store.load()));
    }

    #[tokio::test]
    async fn test_refresh_lock_is_exclusive() {
        let store = CredentialStore::new(ApiCredentials::new("one", 60, AuthKind::Authorization));
        let guard = store.lock_refresh().await;
        assert!(store.refresh_lock.try_lock().is_err());
        drop(guard);
        assert!(store.refresh_lock.try_lock().is_ok());
    }
}
