//! Session store: the one authentication token every page sees.
//!
//! DESIGN
//! ======
//! `SessionStore` is a cheap-clone handle around shared state, so every page
//! holding a clone observes the same token. Each `login`/`logout` writes
//! through to [`TokenStorage`] so the next process start restores the
//! session.
//!
//! ERROR HANDLING
//! ==============
//! Storage failures never surface to callers. An unreadable or corrupted
//! store at startup yields an unauthenticated session, and any storage
//! failure switches the store to in-memory-only for the rest of the process.
//! Clearing is still attempted after that, so a token persisted earlier never
//! outlives a logout.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{info, warn};

use super::storage::{MemoryTokenStorage, TokenStorage};

struct SessionInner {
    token: Option<String>,
    storage: Arc<dyn TokenStorage>,
    persistent: bool,
}

#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<Mutex<SessionInner>>,
}

impl SessionStore {
    /// Restore the session persisted in `storage`.
    #[must_use]
    pub fn restore(storage: Arc<dyn TokenStorage>) -> Self {
        let (token, persistent) = match storage.load() {
            Ok(token) => (token, true),
            Err(e) => {
                warn!(error = %e, "session storage unusable, continuing with in-memory session");
                (None, false)
            }
        };
        if token.is_some() {
            info!("restored persisted session");
        }
        Self { inner: Arc::new(Mutex::new(SessionInner { token, storage, persistent })) }
    }

    /// A session that is never persisted.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::restore(Arc::new(MemoryTokenStorage::new()))
    }

    /// Store `token` and persist it. A blank token logs the session out.
    pub fn login(&self, token: impl Into<String>) {
        let token = token.into();
        let token = token.trim();
        if token.is_empty() {
            self.logout();
            return;
        }

        let mut inner = self.lock();
        inner.token = Some(token.to_owned());
        if inner.persistent {
            if let Err(e) = inner.storage.save(token) {
                warn!(error = %e, "failed to persist session token, keeping it in memory only");
                inner.persistent = false;
                // An older token may still be on disk; it must not come back on reload.
                if let Err(e) = inner.storage.clear() {
                    warn!(error = %e, "failed to clear previously persisted session token");
                }
            }
        }
    }

    /// Clear the token in memory and in storage. Storage is cleared even in
    /// in-memory-only mode, since an earlier token may have been persisted.
    pub fn logout(&self) {
        let mut inner = self.lock();
        inner.token = None;
        if let Err(e) = inner.storage.clear() {
            warn!(error = %e, "failed to clear persisted session token");
            inner.persistent = false;
        }
    }

    /// Current token, or `None` when unauthenticated.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.lock().token.clone()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.lock().token.is_some()
    }

    /// False once the store has fallen back to memory-only operation.
    #[must_use]
    pub fn is_persistent(&self) -> bool {
        self.lock().persistent
    }

    fn lock(&self) -> MutexGuard<'_, SessionInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.lock();
        f.debug_struct("SessionStore")
            .field("authenticated", &inner.token.is_some())
            .field("persistent", &inner.persistent)
            .finish_non_exhaustive()
    }
}
