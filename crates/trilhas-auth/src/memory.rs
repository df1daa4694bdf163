use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::session::{Session, SessionStore, SessionStoreError};

/// Process-local [`SessionStore`] for tests and local development.
///
/// Counts lookups so tests can assert the store was never consulted.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<String, Session>>,
    lookups: AtomicUsize,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `session` under its own token, replacing any previous entry.
    pub fn insert(&self, session: Session) {
        if let Ok(mut sessions) = self.sessions.write() {
            sessions.insert(session.token.clone(), session);
        }
    }

    pub fn remove(&self, token: &str) -> Option<Session> {
        self.sessions.write().ok()?.remove(token)
    }

    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn lookup(&self, token: &str) -> Result<Option<Session>, SessionStoreError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        let sessions = self
            .sessions
            .read()
            .map_err(|e| SessionStoreError::Unavailable(e.to_string()))?;
        Ok(sessions.get(token).cloned())
    }
}
