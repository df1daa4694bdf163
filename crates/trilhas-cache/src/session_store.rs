use async_trait::async_trait;
use chrono::Utc;
use std::time::Duration;
use tracing::{debug, instrument};
use trilhas_auth::{Session, SessionStore, SessionStoreError};

use crate::keys;
use crate::redis::{CacheError, RedisCache};

/// [`SessionStore`] backed by Redis.
///
/// Each session lives under a key derived from its token and expires in Redis
/// together with the session itself.
#[derive(Clone, Debug)]
pub struct RedisSessionStore {
    cache: RedisCache,
    prefix: String,
}

impl RedisSessionStore {
    pub fn new(cache: RedisCache, prefix: impl Into<String>) -> Self {
        Self {
            cache,
            prefix: prefix.into(),
        }
    }

    fn key(&self, token: &str) -> String {
        keys::sessions::by_token(&self.prefix, token)
    }

    /// Writes `session`, keyed by its token, with a TTL matching its
    /// remaining lifetime.
    #[instrument(skip(self, session), fields(user_id = %session.user_id))]
    pub async fn put(&self, session: &Session) -> Result<(), CacheError> {
        let remaining = (session.expires_at - Utc::now())
            .to_std()
            .unwrap_or(Duration::ZERO);
        self.cache
            .set_with_ttl(&self.key(&session.token), session, remaining)
            .await
    }

    /// Removes the session for `token`. Revoking an unknown token is not an error.
    pub async fn revoke(&self, token: &str) -> Result<(), CacheError> {
        self.cache.invalidate(&self.key(token)).await?;
        debug!("Session revoked");
        Ok(())
    }
}

impl From<CacheError> for SessionStoreError {
    fn from(e: CacheError) -> Self {
        match e {
            CacheError::Connection(e) => SessionStoreError::Unavailable(e.to_string()),
            CacheError::Serialization(e) => SessionStoreError::Decode(e.to_string()),
        }
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn lookup(&self, token: &str) -> Result<Option<Session>, SessionStoreError> {
        Ok(self.cache.try_get(&self.key(token)).await?)
    }
}
