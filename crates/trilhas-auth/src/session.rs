//! Server-side session records and the store they live in.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use trilhas_models::{Role, UserId};

/// A server-side record proving a user previously authenticated.
///
/// Sessions are issued elsewhere and are immutable once stored; this crate
/// only reads them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user_id: UserId,
    pub display_name: String,
    pub email: String,
    pub role: Role,
    pub permissions: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// A session whose `expires_at` is not after `now` is expired.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SessionStoreError {
    #[error("session store unavailable: {0}")]
    Unavailable(String),

    #[error("stored session could not be decoded: {0}")]
    Decode(String),
}

/// Shared key-value store mapping a session token to its [`Session`].
///
/// Implementations must be safe for concurrent use and must not hold
/// process-wide locks across I/O.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Looks up the session keyed by the exact `token` string.
    async fn lookup(&self, token: &str) -> Result<Option<Session>, SessionStoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn session_expiring_at(expires_at: DateTime<Utc>) -> Session {
        Session {
            token: "t".to_string(),
            user_id: UserId::new(),
            display_name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            role: Role::Student,
            permissions: vec![],
            created_at: expires_at - Duration::hours(1),
            expires_at,
        }
    }

    #[test]
    fn test_is_expired_at() {
        let now = Utc::now();
        assert!(session_expiring_at(now - Duration::seconds(1)).is_expired_at(now));
        assert!(session_expiring_at(now).is_expired_at(now));
        assert!(!session_expiring_at(now + Duration::seconds(1)).is_expired_at(now));
    }

    #[test]
    fn test_session_json_round_trip() {
        let session = session_expiring_at(Utc::now() + Duration::hours(1));
        let json = serde_json::to_string(&session).unwrap();
        assert!(json.contains(r#""role":"student""#));
        let back: Session = serde_json::from_str(&json).unwrap();
        assert_eq!(back, session);
    }
}
