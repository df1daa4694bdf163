use chrono::{DateTime, Utc};

use crate::session::SessionStoreError;

/// Why a request ended up without a principal.
///
/// Every variant has the same externally observable outcome (the request
/// proceeds unauthenticated); they only differ in logs and metrics.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("no credential in request")]
    MissingCredential,

    #[error("credential failed token validation")]
    TokenInvalid,

    #[error("no session for credential")]
    SessionNotFound,

    #[error("session expired at {0}")]
    SessionExpired(DateTime<Utc>),

    #[error(transparent)]
    Store(#[from] SessionStoreError),
}

impl AuthError {
    /// Stable label for logs and metrics.
    pub fn reason(&self) -> &'static str {
        match self {
            AuthError::MissingCredential => "missing_credential",
            AuthError::TokenInvalid => "token_invalid",
            AuthError::SessionNotFound => "session_not_found",
            AuthError::SessionExpired(_) => "session_expired",
            AuthError::Store(SessionStoreError::Unavailable(_)) => "store_unavailable",
            AuthError::Store(SessionStoreError::Decode(_)) => "session_decode_failed",
        }
    }
}
