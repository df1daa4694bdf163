use std::sync::Arc;

use axum::http::HeaderMap;
use chrono::Utc;
use tracing::{debug, warn};

use crate::context::SecurityContext;
use crate::credential::CredentialExtractor;
use crate::error::AuthError;
use crate::principal::Principal;
use crate::session::SessionStore;
use crate::token::TokenValidator;

/// Turns the credential on a request into a [`Principal`], or into nothing.
///
/// Resolution is fail-open: every failure, including an unreachable session
/// store, yields "no principal" and is only visible in logs and metrics.
/// Rejecting anonymous requests is left to the handlers that require a user.
#[derive(Clone)]
pub struct SessionResolver {
    extractor: CredentialExtractor,
    validator: Arc<dyn TokenValidator>,
    store: Arc<dyn SessionStore>,
}

impl SessionResolver {
    pub fn new(
        extractor: CredentialExtractor,
        validator: Arc<dyn TokenValidator>,
        store: Arc<dyn SessionStore>,
    ) -> Self {
        Self {
            extractor,
            validator,
            store,
        }
    }

    /// Runs the pipeline and reports why it stopped, if it did.
    pub async fn try_resolve(&self, headers: &HeaderMap) -> Result<Principal, AuthError> {
        let credential = self
            .extractor
            .extract(headers)
            .ok_or(AuthError::MissingCredential)?;

        if !self.validator.validate(&credential.token) {
            return Err(AuthError::TokenInvalid);
        }

        let session = self
            .store
            .lookup(&credential.token)
            .await?
            .ok_or(AuthError::SessionNotFound)?;

        if session.is_expired_at(Utc::now()) {
            return Err(AuthError::SessionExpired(session.expires_at));
        }

        debug!(
            user_id = %session.user_id,
            source = credential.source.as_str(),
            "Session resolved"
        );

        Ok(Principal::from_session(&session))
    }

    /// Fail-open resolution. Never errors.
    pub async fn resolve(&self, headers: &HeaderMap) -> Option<Principal> {
        match self.try_resolve(headers).await {
            Ok(principal) => {
                metrics::counter!("auth_resolutions_total", "outcome" => "authenticated")
                    .increment(1);
                Some(principal)
            }
            Err(e) => {
                match &e {
                    AuthError::Store(_) => warn!(
                        error = %e,
                        reason = e.reason(),
                        "Session store failure; continuing unauthenticated"
                    ),
                    _ => debug!(reason = e.reason(), "Request proceeds unauthenticated"),
                }
                metrics::counter!("auth_resolutions_total", "outcome" => e.reason()).increment(1);
                None
            }
        }
    }

    /// Resolves and binds into `ctx`.
    ///
    /// If `ctx` already carries a principal the pipeline is skipped entirely,
    /// so a re-entered pipeline costs nothing and changes nothing. Returns
    /// whether `ctx` is authenticated afterwards.
    pub async fn authenticate(&self, headers: &HeaderMap, ctx: &SecurityContext) -> bool {
        if ctx.is_authenticated() {
            return true;
        }

        if let Some(principal) = self.resolve(headers).await {
            ctx.bind(principal);
        }

        ctx.is_authenticated()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemorySessionStore;
    use crate::session::{Session, SessionStoreError};
    use async_trait::async_trait;
    use axum::http::{HeaderValue, header};
    use chrono::Duration;
    use metrics_util::debugging::{DebugValue, DebuggingRecorder, Snapshotter};
    use trilhas_models::{Role, UserId};

    struct AcceptAll;

    impl TokenValidator for AcceptAll {
        fn validate(&self, _token: &str) -> bool {
            true
        }
    }

    struct RejectAll;

    impl TokenValidator for RejectAll {
        fn validate(&self, _token: &str) -> bool {
            false
        }
    }

    struct FailingStore;

    #[async_trait]
    impl SessionStore for FailingStore {
        async fn lookup(&self, _token: &str) -> Result<Option<Session>, SessionStoreError> {
            Err(SessionStoreError::Unavailable("connection refused".to_string()))
        }
    }

    fn session(token: &str, expires_in: Duration) -> Session {
        let now = Utc::now();
        Session {
            token: token.to_string(),
            user_id: UserId::new(),
            display_name: "Caio".to_string(),
            email: "caio@example.com".to_string(),
            role: Role::Teacher,
            permissions: vec!["trails:read".to_string(), " ".to_string()],
            created_at: now,
            expires_at: now + expires_in,
        }
    }

    fn bearer(token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
        );
        headers
    }

    fn counter_value(snapshotter: &Snapshotter, name: &str, labels: &[(&str, &str)]) -> u64 {
        snapshotter
            .snapshot()
            .into_vec()
            .into_iter()
            .filter_map(|(key, _, _, value)| {
                let key = key.key();
                let matches = key.name() == name
                    && labels
                        .iter()
                        .all(|(k, v)| key.labels().any(|l| l.key() == *k && l.value() == *v));
                match value {
                    DebugValue::Counter(n) if matches => Some(n),
                    _ => None,
                }
            })
            .sum()
    }

    fn resolver(
        validator: Arc<dyn TokenValidator>,
        store: Arc<dyn SessionStore>,
    ) -> SessionResolver {
        SessionResolver::new(CredentialExtractor::new("trilhas_session"), validator, store)
    }

    #[tokio::test]
    async fn test_missing_credential_never_queries_store() {
        let store = Arc::new(InMemorySessionStore::new());
        let resolver = resolver(Arc::new(AcceptAll), store.clone());

        assert!(resolver.resolve(&HeaderMap::new()).await.is_none());
        assert!(matches!(
            resolver.try_resolve(&HeaderMap::new()).await,
            Err(AuthError::MissingCredential)
        ));
        assert_eq!(store.lookup_count(), 0);
    }

    #[tokio::test]
    async fn test_invalid_token_never_queries_store() {
        let store = Arc::new(InMemorySessionStore::new());
        store.insert(session("tok", Duration::hours(1)));
        let resolver = resolver(Arc::new(RejectAll), store.clone());

        assert!(matches!(
            resolver.try_resolve(&bearer("tok")).await,
            Err(AuthError::TokenInvalid)
        ));
        assert_eq!(store.lookup_count(), 0);
    }

    #[tokio::test]
    async fn test_resolves_principal_from_session() {
        let store = Arc::new(InMemorySessionStore::new());
        let stored = session("tok", Duration::hours(1));
        store.insert(stored.clone());
        let resolver = resolver(Arc::new(AcceptAll), store.clone());

        let principal = resolver.resolve(&bearer("tok")).await.unwrap();
        assert_eq!(principal.user_id, stored.user_id);
        assert_eq!(principal.role, Role::Teacher);
        assert_eq!(principal.permissions.len(), 1);
        assert!(principal.has_permission("trails:read"));
        assert_eq!(store.lookup_count(), 1);
    }

    #[tokio::test]
    async fn test_unknown_session() {
        let store = Arc::new(InMemorySessionStore::new());
        let resolver = resolver(Arc::new(AcceptAll), store);

        assert!(matches!(
            resolver.try_resolve(&bearer("revoked")).await,
            Err(AuthError::SessionNotFound)
        ));
    }

    #[tokio::test]
    async fn test_expired_session_is_rejected() {
        let store = Arc::new(InMemorySessionStore::new());
        store.insert(session("old", -Duration::seconds(5)));
        let resolver = resolver(Arc::new(AcceptAll), store);

        assert!(matches!(
            resolver.try_resolve(&bearer("old")).await,
            Err(AuthError::SessionExpired(_))
        ));
        assert!(resolver.resolve(&bearer("old")).await.is_none());
    }

    #[tokio::test]
    async fn test_store_failure_is_fail_open() {
        let resolver = resolver(Arc::new(AcceptAll), Arc::new(FailingStore));

        let err = resolver.try_resolve(&bearer("tok")).await.unwrap_err();
        assert_eq!(err.reason(), "store_unavailable");
        assert!(resolver.resolve(&bearer("tok")).await.is_none());
    }

    #[test]
    fn test_outcomes_are_counted() {
        let recorder = DebuggingRecorder::new();
        let snapshotter = recorder.snapshotter();
        let runtime = tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap();

        metrics::with_local_recorder(&recorder, || {
            runtime.block_on(async {
                let failing = resolver(Arc::new(AcceptAll), Arc::new(FailingStore));
                assert!(failing.resolve(&bearer("tok")).await.is_none());

                let store = Arc::new(InMemorySessionStore::new());
                store.insert(session("tok", Duration::hours(1)));
                let working = resolver(Arc::new(AcceptAll), store);
                assert!(working.resolve(&HeaderMap::new()).await.is_none());
                assert!(working.resolve(&bearer("tok")).await.is_some());
            })
        });

        let outcome = |value: &str| {
            counter_value(&snapshotter, "auth_resolutions_total", &[("outcome", value)])
        };
        assert_eq!(outcome("store_unavailable"), 1);
        assert_eq!(outcome("missing_credential"), 1);
        assert_eq!(outcome("authenticated"), 1);
        assert_eq!(outcome("token_invalid"), 0);
    }

    #[tokio::test]
    async fn test_authenticate_binds_once() {
        let store = Arc::new(InMemorySessionStore::new());
        let first = session("first", Duration::hours(1));
        let second = session("second", Duration::hours(1));
        store.insert(first.clone());
        store.insert(second);
        let resolver = resolver(Arc::new(AcceptAll), store.clone());
        let ctx = SecurityContext::new();

        assert!(resolver.authenticate(&bearer("first"), &ctx).await);
        assert!(resolver.authenticate(&bearer("second"), &ctx).await);

        assert_eq!(ctx.actor_id(), Some(first.user_id));
        assert_eq!(store.lookup_count(), 1);
    }

    #[tokio::test]
    async fn test_authenticate_without_credential_leaves_context_empty() {
        let store = Arc::new(InMemorySessionStore::new());
        let resolver = resolver(Arc::new(AcceptAll), store);
        let ctx = SecurityContext::new();

        assert!(!resolver.authenticate(&HeaderMap::new(), &ctx).await);
        assert!(!ctx.is_authenticated());
    }
}
