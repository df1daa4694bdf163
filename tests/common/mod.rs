#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use chrono::{Duration, Utc};
use trilhas::audit::default_audit_registry;
use trilhas::router::init_router;
use trilhas::state::AppState;
use trilhas_audit::{AuditInterceptor, MemoryAuditSink};
use trilhas_auth::{
    CredentialExtractor, InMemorySessionStore, JwtTokenValidator, Session, SessionResolver,
    SessionStore, create_session_token,
};
use trilhas_config::{CorsConfig, JwtConfig};
use trilhas_models::{Role, UserId};

pub const COOKIE_NAME: &str = "trilhas_session";

pub fn jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "integration-test-secret-at-least-32-chars".to_string(),
        session_token_expiry: 3600,
        leeway: 0,
    }
}

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub sessions: Arc<InMemorySessionStore>,
    pub audit_sink: Arc<MemoryAuditSink>,
}

pub fn build_state(store: Arc<dyn SessionStore>, sink: Arc<MemoryAuditSink>) -> AppState {
    let resolver = SessionResolver::new(
        CredentialExtractor::new(COOKIE_NAME),
        Arc::new(JwtTokenValidator::new(jwt_config())),
        store,
    );

    AppState {
        resolver,
        audit: AuditInterceptor::new(sink).with_registry(default_audit_registry()),
        cors_config: CorsConfig {
            allowed_origins: vec!["http://localhost:5173".to_string()],
        },
    }
}

pub fn setup_test_app() -> TestApp {
    let sessions = Arc::new(InMemorySessionStore::new());
    let audit_sink = Arc::new(MemoryAuditSink::new());
    let state = build_state(sessions.clone(), audit_sink.clone());

    TestApp {
        router: init_router(state.clone()),
        state,
        sessions,
        audit_sink,
    }
}

/// Issues a signed token and stores a matching session.
pub fn issue_session(
    store: &InMemorySessionStore,
    role: Role,
    permissions: &[&str],
    expires_in: Duration,
) -> Session {
    let user_id = UserId::new();
    let token = create_session_token(user_id, role, &jwt_config()).unwrap();
    let now = Utc::now();

    let session = Session {
        token,
        user_id,
        display_name: "Test User".to_string(),
        email: format!("{}@test.example", user_id),
        role,
        permissions: permissions.iter().map(|p| p.to_string()).collect(),
        created_at: now,
        expires_at: now + expires_in,
    };
    store.insert(session.clone());
    session
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

pub fn session_cookie(token: &str) -> String {
    format!("{}={}", COOKIE_NAME, token)
}
