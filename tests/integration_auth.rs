mod common;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use chrono::Duration;
use common::{bearer, issue_session, session_cookie, setup_test_app};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;
use trilhas_audit::MemoryAuditSink;
use trilhas_auth::{Session, SessionStore, SessionStoreError, create_session_token};
use trilhas_config::JwtConfig;
use trilhas_models::{Role, UserId};

struct FailingStore;

#[async_trait::async_trait]
impl SessionStore for FailingStore {
    async fn lookup(&self, _token: &str) -> Result<Option<Session>, SessionStoreError> {
        Err(SessionStoreError::Unavailable("redis down".to_string()))
    }
}

async fn get(
    router: axum::Router,
    uri: &str,
    headers: &[(header::HeaderName, String)],
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method("GET").uri(uri);
    for (name, value) in headers {
        builder = builder.header(name, value);
    }
    let response = router
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, body)
}

#[tokio::test]
async fn test_health() {
    let app = setup_test_app();

    let (status, body) = get(app.router, "/health", &[]).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_me_without_credentials_is_unauthorized() {
    let app = setup_test_app();

    let (status, body) = get(app.router, "/api/auth/me", &[]).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Authentication required");
    assert_eq!(app.sessions.lookup_count(), 0);
}

#[tokio::test]
async fn test_me_with_bearer_token() {
    let app = setup_test_app();
    let session = issue_session(
        &app.sessions,
        Role::Teacher,
        &["trails:read", "lessons:update", "", "trails:read"],
        Duration::hours(1),
    );

    let (status, body) = get(
        app.router,
        "/api/auth/me",
        &[(header::AUTHORIZATION, bearer(&session.token))],
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user_id"], session.user_id.to_string());
    assert_eq!(body["role"], "teacher");
    assert_eq!(
        body["permissions"],
        serde_json::json!(["lessons:update", "trails:read"])
    );
}

#[tokio::test]
async fn test_me_with_session_cookie() {
    let app = setup_test_app();
    let session = issue_session(&app.sessions, Role::Student, &[], Duration::hours(1));

    let (status, body) = get(
        app.router,
        "/api/auth/me",
        &[(header::COOKIE, session_cookie(&session.token))],
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user_id"], session.user_id.to_string());
}

#[tokio::test]
async fn test_cookie_takes_precedence_over_header() {
    let app = setup_test_app();
    let from_cookie = issue_session(&app.sessions, Role::Student, &[], Duration::hours(1));
    let from_header = issue_session(&app.sessions, Role::Admin, &[], Duration::hours(1));

    let (status, body) = get(
        app.router,
        "/api/auth/me",
        &[
            (header::COOKIE, session_cookie(&from_cookie.token)),
            (header::AUTHORIZATION, bearer(&from_header.token)),
        ],
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user_id"], from_cookie.user_id.to_string());
    assert_eq!(body["role"], "student");
}

#[tokio::test]
async fn test_lowercase_scheme_is_treated_as_missing() {
    let app = setup_test_app();
    let session = issue_session(&app.sessions, Role::Admin, &[], Duration::hours(1));

    let (status, _) = get(
        app.router,
        "/api/auth/me",
        &[(header::AUTHORIZATION, format!("bearer {}", session.token))],
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(app.sessions.lookup_count(), 0);
}

#[tokio::test]
async fn test_forged_token_never_reaches_store() {
    let app = setup_test_app();
    let session = issue_session(&app.sessions, Role::Admin, &[], Duration::hours(1));
    let forged_config = JwtConfig {
        secret: "some-other-secret-with-enough-length!!".to_string(),
        ..common::jwt_config()
    };
    let forged = create_session_token(session.user_id, Role::SystemAdmin, &forged_config).unwrap();

    let (status, _) = get(
        app.router,
        "/api/auth/me",
        &[(header::AUTHORIZATION, bearer(&forged))],
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(app.sessions.lookup_count(), 0);
}

#[tokio::test]
async fn test_revoked_session_is_unauthorized() {
    let app = setup_test_app();
    let session = issue_session(&app.sessions, Role::Teacher, &[], Duration::hours(1));
    app.sessions.remove(&session.token);

    let (status, _) = get(
        app.router,
        "/api/auth/me",
        &[(header::AUTHORIZATION, bearer(&session.token))],
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(app.sessions.lookup_count(), 1);
}

#[tokio::test]
async fn test_expired_session_is_unauthorized() {
    let app = setup_test_app();
    let session = issue_session(&app.sessions, Role::Teacher, &[], -Duration::minutes(1));

    let (status, _) = get(
        app.router,
        "/api/auth/me",
        &[(header::AUTHORIZATION, bearer(&session.token))],
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_session_status_anonymous() {
    let app = setup_test_app();

    let (status, body) = get(app.router, "/api/auth/session", &[]).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["authenticated"], false);
    assert!(body["principal"].is_null());
}

#[tokio::test]
async fn test_session_status_authenticated() {
    let app = setup_test_app();
    let session = issue_session(&app.sessions, Role::Admin, &["users:read"], Duration::hours(1));

    let (status, body) = get(
        app.router,
        "/api/auth/session",
        &[(header::AUTHORIZATION, bearer(&session.token))],
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["authenticated"], true);
    assert_eq!(body["principal"]["user_id"], session.user_id.to_string());
    // Middleware and extractor share one resolution
    assert_eq!(app.sessions.lookup_count(), 1);
}

#[tokio::test]
async fn test_store_outage_is_fail_open() {
    let state = common::build_state(Arc::new(FailingStore), Arc::new(MemoryAuditSink::new()));
    let router = trilhas::router::init_router(state);
    let token = create_session_token(UserId::new(), Role::Admin, &common::jwt_config()).unwrap();

    let (status, body) = get(
        router.clone(),
        "/api/auth/session",
        &[(header::AUTHORIZATION, bearer(&token))],
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["authenticated"], false);

    let (status, _) = get(
        router,
        "/api/auth/me",
        &[(header::AUTHORIZATION, bearer(&token))],
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_audit_operations_require_permission() {
    let app = setup_test_app();
    let reader = issue_session(&app.sessions, Role::Admin, &["audit:read"], Duration::hours(1));
    let student = issue_session(&app.sessions, Role::Student, &["trails:read"], Duration::hours(1));

    let (status, _) = get(app.router.clone(), "/api/audit/operations", &[]).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = get(
        app.router.clone(),
        "/api/audit/operations",
        &[(header::AUTHORIZATION, bearer(&student.token))],
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(
        body["error"]
            .as_str()
            .unwrap()
            .contains("audit:read")
    );

    let (status, body) = get(
        app.router,
        "/api/audit/operations",
        &[(header::AUTHORIZATION, bearer(&reader.token))],
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let operations = body.as_array().unwrap();
    assert_eq!(operations.len(), 12);
    assert_eq!(operations[0]["operation"], "lessons.create");
    assert_eq!(operations[0]["action"], "CREATE");
}
