use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use std::convert::Infallible;
use trilhas_auth::{Principal, SecurityContext};
use trilhas_core::{AppError, permissions};
use trilhas_models::{Role, UserId};

use crate::state::AppState;

/// Resolves the request's session and binds it into the request's
/// [`SecurityContext`].
///
/// Never rejects. A request without a usable session continues with an empty
/// context and it is up to the handler's extractors to refuse it.
pub async fn authenticate(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let ctx = req
        .extensions()
        .get::<SecurityContext>()
        .cloned()
        .unwrap_or_default();

    state.resolver.authenticate(req.headers(), &ctx).await;
    req.extensions_mut().insert(ctx);
    req.extensions_mut().insert(SessionResolved);

    next.run(req).await
}

// Marks a request whose session has already been resolved once
#[derive(Debug, Clone, Copy)]
struct SessionResolved;

/// The request's security context, authenticated or not.
///
/// Reuses the context bound by [`authenticate`]; on routes without that
/// middleware the session is resolved here instead.
#[derive(Debug, Clone)]
pub struct CurrentContext(pub SecurityContext);

impl FromRequestParts<AppState> for CurrentContext {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let ctx = parts
            .extensions
            .get::<SecurityContext>()
            .cloned()
            .unwrap_or_default();

        if parts.extensions.get::<SessionResolved>().is_none() {
            state.resolver.authenticate(&parts.headers, &ctx).await;
            parts.extensions.insert(SessionResolved);
            parts.extensions.insert(ctx.clone());
        }

        Ok(CurrentContext(ctx))
    }
}

/// Extractor for handlers that require a signed-in user. Rejects with 401.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Principal);

impl AuthUser {
    pub fn user_id(&self) -> UserId {
        self.0.user_id
    }

    pub fn role(&self) -> Role {
        self.0.role
    }

    pub fn has_permission(&self, permission: &str) -> bool {
        self.0.has_permission(permission)
    }

    pub fn has_any_permission(&self, permissions: &[&str]) -> bool {
        self.0.has_any_permission(permissions)
    }

    pub fn has_all_permissions(&self, permissions: &[&str]) -> bool {
        self.0.has_all_permissions(permissions)
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Ok(CurrentContext(ctx)) = CurrentContext::from_request_parts(parts, state).await;

        ctx.principal()
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| AppError::unauthorized("Authentication required"))
    }
}

/// Defines an extractor that requires one permission. Rejects with 401 when
/// anonymous and 403 when the grant is missing.
#[macro_export]
macro_rules! require_permission {
    ($name:ident, $permission:expr) => {
        #[derive(Debug, Clone)]
        pub struct $name(pub $crate::middleware::auth::AuthUser);

        impl axum::extract::FromRequestParts<$crate::state::AppState> for $name {
            type Rejection = $crate::trilhas_core::AppError;

            async fn from_request_parts(
                parts: &mut axum::http::request::Parts,
                state: &$crate::state::AppState,
            ) -> Result<Self, Self::Rejection> {
                let auth_user = <$crate::middleware::auth::AuthUser as axum::extract::FromRequestParts<
                    $crate::state::AppState,
                >>::from_request_parts(parts, state)
                .await?;

                if !auth_user.has_permission($permission) {
                    return Err($crate::trilhas_core::AppError::forbidden(format!(
                        "Access denied. Missing required permission: {}",
                        $permission
                    )));
                }

                Ok($name(auth_user))
            }
        }
    };
}

require_permission!(RequireTrailsCreate, permissions::TRAILS_CREATE);
require_permission!(RequireTrailsRead, permissions::TRAILS_READ);
require_permission!(RequireTrailsUpdate, permissions::TRAILS_UPDATE);
require_permission!(RequireTrailsDelete, permissions::TRAILS_DELETE);

require_permission!(RequireModulesCreate, permissions::MODULES_CREATE);
require_permission!(RequireModulesRead, permissions::MODULES_READ);
require_permission!(RequireModulesUpdate, permissions::MODULES_UPDATE);
require_permission!(RequireModulesDelete, permissions::MODULES_DELETE);

require_permission!(RequireLessonsCreate, permissions::LESSONS_CREATE);
require_permission!(RequireLessonsRead, permissions::LESSONS_READ);
require_permission!(RequireLessonsUpdate, permissions::LESSONS_UPDATE);
require_permission!(RequireLessonsDelete, permissions::LESSONS_DELETE);

require_permission!(RequireUsersCreate, permissions::USERS_CREATE);
require_permission!(RequireUsersRead, permissions::USERS_READ);
require_permission!(RequireUsersUpdate, permissions::USERS_UPDATE);
require_permission!(RequireUsersDelete, permissions::USERS_DELETE);

require_permission!(RequireAuditRead, permissions::AUDIT_READ);
