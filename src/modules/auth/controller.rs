use axum::Json;
use tracing::instrument;

use crate::middleware::auth::{AuthUser, CurrentContext};
use crate::modules::auth::model::{PrincipalResponse, SessionStatus};

/// The signed-in principal. 401 without a valid session.
#[instrument(skip_all, fields(user_id = %auth_user.user_id()))]
pub async fn get_current_principal(auth_user: AuthUser) -> Json<PrincipalResponse> {
    Json(PrincipalResponse::from(&auth_user.0))
}

/// Reports whether the request is authenticated. Never fails.
pub async fn get_session_status(CurrentContext(ctx): CurrentContext) -> Json<SessionStatus> {
    Json(SessionStatus {
        authenticated: ctx.is_authenticated(),
        principal: ctx.principal().map(PrincipalResponse::from),
    })
}
