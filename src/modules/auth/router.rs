use axum::{Router, routing::get};

use super::controller::{get_current_principal, get_session_status};
use crate::state::AppState;

pub fn init_auth_router() -> Router<AppState> {
    Router::new()
        .route("/me", get(get_current_principal))
        .route("/session", get(get_session_status))
}
