use axum::{Router, routing::get};

use super::controller::list_audited_operations;
use crate::state::AppState;

pub fn init_audit_router() -> Router<AppState> {
    Router::new().route("/operations", get(list_audited_operations))
}
