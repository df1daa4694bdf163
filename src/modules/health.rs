use axum::{Json, Router, routing::get};
use serde_json::{Value, json};

use crate::state::AppState;

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub fn init_health_router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
