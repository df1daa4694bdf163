use axum::{Json, extract::State};
use serde::Serialize;

use crate::middleware::auth::RequireAuditRead;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct AuditedOperation {
    pub operation: String,
    pub entity_type: String,
    pub action: trilhas_audit::AuditAction,
    pub entity_id_param: Option<String>,
    pub capture_old_value: bool,
}

/// Operations the service audits, sorted by id. Requires `audit:read`.
pub async fn list_audited_operations(
    State(state): State<AppState>,
    _: RequireAuditRead,
) -> Json<Vec<AuditedOperation>> {
    let registry = state.audit.registry();
    let mut operations: Vec<AuditedOperation> = registry
        .operations()
        .filter_map(|op| {
            registry.get(op).map(|policy| AuditedOperation {
                operation: op.to_string(),
                entity_type: policy.entity_type.clone(),
                action: policy.action,
                entity_id_param: policy.entity_id_param.clone(),
                capture_old_value: policy.capture_old_value,
            })
        })
        .collect();
    operations.sort_by(|a, b| a.operation.cmp(&b.operation));

    Json(operations)
}
