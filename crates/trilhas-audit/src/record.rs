use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use trilhas_models::UserId;
use uuid::Uuid;

use crate::policy::AuditAction;

/// One append-only entry of the audit trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditRecord {
    pub entity_type: String,
    pub entity_id: Uuid,
    pub action: AuditAction,
    /// `None` when the operation ran without an authenticated principal.
    pub actor_id: Option<UserId>,
    pub old_value: Option<Value>,
    pub new_value: Option<Value>,
    pub timestamp: DateTime<Utc>,
}
