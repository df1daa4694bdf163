use async_trait::async_trait;
use tracing::info;

use crate::record::AuditRecord;

#[derive(Debug, thiserror::Error)]
pub enum AuditSinkError {
    #[error("audit storage error: {0}")]
    Storage(#[from] sqlx::Error),

    #[error("audit sink unavailable: {0}")]
    Unavailable(String),
}

/// Durable, append-only destination for audit records.
///
/// Callers log failures and move on; an implementation should not retry
/// inline.
#[async_trait]
pub trait AuditSink: Send + Sync {
    async fn append(&self, record: AuditRecord) -> Result<(), AuditSinkError>;
}

/// Writes each record as a structured event on the `audit` tracing target.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogAuditSink;

#[async_trait]
impl AuditSink for LogAuditSink {
    async fn append(&self, record: AuditRecord) -> Result<(), AuditSinkError> {
        info!(
            target: "audit",
            entity_type = %record.entity_type,
            entity_id = %record.entity_id,
            action = %record.action,
            actor_id = ?record.actor_id,
            has_old_value = record.old_value.is_some(),
            has_new_value = record.new_value.is_some(),
            timestamp = %record.timestamp,
            "Audit record"
        );
        Ok(())
    }
}
