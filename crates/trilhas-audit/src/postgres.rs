use async_trait::async_trait;
use trilhas_db::PgPool;

use crate::record::AuditRecord;
use crate::sink::{AuditSink, AuditSinkError};

/// Appends records to the `audit_logs` table.
#[derive(Debug, Clone)]
pub struct PgAuditSink {
    pool: PgPool,
}

impl PgAuditSink {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuditSink for PgAuditSink {
    async fn append(&self, record: AuditRecord) -> Result<(), AuditSinkError> {
        sqlx::query(
            r#"
            INSERT INTO audit_logs (entity_type, entity_id, action, actor_id, old_value, new_value, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(&record.entity_type)
        .bind(record.entity_id)
        .bind(record.action.as_str())
        .bind(record.actor_id)
        .bind(&record.old_value)
        .bind(&record.new_value)
        .bind(record.timestamp)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
