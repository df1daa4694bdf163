use chrono::Utc;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, warn};
use trilhas_auth::SecurityContext;
use uuid::Uuid;

use crate::lookup::LookupRegistry;
use crate::params::AuditParams;
use crate::policy::{AuditAction, AuditPolicy, AuditRegistry};
use crate::record::AuditRecord;
use crate::resolver::resolve_entity_id;
use crate::sink::AuditSink;

/// Result of an audited operation.
///
/// The serialized form becomes `new_value`. `audit_entity_id` lets a `CREATE`
/// report the id it just assigned when no parameter carried one.
pub trait AuditEntity: Serialize {
    fn audit_entity_id(&self) -> Option<Uuid> {
        None
    }
}

impl AuditEntity for () {}

impl AuditEntity for bool {}

impl AuditEntity for Uuid {
    fn audit_entity_id(&self) -> Option<Uuid> {
        Some(*self)
    }
}

/// Reads a string `"id"` field.
impl AuditEntity for Value {
    fn audit_entity_id(&self) -> Option<Uuid> {
        self.get("id")
            .and_then(Value::as_str)
            .and_then(|s| Uuid::parse_str(s).ok())
    }
}

impl<T: AuditEntity> AuditEntity for Option<T> {
    fn audit_entity_id(&self) -> Option<Uuid> {
        self.as_ref().and_then(AuditEntity::audit_entity_id)
    }
}

/// Wraps state-changing operations and appends an [`AuditRecord`] after each
/// successful call.
///
/// Holds no per-call state, so one instance is shared by every request and
/// background job.
#[derive(Clone)]
pub struct AuditInterceptor {
    sink: Arc<dyn AuditSink>,
    lookups: LookupRegistry,
    registry: Arc<AuditRegistry>,
}

impl std::fmt::Debug for AuditInterceptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuditInterceptor")
            .field("lookups", &self.lookups)
            .field("registered_operations", &self.registry.len())
            .finish_non_exhaustive()
    }
}

impl AuditInterceptor {
    pub fn new(sink: Arc<dyn AuditSink>) -> Self {
        Self {
            sink,
            lookups: LookupRegistry::default(),
            registry: Arc::new(AuditRegistry::default()),
        }
    }

    pub fn with_lookups(mut self, lookups: LookupRegistry) -> Self {
        self.lookups = lookups;
        self
    }

    pub fn with_registry(mut self, registry: AuditRegistry) -> Self {
        self.registry = Arc::new(registry);
        self
    }

    pub fn registry(&self) -> &AuditRegistry {
        &self.registry
    }

    /// Runs `operation` under `policy`.
    ///
    /// The old value is captured before `operation` starts. A failed operation
    /// is returned unchanged and produces no record. Sink failures are logged
    /// and never reach the caller.
    pub async fn intercept<T, E, F, Fut>(
        &self,
        policy: &AuditPolicy,
        ctx: &SecurityContext,
        params: &AuditParams,
        operation: F,
    ) -> Result<T, E>
    where
        T: AuditEntity,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let mut entity_id = resolve_entity_id(policy, params);

        let old_value = match entity_id {
            Some(id) if policy.wants_old_value() => {
                self.lookups.snapshot(&policy.entity_type, id).await
            }
            _ => None,
        };

        let output = operation().await?;

        if entity_id.is_none() && policy.action == AuditAction::Create {
            entity_id = output.audit_entity_id();
        }

        let Some(entity_id) = entity_id else {
            warn!(
                entity_type = %policy.entity_type,
                action = %policy.action,
                "Audited operation has no resolvable entity id; audit record skipped"
            );
            metrics::counter!(
                "audit_unresolved_total",
                "entity_type" => policy.entity_type.clone(),
                "action" => policy.action.as_str()
            )
            .increment(1);
            return Ok(output);
        };

        let new_value = match policy.action {
            AuditAction::Delete => None,
            _ => snapshot_of(&output, policy),
        };

        self.emit(AuditRecord {
            entity_type: policy.entity_type.clone(),
            entity_id,
            action: policy.action,
            actor_id: ctx.actor_id(),
            old_value,
            new_value,
            timestamp: Utc::now(),
        })
        .await;

        Ok(output)
    }

    /// Audits `operation` if a policy is registered under `operation_id`,
    /// otherwise just runs it.
    pub async fn intercept_registered<T, E, F, Fut>(
        &self,
        operation_id: &str,
        ctx: &SecurityContext,
        params: &AuditParams,
        operation: F,
    ) -> Result<T, E>
    where
        T: AuditEntity,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        match self.registry.get(operation_id) {
            Some(policy) => self.intercept(policy, ctx, params, operation).await,
            None => operation().await,
        }
    }

    async fn emit(&self, record: AuditRecord) {
        let entity_type = record.entity_type.clone();
        let entity_id = record.entity_id;
        let action = record.action;

        match self.sink.append(record).await {
            Ok(()) => {
                metrics::counter!(
                    "audit_records_total",
                    "entity_type" => entity_type,
                    "action" => action.as_str()
                )
                .increment(1);
            }
            Err(e) => {
                error!(
                    entity_type = %entity_type,
                    entity_id = %entity_id,
                    action = %action,
                    error = %e,
                    "Failed to append audit record"
                );
                metrics::counter!("audit_sink_failures_total").increment(1);
            }
        }
    }
}

// null counts as "no value"
fn snapshot_of<T: Serialize>(output: &T, policy: &AuditPolicy) -> Option<Value> {
    match serde_json::to_value(output) {
        Ok(Value::Null) => None,
        Ok(value) => Some(value),
        Err(e) => {
            warn!(
                entity_type = %policy.entity_type,
                error = %e,
                "Failed to serialize audited result"
            );
            None
        }
    }
}
