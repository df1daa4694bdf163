//! # Trilhas Audit
//!
//! Audit trail for state-changing operations.
//!
//! An operation declares how it is audited through an [`AuditPolicy`],
//! usually registered under an operation id in an [`AuditRegistry`] at
//! startup. The [`AuditInterceptor`] wraps the call: it works out which entity
//! is affected, optionally snapshots the entity beforehand, runs the
//! operation, and appends an [`AuditRecord`] to an [`AuditSink`] only if the
//! operation succeeded.
//!
//! ```ignore
//! let params = AuditParams::new().with("trailId", trail_id).with("title", title);
//! let trail = interceptor
//!     .intercept_registered("trails.update", &ctx, &params, || service.update(trail_id, title))
//!     .await?;
//! ```

pub mod interceptor;
pub mod lookup;
pub mod params;
pub mod policy;
pub mod postgres;
pub mod record;
pub mod resolver;
pub mod sink;

#[cfg(any(test, feature = "test-utils"))]
pub mod memory;

pub use interceptor::{AuditEntity, AuditInterceptor};
pub use lookup::{EntityStateLookup, LookupRegistry};
pub use params::{AuditParams, ParamValue};
pub use policy::{AuditAction, AuditPolicy, AuditRegistry};
pub use postgres::PgAuditSink;
pub use record::AuditRecord;
pub use resolver::{EntityIdStrategy, resolve_entity_id};
pub use sink::{AuditSink, AuditSinkError, LogAuditSink};

#[cfg(any(test, feature = "test-utils"))]
pub use memory::MemoryAuditSink;
