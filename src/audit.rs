//! Audit policies for the platform's state-changing operations.
//!
//! Services call [`AuditInterceptor::intercept_registered`] with one of the
//! ids in [`operations`]; the policy registered here decides how the call is
//! audited.
//!
//! [`AuditInterceptor::intercept_registered`]: trilhas_audit::AuditInterceptor::intercept_registered

use trilhas_audit::{AuditPolicy, AuditRegistry};

pub mod operations {
    pub const TRAILS_CREATE: &str = "trails.create";
    pub const TRAILS_UPDATE: &str = "trails.update";
    pub const TRAILS_DELETE: &str = "trails.delete";

    pub const MODULES_CREATE: &str = "modules.create";
    pub const MODULES_UPDATE: &str = "modules.update";
    pub const MODULES_DELETE: &str = "modules.delete";

    pub const LESSONS_CREATE: &str = "lessons.create";
    pub const LESSONS_UPDATE: &str = "lessons.update";
    pub const LESSONS_DELETE: &str = "lessons.delete";

    pub const USERS_CREATE: &str = "users.create";
    pub const USERS_UPDATE: &str = "users.update";
    pub const USERS_DELETE: &str = "users.delete";
}

fn crud(
    registry: AuditRegistry,
    entity_type: &str,
    id_param: &str,
    [create, update, delete]: [&str; 3],
) -> AuditRegistry {
    registry
        .register(create, AuditPolicy::create(entity_type))
        .register(
            update,
            AuditPolicy::update(entity_type)
                .entity_id_param(id_param)
                .capture_old_value(true),
        )
        .register(
            delete,
            AuditPolicy::delete(entity_type)
                .entity_id_param(id_param)
                .capture_old_value(true),
        )
}

/// Registry used by the running service.
pub fn default_audit_registry() -> AuditRegistry {
    use operations::*;

    let registry = AuditRegistry::new();
    let registry = crud(
        registry,
        "trail",
        "trailId",
        [TRAILS_CREATE, TRAILS_UPDATE, TRAILS_DELETE],
    );
    let registry = crud(
        registry,
        "module",
        "moduleId",
        [MODULES_CREATE, MODULES_UPDATE, MODULES_DELETE],
    );
    let registry = crud(
        registry,
        "lesson",
        "lessonId",
        [LESSONS_CREATE, LESSONS_UPDATE, LESSONS_DELETE],
    );
    crud(
        registry,
        "user",
        "userId",
        [USERS_CREATE, USERS_UPDATE, USERS_DELETE],
    )
}
