//! Permission constants for the Trilhas API.
//!
//! Sessions carry permission strings; each one becomes an independent grant
//! on the resolved principal. Use these constants instead of literals when
//! checking grants.
//!
//! # Example
//!
//! ```ignore
//! use trilhas_core::permissions;
//!
//! if principal.has_permission(permissions::TRAILS_UPDATE) {
//!     // Update trail
//! }
//! ```

// =============================================================================
// Trails permissions
// =============================================================================

/// Permission to create trails
pub const TRAILS_CREATE: &str = "trails:create";
/// Permission to read trails
pub const TRAILS_READ: &str = "trails:read";
/// Permission to update trails
pub const TRAILS_UPDATE: &str = "trails:update";
/// Permission to delete trails
pub const TRAILS_DELETE: &str = "trails:delete";

// =============================================================================
// Modules permissions
// =============================================================================

pub const MODULES_CREATE: &str = "modules:create";
pub const MODULES_READ: &str = "modules:read";
pub const MODULES_UPDATE: &str = "modules:update";
pub const MODULES_DELETE: &str = "modules:delete";

// =============================================================================
// Lessons permissions
// =============================================================================

pub const LESSONS_CREATE: &str = "lessons:create";
pub const LESSONS_READ: &str = "lessons:read";
pub const LESSONS_UPDATE: &str = "lessons:update";
pub const LESSONS_DELETE: &str = "lessons:delete";

// =============================================================================
// Users permissions
// =============================================================================

/// Permission to create users
pub const USERS_CREATE: &str = "users:create";
/// Permission to read users
pub const USERS_READ: &str = "users:read";
/// Permission to update users
pub const USERS_UPDATE: &str = "users:update";
/// Permission to delete users
pub const USERS_DELETE: &str = "users:delete";

// =============================================================================
// Audit permissions
// =============================================================================

/// Permission to read the audit trail
pub const AUDIT_READ: &str = "audit:read";
