//! # Trilhas Core
//!
//! Foundational types shared by every Trilhas crate:
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`permissions`]: Permission string constants
//!
//! # Example
//!
//! ```ignore
//! use trilhas_core::{AppError, permissions};
//!
//! if !principal.has_permission(permissions::TRAILS_UPDATE) {
//!     return Err(AppError::forbidden("Missing permission"));
//! }
//! ```

pub mod errors;
pub mod permissions;

// Re-export commonly used types at crate root
pub use errors::AppError;
