//! # Trilhas Config
//!
//! Configuration types for the Trilhas API, loaded from environment variables:
//!
//! - [`jwt`]: Session token signing configuration
//! - [`session`]: Session cookie configuration
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`audit`]: Audit sink selection
//!
//! # Example
//!
//! ```ignore
//! use trilhas_config::{AuditConfig, CorsConfig, JwtConfig, SessionConfig};
//!
//! let jwt_config = JwtConfig::from_env();
//! let session_config = SessionConfig::from_env();
//! let audit_config = AuditConfig::from_env();
//! ```

pub mod audit;
pub mod cors;
pub mod jwt;
pub mod session;

// Re-export commonly used types at crate root
pub use audit::{AuditConfig, AuditSinkKind};
pub use cors::CorsConfig;
pub use jwt::JwtConfig;
pub use session::SessionConfig;
