//! # Trilhas Models
//!
//! Domain primitives shared across the Trilhas crates:
//!
//! - [`ids`]: Strongly-typed entity identifiers
//! - [`roles`]: The closed set of access profiles
//! - [`value_types`]: Validated CPF and phone number types
//!
//! # Example
//!
//! ```ignore
//! use trilhas_models::{Cpf, PhoneNumber, Role, UserId};
//!
//! let cpf = Cpf::new("529.982.247-25")?;
//! let phone = PhoneNumber::new("(11) 98765-4321")?;
//! assert!(Role::Admin.is_at_least(Role::Teacher));
//! ```

pub mod ids;
pub mod roles;
pub mod value_types;

pub use ids::{LessonId, ModuleId, TrailId, UserId};
pub use roles::Role;
pub use value_types::{
    Cpf, PhoneNumber, ValueTypeError, is_valid_cpf, is_valid_phone, normalize_cpf,
    normalize_phone,
};
