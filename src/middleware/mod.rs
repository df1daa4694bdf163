//! Request authentication and authorization.
//!
//! # Flow
//!
//! 1. [`auth::authenticate`] resolves the session cookie or bearer token and
//!    binds the principal into the request's `SecurityContext`. It never
//!    rejects.
//! 2. [`auth::AuthUser`] turns "no principal" into 401.
//! 3. The `Require*` extractors built by `require_permission!` turn a
//!    missing grant into 403.
//!
//! ```ignore
//! async fn delete_trail(RequireTrailsDelete(user): RequireTrailsDelete) -> impl IntoResponse {
//!     // only reached with `trails:delete`
//! }
//! ```

pub mod auth;
