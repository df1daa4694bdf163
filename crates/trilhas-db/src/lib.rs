//! # Trilhas DB
//!
//! PostgreSQL pool initialisation for the Trilhas API.
//!
//! The pool is only needed when audit records are persisted to Postgres;
//! the authentication pipeline itself never touches the database.
//!
//! # Example
//!
//! ```ignore
//! use trilhas_db::{init_db_pool, run_migrations};
//!
//! let pool = init_db_pool().await?;
//! run_migrations(&pool).await?;
//! ```

use std::env;

/// Connects to the database named by `DATABASE_URL`.
///
/// # Errors
///
/// Returns [`sqlx::Error::Configuration`] when `DATABASE_URL` is unset, or
/// the connection error when the database is unreachable.
pub async fn init_db_pool() -> Result<sqlx::PgPool, sqlx::Error> {
    let database_url = env::var("DATABASE_URL")
        .map_err(|_| sqlx::Error::Configuration("DATABASE_URL must be set".into()))?;

    sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
}

/// Applies the migrations under `migrations/` (creates `audit_logs`).
pub async fn run_migrations(pool: &sqlx::PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await
}

// Re-export PgPool for convenience
pub use sqlx::PgPool;
