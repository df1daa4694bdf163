//! # Trilhas API
//!
//! Authentication and audit core of the Trilhas learning platform, served
//! with Axum.
//!
//! ## Architecture
//!
//! ```text
//! crates/
//! ├── trilhas-core/     # AppError, permission constants
//! ├── trilhas-config/   # Environment configuration
//! ├── trilhas-models/   # Ids, roles, CPF and phone value types
//! ├── trilhas-auth/     # Credential extraction, token validation, session resolution
//! ├── trilhas-cache/    # Redis session store
//! ├── trilhas-db/       # Postgres pool and migrations
//! └── trilhas-audit/    # Audit policies, interceptor and sinks
//! src/
//! ├── middleware/       # authenticate middleware and extractors
//! ├── modules/          # HTTP handlers (health, auth, audit)
//! ├── audit.rs          # Audited operations registered at startup
//! ├── logging.rs        # Tracing setup and request logging
//! ├── metrics.rs        # Prometheus metrics
//! ├── router.rs         # Application router
//! └── state.rs          # Shared application state
//! ```
//!
//! ## Authentication
//!
//! Every `/api` request runs through the session pipeline: the HTTP-only
//! session cookie (or, failing that, `Authorization: Bearer`) is checked as a
//! JWT, then looked up in Redis. A request that fails any step simply carries
//! no principal; handlers that need one reject with 401 or 403.
//!
//! ## Environment Variables
//!
//! ```bash
//! JWT_SECRET=your-secure-secret-key
//! SESSION_COOKIE_NAME=trilhas_session
//! REDIS_URL=redis://127.0.0.1:6379
//! AUDIT_SINK=log            # or postgres (needs DATABASE_URL)
//! BIND_ADDR=0.0.0.0:3000
//! ```

pub mod audit;
pub mod logging;
pub mod metrics;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;

// Re-export workspace crates for convenience
pub use trilhas_audit;
pub use trilhas_auth;
pub use trilhas_config;
pub use trilhas_core;
pub use trilhas_models;
