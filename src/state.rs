use std::sync::Arc;

use tracing::info;
use trilhas_audit::{AuditInterceptor, AuditSink, LogAuditSink, PgAuditSink};
use trilhas_auth::{CredentialExtractor, JwtTokenValidator, SessionResolver};
use trilhas_cache::{CacheConfig, RedisCache, RedisSessionStore};
use trilhas_config::{AuditConfig, AuditSinkKind, CorsConfig, JwtConfig, SessionConfig};

use crate::audit::default_audit_registry;

#[derive(Clone)]
pub struct AppState {
    pub resolver: SessionResolver,
    pub audit: AuditInterceptor,
    pub cors_config: CorsConfig,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("audit", &self.audit)
            .field("cors_config", &self.cors_config)
            .finish_non_exhaustive()
    }
}

async fn init_audit_sink(config: &AuditConfig) -> anyhow::Result<Arc<dyn AuditSink>> {
    match config.sink {
        AuditSinkKind::Postgres => {
            let pool = trilhas_db::init_db_pool().await?;
            trilhas_db::run_migrations(&pool).await?;
            info!("Audit records go to Postgres");
            Ok(Arc::new(PgAuditSink::new(pool)))
        }
        AuditSinkKind::Log => {
            info!("Audit records go to the `audit` log target");
            Ok(Arc::new(LogAuditSink))
        }
    }
}

/// Builds the production state from the environment.
///
/// Redis must be reachable at startup; later outages are absorbed by the
/// fail-open resolver.
pub async fn init_app_state() -> anyhow::Result<AppState> {
    let jwt_config = JwtConfig::from_env();
    let session_config = SessionConfig::from_env();
    let cache_config = CacheConfig::from_env();

    let cache = RedisCache::new(&cache_config.redis_url).await?;
    let store = RedisSessionStore::new(cache, cache_config.key_prefix);

    let resolver = SessionResolver::new(
        CredentialExtractor::from_config(&session_config),
        Arc::new(JwtTokenValidator::new(jwt_config)),
        Arc::new(store),
    );

    let sink = init_audit_sink(&AuditConfig::from_env()).await?;
    // No entity-state lookups are registered yet, so old values are not captured
    let audit = AuditInterceptor::new(sink).with_registry(default_audit_registry());

    Ok(AppState {
        resolver,
        audit,
        cors_config: CorsConfig::from_env(),
    })
}
