//! Redis connection settings.

use std::env;

pub const DEFAULT_REDIS_URL: &str = "redis://127.0.0.1:6379";
pub const DEFAULT_KEY_PREFIX: &str = "trilhas";

/// Redis configuration loaded from environment variables.
///
/// # Environment Variables
///
/// - `REDIS_URL`: connection URL (default: `redis://127.0.0.1:6379`)
/// - `CACHE_PREFIX`: prefix for every key this service writes (default: `trilhas`)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheConfig {
    pub redis_url: String,
    pub key_prefix: String,
}

impl CacheConfig {
    pub fn from_env() -> Self {
        Self {
            redis_url: env::var("REDIS_URL").unwrap_or_else(|_| DEFAULT_REDIS_URL.into()),
            key_prefix: env::var("CACHE_PREFIX").unwrap_or_else(|_| DEFAULT_KEY_PREFIX.into()),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            redis_url: DEFAULT_REDIS_URL.into(),
            key_prefix: DEFAULT_KEY_PREFIX.into(),
        }
    }
}
