//! # Trilhas Cache
//!
//! Redis plumbing for the Trilhas API: the connection wrapper, key layout and
//! the Redis-backed session store consulted on every authenticated request.

pub mod config;
pub mod keys;
pub mod redis;
pub mod session_store;

pub use config::CacheConfig;
pub use self::redis::{CacheError, RedisCache};
pub use session_store::RedisSessionStore;
