//! Cache key layout.
//!
//! Raw session tokens never appear in Redis keys; they are hashed first so a
//! `KEYS`/`SCAN` dump does not leak usable credentials.

use sha2::{Digest, Sha256};

fn build_key(prefix: &str, parts: &[&str]) -> String {
    format!("{}:{}", prefix, parts.join(":"))
}

/// Hex-encoded SHA-256 of `value`.
pub fn fingerprint(value: &str) -> String {
    hex::encode(Sha256::digest(value.as_bytes()))
}

pub mod sessions {
    use super::*;

    /// `<prefix>:session:<sha256(token)>`
    pub fn by_token(prefix: &str, token: &str) -> String {
        build_key(prefix, &["session", &fingerprint(token)])
    }
}
