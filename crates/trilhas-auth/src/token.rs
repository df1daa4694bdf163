//! Integrity and expiry checks that run before any session store lookup.

use tracing::debug;
use trilhas_config::JwtConfig;

use crate::jwt::verify_token;

/// Decides whether a raw credential is structurally and cryptographically
/// valid, without consulting the session store.
///
/// A token that passes here may still be revoked; that surfaces later as an
/// empty session lookup.
pub trait TokenValidator: Send + Sync {
    fn validate(&self, token: &str) -> bool;
}

/// Validates credentials as HS256 session JWTs.
#[derive(Clone, Debug)]
pub struct JwtTokenValidator {
    config: JwtConfig,
}

impl JwtTokenValidator {
    pub fn new(config: JwtConfig) -> Self {
        Self { config }
    }
}

impl TokenValidator for JwtTokenValidator {
    fn validate(&self, token: &str) -> bool {
        match verify_token(token, &self.config) {
            Ok(_) => true,
            Err(e) => {
                debug!(error = %e.error, "Session token rejected");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwt::create_session_token;
    use trilhas_models::{Role, UserId};

    fn config() -> JwtConfig {
        JwtConfig {
            secret: "token-validator-test-secret-32-chars!!".to_string(),
            session_token_expiry: 600,
            leeway: 0,
        }
    }

    #[test]
    fn test_accepts_freshly_issued_token() {
        let token = create_session_token(UserId::new(), Role::Teacher, &config()).unwrap();
        assert!(JwtTokenValidator::new(config()).validate(&token));
    }

    #[test]
    fn test_rejects_garbage_and_padded_tokens() {
        let validator = JwtTokenValidator::new(config());
        let token = create_session_token(UserId::new(), Role::Teacher, &config()).unwrap();

        assert!(!validator.validate("not-a-jwt"));
        assert!(!validator.validate(&format!(" {}", token)));
        assert!(!validator.validate(&format!("{}x", token)));
    }
}
