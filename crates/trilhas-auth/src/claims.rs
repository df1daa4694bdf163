//! JWT claim structure for session tokens.

use serde::{Deserialize, Serialize};
use trilhas_models::Role;

/// Claims embedded in a session token.
///
/// The token only proves integrity and freshness. The authoritative session
/// data (permissions, display name, revocation) lives in the session store,
/// keyed by the full token string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// User ID (subject claim)
    pub sub: String,
    /// Profile the session was issued for
    pub role: Role,
    /// Token expiration timestamp (Unix timestamp)
    pub exp: usize,
    /// Token issued-at timestamp (Unix timestamp)
    pub iat: usize,
    /// Unique token identifier, so two sessions never share a token
    pub jti: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_serialize() {
        let claims = SessionClaims {
            sub: "user-id-123".to_string(),
            role: Role::Teacher,
            exp: 1234567890,
            iat: 1234567800,
            jti: "jti-1".to_string(),
        };
        let serialized = serde_json::to_string(&claims).unwrap();
        assert!(serialized.contains(r#""sub":"user-id-123""#));
        assert!(serialized.contains(r#""role":"teacher""#));
    }

    #[test]
    fn test_claims_deserialize() {
        let json = r#"{"sub":"user-id-456","role":"student","exp":9999999999,"iat":9999999900,"jti":"x"}"#;
        let claims: SessionClaims = serde_json::from_str(json).unwrap();
        assert_eq!(claims.sub, "user-id-456");
        assert_eq!(claims.role, Role::Student);
        assert_eq!(claims.exp, 9999999999);
    }
}
