//! Session token issuance and verification.
//!
//! Session tokens are HS256 JWTs. Verification checks the signature and the
//! `exp` claim only; whether the session still exists is a separate question
//! answered by the session store.
//!
//! # Example
//!
//! ```ignore
//! use trilhas_auth::{create_session_token, verify_token};
//! use trilhas_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//! let token = create_session_token(user_id, Role::Teacher, &config)?;
//! let claims = verify_token(&token, &config)?;
//! ```

use anyhow::anyhow;
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use trilhas_config::JwtConfig;
use trilhas_core::AppError;
use trilhas_models::{Role, UserId};

use crate::claims::SessionClaims;

/// Creates a signed session token for `user_id`.
///
/// # Errors
///
/// Returns an internal error if token encoding fails (e.g., invalid secret key).
pub fn create_session_token(
    user_id: UserId,
    role: Role,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp() as usize;
    let exp = now + jwt_config.session_token_expiry as usize;

    let claims = SessionClaims {
        sub: user_id.to_string(),
        role,
        exp,
        iat: now,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal(anyhow!("Failed to create token: {}", e)))
}

/// Verifies a session token's signature and expiry.
///
/// # Errors
///
/// Returns an unauthorized error if the token is malformed, signed with a
/// different secret, or expired.
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<SessionClaims, AppError> {
    let mut validation = Validation::default();
    validation.leeway = jwt_config.leeway;

    decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| AppError::unauthorized(format!("Invalid or expired token: {}", e)))
}
