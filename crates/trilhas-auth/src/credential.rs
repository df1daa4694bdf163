//! Pulls the bearer credential out of an inbound request.
//!
//! The HTTP-only session cookie wins over the `Authorization` header. The
//! header must use the exact `Bearer ` scheme prefix; any other casing is
//! treated as "no credential", not as a malformed one. Nothing here fails.
//!
//! Bearer tokens are taken verbatim, surrounding whitespace included. Cookie
//! values go through the cookie parser, which trims whitespace around them.

use axum::http::{HeaderMap, header};
use axum_extra::extract::cookie::CookieJar;
use trilhas_config::SessionConfig;

const BEARER_PREFIX: &str = "Bearer ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    Cookie,
    AuthorizationHeader,
}

impl CredentialSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            CredentialSource::Cookie => "cookie",
            CredentialSource::AuthorizationHeader => "authorization_header",
        }
    }
}

/// A raw credential and where it came from.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    pub token: String,
    pub source: CredentialSource,
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone)]
pub struct CredentialExtractor {
    cookie_name: String,
}

impl CredentialExtractor {
    pub fn new(cookie_name: impl Into<String>) -> Self {
        Self {
            cookie_name: cookie_name.into(),
        }
    }

    pub fn from_config(config: &SessionConfig) -> Self {
        Self::new(config.cookie_name.clone())
    }

    /// Returns the session cookie if present, otherwise the bearer token.
    pub fn extract(&self, headers: &HeaderMap) -> Option<Credential> {
        self.cookie_token(headers)
            .map(|token| Credential {
                token,
                source: CredentialSource::Cookie,
            })
            .or_else(|| {
                bearer_token(headers).map(|token| Credential {
                    token,
                    source: CredentialSource::AuthorizationHeader,
                })
            })
    }

    fn cookie_token(&self, headers: &HeaderMap) -> Option<String> {
        CookieJar::from_headers(headers)
            .get(&self.cookie_name)
            .map(|c| c.value().to_string())
            .filter(|value| !value.is_empty())
    }
}

/// Everything after the exact `Bearer ` prefix, whitespace included.
fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix(BEARER_PREFIX))
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}
