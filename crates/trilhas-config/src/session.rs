use std::env;

/// Default name of the HTTP-only cookie carrying the session token.
pub const DEFAULT_SESSION_COOKIE: &str = "trilhas_session";

/// Session cookie settings.
///
/// # Environment Variables
///
/// - `SESSION_COOKIE_NAME`: cookie holding the session token (default: `trilhas_session`)
#[derive(Clone, Debug)]
pub struct SessionConfig {
    pub cookie_name: String,
}

impl SessionConfig {
    pub fn from_env() -> Self {
        Self {
            cookie_name: env::var("SESSION_COOKIE_NAME")
                .ok()
                .filter(|name| !name.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_SESSION_COOKIE.to_string()),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: DEFAULT_SESSION_COOKIE.to_string(),
        }
    }
}
