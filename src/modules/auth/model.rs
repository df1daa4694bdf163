use serde::{Deserialize, Serialize};
use trilhas_auth::Principal;

/// Body of `GET /api/auth/session`.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionStatus {
    pub authenticated: bool,
    pub principal: Option<PrincipalResponse>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct PrincipalResponse {
    pub user_id: trilhas_models::UserId,
    pub role: trilhas_models::Role,
    pub permissions: Vec<String>,
}

impl From<&Principal> for PrincipalResponse {
    fn from(principal: &Principal) -> Self {
        Self {
            user_id: principal.user_id,
            role: principal.role,
            permissions: principal.permissions.iter().cloned().collect(),
        }
    }
}
