use serde::Serialize;
use std::collections::BTreeSet;
use trilhas_models::{Role, UserId};

use crate::session::Session;

/// The authenticated identity attached to one request.
///
/// Each permission string is an independent grant. Blank entries are dropped
/// and duplicates collapse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Principal {
    pub user_id: UserId,
    pub role: Role,
    pub permissions: BTreeSet<String>,
}

impl Principal {
    pub fn new<I, P>(user_id: UserId, role: Role, permissions: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        let permissions = permissions
            .into_iter()
            .map(Into::into)
            .filter(|p: &String| !p.trim().is_empty())
            .collect();

        Self {
            user_id,
            role,
            permissions,
        }
    }

    pub fn from_session(session: &Session) -> Self {
        Self::new(session.user_id, session.role, session.permissions.iter().cloned())
    }

    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.contains(permission)
    }

    pub fn has_any_permission(&self, permissions: &[&str]) -> bool {
        permissions.iter().any(|p| self.has_permission(p))
    }

    pub fn has_all_permissions(&self, permissions: &[&str]) -> bool {
        permissions.iter().all(|p| self.has_permission(p))
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.role == role
    }

    /// Role hierarchy check, e.g. an admin satisfies `is_at_least(Role::Teacher)`.
    pub fn is_at_least(&self, role: Role) -> bool {
        self.role.is_at_least(role)
    }
}
