//! Access profiles.
//!
//! Every session carries exactly one [`Role`] out of a closed set. Roles form
//! a strict hierarchy used by coarse authorization checks; fine-grained checks
//! use permission strings instead.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    SystemAdmin,
    Admin,
    Teacher,
    Student,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::SystemAdmin, Role::Admin, Role::Teacher, Role::Student];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SystemAdmin => "system_admin",
            Role::Admin => "admin",
            Role::Teacher => "teacher",
            Role::Student => "student",
        }
    }

    /// Higher values outrank lower ones.
    pub fn hierarchy_level(&self) -> u8 {
        match self {
            Role::SystemAdmin => 4,
            Role::Admin => 3,
            Role::Teacher => 2,
            Role::Student => 1,
        }
    }

    /// Whether this role is `required` or ranks above it.
    pub fn is_at_least(&self, required: Role) -> bool {
        self.hierarchy_level() >= required.hierarchy_level()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| format!("unknown role '{}'", s))
    }
}
