//! Declarative audit metadata and the startup registry that holds it.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditAction {
    Create,
    Update,
    Delete,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::Create => "CREATE",
            AuditAction::Update => "UPDATE",
            AuditAction::Delete => "DELETE",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuditAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "CREATE" => Ok(AuditAction::Create),
            "UPDATE" => Ok(AuditAction::Update),
            "DELETE" => Ok(AuditAction::Delete),
            other => Err(format!("Unknown audit action: {}", other)),
        }
    }
}

/// How one operation is audited.
///
/// ```ignore
/// let policy = AuditPolicy::update("trail")
///     .entity_id_param("trailId")
///     .capture_old_value(true);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditPolicy {
    pub entity_type: String,
    pub action: AuditAction,
    pub entity_id_param: Option<String>,
    pub capture_old_value: bool,
}

impl AuditPolicy {
    pub fn new(entity_type: impl Into<String>, action: AuditAction) -> Self {
        Self {
            entity_type: entity_type.into(),
            action,
            entity_id_param: None,
            capture_old_value: false,
        }
    }

    pub fn create(entity_type: impl Into<String>) -> Self {
        Self::new(entity_type, AuditAction::Create)
    }

    pub fn update(entity_type: impl Into<String>) -> Self {
        Self::new(entity_type, AuditAction::Update)
    }

    pub fn delete(entity_type: impl Into<String>) -> Self {
        Self::new(entity_type, AuditAction::Delete)
    }

    /// Names the parameter that carries the entity id.
    pub fn entity_id_param(mut self, name: impl Into<String>) -> Self {
        self.entity_id_param = Some(name.into());
        self
    }

    /// Snapshot the entity before the operation runs. Ignored for `CREATE`.
    pub fn capture_old_value(mut self, capture: bool) -> Self {
        self.capture_old_value = capture;
        self
    }

    pub(crate) fn wants_old_value(&self) -> bool {
        self.capture_old_value && self.action != AuditAction::Create
    }
}

/// Operation id to [`AuditPolicy`], filled once at startup and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct AuditRegistry {
    policies: HashMap<String, AuditPolicy>,
}

impl AuditRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `policy` under `operation`, replacing any earlier entry.
    pub fn register(mut self, operation: impl Into<String>, policy: AuditPolicy) -> Self {
        self.policies.insert(operation.into(), policy);
        self
    }

    pub fn get(&self, operation: &str) -> Option<&AuditPolicy> {
        self.policies.get(operation)
    }

    pub fn contains(&self, operation: &str) -> bool {
        self.policies.contains_key(operation)
    }

    pub fn len(&self) -> usize {
        self.policies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }

    pub fn operations(&self) -> impl Iterator<Item = &str> {
        self.policies.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_wire_format() {
        assert_eq!(
            serde_json::to_string(&AuditAction::Delete).unwrap(),
            "\"DELETE\""
        );
        assert_eq!("update".parse::<AuditAction>().unwrap(), AuditAction::Update);
        assert!("archive".parse::<AuditAction>().is_err());
    }

    #[test]
    fn test_policy_builder() {
        let policy = AuditPolicy::update("trail")
            .entity_id_param("trailId")
            .capture_old_value(true);

        assert_eq!(policy.entity_type, "trail");
        assert_eq!(policy.action, AuditAction::Update);
        assert_eq!(policy.entity_id_param.as_deref(), Some("trailId"));
        assert!(policy.wants_old_value());
    }

    #[test]
    fn test_create_never_wants_old_value() {
        let policy = AuditPolicy::create("lesson").capture_old_value(true);
        assert!(!policy.wants_old_value());
    }

    #[test]
    fn test_registry_lookup() {
        let registry = AuditRegistry::new()
            .register("trails.create", AuditPolicy::create("trail"))
            .register("trails.delete", AuditPolicy::delete("trail"));

        assert_eq!(registry.len(), 2);
        assert_eq!(
            registry.get("trails.delete").map(|p| p.action),
            Some(AuditAction::Delete)
        );
        assert!(registry.get("trails.list").is_none());
    }
}
