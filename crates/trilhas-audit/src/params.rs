//! The arguments of an audited call, as the call site names them.

use serde_json::Value;
use trilhas_models::{LessonId, ModuleId, TrailId, UserId};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// Already an identifier.
    Id(Uuid),
    /// Free text; counts as an identifier only if it parses as one.
    Text(String),
    Other(Value),
}

impl ParamValue {
    /// Coerces this value to an identifier, if it is or contains one.
    pub fn as_identifier(&self) -> Option<Uuid> {
        match self {
            ParamValue::Id(id) => Some(*id),
            ParamValue::Text(s) => Uuid::parse_str(s).ok(),
            ParamValue::Other(_) => None,
        }
    }

    pub fn is_identifier(&self) -> bool {
        matches!(self, ParamValue::Id(_))
    }
}

impl From<Uuid> for ParamValue {
    fn from(id: Uuid) -> Self {
        ParamValue::Id(id)
    }
}

macro_rules! param_from_id {
    ($($id:ty),* $(,)?) => {
        $(
            impl From<$id> for ParamValue {
                fn from(id: $id) -> Self {
                    ParamValue::Id(id.into_inner())
                }
            }
        )*
    };
}

param_from_id!(UserId, TrailId, ModuleId, LessonId);

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        ParamValue::Text(s)
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::Text(s.to_string())
    }
}

impl From<Value> for ParamValue {
    fn from(v: Value) -> Self {
        ParamValue::Other(v)
    }
}

/// Ordered `(name, value)` list. Order is declaration order at the call site.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuditParams {
    entries: Vec<(String, ParamValue)>,
}

impl AuditParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.push(name, value);
        self
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<ParamValue>) {
        self.entries.push((name.into(), value.into()));
    }

    /// First parameter called exactly `name`.
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
