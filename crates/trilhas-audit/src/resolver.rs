//! Entity-id resolution.
//!
//! Three strategies run in a fixed order and the first one that yields an
//! identifier wins. A strategy that finds nothing hands over to the next,
//! except that a named parameter which is present but not an identifier
//! leaves the id unresolved.

use tracing::debug;
use uuid::Uuid;

use crate::params::AuditParams;
use crate::policy::AuditPolicy;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityIdStrategy {
    /// The parameter the policy names explicitly.
    NamedParameter,
    /// The first parameter whose name looks like an id (`id`, `entityId`,
    /// `userId`, anything ending in `id`), case-insensitive.
    ConventionalName,
    /// The first value that is already an identifier.
    FirstIdentifier,
}

impl EntityIdStrategy {
    pub const CHAIN: [EntityIdStrategy; 3] = [
        EntityIdStrategy::NamedParameter,
        EntityIdStrategy::ConventionalName,
        EntityIdStrategy::FirstIdentifier,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityIdStrategy::NamedParameter => "named_parameter",
            EntityIdStrategy::ConventionalName => "conventional_name",
            EntityIdStrategy::FirstIdentifier => "first_identifier",
        }
    }

    pub fn resolve(&self, policy: &AuditPolicy, params: &AuditParams) -> Option<Uuid> {
        match self {
            EntityIdStrategy::NamedParameter => policy
                .entity_id_param
                .as_deref()
                .and_then(|name| params.get(name))
                .and_then(|value| value.as_identifier()),
            EntityIdStrategy::ConventionalName => params
                .iter()
                .filter(|(name, _)| is_conventional_id_name(name))
                .find_map(|(_, value)| value.as_identifier()),
            EntityIdStrategy::FirstIdentifier => params
                .iter()
                .find(|(_, value)| value.is_identifier())
                .and_then(|(_, value)| value.as_identifier()),
        }
    }
}

// `id`, `entityid` and `userid` all end in "id"
fn is_conventional_id_name(name: &str) -> bool {
    name.to_ascii_lowercase().ends_with("id")
}

/// Runs [`EntityIdStrategy::CHAIN`] and returns the first identifier found.
///
/// The chain only continues past [`EntityIdStrategy::NamedParameter`] when the
/// named parameter is absent. A present value that does not coerce to a UUID
/// resolves to `None`.
pub fn resolve_entity_id(policy: &AuditPolicy, params: &AuditParams) -> Option<Uuid> {
    let named = policy
        .entity_id_param
        .as_deref()
        .and_then(|name| params.get(name).map(|value| (name, value)));

    if let Some((name, value)) = named {
        if value.as_identifier().is_none() {
            debug!(
                entity_type = %policy.entity_type,
                param = name,
                "Named entity id parameter is not an identifier"
            );
            return None;
        }
    }

    EntityIdStrategy::CHAIN.iter().find_map(|strategy| {
        let id = strategy.resolve(policy, params)?;
        debug!(
            entity_type = %policy.entity_type,
            strategy = strategy.as_str(),
            entity_id = %id,
            "Resolved audit entity id"
        );
        Some(id)
    })
}
