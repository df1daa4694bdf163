//! Current-state lookups used to capture `old_value`.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::warn;
use uuid::Uuid;

/// Fetches the current state of one entity type by id.
#[async_trait]
pub trait EntityStateLookup: Send + Sync {
    async fn fetch_by_id(&self, id: Uuid) -> anyhow::Result<Option<Value>>;
}

/// Entity type to lookup. Types without a lookup simply get no old value.
#[derive(Clone, Default)]
pub struct LookupRegistry {
    lookups: HashMap<String, Arc<dyn EntityStateLookup>>,
}

impl std::fmt::Debug for LookupRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LookupRegistry")
            .field("entity_types", &self.lookups.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl LookupRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        mut self,
        entity_type: impl Into<String>,
        lookup: Arc<dyn EntityStateLookup>,
    ) -> Self {
        self.lookups.insert(entity_type.into(), lookup);
        self
    }

    pub fn get(&self, entity_type: &str) -> Option<&Arc<dyn EntityStateLookup>> {
        self.lookups.get(entity_type)
    }

    /// Best-effort snapshot. Lookup errors are logged and yield `None`.
    pub async fn snapshot(&self, entity_type: &str, id: Uuid) -> Option<Value> {
        let lookup = self.lookups.get(entity_type)?;
        match lookup.fetch_by_id(id).await {
            Ok(value) => value,
            Err(e) => {
                warn!(
                    entity_type = %entity_type,
                    entity_id = %id,
                    error = %e,
                    "Failed to capture old value for audit"
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Fixed(Value);

    #[async_trait]
    impl EntityStateLookup for Fixed {
        async fn fetch_by_id(&self, _id: Uuid) -> anyhow::Result<Option<Value>> {
            Ok(Some(self.0.clone()))
        }
    }

    struct Broken;

    #[async_trait]
    impl EntityStateLookup for Broken {
        async fn fetch_by_id(&self, _id: Uuid) -> anyhow::Result<Option<Value>> {
            anyhow::bail!("database offline")
        }
    }

    #[tokio::test]
    async fn test_snapshot_uses_registered_lookup() {
        let registry =
            LookupRegistry::new().register("trail", Arc::new(Fixed(json!({"title": "A"}))));

        assert_eq!(
            registry.snapshot("trail", Uuid::new_v4()).await,
            Some(json!({"title": "A"}))
        );
        assert_eq!(registry.snapshot("lesson", Uuid::new_v4()).await, None);
    }

    #[tokio::test]
    async fn test_lookup_error_yields_none() {
        let registry = LookupRegistry::new().register("trail", Arc::new(Broken));
        assert_eq!(registry.snapshot("trail", Uuid::new_v4()).await, None);
    }
}
