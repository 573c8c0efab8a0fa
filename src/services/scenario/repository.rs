//! Scenario state persistence
//!
//! States are stored one per workspace key. The document-backed
//! implementation serializes the state into the shared document store,
//! so the same Cosmos container that holds raw scenario-config documents
//! also carries typed workspace state.

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

use crate::storage::DocumentStore;
use crate::utils::error::Result;

use super::service::ScenarioState;

/// Async persistence seam for scenario workspace state
#[async_trait]
pub trait ScenarioStateRepository: Send + Sync {
    /// Load the state stored under `key`, or `None` when no state exists
    async fn load(&self, key: &str) -> Result<Option<ScenarioState>>;

    /// Persist the state under `key`, replacing any previous state
    async fn save(&self, key: &str, state: &ScenarioState) -> Result<()>;
}

/// In-process repository for tests and local development
#[derive(Debug, Default)]
pub struct MemoryScenarioRepository {
    states: DashMap<String, ScenarioState>,
}

impl MemoryScenarioRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ScenarioStateRepository for MemoryScenarioRepository {
    async fn load(&self, key: &str) -> Result<Option<ScenarioState>> {
        Ok(self.states.get(key).map(|entry| entry.value().clone()))
    }

    async fn save(&self, key: &str, state: &ScenarioState) -> Result<()> {
        self.states.insert(key.to_string(), state.clone());
        Ok(())
    }
}

/// Repository persisting states as documents in the shared document store
pub struct DocumentScenarioRepository {
    store: Arc<dyn DocumentStore>,
    partition: String,
}

impl DocumentScenarioRepository {
    pub fn new(store: Arc<dyn DocumentStore>, partition: impl Into<String>) -> Self {
        Self {
            store,
            partition: partition.into(),
        }
    }
}

#[async_trait]
impl ScenarioStateRepository for DocumentScenarioRepository {
    async fn load(&self, key: &str) -> Result<Option<ScenarioState>> {
        let Some(document) = self.store.read(&self.partition, key).await? else {
            return Ok(None);
        };
        let state = serde_json::from_value(document)?;
        Ok(Some(state))
    }

    async fn save(&self, key: &str, state: &ScenarioState) -> Result<()> {
        let mut document = serde_json::to_value(state)?;
        if let Some(object) = document.as_object_mut() {
            object.insert("id".to_string(), Value::String(key.to_string()));
        }
        debug!(key = %key, partition = %self.partition, "Persisting scenario state");
        self.store.upsert(&self.partition, document).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::pricing::ScenarioInput;
    use crate::storage::MemoryDocumentStore;

    fn sample_state() -> ScenarioState {
        let mut state = ScenarioState::default();
        state.credit_rate = 0.02;
        state.add_scenario(
            "baseline",
            ScenarioInput {
                executions: 100,
                workflow_index: 0,
                tier_key: "starter".to_string(),
                has_byok: false,
            },
        );
        state
    }

    #[tokio::test]
    async fn test_memory_repository_round_trip() {
        let repository = MemoryScenarioRepository::new();
        assert!(repository.load("default").await.unwrap().is_none());

        let state = sample_state();
        repository.save("default", &state).await.unwrap();
        let loaded = repository.load("default").await.unwrap().unwrap();
        assert_eq!(loaded, state);
    }

    #[tokio::test]
    async fn test_document_repository_round_trip() {
        let store = Arc::new(MemoryDocumentStore::new());
        let repository = DocumentScenarioRepository::new(store.clone(), "saas-credits");

        let state = sample_state();
        repository.save("workspace-1", &state).await.unwrap();

        let loaded = repository.load("workspace-1").await.unwrap().unwrap();
        assert_eq!(loaded.credit_rate, 0.02);
        assert_eq!(loaded.scenarios.len(), 1);
        assert_eq!(loaded.scenarios[0].result.total_cost, state.scenarios[0].result.total_cost);

        // The raw document carries the key as its id
        let raw = store.read("saas-credits", "workspace-1").await.unwrap().unwrap();
        assert_eq!(raw["id"], "workspace-1");
    }

    #[tokio::test]
    async fn test_document_repository_missing_key_is_none() {
        let store = Arc::new(MemoryDocumentStore::new());
        let repository = DocumentScenarioRepository::new(store, "saas-credits");
        assert!(repository.load("nope").await.unwrap().is_none());
    }
}
