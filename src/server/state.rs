//! Application state shared across HTTP handlers
//!
//! This module provides the AppState struct and its implementations.

use std::sync::Arc;

use crate::config::{Config, DocumentStoreBackend};
use crate::services::scenario::{
    DocumentScenarioRepository, MemoryScenarioRepository, ScenarioStateRepository,
};
use crate::storage::{BlobSasIssuer, CosmosDocumentStore, DocumentStore, MemoryDocumentStore};
use crate::utils::error::Result;
use tracing::{info, warn};

/// HTTP server state shared across handlers
///
/// All fields are wrapped in Arc for efficient sharing across worker
/// threads. The blob issuer is optional: without storage credentials the
/// SAS endpoint reports the feature as unconfigured.
#[derive(Clone)]
pub struct AppState {
    /// Gateway configuration (shared read-only)
    pub config: Arc<Config>,
    /// Raw document persistence
    pub documents: Arc<dyn DocumentStore>,
    /// Typed scenario workspace persistence
    pub scenarios: Arc<dyn ScenarioStateRepository>,
    /// Blob upload credential issuer, when configured
    pub blob: Option<Arc<BlobSasIssuer>>,
}

impl AppState {
    /// Build state from configuration, selecting backends accordingly
    pub fn from_config(config: &Config) -> Result<Self> {
        let documents: Arc<dyn DocumentStore> = match config.document_store().backend {
            DocumentStoreBackend::Memory => {
                info!("Using in-memory document store");
                Arc::new(MemoryDocumentStore::new())
            }
            DocumentStoreBackend::Cosmos => {
                info!(
                    endpoint = %config.document_store().endpoint,
                    "Using Cosmos DB document store"
                );
                Arc::new(CosmosDocumentStore::new(config.document_store())?)
            }
        };

        let scenarios: Arc<dyn ScenarioStateRepository> = Arc::new(DocumentScenarioRepository::new(
            documents.clone(),
            config.document_store().scenario_partition.clone(),
        ));

        let blob = if config.blob_storage().is_configured() {
            Some(Arc::new(BlobSasIssuer::new(config.blob_storage())?))
        } else {
            warn!("Blob storage not configured; upload credential issuance disabled");
            None
        };

        Ok(Self {
            config: Arc::new(config.clone()),
            documents,
            scenarios,
            blob,
        })
    }

    /// Fully in-memory state, used in tests
    pub fn in_memory(config: Config) -> Self {
        Self {
            config: Arc::new(config),
            documents: Arc::new(MemoryDocumentStore::new()),
            scenarios: Arc::new(MemoryScenarioRepository::new()),
            blob: None,
        }
    }

    /// Get gateway configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}
