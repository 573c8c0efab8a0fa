//! Configuration management for the gateway
//!
//! This module handles loading, validation, and management of all gateway
//! configuration.

pub mod models;

pub use models::*;

use crate::utils::error::{GatewayError, Result};
use std::env;
use std::path::Path;
use tracing::{debug, info};

/// Main configuration struct for the gateway
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Gateway configuration
    pub gateway: GatewayConfig,
}

impl Config {
    /// Load configuration from file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| GatewayError::Config(format!("Failed to read config file: {}", e)))?;

        let gateway: GatewayConfig = serde_yaml::from_str(&content)
            .map_err(|e| GatewayError::Config(format!("Failed to parse config: {}", e)))?;

        let config = Self { gateway }.apply_env_overrides()?;
        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let config = Self::default().apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Overlay environment variables on the current configuration
    ///
    /// The document-store and blob variables use the names the deployment
    /// environment already provides (COSMOSDB_*, AZURE_STORAGE_*).
    pub fn apply_env_overrides(mut self) -> Result<Self> {
        if let Ok(host) = env::var("GATEWAY_HOST") {
            self.gateway.server.host = host;
        }
        if let Ok(port) = env::var("GATEWAY_PORT").or_else(|_| env::var("PORT")) {
            self.gateway.server.port = port
                .parse()
                .map_err(|e| GatewayError::Config(format!("Invalid port: {}", e)))?;
        }
        if let Ok(workers) = env::var("GATEWAY_WORKERS") {
            self.gateway.server.workers = Some(
                workers
                    .parse()
                    .map_err(|e| GatewayError::Config(format!("Invalid workers count: {}", e)))?,
            );
        }

        if let Ok(endpoint) = env::var("COSMOSDB_ENDPOINT") {
            self.gateway.document_store.endpoint = endpoint;
            self.gateway.document_store.backend = DocumentStoreBackend::Cosmos;
        }
        if let Ok(key) = env::var("COSMOSDB_KEY") {
            self.gateway.document_store.key = key;
        }
        if let Ok(database) = env::var("COSMOSDB_DATABASE") {
            self.gateway.document_store.database = database;
        }
        if let Ok(container) = env::var("COSMOSDB_CONTAINER") {
            self.gateway.document_store.container = container;
        }

        if let Ok(account) = env::var("AZURE_STORAGE_ACCOUNT") {
            self.gateway.blob_storage.account = account;
        }
        if let Ok(key) = env::var("AZURE_STORAGE_KEY") {
            self.gateway.blob_storage.key = Some(key);
        }

        Ok(self)
    }

    /// Get server configuration
    pub fn server(&self) -> &ServerConfig {
        &self.gateway.server
    }

    /// Get document store configuration
    pub fn document_store(&self) -> &DocumentStoreConfig {
        &self.gateway.document_store
    }

    /// Get blob storage configuration
    pub fn blob_storage(&self) -> &BlobStorageConfig {
        &self.gateway.blob_storage
    }

    /// Get pricing sweep defaults
    pub fn pricing(&self) -> &PricingConfig {
        &self.gateway.pricing
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.gateway
            .server
            .validate()
            .map_err(|e| GatewayError::Config(format!("Server config error: {}", e)))?;

        self.gateway
            .server
            .cors
            .validate()
            .map_err(|e| GatewayError::Config(format!("CORS config error: {}", e)))?;

        self.gateway
            .document_store
            .validate()
            .map_err(|e| GatewayError::Config(format!("Document store config error: {}", e)))?;

        self.gateway
            .pricing
            .validate()
            .map_err(|e| GatewayError::Config(format!("Pricing config error: {}", e)))?;

        debug!("Configuration validation completed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.server().port, 3000);
        assert_eq!(config.document_store().backend, DocumentStoreBackend::Memory);
    }

    #[test]
    fn test_cosmos_backend_requires_credentials() {
        let mut config = Config::default();
        config.gateway.document_store.backend = DocumentStoreBackend::Cosmos;
        assert!(config.validate().is_err());

        config.gateway.document_store.endpoint = "https://acct.documents.azure.com".to_string();
        config.gateway.document_store.key = "c2VjcmV0".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_breakeven_step_rejected() {
        let mut config = Config::default();
        config.gateway.pricing.breakeven_step = 0;
        assert!(config.validate().is_err());
    }

    #[tokio::test]
    async fn test_from_file_parses_yaml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "server:\n  host: 127.0.0.1\n  port: 8080\npricing:\n  max_executions: 20000\n  breakeven_step: 100"
        )
        .unwrap();

        let config = Config::from_file(file.path()).await.unwrap();
        assert_eq!(config.server().host, "127.0.0.1");
        assert_eq!(config.server().port, 8080);
        assert_eq!(config.pricing().max_executions, 20_000);
        assert_eq!(config.pricing().breakeven_step, 100);
        // Untouched sections keep their defaults
        assert_eq!(config.pricing().chart_samples, 100);
    }

    #[tokio::test]
    async fn test_from_file_missing_path_errors() {
        let result = Config::from_file("config/does-not-exist.yaml").await;
        assert!(matches!(result, Err(GatewayError::Config(_))));
    }
}
