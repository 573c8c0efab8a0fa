//! Configuration models
//!
//! Serde-backed configuration structs with defaults mirroring the YAML
//! config file shape.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Top-level gateway configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Document store (scenario configs and ROI reports)
    #[serde(default)]
    pub document_store: DocumentStoreConfig,
    /// Blob storage upload credentials
    #[serde(default)]
    pub blob_storage: BlobStorageConfig,
    /// Sweep defaults for the pricing analyses
    #[serde(default)]
    pub pricing: PricingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
    /// Number of worker threads
    pub workers: Option<usize>,
    /// CORS configuration
    #[serde(default)]
    pub cors: CorsConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
            cors: CorsConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Get the server address
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the number of workers (defaults to CPU count)
    pub fn worker_count(&self) -> usize {
        self.workers.unwrap_or_else(num_cpus::get)
    }

    /// Validate server configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.port == 0 {
            return Err("Port cannot be 0".to_string());
        }
        if let Some(workers) = self.workers {
            if workers == 0 {
                return Err("Worker count cannot be 0".to_string());
            }
        }
        Ok(())
    }
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Enable CORS
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Allowed origins (empty means allow all)
    #[serde(default)]
    pub allowed_origins: Vec<String>,
    /// Allow credentials
    #[serde(default)]
    pub allow_credentials: bool,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            allowed_origins: vec![],
            allow_credentials: false,
        }
    }
}

impl CorsConfig {
    /// Check if CORS allows all origins (insecure)
    pub fn allows_all_origins(&self) -> bool {
        self.allowed_origins.is_empty() || self.allowed_origins.contains(&"*".to_string())
    }

    /// Validate CORS configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.enabled {
            if self.allows_all_origins() && self.allow_credentials {
                return Err(
                    "CORS cannot allow all origins (*) when credentials are enabled".to_string(),
                );
            }
            if self.allows_all_origins() {
                warn!("CORS allows all origins. This may be insecure for production.");
            }
        }
        Ok(())
    }
}

/// Document store backend selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStoreBackend {
    /// In-process store; documents are lost on restart
    #[default]
    Memory,
    /// Cosmos DB REST backend
    Cosmos,
}

/// Document store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentStoreConfig {
    /// Which backend to use
    #[serde(default)]
    pub backend: DocumentStoreBackend,
    /// Account endpoint, e.g. `https://myaccount.documents.azure.com`
    #[serde(default)]
    pub endpoint: String,
    /// Base64 master key
    #[serde(default)]
    pub key: String,
    /// Database name
    #[serde(default = "default_database")]
    pub database: String,
    /// Container name
    #[serde(default = "default_container")]
    pub container: String,
    /// Partition key value for scenario configuration documents
    #[serde(default = "default_scenario_partition")]
    pub scenario_partition: String,
    /// Partition key value for ROI report documents
    #[serde(default = "default_roi_partition")]
    pub roi_partition: String,
}

impl Default for DocumentStoreConfig {
    fn default() -> Self {
        Self {
            backend: DocumentStoreBackend::default(),
            endpoint: String::new(),
            key: String::new(),
            database: default_database(),
            container: default_container(),
            scenario_partition: default_scenario_partition(),
            roi_partition: default_roi_partition(),
        }
    }
}

impl DocumentStoreConfig {
    /// Validate document store configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.backend == DocumentStoreBackend::Cosmos {
            if self.endpoint.is_empty() {
                return Err("Cosmos backend requires an endpoint".to_string());
            }
            if self.key.is_empty() {
                return Err("Cosmos backend requires a master key".to_string());
            }
        }
        if self.database.is_empty() || self.container.is_empty() {
            return Err("Database and container names are required".to_string());
        }
        Ok(())
    }
}

/// Blob storage configuration for upload-credential issuance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlobStorageConfig {
    /// Storage account name
    #[serde(default)]
    pub account: String,
    /// Base64 account key; SAS issuance is disabled when absent
    #[serde(default)]
    pub key: Option<String>,
    /// Container uploads are scoped to
    #[serde(default = "default_blob_container")]
    pub container: String,
}

impl Default for BlobStorageConfig {
    fn default() -> Self {
        Self {
            account: String::new(),
            key: None,
            container: default_blob_container(),
        }
    }
}

impl BlobStorageConfig {
    /// True when SAS issuance is configured
    pub fn is_configured(&self) -> bool {
        !self.account.is_empty() && self.key.as_deref().is_some_and(|k| !k.is_empty())
    }
}

/// Defaults for the pricing sweep endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Upper bound of the swept execution-volume domain
    #[serde(default = "default_max_executions")]
    pub max_executions: u64,
    /// Sample spacing for break-even scans
    #[serde(default = "default_breakeven_step")]
    pub breakeven_step: u64,
    /// Number of samples per chart series
    #[serde(default = "default_chart_samples")]
    pub chart_samples: u64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            max_executions: default_max_executions(),
            breakeven_step: default_breakeven_step(),
            chart_samples: default_chart_samples(),
        }
    }
}

impl PricingConfig {
    /// Validate pricing sweep defaults
    pub fn validate(&self) -> Result<(), String> {
        if self.breakeven_step == 0 {
            return Err("Break-even step must be positive".to_string());
        }
        if self.chart_samples == 0 {
            return Err("Chart sample count must be positive".to_string());
        }
        if self.max_executions < self.breakeven_step {
            return Err("Max executions must be at least one break-even step".to_string());
        }
        Ok(())
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_true() -> bool {
    true
}

fn default_database() -> String {
    "pricing".to_string()
}

fn default_container() -> String {
    "scenarioconfigs".to_string()
}

fn default_scenario_partition() -> String {
    "saas-credits".to_string()
}

fn default_roi_partition() -> String {
    "roi-calc".to_string()
}

fn default_blob_container() -> String {
    "scenariopricing".to_string()
}

fn default_max_executions() -> u64 {
    10_000
}

fn default_breakeven_step() -> u64 {
    50
}

fn default_chart_samples() -> u64 {
    100
}
