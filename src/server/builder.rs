//! Server builder and run_server function
//!
//! This module provides the ServerBuilder for easier server configuration
//! and the run_server function for automatic configuration loading.

use tracing::info;

use crate::config::Config;
use crate::server::server::HttpServer;
use crate::utils::error::{GatewayError, Result};

/// Server builder for easier configuration
pub struct ServerBuilder {
    config: Option<Config>,
}

impl ServerBuilder {
    /// Create a new server builder
    pub fn new() -> Self {
        Self { config: None }
    }

    /// Set configuration
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the HTTP server
    pub fn build(self) -> Result<HttpServer> {
        let config = self
            .config
            .ok_or_else(|| GatewayError::Config("Configuration is required".to_string()))?;

        HttpServer::new(&config)
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Run the server with automatic configuration loading
pub async fn run_server() -> Result<()> {
    info!("Starting pricing gateway");

    let config_path = "config/gateway.yaml";

    let config = match Config::from_file(config_path).await {
        Ok(config) => {
            info!("Configuration file loaded: {}", config_path);
            config
        }
        Err(e) => {
            info!(
                "Configuration file unavailable ({}); using defaults with environment overrides",
                e
            );
            Config::from_env()?
        }
    };

    let server = HttpServer::new(&config)?;
    info!(
        "Server starting at: http://{}",
        config.server().address()
    );
    info!("API Endpoints:");
    info!("   GET  /health - Health check");
    info!("   POST /api/v1/pricing/calculate - Evaluate one scenario");
    info!("   POST /api/v1/pricing/breakeven - Scan tier break-even points");
    info!("   POST /api/v1/pricing/chart - Generate cost-curve series");
    info!("   POST /api/scenario-config - Save scenario configuration");
    info!("   GET  /api/scenario-config/{{id}} - Load scenario configuration");
    info!("   POST /api/roi-report - Save ROI report");
    info!("   GET  /api/roi-report/{{id}} - Load ROI report");
    info!("   GET  /api/generate-sas - Issue blob upload credential");

    server.start().await
}
