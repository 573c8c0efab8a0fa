//! # TierCalc-RS
//!
//! Usage-based SaaS pricing calculator and gateway. Models credit-based
//! tier pricing for automation workloads and serves the cost model,
//! break-even analysis, and chart generation over HTTP, with persistence
//! for scenario configurations and ROI reports.
//!
//! ## Features
//!
//! - **Pure Cost Model**: Deterministic per-scenario cost evaluation with
//!   credit overage, BYOK discounting, and credit-pack accounting
//! - **Break-Even Scanner**: Finds the execution volumes where the cheapest
//!   tier changes across the swept domain
//! - **Chart Series**: Per-tier cost-vs-volume and cost-per-execution curves
//! - **Scenario Workspaces**: Saved what-if scenarios with server-side
//!   recomputation of derived results
//! - **Document Persistence**: In-memory or Cosmos DB document storage for
//!   scenario configurations and ROI reports
//! - **Upload Credentials**: Short-lived, scoped SAS tokens for direct
//!   blob uploads
//!
//! ## Library Use
//!
//! ```rust
//! use tiercalc_rs::core::pricing::{self, ScenarioInput, defaults};
//!
//! let input = ScenarioInput {
//!     executions: 100,
//!     workflow_index: 0,
//!     tier_key: "starter".to_string(),
//!     has_byok: false,
//! };
//! let result = pricing::evaluate(
//!     &input,
//!     &defaults::default_tiers(),
//!     &defaults::default_workflows(),
//!     &defaults::default_rates(),
//! );
//! assert!(result.resolved);
//! ```
//!
//! ## Gateway Mode
//!
//! ```rust,no_run
//! use tiercalc_rs::{Config, Gateway};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/gateway.yaml").await?;
//!     let gateway = Gateway::new(config)?;
//!     gateway.run().await?;
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod core;
pub mod server;
pub mod services;
pub mod storage;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use utils::error::{GatewayError, Result};

// Export the cost model surface
pub use core::pricing::{
    BreakEvenPoint, ChartMetric, CreditUsage, GlobalRates, ScenarioInput, ScenarioResult,
    SeriesPoint, Tier, TierSeries, TierTable, WorkflowType, credit_usage, evaluate,
    find_break_even_points, tier_series,
};

// Export service types
pub use services::scenario::{SavedScenario, ScenarioState};
pub use services::sharelink::SharedVariables;

use tracing::info;

/// A minimal pricing gateway instance
pub struct Gateway {
    config: Config,
    server: server::HttpServer,
}

impl Gateway {
    /// Create a new gateway instance
    pub fn new(config: Config) -> Result<Self> {
        info!("Creating new gateway instance");

        let server = server::HttpServer::new(&config)?;

        Ok(Self { config, server })
    }

    /// Run the gateway server
    pub async fn run(self) -> Result<()> {
        info!("Starting pricing gateway");
        info!("Listening on {}", self.config.server().address());

        self.server.start().await?;

        Ok(())
    }
}

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Description of the crate
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
