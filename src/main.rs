//! TierCalc-RS - Usage-based SaaS pricing gateway
//!
//! Serves the cost model, break-even analysis, and scenario persistence
//! over HTTP

#![allow(missing_docs)]

use std::process::ExitCode;
use tiercalc_rs::server;
use tracing::Level;

#[tokio::main]
async fn main() -> ExitCode {
    // Environment files are optional; real env vars win
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_target(false)
        .with_thread_ids(false)
        .init();

    // Start server (auto-loads config/gateway.yaml)
    match server::builder::run_server().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Print error using Display (not Debug) to preserve newlines
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
