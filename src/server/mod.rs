//! HTTP server for the pricing gateway

pub mod builder;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod state;

pub use builder::{ServerBuilder, run_server};
pub use server::HttpServer;
pub use state::AppState;
