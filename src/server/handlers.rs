//! HTTP route handlers
//!
//! This module provides HTTP route handler functions.

use actix_web::{HttpResponse, web};
use serde_json::json;

use crate::server::AppState;

/// Health check endpoint handler
pub async fn health_check(data: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "document_store": format!("{:?}", data.config.document_store().backend).to_lowercase(),
        "blob_storage_configured": data.blob.is_some(),
    }))
}
