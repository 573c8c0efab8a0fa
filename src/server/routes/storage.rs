//! Blob upload credential API endpoint

use actix_web::{HttpResponse, web};
use serde::Deserialize;
use tracing::debug;

use crate::server::AppState;
use crate::utils::error::{GatewayError, Result};

/// Query parameters for SAS issuance
#[derive(Debug, Deserialize)]
pub struct SasQuery {
    /// Scope the token to one blob; container-scoped when absent
    pub blob_name: Option<String>,
    /// Permission characters; create+write when absent
    pub permissions: Option<String>,
    /// Token lifetime; 15 minutes when absent
    pub expires_in_minutes: Option<i64>,
}

/// Issue a short-lived upload credential
/// GET /api/generate-sas
pub async fn generate_sas(
    data: web::Data<AppState>,
    query: web::Query<SasQuery>,
) -> Result<HttpResponse> {
    let issuer = data
        .blob
        .as_ref()
        .ok_or_else(|| GatewayError::config("Blob storage is not configured"))?;

    debug!(
        blob = query.blob_name.as_deref().unwrap_or("<container>"),
        "Issuing upload credential"
    );

    let token = issuer.issue(
        query.blob_name.as_deref(),
        query.permissions.as_deref(),
        query.expires_in_minutes,
    )?;

    Ok(HttpResponse::Ok().json(token))
}

/// Configure storage credential routes
pub fn configure_storage_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/generate-sas", web::get().to(generate_sas));
}
