//! ROI report API endpoints
//!
//! ROI reports share the scenario-config container but live under their own
//! partition. The save path stamps the document's `type` field so reports
//! stay distinguishable however the client built them.

use actix_web::{HttpResponse, web};
use serde_json::Value;
use tracing::info;

use crate::server::AppState;
use crate::server::routes::scenario::SaveResponse;
use crate::utils::error::{GatewayError, Result};

/// Save an ROI report document
/// POST /api/roi-report
pub async fn save_roi_report(
    data: web::Data<AppState>,
    payload: web::Json<Value>,
) -> Result<HttpResponse> {
    let mut document = payload.into_inner();
    let partition = data.config.document_store().roi_partition.clone();

    if let Some(object) = document.as_object_mut() {
        object.insert("type".to_string(), Value::String(partition.clone()));
    }

    let id = data.documents.upsert(&partition, document).await?;
    info!(id = %id, "ROI report saved");
    Ok(HttpResponse::Ok().json(SaveResponse { id }))
}

/// Load an ROI report document
/// GET /api/roi-report/{id}
pub async fn load_roi_report(
    data: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    let partition = &data.config.document_store().roi_partition;

    match data.documents.read(partition, &id).await? {
        Some(document) => Ok(HttpResponse::Ok().json(document)),
        None => Err(GatewayError::not_found(format!(
            "ROI report '{}' not found",
            id
        ))),
    }
}

/// Configure ROI report routes
pub fn configure_roi_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/roi-report", web::post().to(save_roi_report))
        .route("/api/roi-report/{id}", web::get().to(load_roi_report));
}
