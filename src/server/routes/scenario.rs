//! Scenario configuration API endpoints
//!
//! Two surfaces over the same store: the raw document endpoints accept and
//! return opaque JSON (what existing clients persist), and the typed
//! workspace endpoints operate on validated scenario state with derived
//! results recomputed server-side. Share links round-trip a subset of the
//! workspace variables as a URL-safe token.

use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use crate::server::AppState;
use crate::services::scenario::ScenarioState;
use crate::services::sharelink::{self, SharedVariables};
use crate::utils::error::{GatewayError, Result};

/// Upsert response for raw document writes
#[derive(Debug, Serialize)]
pub struct SaveResponse {
    pub id: String,
}

/// Save a raw scenario configuration document
/// POST /api/scenario-config
pub async fn save_scenario_config(
    data: web::Data<AppState>,
    payload: web::Json<Value>,
) -> Result<HttpResponse> {
    let partition = data.config.document_store().scenario_partition.clone();
    let id = data.documents.upsert(&partition, payload.into_inner()).await?;
    info!(id = %id, "Scenario configuration saved");
    Ok(HttpResponse::Ok().json(SaveResponse { id }))
}

/// Load a raw scenario configuration document
/// GET /api/scenario-config/{id}
pub async fn load_scenario_config(
    data: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    let partition = &data.config.document_store().scenario_partition;

    match data.documents.read(partition, &id).await? {
        Some(document) => Ok(HttpResponse::Ok().json(document)),
        None => Err(GatewayError::not_found(format!(
            "Scenario configuration '{}' not found",
            id
        ))),
    }
}

/// Load a typed scenario workspace, falling back to the default catalog
/// GET /api/v1/scenario-state/{key}
pub async fn load_scenario_state(
    data: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let key = path.into_inner();

    let mut state = match data.scenarios.load(&key).await? {
        Some(state) => state,
        None => {
            debug!(key = %key, "No stored state; serving defaults");
            ScenarioState::default()
        }
    };
    // Persisted results may predate variable edits
    state.refresh();

    Ok(HttpResponse::Ok().json(state))
}

/// Replace a typed scenario workspace
/// PUT /api/v1/scenario-state/{key}
pub async fn save_scenario_state(
    data: web::Data<AppState>,
    path: web::Path<String>,
    payload: web::Json<ScenarioState>,
) -> Result<HttpResponse> {
    let key = path.into_inner();
    let mut state = payload.into_inner();
    state.refresh();

    data.scenarios.save(&key, &state).await?;
    info!(key = %key, scenarios = state.scenarios.len(), "Scenario state saved");
    Ok(HttpResponse::Ok().json(state))
}

/// Share link creation response
#[derive(Debug, Serialize)]
pub struct ShareResponse {
    pub token: String,
}

/// Share token path parameter
#[derive(Debug, Deserialize)]
pub struct ShareToken {
    pub token: String,
}

/// Encode pricing variables into a shareable token
/// POST /api/v1/share
pub async fn create_share_link(payload: web::Json<SharedVariables>) -> Result<HttpResponse> {
    let variables = payload.into_inner();
    if variables.is_empty() {
        return Err(GatewayError::bad_request("Nothing to share"));
    }
    let token = sharelink::encode(&variables)?;
    Ok(HttpResponse::Ok().json(ShareResponse { token }))
}

/// Decode a share token back into pricing variables
/// GET /api/v1/share/{token}
pub async fn resolve_share_link(path: web::Path<ShareToken>) -> Result<HttpResponse> {
    let variables = sharelink::decode(&path.token)?;
    Ok(HttpResponse::Ok().json(variables))
}

/// Configure scenario routes
pub fn configure_scenario_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/scenario-config", web::post().to(save_scenario_config))
        .route(
            "/api/scenario-config/{id}",
            web::get().to(load_scenario_config),
        )
        .route(
            "/api/v1/scenario-state/{key}",
            web::get().to(load_scenario_state),
        )
        .route(
            "/api/v1/scenario-state/{key}",
            web::put().to(save_scenario_state),
        )
        .route("/api/v1/share", web::post().to(create_share_link))
        .route("/api/v1/share/{token}", web::get().to(resolve_share_link));
}
