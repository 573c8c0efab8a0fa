//! Pricing analysis API endpoints
//!
//! Stateless endpoints over the cost model: single-scenario evaluation,
//! break-even scanning, and chart series generation. Requests may omit the
//! tier table, workflow table, or rates; the built-in catalog fills the gaps.

use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::pricing::defaults::{default_rates, default_tiers, default_workflows};
use crate::core::pricing::{
    BreakEvenPoint, ChartMetric, CreditUsage, GlobalRates, ScenarioInput, TierSeries, TierTable,
    WorkflowType, credit_usage, find_break_even_points, tier_series,
};
use crate::server::AppState;
use crate::utils::error::{GatewayError, Result};

/// Catalog overrides shared by all pricing requests
#[derive(Debug, Default, Deserialize)]
pub struct CatalogOverrides {
    /// Tier table; defaults to the built-in catalog when absent
    pub tiers: Option<TierTable>,
    /// Workflow table; defaults to the built-in catalog when absent
    pub workflow_types: Option<Vec<WorkflowType>>,
    /// Rate constants; default rates when absent
    pub rates: Option<GlobalRates>,
}

impl CatalogOverrides {
    fn resolve(self) -> (TierTable, Vec<WorkflowType>, GlobalRates) {
        (
            self.tiers.unwrap_or_else(default_tiers),
            self.workflow_types.unwrap_or_else(default_workflows),
            self.rates.unwrap_or_else(default_rates),
        )
    }
}

/// Scenario evaluation request payload
#[derive(Debug, Deserialize)]
pub struct CalculateRequest {
    #[serde(flatten)]
    pub input: ScenarioInput,
    #[serde(flatten)]
    pub catalog: CatalogOverrides,
}

/// Break-even scan request payload
#[derive(Debug, Deserialize)]
pub struct BreakEvenRequest {
    /// Index into the workflow table
    pub workflow_index: usize,
    /// Upper bound of the swept volume domain; server default when absent
    pub max_executions: Option<u64>,
    /// Sample spacing; server default when absent
    pub step: Option<u64>,
    #[serde(flatten)]
    pub catalog: CatalogOverrides,
}

/// Break-even scan response
#[derive(Debug, Serialize)]
pub struct BreakEvenResponse {
    pub break_even_points: Vec<BreakEvenPoint>,
}

/// Chart series request payload
#[derive(Debug, Deserialize)]
pub struct ChartRequest {
    /// Index into the workflow table
    pub workflow_index: usize,
    /// Which metric each sampled point carries
    #[serde(default)]
    pub metric: ChartMetric,
    /// Upper bound of the sampled volume domain; server default when absent
    pub max_executions: Option<u64>,
    /// Number of samples per series; server default when absent
    pub samples: Option<u64>,
    #[serde(flatten)]
    pub catalog: CatalogOverrides,
}

/// Chart series response
#[derive(Debug, Serialize)]
pub struct ChartResponse {
    pub metric: ChartMetric,
    pub series: Vec<TierSeries>,
}

/// Evaluate one scenario
/// POST /api/v1/pricing/calculate
pub async fn calculate(payload: web::Json<CalculateRequest>) -> Result<HttpResponse> {
    let CalculateRequest { input, catalog } = payload.into_inner();
    let (tiers, workflows, rates) = catalog.resolve();

    debug!(
        executions = input.executions,
        tier = %input.tier_key,
        workflow = input.workflow_index,
        byok = input.has_byok,
        "Evaluating scenario"
    );

    let usage: CreditUsage = credit_usage(&input, &tiers, &workflows, &rates);
    Ok(HttpResponse::Ok().json(usage))
}

/// Scan for tier break-even points
/// POST /api/v1/pricing/breakeven
pub async fn breakeven(
    data: web::Data<AppState>,
    payload: web::Json<BreakEvenRequest>,
) -> Result<HttpResponse> {
    let BreakEvenRequest {
        workflow_index,
        max_executions,
        step,
        catalog,
    } = payload.into_inner();

    let defaults = data.config.pricing();
    let max_executions = max_executions.unwrap_or(defaults.max_executions);
    let step = step.unwrap_or(defaults.breakeven_step);
    if step == 0 {
        return Err(GatewayError::validation("Step must be positive"));
    }

    let (tiers, workflows, rates) = catalog.resolve();
    if workflow_index >= workflows.len() {
        return Err(GatewayError::validation(format!(
            "Workflow index {} out of range ({} workflows)",
            workflow_index,
            workflows.len()
        )));
    }

    let break_even_points =
        find_break_even_points(&tiers, &workflows, workflow_index, &rates, max_executions, step);

    Ok(HttpResponse::Ok().json(BreakEvenResponse { break_even_points }))
}

/// Generate cost-curve series for charting
/// POST /api/v1/pricing/chart
pub async fn chart(
    data: web::Data<AppState>,
    payload: web::Json<ChartRequest>,
) -> Result<HttpResponse> {
    let ChartRequest {
        workflow_index,
        metric,
        max_executions,
        samples,
        catalog,
    } = payload.into_inner();

    let defaults = data.config.pricing();
    let max_executions = max_executions.unwrap_or(defaults.max_executions);
    let samples = samples.unwrap_or(defaults.chart_samples);
    if samples == 0 {
        return Err(GatewayError::validation("Sample count must be positive"));
    }

    let (tiers, workflows, rates) = catalog.resolve();
    if workflow_index >= workflows.len() {
        return Err(GatewayError::validation(format!(
            "Workflow index {} out of range ({} workflows)",
            workflow_index,
            workflows.len()
        )));
    }

    let series = tier_series(
        &tiers,
        &workflows,
        workflow_index,
        &rates,
        max_executions,
        samples,
        metric,
    );

    Ok(HttpResponse::Ok().json(ChartResponse { metric, series }))
}

/// Configure pricing analysis routes
pub fn configure_pricing_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/pricing")
            .route("/calculate", web::post().to(calculate))
            .route("/breakeven", web::post().to(breakeven))
            .route("/chart", web::post().to(chart)),
    );
}
