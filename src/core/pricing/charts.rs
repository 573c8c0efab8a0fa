//! Chart-data generators
//!
//! Thin sweeps over the cost model producing per-tier series for the
//! cost-vs-volume and cost-per-execution visualizations. Each call re-runs
//! the sweep independently; invocations share no state.

use serde::{Deserialize, Serialize};

use super::calculator::evaluate;
use super::types::{GlobalRates, ScenarioInput, TierTable, WorkflowType};

/// Which derived value a chart series reports at each sample
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartMetric {
    /// Total monthly cost at each execution volume
    #[default]
    TotalCost,
    /// Cost per execution at each volume (scale-economics view)
    CostPerExecution,
}

/// One sampled value on a tier's curve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub executions: u64,
    pub value: f64,
}

/// A tier's sampled curve across the swept volume domain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierSeries {
    /// Key of the tier in the tier table
    pub tier_key: String,
    /// Display name of the tier
    pub tier_name: String,
    pub points: Vec<SeriesPoint>,
}

/// Sample every tier's curve over `[step, max_executions]` where
/// `step = max(1, max_executions / samples)`.
///
/// BYOK is disabled for chart sweeps, matching the break-even scanner: the
/// curves compare tiers on the undiscounted rate schedule. Series are in
/// tier-table order; points in increasing volume order.
pub fn tier_series(
    tiers: &TierTable,
    workflows: &[WorkflowType],
    workflow_index: usize,
    rates: &GlobalRates,
    max_executions: u64,
    samples: u64,
    metric: ChartMetric,
) -> Vec<TierSeries> {
    let mut series: Vec<TierSeries> = tiers
        .iter()
        .map(|(key, tier)| TierSeries {
            tier_key: key.to_string(),
            tier_name: tier.name.clone(),
            points: Vec::new(),
        })
        .collect();

    if series.is_empty() || workflows.get(workflow_index).is_none() || samples == 0 {
        return series;
    }

    let step = (max_executions / samples).max(1);
    let mut executions = step;

    while executions <= max_executions {
        for entry in series.iter_mut() {
            let input = ScenarioInput {
                executions,
                workflow_index,
                tier_key: entry.tier_key.clone(),
                has_byok: false,
            };
            let result = evaluate(&input, tiers, workflows, rates);
            let value = match metric {
                ChartMetric::TotalCost => result.total_cost,
                ChartMetric::CostPerExecution => result.cost_per_execution,
            };
            entry.points.push(SeriesPoint { executions, value });
        }
        executions = match executions.checked_add(step) {
            Some(next) => next,
            None => break,
        };
    }

    series
}
