//! Credit cost model
//!
//! Pure, deterministic evaluation of one pricing scenario. Every chart
//! generator and HTTP handler delegates here so the arithmetic lives in
//! exactly one place.

use super::types::{CreditUsage, GlobalRates, ScenarioInput, ScenarioResult, TierTable, WorkflowType};

/// Evaluate the credit consumption and dollar cost of one scenario.
///
/// Total over well-formed inputs: an unresolvable tier key or workflow index
/// yields [`ScenarioResult::unresolved`] (all numeric fields zero,
/// `resolved = false`) rather than an error, so downstream consumers stay
/// total while configuration is only partially loaded.
///
/// `additional_credits_needed` always reports the pre-BYOK overage. BYOK
/// discounts only the variable (workflow) portion of the overage, never the
/// fixed per-execution credits.
pub fn evaluate(
    scenario: &ScenarioInput,
    tiers: &TierTable,
    workflows: &[WorkflowType],
    rates: &GlobalRates,
) -> ScenarioResult {
    let (Some(tier), Some(workflow)) = (
        tiers.get(&scenario.tier_key),
        workflows.get(scenario.workflow_index),
    ) else {
        return ScenarioResult::unresolved();
    };

    let executions = scenario.executions as f64;
    let total_credits_per_execution = tier.fixed_credits_per_execution + workflow.credits;
    let total_credits_needed = executions * total_credits_per_execution;
    let included_credits = tier.credits;

    let raw_overage = (total_credits_needed - included_credits).max(0.0);
    let mut adjusted_overage = raw_overage;

    // BYOK discount applies only to the variable portion of the overage
    if scenario.has_byok && raw_overage > 0.0 {
        let variable_credits_in_overage = raw_overage.min(executions * workflow.credits);
        let savings = variable_credits_in_overage * (rates.byok_savings_percent / 100.0);
        adjusted_overage = (raw_overage - savings).max(0.0);
    }

    let additional_credit_cost = adjusted_overage * rates.credit_rate;
    let total_cost = tier.base_price + additional_credit_cost;
    let cost_per_execution = if scenario.executions == 0 {
        0.0
    } else {
        total_cost / executions
    };

    ScenarioResult {
        total_credits_per_execution,
        total_credits_needed,
        included_credits,
        additional_credits_needed: raw_overage,
        additional_credits_after_byok: adjusted_overage,
        additional_credit_cost,
        total_cost,
        cost_per_execution,
        resolved: true,
    }
}

/// Evaluate a scenario and express the post-BYOK overage as an equivalent
/// number of purchasable credit packs.
///
/// A non-positive `credit_pack_size` is a caller contract violation; the
/// pack count degrades to 0 in that case so the result stays serializable.
pub fn credit_usage(
    scenario: &ScenarioInput,
    tiers: &TierTable,
    workflows: &[WorkflowType],
    rates: &GlobalRates,
) -> CreditUsage {
    let result = evaluate(scenario, tiers, workflows, rates);

    let variable_credits_per_execution = workflows
        .get(scenario.workflow_index)
        .map(|w| w.credits)
        .unwrap_or(0.0);

    let credit_packs_needed = if rates.credit_pack_size > 0.0 {
        (result.additional_credits_after_byok / rates.credit_pack_size).ceil() as u64
    } else {
        0
    };

    CreditUsage {
        result,
        variable_credits_per_execution,
        credit_packs_needed,
    }
}
