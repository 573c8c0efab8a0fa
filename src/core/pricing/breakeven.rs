//! Break-even scanner
//!
//! Sweeps execution volume over a sampled range and detects the points at
//! which the cheapest tier changes. Intentionally a brute-force grid search
//! rather than a closed-form root-finder: the per-tier cost function is
//! piecewise-linear today but the scanner must keep working for arbitrary
//! future rate schedules, so crossovers are located to within one step.

use serde::{Deserialize, Serialize};

use super::calculator::evaluate;
use super::types::{GlobalRates, ScenarioInput, TierTable, WorkflowType};

/// A point at which the cheapest tier changes between two consecutive samples
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakEvenPoint {
    /// First sampled execution volume at which the new tier is cheapest
    pub execution_volume: u64,
    /// Display name of the tier that was cheapest at the previous sample
    pub from_tier: String,
    /// Display name of the tier that is cheapest at this sample
    pub to_tier: String,
    /// Cheapest cost at the previous sample minus the cheapest cost at
    /// `execution_volume`; negative when costs grow with volume
    pub cost_delta: f64,
}

#[derive(Debug, Clone)]
struct CheapestTier {
    key: String,
    name: String,
    total_cost: f64,
}

/// Find the execution volumes at which the cheapest tier changes.
///
/// The domain `[step, max_executions]` is sampled every `step` executions and
/// every tier is costed at each sample with BYOK disabled (break-even
/// analysis is defined on the non-BYOK cost curve). Ties are broken by tier
/// table iteration order: the first-encountered minimum wins, which is
/// deterministic because [`TierTable`] iterates in insertion order.
///
/// Returned points are in increasing `execution_volume` order. An empty tier
/// table or an unresolvable workflow index yields an empty result. A zero
/// `step` is a caller contract violation; handlers validate before invoking.
pub fn find_break_even_points(
    tiers: &TierTable,
    workflows: &[WorkflowType],
    workflow_index: usize,
    rates: &GlobalRates,
    max_executions: u64,
    step: u64,
) -> Vec<BreakEvenPoint> {
    let mut points = Vec::new();

    if tiers.is_empty() || workflows.get(workflow_index).is_none() || step == 0 {
        return points;
    }

    let cheapest_at = |executions: u64| -> Option<CheapestTier> {
        let mut cheapest: Option<CheapestTier> = None;
        for (key, tier) in tiers.iter() {
            let input = ScenarioInput {
                executions,
                workflow_index,
                tier_key: key.to_string(),
                has_byok: false,
            };
            let result = evaluate(&input, tiers, workflows, rates);
            let is_cheaper = cheapest
                .as_ref()
                .map(|current| result.total_cost < current.total_cost)
                .unwrap_or(true);
            if is_cheaper {
                cheapest = Some(CheapestTier {
                    key: key.to_string(),
                    name: tier.name.clone(),
                    total_cost: result.total_cost,
                });
            }
        }
        cheapest
    };

    let Some(mut previous) = cheapest_at(step) else {
        return points;
    };
    let mut volume = step.saturating_mul(2);

    while volume <= max_executions {
        let Some(current) = cheapest_at(volume) else {
            break;
        };
        if current.key != previous.key {
            points.push(BreakEvenPoint {
                execution_volume: volume,
                from_tier: previous.name.clone(),
                to_tier: current.name.clone(),
                cost_delta: previous.total_cost - current.total_cost,
            });
        }
        previous = current;
        volume = match volume.checked_add(step) {
            Some(next) => next,
            None => break,
        };
    }

    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::pricing::types::Tier;

    fn rates() -> GlobalRates {
        GlobalRates {
            credit_rate: 0.01,
            byok_savings_percent: 60.0,
            credit_pack_size: 50000.0,
            credit_pack_price: 500.0,
        }
    }

    fn workflows() -> Vec<WorkflowType> {
        vec![WorkflowType::new("Report Generation", 40.0)]
    }

    /// Tier A: cheap base fee but heavy fixed per-execution overhead.
    /// Tier B: expensive base fee but light overhead. A wins at low volume,
    /// B at high volume, with exactly one crossover in between.
    fn crossing_tiers() -> TierTable {
        let mut tiers = TierTable::new();
        tiers.insert("a", Tier::new("Starter", 50.0, 1000.0, 10.0));
        tiers.insert("b", Tier::new("Business", 700.0, 75000.0, 2.5));
        tiers
    }

    #[test]
    fn test_single_crossover_from_a_to_b() {
        let points = find_break_even_points(&crossing_tiers(), &workflows(), 0, &rates(), 10_000, 50);

        assert_eq!(points.len(), 1, "expected exactly one crossover: {:?}", points);
        let point = &points[0];
        assert_eq!(point.from_tier, "Starter");
        assert_eq!(point.to_tier, "Business");

        // A overtakes B once 50 + (50v - 1000) * 0.01 exceeds 700, i.e. at
        // v > 1320, so the first sampled crossover is 1350.
        assert_eq!(point.execution_volume, 1350);

        // Delta spans one step: cheapest at 1300 (Starter, 690) minus
        // cheapest at 1350 (Business, 700).
        assert_eq!(point.cost_delta, -10.0);

        // At the reported volume B really is cheaper than A
        let cost = |key: &str, executions: u64| {
            let input = ScenarioInput {
                executions,
                workflow_index: 0,
                tier_key: key.to_string(),
                has_byok: false,
            };
            evaluate(&input, &crossing_tiers(), &workflows(), &rates()).total_cost
        };
        assert!(cost("b", point.execution_volume) < cost("a", point.execution_volume));
        assert_eq!(
            point.cost_delta,
            cost("a", point.execution_volume - 50) - cost("b", point.execution_volume)
        );
    }

    #[test]
    fn test_scan_is_deterministic() {
        let first = find_break_even_points(&crossing_tiers(), &workflows(), 0, &rates(), 10_000, 50);
        let second = find_break_even_points(&crossing_tiers(), &workflows(), 0, &rates(), 10_000, 50);
        assert_eq!(first, second);
    }

    #[test]
    fn test_points_sorted_by_volume() {
        let mut tiers = crossing_tiers();
        tiers.insert("c", Tier::new("Enterprise", 1000.0, 100000.0, 0.5));

        let points = find_break_even_points(&tiers, &workflows(), 0, &rates(), 50_000, 50);
        for window in points.windows(2) {
            assert!(window[0].execution_volume < window[1].execution_volume);
        }
    }

    #[test]
    fn test_empty_tier_table_yields_no_points() {
        let points = find_break_even_points(&TierTable::new(), &workflows(), 0, &rates(), 10_000, 50);
        assert!(points.is_empty());
    }

    #[test]
    fn test_unknown_workflow_yields_no_points() {
        let points = find_break_even_points(&crossing_tiers(), &workflows(), 7, &rates(), 10_000, 50);
        assert!(points.is_empty());
    }

    #[test]
    fn test_zero_step_yields_no_points() {
        let points = find_break_even_points(&crossing_tiers(), &workflows(), 0, &rates(), 10_000, 0);
        assert!(points.is_empty());
    }

    #[test]
    fn test_no_crossover_when_one_tier_dominates() {
        let mut tiers = TierTable::new();
        tiers.insert("cheap", Tier::new("Cheap", 10.0, 100000.0, 0.5));
        tiers.insert("pricey", Tier::new("Pricey", 900.0, 100.0, 10.0));

        let points = find_break_even_points(&tiers, &workflows(), 0, &rates(), 10_000, 50);
        assert!(points.is_empty());
    }

    #[test]
    fn test_exact_tie_keeps_earlier_tier() {
        // Identical cost curves: the first-inserted tier wins every sample,
        // so no crossover is ever reported.
        let mut tiers = TierTable::new();
        tiers.insert("first", Tier::new("First", 100.0, 5000.0, 1.0));
        tiers.insert("second", Tier::new("Second", 100.0, 5000.0, 1.0));

        let points = find_break_even_points(&tiers, &workflows(), 0, &rates(), 10_000, 50);
        assert!(points.is_empty());
    }
}
