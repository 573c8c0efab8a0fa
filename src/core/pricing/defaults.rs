//! Default pricing catalog
//!
//! The built-in tier table, workflow table, and global rates used when a
//! request or persisted document does not supply its own.

use super::types::{GlobalRates, Tier, TierTable, WorkflowType};

pub const DEFAULT_CREDIT_RATE: f64 = 0.01;
pub const DEFAULT_CREDIT_PACK_SIZE: f64 = 50_000.0;
pub const DEFAULT_CREDIT_PACK_PRICE: f64 = 500.0;
pub const DEFAULT_BYOK_SAVINGS_PERCENT: f64 = 60.0;

/// Default global rates
pub fn default_rates() -> GlobalRates {
    GlobalRates {
        credit_rate: DEFAULT_CREDIT_RATE,
        byok_savings_percent: DEFAULT_BYOK_SAVINGS_PERCENT,
        credit_pack_size: DEFAULT_CREDIT_PACK_SIZE,
        credit_pack_price: DEFAULT_CREDIT_PACK_PRICE,
    }
}

/// Default tier table, ordered from lowest to highest base price band
pub fn default_tiers() -> TierTable {
    let mut tiers = TierTable::new();
    tiers.insert("starter", Tier::new("Starter", 50.0, 1_000.0, 10.0));
    tiers.insert("professional", Tier::new("Professional", 400.0, 50_000.0, 5.0));
    tiers.insert("business", Tier::new("Business", 700.0, 75_000.0, 2.5));
    tiers.insert("enterprise", Tier::new("Enterprise", 1_000.0, 100_000.0, 0.5));
    tiers
}

/// Default workflow table, ordered by variable credit cost
pub fn default_workflows() -> Vec<WorkflowType> {
    fn workflow(name: &str, credits: f64, description: &str) -> WorkflowType {
        WorkflowType {
            name: name.to_string(),
            credits,
            description: Some(description.to_string()),
        }
    }

    vec![
        workflow(
            "Simple Email Classifier",
            10.0,
            "1 LLM call (classification), 2 compute steps (routing, logging)",
        ),
        workflow(
            "Basic Data Processing",
            15.0,
            "2 LLM calls (validation, formatting), 5 compute steps",
        ),
        workflow(
            "Content Summarization",
            25.0,
            "1 large LLM call (summarization), 3 compute steps",
        ),
        workflow(
            "Document Classifier",
            30.0,
            "2 LLM calls (classification), 3 compute steps (routing, logging)",
        ),
        workflow(
            "Report Generation",
            40.0,
            "2 LLM calls (research, writing), 5 compute steps",
        ),
        workflow(
            "Research & Analysis",
            50.0,
            "4 LLM calls (research, analysis, synthesis), 8 compute steps",
        ),
        workflow(
            "Complex Multi-Step Agent",
            100.0,
            "6 LLM calls (planning, execution, validation), 10 compute steps",
        ),
        workflow(
            "Advanced Multi-Agent System",
            200.0,
            "8+ LLM calls (coordination, execution, review), 15+ compute steps",
        ),
    ]
}
