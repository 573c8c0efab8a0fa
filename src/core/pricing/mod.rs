//! Pricing core
//!
//! The cost model and the analyses built on top of it. Everything in this
//! module is pure and synchronous: callers supply the tier table, workflow
//! table, and rates explicitly, and no invocation retains state.

pub mod breakeven;
pub mod calculator;
pub mod charts;
pub mod defaults;
pub mod types;

pub use breakeven::{BreakEvenPoint, find_break_even_points};
pub use calculator::{credit_usage, evaluate};
pub use charts::{ChartMetric, SeriesPoint, TierSeries, tier_series};
pub use types::{
    CreditUsage, GlobalRates, ScenarioInput, ScenarioResult, Tier, TierTable, WorkflowType,
};
