//! Unified pricing calculation types
//!
//! Consolidates the tier/workflow/rates value objects and calculation outputs
//! into a single module so all consumers share one shape.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A named pricing plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tier {
    /// Display label, unique within the tier table
    pub name: String,
    /// Monthly base fee in currency units
    #[serde(default)]
    pub base_price: f64,
    /// Credits included in the base fee per billing period
    #[serde(default)]
    pub credits: f64,
    /// Flat per-execution credit overhead, independent of workflow
    #[serde(default)]
    pub fixed_credits_per_execution: f64,
}

impl Tier {
    pub fn new(name: impl Into<String>, base_price: f64, credits: f64, fixed: f64) -> Self {
        Self {
            name: name.into(),
            base_price,
            credits,
            fixed_credits_per_execution: fixed,
        }
    }
}

/// A unit of work with a variable credit cost, independent of tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowType {
    /// Display label
    pub name: String,
    /// Variable credits consumed by one execution of this workflow
    #[serde(default)]
    pub credits: f64,
    /// Optional human-readable description of the workflow's steps
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl WorkflowType {
    pub fn new(name: impl Into<String>, credits: f64) -> Self {
        Self {
            name: name.into(),
            credits,
            description: None,
        }
    }
}

/// Cross-cutting rate constants supplied by the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalRates {
    /// Currency cost per one credit of overage
    pub credit_rate: f64,
    /// Percentage reduction (0-100) applied to the variable-credit portion
    /// of overage when BYOK is active
    pub byok_savings_percent: f64,
    /// Credits per purchasable credit pack; only feeds `credit_packs_needed`
    pub credit_pack_size: f64,
    /// Price of one credit pack; informational, does not affect cost
    pub credit_pack_price: f64,
}

/// Parameters of a single cost evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioInput {
    /// Number of executions in the billing period
    pub executions: u64,
    /// Index into the workflow table
    pub workflow_index: usize,
    /// Key into the tier table
    pub tier_key: String,
    /// Whether the caller supplies their own third-party API credentials
    #[serde(default)]
    pub has_byok: bool,
}

/// Output of one cost-model evaluation
///
/// All fields are derived, read-only outputs recomputed on every call.
/// `additional_credits_needed` is always the pre-BYOK overage;
/// `additional_credits_after_byok` is the post-discount overage. Both are
/// exposed because consumers display the savings delta between them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResult {
    /// Fixed plus variable credits consumed by one execution
    pub total_credits_per_execution: f64,
    /// Credits consumed over the whole billing period
    pub total_credits_needed: f64,
    /// Credits included in the tier's base fee
    pub included_credits: f64,
    /// Overage before any BYOK discount
    pub additional_credits_needed: f64,
    /// Overage after the BYOK discount (equal to the above without BYOK)
    pub additional_credits_after_byok: f64,
    /// Overage billed at the credit rate
    pub additional_credit_cost: f64,
    /// Base fee plus overage cost
    pub total_cost: f64,
    /// Total cost divided by executions; 0 when executions is 0
    pub cost_per_execution: f64,
    /// False when the tier or workflow reference did not resolve and the
    /// numeric fields defaulted to zero
    #[serde(default = "default_resolved")]
    pub resolved: bool,
}

fn default_resolved() -> bool {
    true
}

impl ScenarioResult {
    /// Zero-valued result returned for an unresolvable tier or workflow
    /// reference. Deliberately not an error: chart and report generation
    /// stay total while configuration is only partially loaded.
    pub fn unresolved() -> Self {
        Self {
            total_credits_per_execution: 0.0,
            total_credits_needed: 0.0,
            included_credits: 0.0,
            additional_credits_needed: 0.0,
            additional_credits_after_byok: 0.0,
            additional_credit_cost: 0.0,
            total_cost: 0.0,
            cost_per_execution: 0.0,
            resolved: false,
        }
    }
}

/// Per-period credit usage including pack equivalents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditUsage {
    /// Underlying cost-model evaluation
    #[serde(flatten)]
    pub result: ScenarioResult,
    /// Variable credits consumed by one execution of the selected workflow
    pub variable_credits_per_execution: f64,
    /// Credit packs covering the post-BYOK overage; 0 when the pack size
    /// is not positive (callers must guard before relying on this field)
    pub credit_packs_needed: u64,
}

/// An ordered tier table keyed by a stable tier key
///
/// Iteration order is insertion order, which makes the break-even scanner's
/// first-encountered-minimum tie-break deterministic. Serializes as a JSON
/// map so persisted documents keep the original `{ "starter": {...} }` shape.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TierTable {
    entries: Vec<(String, Tier)>,
}

impl TierTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a tier; replacement keeps the original position
    pub fn insert(&mut self, key: impl Into<String>, tier: Tier) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = tier,
            None => self.entries.push((key, tier)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Tier> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, tier)| tier)
    }

    pub fn remove(&mut self, key: &str) -> Option<Tier> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    /// Tiers in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Tier)> {
        self.entries.iter().map(|(k, t)| (k.as_str(), t))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, Tier)> for TierTable {
    fn from_iter<I: IntoIterator<Item = (String, Tier)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (key, tier) in iter {
            table.insert(key, tier);
        }
        table
    }
}

impl Serialize for TierTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, tier) in &self.entries {
            map.serialize_entry(key, tier)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for TierTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TierTableVisitor;

        impl<'de> Visitor<'de> for TierTableVisitor {
            type Value = TierTable;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of tier keys to tier definitions")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut table = TierTable::new();
                while let Some((key, tier)) = access.next_entry::<String, Tier>()? {
                    table.insert(key, tier);
                }
                Ok(table)
            }
        }

        deserializer.deserialize_map(TierTableVisitor)
    }
}
