//! Scenario state management
//!
//! A scenario state document bundles the caller's editable pricing
//! variables with a list of saved what-if scenarios. Saved scenario results
//! are derived data: `refresh` recomputes every result from the current
//! variables so a state loaded from an older document is always consistent
//! with the cost model.

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::core::pricing::defaults::{default_rates, default_tiers, default_workflows};
use crate::core::pricing::{
    GlobalRates, ScenarioInput, ScenarioResult, TierTable, WorkflowType, evaluate,
};
use crate::services::sharelink::SharedVariables;

/// A saved what-if scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedScenario {
    /// Stable scenario id
    pub id: String,
    /// Caller-supplied display name
    pub name: String,
    /// The inputs the scenario was saved with
    #[serde(flatten)]
    pub input: ScenarioInput,
    /// Derived result, recomputed on every refresh
    #[serde(flatten)]
    pub result: ScenarioResult,
}

/// The full editable state of one pricing workspace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioState {
    #[serde(default = "default_credit_rate")]
    pub credit_rate: f64,
    #[serde(default = "default_credit_pack_size")]
    pub credit_pack_size: f64,
    #[serde(default = "default_credit_pack_price")]
    pub credit_pack_price: f64,
    #[serde(default = "default_byok_savings_percent")]
    pub byok_savings_percent: f64,
    #[serde(default = "default_tiers")]
    pub tiers: TierTable,
    #[serde(default = "default_workflows")]
    pub workflow_types: Vec<WorkflowType>,
    #[serde(default)]
    pub scenarios: Vec<SavedScenario>,
}

fn default_credit_rate() -> f64 {
    default_rates().credit_rate
}

fn default_credit_pack_size() -> f64 {
    default_rates().credit_pack_size
}

fn default_credit_pack_price() -> f64 {
    default_rates().credit_pack_price
}

fn default_byok_savings_percent() -> f64 {
    default_rates().byok_savings_percent
}

impl Default for ScenarioState {
    fn default() -> Self {
        Self {
            credit_rate: default_credit_rate(),
            credit_pack_size: default_credit_pack_size(),
            credit_pack_price: default_credit_pack_price(),
            byok_savings_percent: default_byok_savings_percent(),
            tiers: default_tiers(),
            workflow_types: default_workflows(),
            scenarios: Vec::new(),
        }
    }
}

impl ScenarioState {
    /// The rate constants in effect for this state
    pub fn rates(&self) -> GlobalRates {
        GlobalRates {
            credit_rate: self.credit_rate,
            byok_savings_percent: self.byok_savings_percent,
            credit_pack_size: self.credit_pack_size,
            credit_pack_price: self.credit_pack_price,
        }
    }

    /// Recompute every saved scenario's result from the current variables.
    ///
    /// Scenarios referencing a tier or workflow that no longer exists keep
    /// their entry but carry an unresolved (all-zero) result.
    pub fn refresh(&mut self) {
        let rates = self.rates();
        for scenario in &mut self.scenarios {
            scenario.result = evaluate(&scenario.input, &self.tiers, &self.workflow_types, &rates);
        }
    }

    /// Save a new scenario, evaluating it against the current variables
    pub fn add_scenario(&mut self, name: impl Into<String>, input: ScenarioInput) -> SavedScenario {
        let result = evaluate(&input, &self.tiers, &self.workflow_types, &self.rates());
        let scenario = SavedScenario {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            input,
            result,
        };
        debug!(id = %scenario.id, name = %scenario.name, "Saving scenario");
        self.scenarios.push(scenario.clone());
        scenario
    }

    /// Remove a saved scenario; returns false when the id is unknown
    pub fn remove_scenario(&mut self, id: &str) -> bool {
        let before = self.scenarios.len();
        self.scenarios.retain(|scenario| scenario.id != id);
        self.scenarios.len() != before
    }

    /// Overlay variables from a share link, keeping current values where
    /// the payload is silent, then refresh derived results
    pub fn apply_shared(&mut self, shared: SharedVariables) {
        if let Some(credit_rate) = shared.credit_rate {
            self.credit_rate = credit_rate;
        }
        if let Some(pack_size) = shared.credit_pack_size {
            self.credit_pack_size = pack_size;
        }
        if let Some(pack_price) = shared.credit_pack_price {
            self.credit_pack_price = pack_price;
        }
        if let Some(byok) = shared.byok_savings_percent {
            self.byok_savings_percent = byok;
        }
        if let Some(tiers) = shared.tiers {
            self.tiers = tiers;
        }
        if let Some(workflows) = shared.workflow_types {
            self.workflow_types = workflows;
        }
        self.refresh();
    }

    /// Extract the shareable variables from this state
    pub fn shared_variables(&self) -> SharedVariables {
        SharedVariables {
            credit_rate: Some(self.credit_rate),
            credit_pack_size: Some(self.credit_pack_size),
            credit_pack_price: Some(self.credit_pack_price),
            byok_savings_percent: Some(self.byok_savings_percent),
            tiers: Some(self.tiers.clone()),
            workflow_types: Some(self.workflow_types.clone()),
        }
    }
}
