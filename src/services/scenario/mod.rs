//! Scenario workspace service

pub mod repository;
pub mod service;

pub use repository::{
    DocumentScenarioRepository, MemoryScenarioRepository, ScenarioStateRepository,
};
pub use service::{SavedScenario, ScenarioState};
