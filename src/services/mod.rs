//! Business services built on the pricing core and storage seams

pub mod scenario;
pub mod sharelink;

pub use scenario::{ScenarioState, ScenarioStateRepository};
pub use sharelink::SharedVariables;
