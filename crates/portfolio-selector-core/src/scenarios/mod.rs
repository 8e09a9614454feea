pub mod model;

pub use model::{Scenario, ScenarioModel, ScenarioReturn};
