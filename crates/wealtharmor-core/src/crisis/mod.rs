pub mod simulator;

pub use simulator::{
    scenario_catalogue, simulate, CrisisInput, CrisisOutcome, CrisisScenario, ScenarioProfile,
};
