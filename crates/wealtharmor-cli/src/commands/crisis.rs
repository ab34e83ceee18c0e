use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use wealtharmor_core::crisis::{self, CrisisInput, CrisisScenario};

use crate::input;

/// Arguments for the crisis simulator
#[derive(Args)]
pub struct CrisisArgs {
    /// Path to JSON/YAML input file
    #[arg(long)]
    pub input: Option<String>,

    /// Amount exposed to the shock
    #[arg(long, allow_hyphen_values = true)]
    pub investment: Option<Decimal>,

    /// marketCrash, currencyDevaluation, inflationSpike or bankingCrisis
    #[arg(long, default_value = "marketCrash")]
    pub scenario: String,
}

pub fn run_crisis(args: CrisisArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let crisis_input: CrisisInput = if let Some(investment) = args.investment {
        CrisisInput {
            investment,
            scenario: args.scenario.parse::<CrisisScenario>()?,
        }
    } else if let Some(data) = input::read_input(args.input.as_deref())? {
        data
    } else {
        return Err("--investment, --input <file> or stdin required for the simulation".into());
    };
    let result = crisis::simulate(&crisis_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_scenarios() -> Result<Value, Box<dyn std::error::Error>> {
    Ok(serde_json::to_value(crisis::scenario_catalogue())?)
}
