use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use wealtharmor_core::growth::{self, ProjectionInput};

use crate::input;

/// Arguments for the compound growth projection
#[derive(Args)]
pub struct ProjectArgs {
    /// Path to JSON/YAML input file
    #[arg(long)]
    pub input: Option<String>,

    /// Initial amount
    #[arg(long, allow_hyphen_values = true)]
    pub principal: Option<Decimal>,

    /// Amount added at the end of each month
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    pub monthly: Decimal,

    /// Nominal annual rate in percent (8.5 = 8.5%)
    #[arg(long, default_value = "8.5", allow_hyphen_values = true)]
    pub rate: Decimal,

    /// Projection horizon in years
    #[arg(long, default_value = "10")]
    pub years: u32,
}

pub fn run_project(args: ProjectArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let projection_input: ProjectionInput = if let Some(principal) = args.principal {
        ProjectionInput {
            principal,
            monthly_contribution: args.monthly,
            annual_rate_pct: args.rate,
            years: args.years,
        }
    } else if let Some(data) = input::read_input(args.input.as_deref())? {
        data
    } else {
        return Err("--principal, --input <file> or stdin required for the projection".into());
    };
    let result = growth::project(&projection_input)?;
    Ok(serde_json::to_value(result)?)
}
