use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use wealtharmor_core::radar::{self, RadarInput};
use wealtharmor_core::Currency;

use crate::input;

/// Arguments for the investment radar
#[derive(Args)]
pub struct RadarArgs {
    /// Path to JSON/YAML input file
    #[arg(long)]
    pub input: Option<String>,

    /// Budget to compare across opportunities; lists them all when omitted
    #[arg(long)]
    pub amount: Option<Decimal>,

    /// Currency of the budget (PEN, USD)
    #[arg(long, default_value = "PEN")]
    pub currency: String,

    /// Horizon in years
    #[arg(long, default_value = "5")]
    pub years: u32,

    /// Monthly contribution
    #[arg(long, default_value = "0")]
    pub monthly: Decimal,
}

pub fn run_radar(args: RadarArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let radar_input: RadarInput = if let Some(amount) = args.amount {
        RadarInput {
            amount,
            currency: Currency::from_code(&args.currency),
            years: args.years,
            monthly_contribution: args.monthly,
        }
    } else if let Some(ref path) = args.input {
        input::file::read_document(path)?
    } else {
        return Ok(serde_json::to_value(radar::investment_radar())?);
    };
    let result = radar::compare_opportunities(&radar_input)?;
    Ok(serde_json::to_value(result)?)
}
