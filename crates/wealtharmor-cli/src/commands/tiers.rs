use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use wealtharmor_core::tiers::{self, ClassifyInput, TierTable};

use crate::input;

/// Arguments for wealth tier classification
#[derive(Args)]
pub struct TierArgs {
    /// Path to JSON/YAML input file ({"amount": ..., "tiers": [...]})
    #[arg(long)]
    pub input: Option<String>,

    /// Total wealth to classify
    #[arg(long, allow_hyphen_values = true)]
    pub amount: Option<Decimal>,

    /// Path to a JSON/YAML tier table replacing the sentinel levels
    #[arg(long)]
    pub tiers: Option<String>,
}

/// Arguments for the sentinel briefing
#[derive(Args)]
pub struct BriefArgs {
    /// Total wealth
    #[arg(long)]
    pub amount: Decimal,
}

pub fn run_tier(args: TierArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mut classify_input: ClassifyInput = if let Some(amount) = args.amount {
        ClassifyInput { amount, tiers: None }
    } else if let Some(data) = input::read_input(args.input.as_deref())? {
        data
    } else {
        return Err("--amount, --input <file> or stdin required for tier classification".into());
    };

    if let Some(ref path) = args.tiers {
        let table: TierTable = input::file::read_document(path)?;
        classify_input.tiers = Some(table);
    }

    let result = tiers::classify_amount(&classify_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_brief(args: BriefArgs) -> Result<Value, Box<dyn std::error::Error>> {
    Ok(serde_json::to_value(tiers::brief(args.amount))?)
}
