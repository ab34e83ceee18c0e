use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use wealtharmor_core::display;
use wealtharmor_core::tax::{self, InvestmentKind, TaxInput};

use crate::input;

/// Arguments for the capital gains estimate
#[derive(Args)]
pub struct TaxArgs {
    /// Path to JSON/YAML input file
    #[arg(long)]
    pub input: Option<String>,

    /// Gross realised gain
    #[arg(long, allow_hyphen_values = true)]
    pub gain: Option<Decimal>,

    /// Investment kind: stocks, bonds, mutual_funds, crypto, other
    #[arg(long, default_value = "stocks")]
    pub kind: String,

    /// List the tax regimes instead of estimating
    #[arg(long)]
    pub regimes: bool,
}

fn parse_kind(kind: &str) -> Result<InvestmentKind, Box<dyn std::error::Error>> {
    serde_json::from_value(Value::String(kind.trim().to_lowercase())).map_err(|_| {
        format!(
            "Unknown investment kind '{}'. Use: stocks, bonds, mutual_funds, crypto, other",
            kind
        )
        .into()
    })
}

pub fn run_tax(args: TaxArgs) -> Result<Value, Box<dyn std::error::Error>> {
    if args.regimes {
        return Ok(serde_json::to_value(tax::tax_regimes())?);
    }

    let tax_input: TaxInput = if let Some(gross_gain) = args.gain {
        TaxInput {
            gross_gain,
            investment_kind: parse_kind(&args.kind)?,
        }
    } else if let Some(data) = input::read_input(args.input.as_deref())? {
        data
    } else {
        return Err("--gain, --input <file> or stdin required for the tax estimate".into());
    };
    let estimate = tax::estimate_capital_gains_tax(&tax_input)?;
    let rate_display = display::format_percent(estimate.result.tax_rate_pct);
    let mut value = serde_json::to_value(estimate)?;
    if let Some(Value::Object(result)) = value.get_mut("result") {
        result.insert("tax_rate_display".into(), Value::String(rate_display));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_kind() {
        assert_eq!(parse_kind("Crypto").unwrap(), InvestmentKind::Crypto);
        assert_eq!(parse_kind("cripto").unwrap(), InvestmentKind::Crypto);
        assert_eq!(parse_kind("mutual_funds").unwrap(), InvestmentKind::MutualFunds);
        assert!(parse_kind("lottery").is_err());
    }

    #[test]
    fn test_tax_output_carries_rate_display() {
        let args = TaxArgs {
            input: None,
            gain: Some(Decimal::from(1000)),
            kind: "stocks".into(),
            regimes: false,
        };
        let value = run_tax(args).unwrap();
        assert_eq!(value["result"]["tax_rate_display"], "5.00%");
    }
}
