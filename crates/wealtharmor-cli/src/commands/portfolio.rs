use clap::Args;
use serde_json::Value;

use wealtharmor_core::portfolio::{self, AssetClass, PortfolioHoldings, PortfolioInput};

use crate::input;

/// Arguments for portfolio metrics. Amounts are read like form fields:
/// "12,500" is accepted and anything unparsable counts as 0.
#[derive(Args)]
pub struct PortfolioArgs {
    /// Path to JSON/YAML input file ({"holdings": {"fondos": ..., ...}})
    #[arg(long)]
    pub input: Option<String>,

    /// Investment funds
    #[arg(long)]
    pub fondos: Option<String>,

    /// Business factoring
    #[arg(long)]
    pub factoring: Option<String>,

    /// Physical gold
    #[arg(long)]
    pub oro: Option<String>,

    /// US dollar holdings
    #[arg(long)]
    pub dolares: Option<String>,

    /// Savings at a Caja
    #[arg(long)]
    pub caja: Option<String>,
}

impl PortfolioArgs {
    fn inline_holdings(&self) -> Option<PortfolioHoldings> {
        let fields = [
            (AssetClass::Fondos, &self.fondos),
            (AssetClass::Factoring, &self.factoring),
            (AssetClass::Oro, &self.oro),
            (AssetClass::Dolares, &self.dolares),
            (AssetClass::Caja, &self.caja),
        ];
        if fields.iter().all(|(_, raw)| raw.is_none()) {
            return None;
        }

        let mut holdings = PortfolioHoldings::new();
        for (asset, raw) in fields {
            if let Some(raw) = raw {
                let stored = holdings.set(asset, portfolio::sanitize_amount(raw));
                debug_assert!(stored.is_ok());
            }
        }
        Some(holdings)
    }
}

pub fn run_portfolio(args: PortfolioArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let portfolio_input: PortfolioInput = if let Some(holdings) = args.inline_holdings() {
        PortfolioInput { holdings }
    } else if let Some(data) = input::read_input(args.input.as_deref())? {
        data
    } else {
        return Err(
            "--fondos/--factoring/--oro/--dolares/--caja, --input <file> or stdin required"
                .into(),
        );
    };
    let result = portfolio::analyze_portfolio(&portfolio_input)?;
    Ok(serde_json::to_value(result)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_inline_holdings_sanitise_text() {
        let args = PortfolioArgs {
            input: None,
            fondos: Some("1,500".into()),
            factoring: None,
            oro: Some("-20".into()),
            dolares: Some("abc".into()),
            caja: None,
        };
        let holdings = args.inline_holdings().unwrap();
        assert_eq!(holdings.get(AssetClass::Fondos), Decimal::from(1500));
        assert_eq!(holdings.get(AssetClass::Oro), Decimal::ZERO);
        assert_eq!(holdings.get(AssetClass::Dolares), Decimal::ZERO);
        assert_eq!(holdings.total(), Decimal::from(1500));
    }
}
