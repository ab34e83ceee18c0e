use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Instant;

use crate::tiers::sentinel::{brief, SentinelBriefing};
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::WealthArmorResult;

use super::holdings::{AssetClass, PortfolioHoldings};

/// A single class above this share triggers a concentration warning.
const CONCENTRATION_THRESHOLD_PCT: Decimal = dec!(50);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Total and per-class share of a portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioMetrics {
    pub total: Money,
    /// Share of the total per class, 0–100. Every class is present.
    pub share_pct: BTreeMap<AssetClass, Percent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioInput {
    pub holdings: PortfolioHoldings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationLine {
    pub asset: AssetClass,
    pub name: String,
    pub color: String,
    pub amount: Money,
    pub share_pct: Percent,
    pub expected_return_pct: Percent,
    pub taxable: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioAnalysis {
    pub metrics: PortfolioMetrics,
    pub allocations: Vec<AllocationLine>,
    /// Share-weighted expected annual return of the mix, in percent.
    pub weighted_expected_return_pct: Percent,
    pub taxable_amount: Money,
    pub taxable_share_pct: Percent,
    pub briefing: SentinelBriefing,
}

// ---------------------------------------------------------------------------
// Core functions
// ---------------------------------------------------------------------------

/// Total the holdings and express each class as a percentage of the total.
///
/// An empty or all-zero portfolio yields a zero total and zero shares.
pub fn compute_metrics(holdings: &PortfolioHoldings) -> PortfolioMetrics {
    let total = holdings.total();
    let share_pct = holdings
        .iter()
        .map(|(asset, amount)| {
            let share = if total > Decimal::ZERO {
                amount / total * dec!(100)
            } else {
                Decimal::ZERO
            };
            (asset, share)
        })
        .collect();

    PortfolioMetrics { total, share_pct }
}

/// Metrics plus allocation detail, expected return and sentinel briefing.
pub fn analyze_portfolio(
    input: &PortfolioInput,
) -> WealthArmorResult<ComputationOutput<PortfolioAnalysis>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let metrics = compute_metrics(&input.holdings);

    if metrics.total.is_zero() {
        warnings.push("Portfolio is empty; all shares reported as 0".into());
    }

    let mut allocations = Vec::with_capacity(AssetClass::ALL.len());
    let mut weighted_expected_return_pct = Decimal::ZERO;
    let mut taxable_amount = Decimal::ZERO;

    for (asset, amount) in input.holdings.iter() {
        let profile = asset.profile();
        let share_pct = metrics.share_pct.get(&asset).copied().unwrap_or_default();

        if share_pct > CONCENTRATION_THRESHOLD_PCT {
            warnings.push(format!(
                "Concentration risk: {} holds {:.1}% of the portfolio",
                profile.name, share_pct
            ));
        }

        weighted_expected_return_pct += share_pct * profile.expected_return_pct / dec!(100);
        if profile.taxable {
            taxable_amount += amount;
        }

        allocations.push(AllocationLine {
            asset,
            name: profile.name.to_string(),
            color: profile.color.to_string(),
            amount,
            share_pct,
            expected_return_pct: profile.expected_return_pct,
            taxable: profile.taxable,
        });
    }

    let taxable_share_pct = if metrics.total > Decimal::ZERO {
        taxable_amount / metrics.total * dec!(100)
    } else {
        Decimal::ZERO
    };

    let briefing = brief(metrics.total);

    let output = PortfolioAnalysis {
        metrics,
        allocations,
        weighted_expected_return_pct,
        taxable_amount,
        taxable_share_pct,
        briefing,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Portfolio share breakdown with profile-weighted expected return",
        &serde_json::json!({
            "asset_classes": AssetClass::ALL.iter().map(|a| a.key()).collect::<Vec<_>>(),
            "concentration_threshold_pct": CONCENTRATION_THRESHOLD_PCT.to_string(),
        }),
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portfolio::holdings::MAX_HOLDING;

    fn sample_holdings() -> PortfolioHoldings {
        PortfolioHoldings::new()
            .with(AssetClass::Fondos, dec!(40_000))
            .and_then(|h| h.with(AssetClass::Factoring, dec!(30_000)))
            .and_then(|h| h.with(AssetClass::Oro, dec!(10_000)))
            .and_then(|h| h.with(AssetClass::Dolares, dec!(15_000)))
            .and_then(|h| h.with(AssetClass::Caja, dec!(5_000)))
            .unwrap()
    }

    #[test]
    fn test_shares_of_round_portfolio() {
        let m = compute_metrics(&sample_holdings());
        assert_eq!(m.total, dec!(100_000));
        assert_eq!(m.share_pct[&AssetClass::Fondos], dec!(40));
        assert_eq!(m.share_pct[&AssetClass::Caja], dec!(5));
        let sum: Decimal = m.share_pct.values().copied().sum();
        assert_eq!(sum, dec!(100));
    }

    #[test]
    fn test_empty_portfolio_has_zero_shares() {
        let m = compute_metrics(&PortfolioHoldings::new());
        assert_eq!(m.total, Decimal::ZERO);
        assert_eq!(m.share_pct.len(), 5);
        assert!(m.share_pct.values().all(|s| s.is_zero()));
    }

    #[test]
    fn test_weighted_return_and_taxable_exposure() {
        let out = analyze_portfolio(&PortfolioInput {
            holdings: sample_holdings(),
        })
        .unwrap();
        let a = &out.result;
        // 0.40*8.5 + 0.30*12 + 0.10*7 + 0.15*3.5 + 0.05*1.5 = 8.3
        assert_eq!(a.weighted_expected_return_pct, dec!(8.3));
        assert_eq!(a.taxable_amount, dec!(80_000));
        assert_eq!(a.taxable_share_pct, dec!(80));
        assert_eq!(a.briefing.label, "Fortified");
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_concentration_warning() {
        let holdings = PortfolioHoldings::new()
            .with(AssetClass::Caja, dec!(9_000))
            .and_then(|h| h.with(AssetClass::Oro, dec!(1_000)))
            .unwrap();
        let out = analyze_portfolio(&PortfolioInput { holdings }).unwrap();
        assert_eq!(out.warnings.len(), 1);
        assert!(out.warnings[0].contains("Liquid Cash"));
    }

    #[test]
    fn test_negative_holding_never_reaches_metrics() {
        let parsed = serde_json::from_str::<PortfolioInput>(r#"{"holdings": {"oro": -5, "caja": 10}}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_largest_holdings_do_not_overflow() {
        let holdings = PortfolioHoldings::new()
            .with(AssetClass::Fondos, MAX_HOLDING)
            .unwrap()
            .with(AssetClass::Oro, MAX_HOLDING)
            .unwrap();
        let m = compute_metrics(&holdings);
        assert_eq!(m.total, MAX_HOLDING * dec!(2));
        assert_eq!(m.share_pct[&AssetClass::Fondos], dec!(50));
        assert!(analyze_portfolio(&PortfolioInput { holdings }).is_ok());
    }

    #[test]
    fn test_empty_portfolio_warns() {
        let out = analyze_portfolio(&PortfolioInput {
            holdings: PortfolioHoldings::new(),
        })
        .unwrap();
        assert_eq!(out.result.weighted_expected_return_pct, Decimal::ZERO);
        assert_eq!(out.warnings.len(), 1);
        assert_eq!(out.result.briefing.level_index, 0);
    }
}
