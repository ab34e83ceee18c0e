use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use wealtharmor_core::portfolio::{
    analyze_portfolio, compute_metrics, sanitize_amount, AssetClass, PortfolioHoldings,
    PortfolioInput,
};

fn holdings(pairs: &[(AssetClass, Decimal)]) -> PortfolioHoldings {
    pairs
        .iter()
        .try_fold(PortfolioHoldings::new(), |h, (asset, amount)| h.with(*asset, *amount))
        .unwrap()
}

// ---------------------------------------------------------------------------
// compute_metrics
// ---------------------------------------------------------------------------

#[test]
fn test_even_split() {
    let h = holdings(&[
        (AssetClass::Fondos, dec!(25_000)),
        (AssetClass::Factoring, dec!(25_000)),
        (AssetClass::Oro, dec!(25_000)),
        (AssetClass::Caja, dec!(25_000)),
    ]);
    let m = compute_metrics(&h);
    assert_eq!(m.total, dec!(100_000));
    assert_eq!(m.share_pct[&AssetClass::Fondos], dec!(25));
    assert_eq!(m.share_pct[&AssetClass::Dolares], Decimal::ZERO);
    assert_eq!(m.share_pct.len(), AssetClass::ALL.len());
}

#[test]
fn test_empty_portfolio_has_zero_shares() {
    let m = compute_metrics(&PortfolioHoldings::new());
    assert_eq!(m.total, Decimal::ZERO);
    assert!(m.share_pct.values().all(|s| s.is_zero()));
}

#[test]
fn test_thirds_sum_to_hundred() {
    let h = holdings(&[
        (AssetClass::Oro, dec!(1)),
        (AssetClass::Dolares, dec!(1)),
        (AssetClass::Caja, dec!(1)),
    ]);
    let sum: Decimal = compute_metrics(&h).share_pct.values().copied().sum();
    assert!((sum - dec!(100)).abs() < dec!(0.000000001), "sum was {sum}");
}

// ---------------------------------------------------------------------------
// analyze_portfolio
// ---------------------------------------------------------------------------

#[test]
fn test_analysis_from_json_input() {
    let input: PortfolioInput = serde_json::from_str(
        r#"{"holdings": {"fondos": 40000, "caja": 10000, "gold": 50000}}"#,
    )
    .unwrap();
    let out = analyze_portfolio(&input).unwrap();
    let a = &out.result;

    assert_eq!(a.metrics.total, dec!(100_000));
    assert_eq!(a.taxable_amount, dec!(90_000));
    assert_eq!(a.taxable_share_pct, dec!(90));
    assert_eq!(a.briefing.label, "Fortified");
    assert_eq!(a.allocations.len(), 5);
    assert!(out.warnings.is_empty());
}

#[test]
fn test_negative_holding_in_json_rejected() {
    let parsed = serde_json::from_str::<PortfolioInput>(r#"{"holdings": {"oro": -5}}"#);
    assert!(parsed.is_err());
}

#[test]
fn test_concentration_warning() {
    let out = analyze_portfolio(&PortfolioInput {
        holdings: holdings(&[
            (AssetClass::Factoring, dec!(80_000)),
            (AssetClass::Caja, dec!(20_000)),
        ]),
    })
    .unwrap();
    assert_eq!(out.warnings.len(), 1);
    assert!(out.warnings[0].contains("Concentration"));
}

#[test]
fn test_sanitize_amount_forms() {
    assert_eq!(sanitize_amount("1,500.25"), dec!(1500.25));
    assert_eq!(sanitize_amount(" 2e3 "), dec!(2000));
    assert_eq!(sanitize_amount(""), Decimal::ZERO);
    assert_eq!(sanitize_amount("NaN"), Decimal::ZERO);
    assert_eq!(sanitize_amount("-3"), Decimal::ZERO);
}
