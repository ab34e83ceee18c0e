use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;
use wealtharmor_core::tax::{estimate_capital_gains_tax, InvestmentKind, TaxInput, CAPITAL_GAINS_RATE};

fn estimate(gain: rust_decimal::Decimal, kind: InvestmentKind) -> wealtharmor_core::tax::TaxResult {
    estimate_capital_gains_tax(&TaxInput {
        gross_gain: gain,
        investment_kind: kind,
    })
    .unwrap()
    .result
}

#[test]
fn test_flat_rate_for_every_kind() {
    for kind in [
        InvestmentKind::Stocks,
        InvestmentKind::Bonds,
        InvestmentKind::MutualFunds,
        InvestmentKind::Crypto,
        InvestmentKind::Other,
    ] {
        let r = estimate(dec!(20_000), kind);
        assert_eq!(r.tax_rate, CAPITAL_GAINS_RATE);
        assert_eq!(r.tax_amount, dec!(1_000));
        assert_eq!(r.net_gain, dec!(19_000));
    }
}

#[test]
fn test_amounts_are_consistent() {
    let r = estimate(dec!(12_345.67), InvestmentKind::MutualFunds);
    assert_eq!(r.tax_amount + r.net_gain, r.gross_gain);
}

#[test]
fn test_crypto_adds_one_advisory() {
    let stocks = estimate(dec!(10_000), InvestmentKind::Stocks);
    let crypto = estimate(dec!(10_000), InvestmentKind::Crypto);
    assert_eq!(crypto.advisories.len(), stocks.advisories.len() + 1);
    assert_eq!(crypto.advisories[..4].to_vec(), stocks.advisories);
}

#[test]
fn test_kind_defaults_to_stocks() {
    let input: TaxInput = serde_json::from_str(r#"{"gross_gain": "800"}"#).unwrap();
    assert_eq!(input.investment_kind, InvestmentKind::Stocks);
}

#[test]
fn test_zero_gain_is_invalid() {
    let err = estimate_capital_gains_tax(&TaxInput {
        gross_gain: dec!(0),
        investment_kind: InvestmentKind::Bonds,
    })
    .unwrap_err();
    assert!(err.to_string().contains("gross_gain"));
}
