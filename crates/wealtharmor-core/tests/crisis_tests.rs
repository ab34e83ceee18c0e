use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;
use wealtharmor_core::crisis::{scenario_catalogue, simulate, CrisisInput, CrisisScenario};

#[test]
fn test_every_scenario_on_ten_thousand() {
    let shocked: Vec<_> = CrisisScenario::ALL
        .iter()
        .map(|s| {
            simulate(&CrisisInput {
                investment: dec!(10_000),
                scenario: *s,
            })
            .unwrap()
            .result
            .shocked_value
        })
        .collect();
    assert_eq!(shocked, vec![dec!(8_000), dec!(8_500), dec!(9_000), dec!(6_500)]);
}

#[test]
fn test_loss_plus_shocked_is_original() {
    let out = simulate(&CrisisInput {
        investment: dec!(1_234.56),
        scenario: CrisisScenario::BankingCrisis,
    })
    .unwrap();
    let r = out.result;
    assert_eq!(r.loss + r.shocked_value, r.original_value);
    assert!(!r.advisories.is_empty());
}

#[test]
fn test_scenario_from_json_key() {
    let input: CrisisInput =
        serde_json::from_str(r#"{"investment": 500, "scenario": "currencyDevaluation"}"#).unwrap();
    assert_eq!(input.scenario, CrisisScenario::CurrencyDevaluation);
    assert!(serde_json::from_str::<CrisisInput>(r#"{"investment": 1, "scenario": "alien"}"#).is_err());
}

#[test]
fn test_non_positive_investment_rejected() {
    for investment in [dec!(0), dec!(-100)] {
        assert!(simulate(&CrisisInput {
            investment,
            scenario: CrisisScenario::MarketCrash,
        })
        .is_err());
    }
}

#[test]
fn test_catalogue_impacts_are_losses() {
    let catalogue = scenario_catalogue();
    assert_eq!(catalogue.len(), 4);
    assert!(catalogue.iter().all(|p| p.impact_pct < dec!(0) && p.impact_pct > dec!(-1)));
}
