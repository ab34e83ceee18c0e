use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Instant;

use crate::error::WealthArmorError;
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::WealthArmorResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Named what-if shocks. Each carries a fixed impact; nothing is estimated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CrisisScenario {
    MarketCrash,
    CurrencyDevaluation,
    InflationSpike,
    BankingCrisis,
}

impl CrisisScenario {
    pub const ALL: [CrisisScenario; 4] = [
        CrisisScenario::MarketCrash,
        CrisisScenario::CurrencyDevaluation,
        CrisisScenario::InflationSpike,
        CrisisScenario::BankingCrisis,
    ];

    pub fn key(self) -> &'static str {
        match self {
            CrisisScenario::MarketCrash => "marketCrash",
            CrisisScenario::CurrencyDevaluation => "currencyDevaluation",
            CrisisScenario::InflationSpike => "inflationSpike",
            CrisisScenario::BankingCrisis => "bankingCrisis",
        }
    }

    pub fn profile(self) -> ScenarioProfile {
        match self {
            CrisisScenario::MarketCrash => ScenarioProfile {
                scenario: self,
                name: "Market crash".into(),
                impact_pct: dec!(-0.20),
                description: "Equity markets fall sharply across the board, as in 2008 or March 2020"
                    .into(),
                advisories: vec![
                    "Do not sell in panic: losses are only realised when you sell".into(),
                    "Keep 6 months of expenses outside the market".into(),
                    "Rebalance toward your target mix once volatility settles".into(),
                ],
            },
            CrisisScenario::CurrencyDevaluation => ScenarioProfile {
                scenario: self,
                name: "Currency devaluation".into(),
                impact_pct: dec!(-0.15),
                description: "The sol loses value against the dollar over a few weeks".into(),
                advisories: vec![
                    "Hold part of your savings in US dollars".into(),
                    "Avoid taking on dollar-denominated debt with sol income".into(),
                    "Gold tends to hold value when the local currency weakens".into(),
                ],
            },
            CrisisScenario::InflationSpike => ScenarioProfile {
                scenario: self,
                name: "Inflation spike".into(),
                impact_pct: dec!(-0.10),
                description: "Prices rise faster than returns, eroding real purchasing power"
                    .into(),
                advisories: vec![
                    "Favour instruments whose yield beats inflation".into(),
                    "Cut idle cash to what the emergency fund needs".into(),
                    "Review fixed-rate deposits before renewing them".into(),
                ],
            },
            CrisisScenario::BankingCrisis => ScenarioProfile {
                scenario: self,
                name: "Banking crisis".into(),
                impact_pct: dec!(-0.35),
                description: "Deposit runs and frozen credit hit banks and financial stocks".into(),
                advisories: vec![
                    "Keep deposits within the insured limit per institution".into(),
                    "Spread cash across several regulated entities".into(),
                    "Sovereign bonds usually weather bank stress better than deposits".into(),
                ],
            },
        }
    }
}

impl fmt::Display for CrisisScenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for CrisisScenario {
    type Err = WealthArmorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace(['_', '-'], "").to_ascii_lowercase();
        CrisisScenario::ALL
            .into_iter()
            .find(|scenario| scenario.key().to_ascii_lowercase() == wanted)
            .ok_or_else(|| {
                WealthArmorError::invalid("scenario", format!("Unknown crisis scenario '{s}'"))
            })
    }
}

/// Static configuration of a scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioProfile {
    pub scenario: CrisisScenario,
    pub name: String,
    /// Negative fraction applied to the investment (-0.20 = -20%).
    pub impact_pct: Rate,
    pub description: String,
    pub advisories: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrisisInput {
    pub investment: Money,
    pub scenario: CrisisScenario,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrisisOutcome {
    pub scenario: CrisisScenario,
    pub scenario_name: String,
    pub impact_pct: Rate,
    pub original_value: Money,
    pub shocked_value: Money,
    pub loss: Money,
    pub description: String,
    pub advisories: Vec<String>,
}

/// Every scenario's static profile, in table order.
pub fn scenario_catalogue() -> Vec<ScenarioProfile> {
    CrisisScenario::ALL.iter().map(|s| s.profile()).collect()
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Apply a scenario's fixed shock to an investment.
pub fn simulate(input: &CrisisInput) -> WealthArmorResult<ComputationOutput<CrisisOutcome>> {
    let start = Instant::now();

    if input.investment <= Decimal::ZERO {
        return Err(WealthArmorError::invalid(
            "investment",
            "Enter a valid investment amount greater than 0",
        ));
    }

    let profile = input.scenario.profile();
    let shocked_value = input.investment * (Decimal::ONE + profile.impact_pct);
    let loss = input.investment - shocked_value;

    let output = CrisisOutcome {
        scenario: input.scenario,
        scenario_name: profile.name,
        impact_pct: profile.impact_pct,
        original_value: input.investment,
        shocked_value,
        loss,
        description: profile.description,
        advisories: profile.advisories,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Static percentage shock per named crisis scenario",
        &serde_json::json!({
            "scenario": input.scenario.key(),
            "impact_pct": output.impact_pct.to_string(),
        }),
        Vec::new(),
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
