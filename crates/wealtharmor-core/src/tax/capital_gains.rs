use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::WealthArmorError;
use crate::types::{with_metadata, ComputationOutput, Money, Percent, Rate};
use crate::WealthArmorResult;

/// SUNAT second-category rate, flat across gain size and asset type.
pub const CAPITAL_GAINS_RATE: Rate = dec!(0.05);

/// Gains from this amount up get the "consult a CPA" advisory.
const HIGH_VALUE_GAIN: Money = dec!(50_000);

/// Gains below this amount do not need to be declared.
const MIN_DECLARATION_AMOUNT: Money = dec!(5_000);

const BASE_ADVISORIES: [&str; 4] = [
    "Declare your gains in PDT 681 (annual income return)",
    "Payment is due in April of the following year",
    "Keep all supporting documentation for 4 years",
    "Losses can be offset against gains within the same year",
];

const CRYPTO_ADVISORY: &str = "SUNAT treats cryptocurrency as a capital gain since 2024";

const HIGH_VALUE_ADVISORY: &str = "Significant amount: consider consulting a CPA";

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvestmentKind {
    #[default]
    #[serde(alias = "acciones")]
    Stocks,
    #[serde(alias = "bonos")]
    Bonds,
    #[serde(alias = "fondos")]
    MutualFunds,
    #[serde(alias = "cripto")]
    Crypto,
    Other,
}

/// Static description of a SUNAT tax treatment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxRegime {
    pub key: String,
    pub name: String,
    pub rate: Rate,
    pub description: String,
    pub payment_deadline: Option<String>,
    pub filing_form: Option<String>,
    pub withholding: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxInput {
    pub gross_gain: Money,
    #[serde(default)]
    pub investment_kind: InvestmentKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxResult {
    pub gross_gain: Money,
    pub investment_kind: InvestmentKind,
    pub tax_rate: Rate,
    pub tax_rate_pct: Percent,
    pub tax_amount: Money,
    pub net_gain: Money,
    pub regime: String,
    /// Base advisories, then the crypto note, then the high-value warning.
    pub advisories: Vec<String>,
}

/// The SUNAT treatments relevant to a retail investor.
pub fn tax_regimes() -> Vec<TaxRegime> {
    vec![
        TaxRegime {
            key: "capital_gains".into(),
            name: "Second-category income tax".into(),
            rate: CAPITAL_GAINS_RATE,
            description: "Capital gains from selling shares, bonds and mutual funds".into(),
            payment_deadline: Some("April of the following year".into()),
            filing_form: Some("PDT 681".into()),
            withholding: false,
        },
        TaxRegime {
            key: "dividends".into(),
            name: "Dividend withholding".into(),
            rate: dec!(0.05),
            description: "Withheld at source by the paying company".into(),
            payment_deadline: None,
            filing_form: None,
            withholding: true,
        },
        TaxRegime {
            key: "crypto".into(),
            name: "Cryptocurrency gains".into(),
            rate: dec!(0.05),
            description: "Treated as a capital gain".into(),
            payment_deadline: Some("April of the following year".into()),
            filing_form: Some("PDT 681".into()),
            withholding: false,
        },
    ]
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Estimate capital gains tax at the flat SUNAT rate.
pub fn estimate_capital_gains_tax(
    input: &TaxInput,
) -> WealthArmorResult<ComputationOutput<TaxResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if input.gross_gain <= Decimal::ZERO {
        return Err(WealthArmorError::invalid(
            "gross_gain",
            "Enter a valid capital gain greater than 0",
        ));
    }

    let tax_amount = input.gross_gain * CAPITAL_GAINS_RATE;
    let net_gain = input.gross_gain - tax_amount;

    let mut advisories: Vec<String> = BASE_ADVISORIES.iter().map(|s| s.to_string()).collect();
    if input.investment_kind == InvestmentKind::Crypto {
        advisories.push(CRYPTO_ADVISORY.to_string());
    }
    if input.gross_gain >= HIGH_VALUE_GAIN {
        advisories.push(HIGH_VALUE_ADVISORY.to_string());
    }

    if input.gross_gain < MIN_DECLARATION_AMOUNT {
        warnings.push(format!(
            "Gain is below the S/ {MIN_DECLARATION_AMOUNT} declaration threshold"
        ));
    }

    let regime = match input.investment_kind {
        InvestmentKind::Crypto => "Cryptocurrency gains",
        _ => "Second-category income tax",
    };

    let output = TaxResult {
        gross_gain: input.gross_gain,
        investment_kind: input.investment_kind,
        tax_rate: CAPITAL_GAINS_RATE,
        tax_rate_pct: CAPITAL_GAINS_RATE * dec!(100),
        tax_amount,
        net_gain,
        regime: regime.to_string(),
        advisories,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Flat-rate capital gains tax (SUNAT second category)",
        &serde_json::json!({
            "rate": CAPITAL_GAINS_RATE.to_string(),
            "high_value_threshold": HIGH_VALUE_GAIN.to_string(),
            "min_declaration_amount": MIN_DECLARATION_AMOUNT.to_string(),
        }),
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
