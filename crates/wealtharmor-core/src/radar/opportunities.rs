use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::WealthArmorError;
use crate::growth::{project, ProjectionInput};
use crate::types::{with_metadata, ComputationOutput, Currency, Money, Percent};
use crate::WealthArmorResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A listed investment product with its quoted yield.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentOpportunity {
    pub id: String,
    pub title: String,
    pub category: String,
    pub institution: String,
    /// Quoted annual yield (TREA), 0–100 scale.
    pub roi_pct: Percent,
    pub min_investment: Money,
    pub currency: Currency,
    pub risk: String,
    pub liquidity: String,
    pub protection: String,
    pub link: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RadarInput {
    pub amount: Money,
    #[serde(default)]
    pub currency: Currency,
    pub years: u32,
    #[serde(default)]
    pub monthly_contribution: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpportunityProjection {
    pub id: String,
    pub title: String,
    pub roi_pct: Percent,
    pub risk: String,
    pub final_amount: Money,
    pub total_earnings: Money,
}

#[allow(clippy::too_many_arguments)]
fn opportunity(
    id: &str,
    title: &str,
    category: &str,
    institution: &str,
    roi_pct: Decimal,
    min_investment: Decimal,
    currency: Currency,
    risk: &str,
    liquidity: &str,
    protection: &str,
    link: &str,
) -> InvestmentOpportunity {
    InvestmentOpportunity {
        id: id.into(),
        title: title.into(),
        category: category.into(),
        institution: institution.into(),
        roi_pct,
        min_investment,
        currency,
        risk: risk.into(),
        liquidity: liquidity.into(),
        protection: protection.into(),
        link: link.into(),
    }
}

/// Peruvian retail products tracked by the radar.
pub fn investment_radar() -> Vec<InvestmentOpportunity> {
    vec![
        opportunity(
            "dpf-caja-arequipa",
            "Fixed-term deposit - Caja Arequipa",
            "Fixed income",
            "Caja Municipal de Arequipa",
            dec!(9.5),
            dec!(1_000),
            Currency::PEN,
            "Low",
            "360 days",
            "Deposit insurance fund up to S/ 118,185",
            "https://www.cajaarequipa.pe",
        ),
        opportunity(
            "bonos-tesoro",
            "Public Treasury bonds",
            "Sovereign debt",
            "MEF - Republic of Peru",
            dec!(6.2),
            dec!(5_000),
            Currency::PEN,
            "Very low",
            "Secondary market available",
            "Backed by the Peruvian state",
            "https://www.mef.gob.pe",
        ),
        opportunity(
            "factoring-facturedo",
            "Business factoring",
            "Alternative",
            "Facturedo Peru",
            dec!(12.0),
            dec!(10_000),
            Currency::PEN,
            "Medium",
            "30-90 days per invoice",
            "Credit assessment of debtors",
            "https://facturedo.pe",
        ),
        opportunity(
            "fondos-credicorp",
            "Balanced mutual fund",
            "Investment funds",
            "Credicorp Capital",
            dec!(8.5),
            dec!(500),
            Currency::PEN,
            "Medium",
            "Redemption T+2 business days",
            "Regulated by the SMV",
            "https://www.credicorpcapital.com",
        ),
        opportunity(
            "oro-bcr",
            "BCR investment gold",
            "Commodities",
            "Banco Central de Reserva",
            dec!(7.0),
            dec!(3_000),
            Currency::USD,
            "Medium",
            "Immediate sale to the BCR",
            "Certificate of authenticity",
            "https://www.bcrp.gob.pe",
        ),
        opportunity(
            "etf-sp500",
            "S&P 500 ETF (BVL)",
            "International",
            "Bolsa de Valores de Lima",
            dec!(10.5),
            dec!(1_000),
            Currency::USD,
            "Medium-high",
            "Daily trading on the BVL",
            "Cavali as custodian",
            "https://www.bvl.com.pe",
        ),
    ]
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Project `amount` through every opportunity it qualifies for, best first.
///
/// An opportunity qualifies when it is quoted in the requested currency and
/// `amount` meets its minimum.
pub fn compare_opportunities(
    input: &RadarInput,
) -> WealthArmorResult<ComputationOutput<Vec<OpportunityProjection>>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if input.amount <= Decimal::ZERO {
        return Err(WealthArmorError::invalid("amount", "amount must be > 0"));
    }

    let mut ranked = Vec::new();
    for opp in investment_radar() {
        if opp.currency != input.currency {
            continue;
        }
        if input.amount < opp.min_investment {
            warnings.push(format!(
                "{} skipped: minimum investment is {} {}",
                opp.title, opp.min_investment, opp.currency
            ));
            continue;
        }

        let projection = project(&ProjectionInput {
            principal: input.amount,
            monthly_contribution: input.monthly_contribution,
            annual_rate_pct: opp.roi_pct,
            years: input.years,
        })?;

        ranked.push(OpportunityProjection {
            id: opp.id,
            title: opp.title,
            roi_pct: opp.roi_pct,
            risk: opp.risk,
            final_amount: projection.result.final_amount,
            total_earnings: projection.result.total_earnings,
        });
    }

    if ranked.is_empty() {
        warnings.push(format!(
            "No opportunity accepts {} {}",
            input.amount, input.currency
        ));
    }

    ranked.sort_by(|a, b| b.final_amount.cmp(&a.final_amount));

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Quoted TREA compounded monthly per eligible opportunity",
        &serde_json::json!({
            "amount": input.amount.to_string(),
            "currency": input.currency.code(),
            "years": input.years,
            "monthly_contribution": input.monthly_contribution.to_string(),
        }),
        warnings,
        elapsed,
        ranked,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
