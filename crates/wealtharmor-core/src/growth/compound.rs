use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::WealthArmorError;
use crate::time_value::future_value;
use crate::types::{with_metadata, ComputationOutput, Money, Percent, Rate};
use crate::WealthArmorResult;

const MONTHS_PER_YEAR: u32 = 12;
const MAX_YEARS: u32 = 100;

/// Iterative and closed-form results further apart than this are reported.
const RECONCILIATION_TOLERANCE: Money = dec!(0.01);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionInput {
    pub principal: Money,
    /// Added at the end of every month.
    #[serde(default)]
    pub monthly_contribution: Money,
    /// Nominal annual rate on a 0–100 scale, compounded monthly.
    pub annual_rate_pct: Percent,
    pub years: u32,
}

/// Balance at the end of a completed year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlySnapshot {
    pub year: u32,
    pub total: Money,
    pub contributed: Money,
    pub earnings: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompoundProjection {
    pub final_amount: Money,
    pub total_contributed: Money,
    pub total_earnings: Money,
    pub monthly_rate: Rate,
    pub months: u32,
    pub yearly_snapshots: Vec<YearlySnapshot>,
    /// Future value of the same inputs via the annuity formula.
    pub closed_form_final_amount: Money,
    pub reconciliation_delta: Money,
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Project monthly compounding with end-of-month contributions.
///
/// The month-by-month loop is canonical; the annuity formula is evaluated
/// alongside and any divergence beyond a cent becomes a warning.
pub fn project(
    input: &ProjectionInput,
) -> WealthArmorResult<ComputationOutput<CompoundProjection>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    // --- Validation ---
    if input.principal < Decimal::ZERO {
        return Err(WealthArmorError::invalid("principal", "principal must be >= 0"));
    }
    if input.monthly_contribution < Decimal::ZERO {
        return Err(WealthArmorError::invalid(
            "monthly_contribution",
            "monthly_contribution must be >= 0",
        ));
    }
    if input.annual_rate_pct < Decimal::ZERO {
        return Err(WealthArmorError::invalid(
            "annual_rate_pct",
            "annual_rate_pct must be >= 0",
        ));
    }
    if input.years == 0 {
        return Err(WealthArmorError::invalid("years", "years must be >= 1"));
    }
    if input.years > MAX_YEARS {
        return Err(WealthArmorError::invalid(
            "years",
            format!("years must be <= {MAX_YEARS}"),
        ));
    }

    if input.principal.is_zero() && input.monthly_contribution.is_zero() {
        warnings.push("Nothing invested: principal and contribution are both 0".into());
    }

    let monthly_rate = input.annual_rate_pct / dec!(100) / Decimal::from(MONTHS_PER_YEAR);
    let growth = Decimal::ONE + monthly_rate;
    let months = input.years * MONTHS_PER_YEAR;

    let mut total = input.principal;
    let mut yearly_snapshots = Vec::with_capacity(input.years as usize);

    for month in 1..=months {
        total = total
            .checked_mul(growth)
            .and_then(|grown| grown.checked_add(input.monthly_contribution))
            .ok_or_else(|| {
                WealthArmorError::FinancialImpossibility(format!(
                    "projected balance overflowed in month {month}"
                ))
            })?;

        if month % MONTHS_PER_YEAR == 0 {
            let contributed = input.principal + input.monthly_contribution * Decimal::from(month);
            yearly_snapshots.push(YearlySnapshot {
                year: month / MONTHS_PER_YEAR,
                total,
                contributed,
                earnings: total - contributed,
            });
        }
    }

    let final_amount = total;
    let total_contributed =
        input.principal + input.monthly_contribution * Decimal::from(months);
    let total_earnings = final_amount - total_contributed;

    let closed_form_final_amount = future_value(
        monthly_rate,
        months,
        input.monthly_contribution,
        input.principal,
    )?;
    let reconciliation_delta = (final_amount - closed_form_final_amount).abs();
    if reconciliation_delta > RECONCILIATION_TOLERANCE {
        warnings.push(format!(
            "Iterative and closed-form projections differ by {reconciliation_delta}"
        ));
    }

    let output = CompoundProjection {
        final_amount,
        total_contributed,
        total_earnings,
        monthly_rate,
        months,
        yearly_snapshots,
        closed_form_final_amount,
        reconciliation_delta,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Monthly compounding with end-of-month contributions (iterative, annuity cross-check)",
        &serde_json::json!({
            "principal": input.principal.to_string(),
            "monthly_contribution": input.monthly_contribution.to_string(),
            "annual_rate_pct": input.annual_rate_pct.to_string(),
            "years": input.years,
            "compounding": "monthly",
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

    fn input(principal: Decimal, contribution: Decimal, rate: Decimal, years: u32) -> ProjectionInput {
        ProjectionInput {
            principal,
            monthly_contribution: contribution,
            annual_rate_pct: rate,
            years,
        }
    }

    #[test]
    fn test_one_year_at_twelve_percent() {
        let out = project(&input(dec!(1000), dec!(100), dec!(12), 1)).unwrap();
        let p = &out.result;
        assert_eq!(p.monthly_rate, dec!(0.01));
        // 1000 * 1.01^12 + 100 * (1.01^12 - 1) / 0.01
        assert!((p.final_amount - dec!(2395.08)).abs() < dec!(0.01), "got {}", p.final_amount);
        assert_eq!(p.yearly_snapshots.len(), 1);
        assert_eq!(p.yearly_snapshots[0].year, 1);
        assert_eq!(p.total_contributed, dec!(2200));
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_zero_rate_is_plain_savings() {
        let out = project(&input(dec!(500), dec!(50), Decimal::ZERO, 2)).unwrap();
        let p = &out.result;
        assert_eq!(p.final_amount, dec!(1700));
        assert_eq!(p.total_earnings, Decimal::ZERO);
        assert_eq!(p.closed_form_final_amount, dec!(1700));
    }

    #[test]
    fn test_snapshot_per_year_in_order() {
        let out = project(&input(dec!(10_000), dec!(500), dec!(8.5), 10)).unwrap();
        let years: Vec<u32> = out.result.yearly_snapshots.iter().map(|s| s.year).collect();
        assert_eq!(years, (1..=10).collect::<Vec<_>>());
        for s in &out.result.yearly_snapshots {
            assert_eq!(s.earnings, s.total - s.contributed);
            assert_eq!(s.contributed, dec!(10_000) + dec!(500) * Decimal::from(s.year * 12));
        }
    }

    #[test]
    fn test_final_matches_last_snapshot() {
        let out = project(&input(dec!(10_000), dec!(500), dec!(8.5), 10)).unwrap();
        let p = &out.result;
        let last = p.yearly_snapshots.last().unwrap();
        assert_eq!(p.final_amount, last.total);
        assert!((p.final_amount - dec!(117_395.68)).abs() < dec!(0.01));
        assert!(p.reconciliation_delta < dec!(0.01));
    }

    #[test]
    fn test_zero_principal_allowed() {
        let out = project(&input(Decimal::ZERO, dec!(100), dec!(6), 1)).unwrap();
        assert!(out.result.final_amount > dec!(1200));
    }

    #[test]
    fn test_nothing_invested_warns() {
        let out = project(&input(Decimal::ZERO, Decimal::ZERO, dec!(6), 3)).unwrap();
        assert_eq!(out.result.final_amount, Decimal::ZERO);
        assert_eq!(out.warnings.len(), 1);
    }

    #[test]
    fn test_invalid_inputs_rejected() {
        assert!(project(&input(dec!(-1), dec!(0), dec!(5), 1)).is_err());
        assert!(project(&input(dec!(1), dec!(-1), dec!(5), 1)).is_err());
        assert!(project(&input(dec!(1), dec!(0), dec!(-5), 1)).is_err());
        assert!(project(&input(dec!(1), dec!(0), dec!(5), 0)).is_err());
        assert!(project(&input(dec!(1), dec!(0), dec!(5), 101)).is_err());
    }

    #[test]
    fn test_overflow_is_reported_not_panicking() {
        let result = project(&input(dec!(1_000_000_000), dec!(0), dec!(900), 100));
        assert!(matches!(
            result,
            Err(WealthArmorError::FinancialImpossibility(_))
        ));
    }

    #[test]
    fn test_extreme_rate_with_nothing_invested_is_an_error() {
        let result = project(&input(Decimal::ZERO, Decimal::ZERO, dec!(888), 10));
        assert!(matches!(
            result,
            Err(WealthArmorError::FinancialImpossibility(_))
        ));
    }
}
