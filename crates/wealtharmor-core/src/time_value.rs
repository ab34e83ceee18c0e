use rust_decimal::Decimal;

use crate::error::WealthArmorError;
use crate::types::{Money, Rate};
use crate::WealthArmorResult;

/// Compute (1 + r)^n via iterative multiplication (avoids Decimal::powd drift).
pub fn compound(rate: Rate, nper: u32) -> WealthArmorResult<Decimal> {
    let factor = Decimal::ONE + rate;
    let mut result = Decimal::ONE;
    for period in 0..nper {
        result = result.checked_mul(factor).ok_or_else(|| {
            WealthArmorError::FinancialImpossibility(format!(
                "growth factor overflowed at period {}",
                period + 1
            ))
        })?;
    }
    Ok(result)
}

/// Future value of a present sum plus a level end-of-period annuity:
/// FV = PV * (1+r)^n + PMT * [((1+r)^n - 1) / r]
///
/// Positive amounts in, positive amount out (no spreadsheet sign flip).
pub fn future_value(rate: Rate, nper: u32, pmt: Money, present_value: Money) -> WealthArmorResult<Money> {
    if rate <= Decimal::NEGATIVE_ONE {
        return Err(WealthArmorError::invalid(
            "rate",
            "Periodic rate must be greater than -100%",
        ));
    }

    if rate.is_zero() {
        return Ok(present_value + pmt * Decimal::from(nper));
    }

    let factor = compound(rate, nper)?;
    let annuity_factor = factor
        .checked_sub(Decimal::ONE)
        .and_then(|growth| growth.checked_div(rate))
        .ok_or_else(|| {
            WealthArmorError::FinancialImpossibility("annuity factor overflowed".into())
        })?;

    let grown = present_value.checked_mul(factor);
    let accrued = pmt.checked_mul(annuity_factor);
    match (grown, accrued) {
        (Some(g), Some(a)) => g.checked_add(a).ok_or_else(|| {
            WealthArmorError::FinancialImpossibility("future value overflowed".into())
        }),
        _ => Err(WealthArmorError::FinancialImpossibility(
            "future value overflowed".into(),
        )),
    }
}
