use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::WealthArmorError;
use crate::types::{Currency, Money, Rate};
use crate::WealthArmorResult;

/// Body shape of a "latest rates relative to USD" feed.
#[derive(Debug, Deserialize)]
struct RatesBody {
    rates: HashMap<String, Decimal>,
}

/// A rate ready for display, with the reason when it had to fall back to 1.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateLookup {
    pub currency: Currency,
    pub rate: Rate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RateLookup {
    pub fn fallback(currency: Currency, reason: impl Into<String>) -> Self {
        Self {
            currency,
            rate: Decimal::ONE,
            error: Some(reason.into()),
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.error.is_some()
    }
}

/// Extract one currency's rate from a feed body.
pub fn parse_rate(body: &str, currency: &Currency) -> WealthArmorResult<Rate> {
    let parsed: RatesBody = serde_json::from_str(body).map_err(|e| {
        WealthArmorError::RateUnavailable {
            currency: currency.code().to_string(),
            reason: format!("malformed rates body: {e}"),
        }
    })?;

    let rate = parsed
        .rates
        .get(currency.code())
        .copied()
        .ok_or_else(|| WealthArmorError::RateUnavailable {
            currency: currency.code().to_string(),
            reason: "currency missing from rates".into(),
        })?;

    if rate <= Decimal::ZERO {
        return Err(WealthArmorError::RateUnavailable {
            currency: currency.code().to_string(),
            reason: format!("non-positive rate {rate}"),
        });
    }

    Ok(rate)
}

/// Turn a fetch outcome into a usable rate. Never fails: any problem
/// degrades to 1.0 with the error kept for display.
pub fn resolve_rate(fetched: Result<String, String>, currency: &Currency) -> RateLookup {
    let body = match fetched {
        Ok(body) => body,
        Err(reason) => return RateLookup::fallback(currency.clone(), reason),
    };
    match parse_rate(&body, currency) {
        Ok(rate) => RateLookup {
            currency: currency.clone(),
            rate,
            error: None,
        },
        Err(e) => {
            tracing::debug!(currency = %currency, error = %e, "rate lookup fell back to 1.0");
            RateLookup::fallback(currency.clone(), e.to_string())
        }
    }
}

/// Display conversion: `amount * rate`.
pub fn convert(amount: Money, rate: Rate) -> WealthArmorResult<Money> {
    amount.checked_mul(rate).ok_or_else(|| {
        WealthArmorError::FinancialImpossibility(format!(
            "converting {amount} at rate {rate} overflowed"
        ))
    })
}
