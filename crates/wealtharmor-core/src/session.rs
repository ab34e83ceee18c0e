//! Caller-owned dashboard state.
//!
//! Every derived view is recomputed from the holdings on request, so a
//! session can be serialised, restored and queried in any order.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::WealthArmorError;
use crate::market::{convert, CurrencyPair, RateLookup};
use crate::portfolio::{
    compute_metrics, sanitize_amount, AssetClass, PortfolioHoldings, PortfolioMetrics,
};
use crate::tiers::{brief, SentinelBriefing};
use crate::types::{Currency, Money, Rate};
use crate::WealthArmorResult;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardSession {
    pub holdings: PortfolioHoldings,
    pub currency_pair: Option<CurrencyPair>,
    /// Latest display rate per currency code, relative to the holdings' currency.
    #[serde(default)]
    pub rate_cache: BTreeMap<String, Rate>,
}

impl DashboardSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_holding(&mut self, asset: AssetClass, amount: Money) -> WealthArmorResult<()> {
        self.holdings.set(asset, amount)?;
        tracing::debug!(asset = asset.key(), %amount, "holding updated");
        Ok(())
    }

    /// Set a holding from a raw form field. Invalid text stores zero.
    pub fn set_holding_raw(&mut self, asset: AssetClass, raw: &str) -> Money {
        let amount = sanitize_amount(raw);
        let stored = self.holdings.set(asset, amount);
        debug_assert!(stored.is_ok());
        tracing::debug!(asset = asset.key(), raw, %amount, "holding updated from text");
        amount
    }

    pub fn select_pair(&mut self, pair: CurrencyPair) {
        tracing::debug!(%pair, "currency pair selected");
        self.currency_pair = Some(pair);
    }

    pub fn metrics(&self) -> PortfolioMetrics {
        compute_metrics(&self.holdings)
    }

    pub fn briefing(&self) -> SentinelBriefing {
        brief(self.holdings.total())
    }

    /// Cache a resolved rate. Fallback lookups are not cached.
    pub fn record_rate(&mut self, lookup: &RateLookup) -> bool {
        if lookup.is_fallback() || lookup.rate <= Decimal::ZERO {
            tracing::debug!(currency = lookup.currency.code(), "fallback rate not cached");
            return false;
        }
        self.rate_cache
            .insert(lookup.currency.code().to_string(), lookup.rate);
        tracing::debug!(currency = lookup.currency.code(), rate = %lookup.rate, "rate cached");
        true
    }

    /// Portfolio total expressed in `currency` using the cached rate.
    ///
    /// The holdings' own currency (PEN) needs no rate.
    pub fn total_in(&self, currency: &Currency) -> WealthArmorResult<Money> {
        let total = self.holdings.total();
        if *currency == Currency::PEN {
            return Ok(total);
        }
        let rate = self.rate_cache.get(currency.code()).copied().ok_or_else(|| {
            WealthArmorError::RateUnavailable {
                currency: currency.code().to_string(),
                reason: "no cached rate".into(),
            }
        })?;
        convert(total, rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portfolio::MAX_HOLDING;
    use rust_decimal_macros::dec;

    fn session() -> DashboardSession {
        let mut s = DashboardSession::new();
        s.set_holding(AssetClass::Fondos, dec!(30_000)).unwrap();
        s.set_holding(AssetClass::Caja, dec!(20_000)).unwrap();
        s
    }

    #[test]
    fn test_metrics_follow_mutations() {
        let mut s = session();
        assert_eq!(s.metrics().total, dec!(50_000));
        s.set_holding(AssetClass::Caja, dec!(70_000)).unwrap();
        let m = s.metrics();
        assert_eq!(m.total, dec!(100_000));
        assert_eq!(m.share_pct[&AssetClass::Fondos], dec!(30));
        assert_eq!(s.briefing().level_index, 2);
    }

    #[test]
    fn test_negative_holding_rejected() {
        let mut s = session();
        assert!(s.set_holding(AssetClass::Oro, dec!(-1)).is_err());
        assert_eq!(s.holdings.get(AssetClass::Oro), Decimal::ZERO);
    }

    #[test]
    fn test_raw_text_is_sanitised() {
        let mut s = DashboardSession::new();
        assert_eq!(s.set_holding_raw(AssetClass::Oro, "12,500.50"), dec!(12500.50));
        assert_eq!(s.set_holding_raw(AssetClass::Caja, "abc"), Decimal::ZERO);
        assert_eq!(s.set_holding_raw(AssetClass::Dolares, "-40"), Decimal::ZERO);
        assert_eq!(s.metrics().total, dec!(12500.50));
    }

    #[test]
    fn test_total_in_uses_cached_rate() {
        let mut s = session();
        assert_eq!(s.total_in(&Currency::PEN).unwrap(), dec!(50_000));
        assert!(s.total_in(&Currency::USD).is_err());

        let cached = s.record_rate(&RateLookup {
            currency: Currency::USD,
            rate: dec!(0.27),
            error: None,
        });
        assert!(cached);
        assert_eq!(s.total_in(&Currency::USD).unwrap(), dec!(13_500));
    }

    #[test]
    fn test_oversized_text_is_capped() {
        let mut s = DashboardSession::new();
        let stored = s.set_holding_raw(AssetClass::Fondos, "79,228,162,514,264,337,593,543,950,335");
        assert_eq!(stored, MAX_HOLDING);
        s.set_holding_raw(AssetClass::Oro, "79228162514264337593543950335");
        assert_eq!(s.metrics().total, MAX_HOLDING * dec!(2));
        assert_eq!(s.briefing().level_index, 4);
    }

    #[test]
    fn test_total_in_overflow_is_an_error() {
        let mut s = DashboardSession::new();
        s.set_holding(AssetClass::Caja, MAX_HOLDING).unwrap();
        s.record_rate(&RateLookup {
            currency: Currency::BTC,
            rate: dec!(1_000),
            error: None,
        });
        assert!(matches!(
            s.total_in(&Currency::BTC),
            Err(WealthArmorError::FinancialImpossibility(_))
        ));
    }

    #[test]
    fn test_deserialised_negative_holding_rejected() {
        let json = r#"{"holdings": {"oro": -5, "caja": 10}, "currency_pair": null}"#;
        assert!(serde_json::from_str::<DashboardSession>(json).is_err());
    }

    #[test]
    fn test_fallback_rate_not_cached() {
        let mut s = session();
        assert!(!s.record_rate(&RateLookup::fallback(Currency::EUR, "timeout")));
        assert!(s.rate_cache.is_empty());
    }

    #[test]
    fn test_session_roundtrips_through_json() {
        let mut s = session();
        s.select_pair(CurrencyPair::BtcUsd);
        let json = serde_json::to_string(&s).unwrap();
        let back: DashboardSession = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
    }
}
