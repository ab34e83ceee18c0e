use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::WealthArmorError;
use crate::types::{Money, Percent};
use crate::WealthArmorResult;

/// One year of hourly points.
const MAX_LOOKBACK_HOURS: u32 = 24 * 365;

/// Simulated rates stay within ±3% of the pair's base rate.
const BAND: Decimal = dec!(0.03);

const RATE_DECIMALS: u32 = 4;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CurrencyPair {
    PenUsd,
    BtcUsd,
}

impl CurrencyPair {
    pub const ALL: [CurrencyPair; 2] = [CurrencyPair::PenUsd, CurrencyPair::BtcUsd];

    pub fn profile(self) -> PairProfile {
        match self {
            CurrencyPair::PenUsd => PairProfile {
                pair: self,
                label: "PEN/USD".into(),
                name: "Peruvian Sol / US Dollar".into(),
                base_rate: dec!(3.765),
                buy_rate: Some(dec!(3.750)),
                sell_rate: Some(dec!(3.780)),
                spread: Some(dec!(0.030)),
                change_24h: dec!(0.015),
                change_pct: dec!(0.40),
                volatility: dec!(0.015),
                display_decimals: 3,
            },
            CurrencyPair::BtcUsd => PairProfile {
                pair: self,
                label: "BTC/USD".into(),
                name: "Bitcoin / US Dollar".into(),
                base_rate: dec!(94_520),
                buy_rate: None,
                sell_rate: None,
                spread: None,
                change_24h: dec!(1_250),
                change_pct: dec!(1.34),
                volatility: dec!(1_500),
                display_decimals: 0,
            },
        }
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CurrencyPair::PenUsd => f.write_str("PENUSD"),
            CurrencyPair::BtcUsd => f.write_str("BTCUSD"),
        }
    }
}

impl FromStr for CurrencyPair {
    type Err = WealthArmorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().replace('/', "").to_ascii_uppercase().as_str() {
            "PENUSD" => Ok(CurrencyPair::PenUsd),
            "BTCUSD" => Ok(CurrencyPair::BtcUsd),
            other => Err(WealthArmorError::invalid(
                "pair",
                format!("Unknown currency pair '{other}'"),
            )),
        }
    }
}

/// Static reference data for a pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairProfile {
    pub pair: CurrencyPair,
    pub label: String,
    pub name: String,
    pub base_rate: Money,
    pub buy_rate: Option<Money>,
    pub sell_rate: Option<Money>,
    pub spread: Option<Money>,
    pub change_24h: Money,
    pub change_pct: Percent,
    /// Peak-to-peak size of one random step.
    pub volatility: Money,
    pub display_decimals: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatePoint {
    pub timestamp: DateTime<Utc>,
    pub rate: Money,
    pub high: Money,
    pub low: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub pair: CurrencyPair,
    pub label: String,
    pub rate: Money,
    pub buy: Option<Money>,
    pub sell: Option<Money>,
    pub spread: Option<Money>,
    pub change_24h: Money,
    pub change_pct: Percent,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateRange {
    pub min: Money,
    pub max: Money,
}

/// Source of decorative rate history for the currency terminal.
pub trait MarketDataSource {
    fn name(&self) -> &str;

    /// Hourly points from `lookback_hours` before `anchor` up to `anchor`,
    /// oldest first (`lookback_hours + 1` points).
    fn history(
        &mut self,
        pair: CurrencyPair,
        lookback_hours: u32,
        anchor: DateTime<Utc>,
    ) -> WealthArmorResult<Vec<RatePoint>>;
}

fn check_lookback(lookback_hours: u32) -> WealthArmorResult<()> {
    if lookback_hours > MAX_LOOKBACK_HOURS {
        return Err(WealthArmorError::invalid(
            "lookback_hours",
            format!("lookback_hours must be <= {MAX_LOOKBACK_HOURS}"),
        ));
    }
    Ok(())
}

fn round_rate(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(RATE_DECIMALS, RoundingStrategy::MidpointAwayFromZero)
}

// ---------------------------------------------------------------------------
// Simulated source
// ---------------------------------------------------------------------------

/// Bounded random walk around each pair's base rate.
pub struct SimulatedMarket {
    rng: StdRng,
}

impl SimulatedMarket {
    /// Seeded for reproducible charts; entropy-seeded when `seed` is `None`.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }

    /// Uniform draw on [0, 1] at four decimal places.
    fn unit(&mut self) -> Decimal {
        Decimal::new(self.rng.gen_range(0..=10_000), 4)
    }
}

impl MarketDataSource for SimulatedMarket {
    fn name(&self) -> &str {
        "simulated"
    }

    fn history(
        &mut self,
        pair: CurrencyPair,
        lookback_hours: u32,
        anchor: DateTime<Utc>,
    ) -> WealthArmorResult<Vec<RatePoint>> {
        check_lookback(lookback_hours)?;

        let profile = pair.profile();
        let floor = profile.base_rate * (Decimal::ONE - BAND);
        let ceiling = profile.base_rate * (Decimal::ONE + BAND);
        let half_band = profile.volatility * dec!(0.5);

        let mut current = profile.base_rate;
        let mut points = Vec::with_capacity(lookback_hours as usize + 1);

        for hours_back in (0..=lookback_hours).rev() {
            let change = (self.unit() - dec!(0.5)) * profile.volatility;
            current = (current + change).clamp(floor, ceiling);

            let high = current + self.unit() * half_band;
            let low = current - self.unit() * half_band;

            points.push(RatePoint {
                timestamp: anchor - Duration::hours(i64::from(hours_back)),
                rate: round_rate(current),
                high: round_rate(high),
                low: round_rate(low),
            });
        }

        tracing::trace!(%pair, points = points.len(), "generated simulated history");
        Ok(points)
    }
}

// ---------------------------------------------------------------------------
// Flat source
// ---------------------------------------------------------------------------

/// Constant history at the base rate; deterministic for tests and offline use.
#[derive(Debug, Default, Clone, Copy)]
pub struct FlatMarket;

impl MarketDataSource for FlatMarket {
    fn name(&self) -> &str {
        "flat"
    }

    fn history(
        &mut self,
        pair: CurrencyPair,
        lookback_hours: u32,
        anchor: DateTime<Utc>,
    ) -> WealthArmorResult<Vec<RatePoint>> {
        check_lookback(lookback_hours)?;
        let rate = pair.profile().base_rate;
        Ok((0..=lookback_hours)
            .rev()
            .map(|hours_back| RatePoint {
                timestamp: anchor - Duration::hours(i64::from(hours_back)),
                rate,
                high: rate,
                low: rate,
            })
            .collect())
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Current quote for a pair from its reference data.
pub fn quote(pair: CurrencyPair) -> Quote {
    let profile = pair.profile();
    Quote {
        pair,
        label: profile.label,
        rate: profile.base_rate,
        buy: profile.buy_rate,
        sell: profile.sell_rate,
        spread: profile.spread,
        change_24h: profile.change_24h,
        change_pct: profile.change_pct,
    }
}

/// Lowest and highest closing rate in a history.
pub fn history_range(points: &[RatePoint]) -> WealthArmorResult<RateRange> {
    let first = points.first().ok_or_else(|| {
        WealthArmorError::InsufficientData("Rate history is empty".into())
    })?;
    let init = RateRange {
        min: first.rate,
        max: first.rate,
    };
    Ok(points.iter().fold(init, |acc, p| RateRange {
        min: acc.min.min(p.rate),
        max: acc.max.max(p.rate),
    }))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn anchor() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_simulated_history_shape() {
        let mut market = SimulatedMarket::new(Some(42));
        let points = market.history(CurrencyPair::PenUsd, 30, anchor()).unwrap();
        assert_eq!(points.len(), 31);
        assert_eq!(points.last().unwrap().timestamp, anchor());
        assert_eq!(points[0].timestamp, anchor() - Duration::hours(30));
        for pair in points.windows(2) {
            assert!(pair[0].timestamp < pair[1].timestamp);
        }
    }

    #[test]
    fn test_simulated_history_stays_in_band() {
        let mut market = SimulatedMarket::new(Some(7));
        for pair in CurrencyPair::ALL {
            let base = pair.profile().base_rate;
            let points = market.history(pair, 500, anchor()).unwrap();
            for p in &points {
                assert!(p.rate >= round_rate(base * dec!(0.97)));
                assert!(p.rate <= round_rate(base * dec!(1.03)));
                assert!(p.low <= p.rate && p.rate <= p.high);
                assert!(p.rate.scale() <= RATE_DECIMALS);
            }
        }
    }

    #[test]
    fn test_seeded_history_is_reproducible() {
        let a = SimulatedMarket::new(Some(99))
            .history(CurrencyPair::BtcUsd, 24, anchor())
            .unwrap();
        let b = SimulatedMarket::new(Some(99))
            .history(CurrencyPair::BtcUsd, 24, anchor())
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_flat_history_and_range() {
        let points = FlatMarket.history(CurrencyPair::PenUsd, 5, anchor()).unwrap();
        assert_eq!(points.len(), 6);
        let range = history_range(&points).unwrap();
        assert_eq!(range.min, dec!(3.765));
        assert_eq!(range.max, dec!(3.765));
    }

    #[test]
    fn test_range_of_empty_history() {
        assert!(matches!(
            history_range(&[]),
            Err(WealthArmorError::InsufficientData(_))
        ));
    }

    #[test]
    fn test_lookback_limit() {
        assert!(FlatMarket
            .history(CurrencyPair::PenUsd, MAX_LOOKBACK_HOURS + 1, anchor())
            .is_err());
    }

    #[test]
    fn test_quote_spread() {
        let q = quote(CurrencyPair::PenUsd);
        assert_eq!(q.sell.unwrap() - q.buy.unwrap(), q.spread.unwrap());
        assert!(quote(CurrencyPair::BtcUsd).spread.is_none());
    }

    #[test]
    fn test_pair_parsing() {
        assert_eq!("pen/usd".parse::<CurrencyPair>().unwrap(), CurrencyPair::PenUsd);
        assert_eq!("BTCUSD".parse::<CurrencyPair>().unwrap(), CurrencyPair::BtcUsd);
        assert!("EURUSD".parse::<CurrencyPair>().is_err());
    }
}
