//! The canonical five-level wealth table and the briefing built on it.
//!
//! Amounts are in soles (PEN). Each level carries an armor score and the
//! threats and tactics shown alongside it.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{Money, Percent};

use super::classifier::{TierTable, WealthTier};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentinelLevel {
    pub tier: WealthTier,
    pub armor_pct: Percent,
    pub threats: Vec<String>,
    pub tactics: Vec<String>,
}

/// Briefing for a given total wealth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentinelBriefing {
    pub total_wealth: Money,
    pub level_index: usize,
    pub label: String,
    pub greeting: String,
    pub armor_pct: Percent,
    pub threats: Vec<String>,
    pub tactics: Vec<String>,
    pub gap_to_next_level: Option<Money>,
}

fn level(
    lower: Decimal,
    upper: Option<Decimal>,
    label: &str,
    greeting: &str,
    armor_pct: Decimal,
    threats: &[&str],
    tactics: &[&str],
) -> SentinelLevel {
    SentinelLevel {
        tier: WealthTier {
            lower_bound: lower,
            upper_bound: upper,
            label: label.to_string(),
            advisory: greeting.to_string(),
        },
        armor_pct,
        threats: threats.iter().map(|s| s.to_string()).collect(),
        tactics: tactics.iter().map(|s| s.to_string()).collect(),
    }
}

pub fn sentinel_levels() -> Vec<SentinelLevel> {
    vec![
        level(
            dec!(0),
            Some(dec!(10_000)),
            "Foundation",
            "Your wealth fortress is under construction. Time to lay the foundations.",
            dec!(15),
            &[
                "No emergency fund: your first shield should be 3 months of expenses",
                "Full dependence on active income: diversify your sources",
            ],
            &[
                "PRIORITY 1: build an emergency fund of S/ 10,000",
                "Consider Caja term deposits at 9.5% TREA to get started",
                "Financial education: invest in yourself before the markets",
            ],
        ),
        level(
            dec!(10_000),
            Some(dec!(50_000)),
            "Perimeter",
            "You hold a basic defensive perimeter. Time to fortify.",
            dec!(35),
            &[
                "Inflation eroding purchasing power",
                "Undiversified portfolio: concentration risk detected",
            ],
            &[
                "Grow the emergency fund to 6 months (S/ 20,000 minimum)",
                "Start investing in Treasury bonds (6.2% TREA)",
                "Consider 10% in physical gold as an inflation hedge",
            ],
        ),
        level(
            dec!(50_000),
            Some(dec!(150_000)),
            "Fortified",
            "Your armor stands at 60%. The walls are up.",
            dec!(60),
            &[
                "Market volatility: the BVL can correct 15-20%",
                "Currency risk: the dollar may reach S/ 4.20",
            ],
            &[
                "Diversify: 40% fixed income, 30% equities, 20% dollars, 10% gold",
                "Enter factoring (12% TREA) with surplus capital",
                "Set aside 5% of realised gains for SUNAT",
            ],
        ),
        level(
            dec!(150_000),
            Some(dec!(500_000)),
            "Elite",
            "Your fortress is 85% impenetrable. You are in the financial elite.",
            dec!(85),
            &[
                "Complacency risk: markets never sleep",
                "Pending tax optimisation: there is room to pay less",
            ],
            &[
                "Consider international ETFs listed on the BVL (S&P 500)",
                "Explore commercial real estate for passive income",
                "Consult a CFA for advanced estate planning",
            ],
        ),
        level(
            dec!(500_000),
            None,
            "Generational",
            "Your armor is at 95%. You are a generational financial fortress.",
            dec!(95),
            &[
                "Legacy preservation: succession planning required",
                "Tax complexity: specialised CPA advice required",
            ],
            &[
                "Family holding structure (company or trust)",
                "International diversification through legal offshore vehicles",
                "Will and succession planned with a specialist lawyer",
            ],
        ),
    ]
}

/// The tier table behind the sentinel levels.
pub fn canonical_tier_table() -> TierTable {
    let tiers = sentinel_levels().into_iter().map(|l| l.tier).collect();
    TierTable::from_static(tiers)
}

/// Classify `total_wealth` into a sentinel level.
pub fn brief(total_wealth: Money) -> SentinelBriefing {
    let levels = sentinel_levels();
    let table = canonical_tier_table();
    let clamped = total_wealth.max(Decimal::ZERO);
    let level_index = table.position(clamped);
    let level = &levels[level_index];

    SentinelBriefing {
        total_wealth,
        level_index,
        label: level.tier.label.clone(),
        greeting: level.tier.advisory.clone(),
        armor_pct: level.armor_pct,
        threats: level.threats.clone(),
        tactics: level.tactics.clone(),
        gap_to_next_level: level.tier.upper_bound.map(|upper| upper - clamped),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_table_is_contiguous() {
        let table = canonical_tier_table();
        let tiers = table.tiers();
        assert_eq!(tiers.len(), 5);
        for pair in tiers.windows(2) {
            assert_eq!(pair[0].upper_bound, Some(pair[1].lower_bound));
        }
        assert!(tiers[4].upper_bound.is_none());
    }

    #[test]
    fn test_armor_rises_with_level() {
        let levels = sentinel_levels();
        for pair in levels.windows(2) {
            assert!(pair[0].armor_pct < pair[1].armor_pct);
        }
    }

    #[test]
    fn test_brief_for_empty_portfolio() {
        let b = brief(Decimal::ZERO);
        assert_eq!(b.level_index, 0);
        assert_eq!(b.armor_pct, dec!(15));
        assert_eq!(b.gap_to_next_level, Some(dec!(10_000)));
    }

    #[test]
    fn test_brief_boundaries() {
        assert_eq!(brief(dec!(9_999.99)).label, "Foundation");
        assert_eq!(brief(dec!(10_000)).label, "Perimeter");
        assert_eq!(brief(dec!(150_000)).label, "Elite");
        assert_eq!(brief(dec!(500_000)).armor_pct, dec!(95));
        assert_eq!(brief(dec!(500_000)).gap_to_next_level, None);
    }

    #[test]
    fn test_every_level_has_three_tactics() {
        for level in sentinel_levels() {
            assert_eq!(level.tactics.len(), 3);
            assert_eq!(level.threats.len(), 2);
        }
    }
}
