use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::WealthArmorError;
use crate::types::{with_metadata, ComputationOutput, Money};
use crate::WealthArmorResult;

use super::sentinel::canonical_tier_table;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A labelled half-open band `[lower_bound, upper_bound)` of wealth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WealthTier {
    pub lower_bound: Money,
    /// `None` marks the final, unbounded tier.
    #[serde(default)]
    pub upper_bound: Option<Money>,
    pub label: String,
    pub advisory: String,
}

impl WealthTier {
    pub fn contains(&self, amount: Money) -> bool {
        amount >= self.lower_bound && self.upper_bound.map_or(true, |upper| amount < upper)
    }
}

/// An ordered, validated partition of `[0, ∞)` into tiers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<WealthTier>", into = "Vec<WealthTier>")]
pub struct TierTable {
    tiers: Vec<WealthTier>,
}

impl TierTable {
    /// Build a table, checking that the tiers start at zero, are contiguous
    /// and ascending, and that only the last one is unbounded.
    pub fn new(tiers: Vec<WealthTier>) -> WealthArmorResult<Self> {
        if tiers.is_empty() {
            return Err(WealthArmorError::InsufficientData(
                "A tier table needs at least one tier".into(),
            ));
        }

        if !tiers[0].lower_bound.is_zero() {
            return Err(WealthArmorError::invalid(
                "tiers[0].lower_bound",
                format!("First tier must start at 0 (got {})", tiers[0].lower_bound),
            ));
        }

        let last_index = tiers.len() - 1;
        for (i, tier) in tiers.iter().enumerate() {
            match tier.upper_bound {
                None if i != last_index => {
                    return Err(WealthArmorError::invalid(
                        format!("tiers[{i}].upper_bound"),
                        "Only the last tier may be unbounded",
                    ));
                }
                Some(_) if i == last_index => {
                    return Err(WealthArmorError::invalid(
                        format!("tiers[{i}].upper_bound"),
                        "The last tier must be unbounded",
                    ));
                }
                Some(upper) => {
                    if upper <= tier.lower_bound {
                        return Err(WealthArmorError::invalid(
                            format!("tiers[{i}].upper_bound"),
                            format!(
                                "Upper bound {} must exceed lower bound {}",
                                upper, tier.lower_bound
                            ),
                        ));
                    }
                    let next_lower = tiers[i + 1].lower_bound;
                    if next_lower != upper {
                        return Err(WealthArmorError::invalid(
                            format!("tiers[{}].lower_bound", i + 1),
                            format!("Gap or overlap: expected {upper}, got {next_lower}"),
                        ));
                    }
                }
                None => {}
            }
        }

        Ok(Self { tiers })
    }

    /// Wrap a compiled-in table that is contiguous by construction.
    pub(crate) fn from_static(tiers: Vec<WealthTier>) -> Self {
        debug_assert!(TierTable::new(tiers.clone()).is_ok());
        Self { tiers }
    }

    pub fn tiers(&self) -> &[WealthTier] {
        &self.tiers
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    fn last(&self) -> &WealthTier {
        &self.tiers[self.tiers.len() - 1]
    }

    /// Index of the tier `amount` falls into (after clamping negatives to 0).
    pub fn position(&self, amount: Money) -> usize {
        let amount = amount.max(Decimal::ZERO);
        self.tiers
            .iter()
            .position(|tier| tier.contains(amount))
            .unwrap_or(self.tiers.len() - 1)
    }
}

impl TryFrom<Vec<WealthTier>> for TierTable {
    type Error = WealthArmorError;

    fn try_from(tiers: Vec<WealthTier>) -> Result<Self, Self::Error> {
        TierTable::new(tiers)
    }
}

impl From<TierTable> for Vec<WealthTier> {
    fn from(table: TierTable) -> Self {
        table.tiers
    }
}

/// Input for a standalone classification request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifyInput {
    pub amount: Money,
    /// Custom table; the canonical sentinel table is used when absent.
    #[serde(default)]
    pub tiers: Option<TierTable>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub amount: Money,
    pub amount_classified: Money,
    pub tier_index: usize,
    pub tier_count: usize,
    pub tier: WealthTier,
    /// Amount still needed to reach the next tier; `None` in the top tier.
    pub gap_to_next_tier: Option<Money>,
}

// ---------------------------------------------------------------------------
// Core functions
// ---------------------------------------------------------------------------

/// Return the first tier with `lower_bound <= amount < upper_bound`.
///
/// Negative amounts are clamped to zero. Falls back to the last tier when
/// nothing matches, which a validated table never produces.
pub fn classify(amount: Money, table: &TierTable) -> &WealthTier {
    let amount = amount.max(Decimal::ZERO);
    table
        .tiers
        .iter()
        .find(|tier| tier.contains(amount))
        .unwrap_or_else(|| table.last())
}

/// Classify an amount and report where it sits within the table.
pub fn classify_amount(
    input: &ClassifyInput,
) -> WealthArmorResult<ComputationOutput<Classification>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let canonical;
    let table = match &input.tiers {
        Some(custom) => custom,
        None => {
            canonical = canonical_tier_table();
            &canonical
        }
    };

    if input.amount < Decimal::ZERO {
        warnings.push(format!(
            "Negative amount {} clamped to 0 for classification",
            input.amount
        ));
    }
    let amount_classified = input.amount.max(Decimal::ZERO);

    let tier_index = table.position(amount_classified);
    let tier = table.tiers[tier_index].clone();
    let gap_to_next_tier = tier.upper_bound.map(|upper| upper - amount_classified);

    let output = Classification {
        amount: input.amount,
        amount_classified,
        tier_index,
        tier_count: table.len(),
        tier,
        gap_to_next_tier,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Half-open band lookup over an ascending tier table",
        &serde_json::json!({
            "custom_table": input.tiers.is_some(),
            "negative_amounts": "clamped to 0",
        }),
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
