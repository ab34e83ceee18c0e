use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::WealthArmorError;
use crate::types::{Money, Percent};
use crate::WealthArmorResult;

/// Largest single holding. Five of these still sum inside `Decimal::MAX`.
pub const MAX_HOLDING: Money = dec!(1_000_000_000_000_000_000_000_000_000);

/// The fixed set of asset classes a portfolio is entered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetClass {
    /// Mutual funds.
    #[serde(alias = "funds")]
    Fondos,
    Factoring,
    /// Physical gold.
    #[serde(alias = "gold")]
    Oro,
    /// Hard currency (US dollars).
    #[serde(alias = "dollars", alias = "hard_currency")]
    Dolares,
    /// Liquid cash.
    #[serde(alias = "cash")]
    Caja,
}

impl AssetClass {
    pub const ALL: [AssetClass; 5] = [
        AssetClass::Fondos,
        AssetClass::Factoring,
        AssetClass::Oro,
        AssetClass::Dolares,
        AssetClass::Caja,
    ];

    pub fn key(self) -> &'static str {
        match self {
            AssetClass::Fondos => "fondos",
            AssetClass::Factoring => "factoring",
            AssetClass::Oro => "oro",
            AssetClass::Dolares => "dolares",
            AssetClass::Caja => "caja",
        }
    }

    pub fn profile(self) -> AssetProfile {
        match self {
            AssetClass::Fondos => AssetProfile {
                name: "Mutual Funds",
                color: "#3b82f6",
                risk: "Medium",
                expected_return_pct: dec!(8.5),
                taxable: true,
            },
            AssetClass::Factoring => AssetProfile {
                name: "Factoring",
                color: "#8b5cf6",
                risk: "Medium",
                expected_return_pct: dec!(12.0),
                taxable: true,
            },
            AssetClass::Oro => AssetProfile {
                name: "Physical Gold",
                color: "#d4af37",
                risk: "Low-Medium",
                expected_return_pct: dec!(7.0),
                taxable: true,
            },
            AssetClass::Dolares => AssetProfile {
                name: "US Dollars",
                color: "#10b981",
                risk: "Low",
                expected_return_pct: dec!(3.5),
                taxable: false,
            },
            AssetClass::Caja => AssetProfile {
                name: "Liquid Cash",
                color: "#6b7280",
                risk: "Very Low",
                expected_return_pct: dec!(1.5),
                taxable: false,
            },
        }
    }
}

impl fmt::Display for AssetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for AssetClass {
    type Err = WealthArmorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fondos" | "funds" => Ok(AssetClass::Fondos),
            "factoring" => Ok(AssetClass::Factoring),
            "oro" | "gold" => Ok(AssetClass::Oro),
            "dolares" | "dollars" | "hard_currency" => Ok(AssetClass::Dolares),
            "caja" | "cash" => Ok(AssetClass::Caja),
            other => Err(WealthArmorError::invalid(
                "asset_class",
                format!("Unknown asset class '{other}'"),
            )),
        }
    }
}

/// Static display and return assumptions for an asset class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AssetProfile {
    pub name: &'static str,
    pub color: &'static str,
    pub risk: &'static str,
    pub expected_return_pct: Percent,
    pub taxable: bool,
}

/// Amount held per asset class. Classes never set read as zero.
///
/// Every amount lies in `[0, MAX_HOLDING]`, including after deserialisation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<AssetClass, Money>",
    into = "BTreeMap<AssetClass, Money>"
)]
pub struct PortfolioHoldings {
    amounts: BTreeMap<AssetClass, Money>,
}

impl PortfolioHoldings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, asset: AssetClass) -> Money {
        self.amounts.get(&asset).copied().unwrap_or(Decimal::ZERO)
    }

    pub fn set(&mut self, asset: AssetClass, amount: Money) -> WealthArmorResult<()> {
        if amount < Decimal::ZERO {
            return Err(WealthArmorError::invalid(
                asset.key(),
                format!("Holding must be >= 0 (got {amount})"),
            ));
        }
        if amount > MAX_HOLDING {
            return Err(WealthArmorError::invalid(
                asset.key(),
                format!("Holding must be <= {MAX_HOLDING} (got {amount})"),
            ));
        }
        self.amounts.insert(asset, amount);
        Ok(())
    }

    /// Builder-style `set` for literals in tests and fixtures.
    pub fn with(mut self, asset: AssetClass, amount: Money) -> WealthArmorResult<Self> {
        self.set(asset, amount)?;
        Ok(self)
    }

    /// Every asset class with its amount, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (AssetClass, Money)> + '_ {
        AssetClass::ALL.iter().map(move |&asset| (asset, self.get(asset)))
    }

    /// Sum of all holdings. Bounded by `5 * MAX_HOLDING`, so it cannot overflow.
    pub fn total(&self) -> Money {
        self.amounts.values().copied().sum()
    }
}

impl TryFrom<BTreeMap<AssetClass, Money>> for PortfolioHoldings {
    type Error = WealthArmorError;

    fn try_from(amounts: BTreeMap<AssetClass, Money>) -> Result<Self, Self::Error> {
        amounts
            .into_iter()
            .try_fold(PortfolioHoldings::new(), |h, (asset, amount)| h.with(asset, amount))
    }
}

impl From<PortfolioHoldings> for BTreeMap<AssetClass, Money> {
    fn from(holdings: PortfolioHoldings) -> Self {
        holdings.amounts
    }
}

/// Turn a raw text field into a holding amount.
///
/// Unparsable or negative input becomes zero, matching what the entry form
/// shows for an invalid field. Oversized input is capped at `MAX_HOLDING`.
pub fn sanitize_amount(raw: &str) -> Money {
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',' && *c != '_').collect();
    if cleaned.is_empty() {
        return Decimal::ZERO;
    }
    Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .map(|v| v.clamp(Decimal::ZERO, MAX_HOLDING))
        .unwrap_or(Decimal::ZERO)
}
