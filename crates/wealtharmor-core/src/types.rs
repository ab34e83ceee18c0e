use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.05 = 5%). Never as percentages.
pub type Rate = Decimal;

/// Percentages expressed on a 0–100 scale (shares, armor levels, quoted yields).
pub type Percent = Decimal;

/// Currency code. Serialised as its bare code (`"PEN"`); parsing is case-insensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Currency {
    #[default]
    PEN,
    USD,
    EUR,
    BTC,
    Other(String),
}

impl Currency {
    /// ISO-style code as used by exchange-rate feeds.
    pub fn code(&self) -> &str {
        match self {
            Currency::PEN => "PEN",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::BTC => "BTC",
            Currency::Other(code) => code.as_str(),
        }
    }

    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_uppercase().as_str() {
            "PEN" => Currency::PEN,
            "USD" => Currency::USD,
            "EUR" => Currency::EUR,
            "BTC" => Currency::BTC,
            other => Currency::Other(other.to_string()),
        }
    }
}

impl From<String> for Currency {
    fn from(code: String) -> Self {
        Currency::from_code(&code)
    }
}

impl From<Currency> for String {
    fn from(currency: Currency) -> Self {
        currency.code().to_string()
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_code_roundtrip() {
        assert_eq!(Currency::from_code("pen"), Currency::PEN);
        assert_eq!(Currency::from_code(" usd "), Currency::USD);
        assert_eq!(Currency::from_code("GBP"), Currency::Other("GBP".into()));
        assert_eq!(Currency::Other("GBP".into()).code(), "GBP");
    }

    #[test]
    fn test_currency_serialises_as_code() {
        assert_eq!(serde_json::to_string(&Currency::USD).unwrap(), r#""USD""#);
        let parsed: Currency = serde_json::from_str(r#""eur""#).unwrap();
        assert_eq!(parsed, Currency::EUR);
        let other: Currency = serde_json::from_str(r#""gbp""#).unwrap();
        assert_eq!(other, Currency::Other("GBP".into()));
    }

    #[test]
    fn test_default_currency_is_sol() {
        assert_eq!(Currency::default(), Currency::PEN);
    }
}
