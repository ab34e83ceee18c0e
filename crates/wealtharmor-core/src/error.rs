use thiserror::Error;

#[derive(Debug, Error)]
pub enum WealthArmorError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Financial impossibility: {0}")]
    FinancialImpossibility(String),

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Rate unavailable for {currency}: {reason}")]
    RateUnavailable { currency: String, reason: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl WealthArmorError {
    /// Shorthand for the precondition failures every calculator reports.
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        WealthArmorError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for WealthArmorError {
    fn from(e: serde_json::Error) -> Self {
        WealthArmorError::SerializationError(e.to_string())
    }
}
