pub mod display;
pub mod error;
pub mod time_value;
pub mod types;

#[cfg(feature = "tiers")]
pub mod tiers;

#[cfg(feature = "portfolio")]
pub mod portfolio;

#[cfg(feature = "tax")]
pub mod tax;

#[cfg(feature = "growth")]
pub mod growth;

#[cfg(feature = "crisis")]
pub mod crisis;

#[cfg(feature = "radar")]
pub mod radar;

#[cfg(feature = "market")]
pub mod market;

#[cfg(feature = "session")]
pub mod session;

pub use error::WealthArmorError;
pub use types::*;

/// Standard result type for all wealth-armor operations
pub type WealthArmorResult<T> = Result<T, WealthArmorError>;
