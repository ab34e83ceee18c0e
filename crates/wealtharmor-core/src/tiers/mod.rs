pub mod classifier;
pub mod sentinel;

pub use classifier::{classify, classify_amount, ClassifyInput, TierTable, WealthTier};
pub use sentinel::{brief, canonical_tier_table, SentinelBriefing, SentinelLevel};
