pub mod holdings;
pub mod metrics;

pub use holdings::{sanitize_amount, AssetClass, AssetProfile, PortfolioHoldings, MAX_HOLDING};
pub use metrics::{
    analyze_portfolio, compute_metrics, AllocationLine, PortfolioAnalysis, PortfolioInput,
    PortfolioMetrics,
};
