use chrono::Utc;
use clap::Args;
use serde::Serialize;
use serde_json::Value;

use wealtharmor_core::market::{
    self, CurrencyPair, FlatMarket, MarketDataSource, Quote, RatePoint, RateRange,
    SimulatedMarket,
};

/// Arguments for the currency terminal
#[derive(Args)]
pub struct MarketArgs {
    /// PENUSD or BTCUSD
    #[arg(long, default_value = "PENUSD")]
    pub pair: String,

    /// Hours of history ending now
    #[arg(long, default_value = "24")]
    pub hours: u32,

    /// Seed for a reproducible simulated history
    #[arg(long)]
    pub seed: Option<u64>,

    /// Flat history at the reference rate instead of a random walk
    #[arg(long)]
    pub flat: bool,
}

#[derive(Serialize)]
struct MarketOutput {
    source: String,
    quote: Quote,
    range: RateRange,
    history: Vec<RatePoint>,
}

pub fn run_market(args: MarketArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let pair: CurrencyPair = args.pair.parse()?;

    let mut source: Box<dyn MarketDataSource> = if args.flat {
        Box::new(FlatMarket)
    } else {
        Box::new(SimulatedMarket::new(args.seed))
    };

    let history = source.history(pair, args.hours, Utc::now())?;
    let range = market::history_range(&history)?;
    tracing::debug!(source = source.name(), %pair, points = history.len(), "market history ready");

    Ok(serde_json::to_value(MarketOutput {
        source: source.name().to_string(),
        quote: market::quote(pair),
        range,
        history,
    })?)
}
