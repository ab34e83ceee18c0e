//! Currency terminal data: a pluggable history source and FX lookups.

pub mod fx;
pub mod source;

pub use fx::{convert, parse_rate, resolve_rate, RateLookup};
pub use source::{
    history_range, quote, CurrencyPair, FlatMarket, MarketDataSource, PairProfile, Quote,
    RateRange, RatePoint, SimulatedMarket,
};
