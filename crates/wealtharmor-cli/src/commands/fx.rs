use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

use wealtharmor_core::display;
use wealtharmor_core::market::{self, RateLookup};
use wealtharmor_core::{Currency, Money};

const DEFAULT_RATES_URL: &str = "https://api.exchangerate-api.com/v4/latest/USD";
const RATES_URL_ENV: &str = "WEALTHARMOR_RATES_URL";
const ATTEMPTS: u32 = 2;

/// Arguments for display currency conversion
#[derive(Args)]
pub struct FxArgs {
    /// Target currency code (PEN, USD, EUR, BTC)
    #[arg(long, default_value = "PEN")]
    pub currency: String,

    /// Amount to convert
    #[arg(long)]
    pub amount: Option<Decimal>,

    /// Request timeout in seconds
    #[arg(long, default_value = "5")]
    pub timeout: u64,
}

#[derive(Serialize)]
struct FxOutput {
    source: String,
    #[serde(flatten)]
    lookup: RateLookup,
    #[serde(skip_serializing_if = "Option::is_none")]
    amount: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    converted: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    display: Option<String>,
}

fn rates_url() -> String {
    std::env::var(RATES_URL_ENV).unwrap_or_else(|_| DEFAULT_RATES_URL.to_string())
}

/// GET the rates body, retrying once on failure.
fn fetch_rates(url: &str, timeout: Duration) -> Result<String, String> {
    let client = reqwest::blocking::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| e.to_string())?;

    let mut last_error = String::new();
    for attempt in 1..=ATTEMPTS {
        let response = client
            .get(url)
            .send()
            .and_then(|r| r.error_for_status())
            .and_then(|r| r.text());
        match response {
            Ok(body) => {
                tracing::info!(url, attempt, "fetched exchange rates");
                return Ok(body);
            }
            Err(e) => {
                tracing::warn!(url, attempt, error = %e, "exchange rate request failed");
                last_error = e.to_string();
            }
        }
    }
    Err(last_error)
}

pub fn run_fx(args: FxArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let currency = Currency::from_code(&args.currency);
    let url = rates_url();

    let lookup = market::resolve_rate(
        fetch_rates(&url, Duration::from_secs(args.timeout)),
        &currency,
    );
    if let Some(ref reason) = lookup.error {
        tracing::warn!(currency = currency.code(), reason = %reason, "using fallback rate 1.0");
    }

    let converted = args
        .amount
        .map(|a| market::convert(a, lookup.rate))
        .transpose()?;
    let formatted = converted.map(|c| display::format_money(c, &currency));

    Ok(serde_json::to_value(FxOutput {
        source: url,
        lookup,
        amount: args.amount,
        converted,
        display: formatted,
    })?)
}
