use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;
use serde::Deserialize;

use wealtharmor_core::session::DashboardSession;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Tiers
// ---------------------------------------------------------------------------

#[napi]
pub fn classify_wealth(input_json: String) -> NapiResult<String> {
    let input: wealtharmor_core::tiers::ClassifyInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = wealtharmor_core::tiers::classify_amount(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[derive(Deserialize)]
struct BriefRequest {
    total_wealth: Decimal,
}

#[napi]
pub fn sentinel_briefing(input_json: String) -> NapiResult<String> {
    let request: BriefRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = wealtharmor_core::tiers::brief(request.total_wealth);
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Portfolio
// ---------------------------------------------------------------------------

#[napi]
pub fn portfolio_metrics(input_json: String) -> NapiResult<String> {
    let input: wealtharmor_core::portfolio::PortfolioInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = wealtharmor_core::portfolio::compute_metrics(&input.holdings);
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn analyze_portfolio(input_json: String) -> NapiResult<String> {
    let input: wealtharmor_core::portfolio::PortfolioInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        wealtharmor_core::portfolio::analyze_portfolio(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Tax
// ---------------------------------------------------------------------------

#[napi]
pub fn estimate_tax(input_json: String) -> NapiResult<String> {
    let input: wealtharmor_core::tax::TaxInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        wealtharmor_core::tax::estimate_capital_gains_tax(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn tax_regimes() -> NapiResult<String> {
    serde_json::to_string(&wealtharmor_core::tax::tax_regimes()).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Growth & crisis
// ---------------------------------------------------------------------------

#[napi]
pub fn project_growth(input_json: String) -> NapiResult<String> {
    let input: wealtharmor_core::growth::ProjectionInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = wealtharmor_core::growth::project(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn simulate_crisis(input_json: String) -> NapiResult<String> {
    let input: wealtharmor_core::crisis::CrisisInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = wealtharmor_core::crisis::simulate(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn crisis_scenarios() -> NapiResult<String> {
    serde_json::to_string(&wealtharmor_core::crisis::scenario_catalogue()).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Radar & market
// ---------------------------------------------------------------------------

#[napi]
pub fn compare_opportunities(input_json: String) -> NapiResult<String> {
    let input: wealtharmor_core::radar::RadarInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        wealtharmor_core::radar::compare_opportunities(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[derive(Deserialize)]
struct RateRequest {
    /// Raw body from the rates endpoint, or the fetch error.
    body: Option<String>,
    error: Option<String>,
    currency: wealtharmor_core::Currency,
}

/// Resolve a display rate from a fetch the JS side performed.
#[napi]
pub fn resolve_rate(input_json: String) -> NapiResult<String> {
    let request: RateRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let fetched = match (request.body, request.error) {
        (Some(body), _) => Ok(body),
        (None, error) => Err(error.unwrap_or_else(|| "no response".to_string())),
    };
    let lookup = wealtharmor_core::market::resolve_rate(fetched, &request.currency);
    serde_json::to_string(&lookup).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct SessionUpdate {
    session: DashboardSession,
    asset: wealtharmor_core::portfolio::AssetClass,
    raw: String,
}

/// Apply a raw form field to a serialised session and return the new session.
#[napi]
pub fn session_set_holding(input_json: String) -> NapiResult<String> {
    let mut update: SessionUpdate = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    update.session.set_holding_raw(update.asset, &update.raw);
    serde_json::to_string(&serde_json::json!({
        "session": update.session,
        "metrics": update.session.metrics(),
        "briefing": update.session.briefing(),
    }))
    .map_err(to_napi_error)
}
