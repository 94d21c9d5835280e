use chrono::NaiveDate;
use napi::Result as NapiResult;
use napi_derive::napi;
use serde::Serialize;

use amortization_core::calendar;
use amortization_core::scenarios::{self, ScenarioSetInput};
use amortization_core::schedule::{self, LoanParameters, Schedule};
use amortization_core::Money;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Schedules
// ---------------------------------------------------------------------------

#[napi]
pub fn build_schedule(input_json: String) -> NapiResult<String> {
    let input: LoanParameters = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = schedule::analyze_loan(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn annual_interest(input_json: String) -> NapiResult<String> {
    let input: LoanParameters = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = schedule::analyze_annual_interest(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Group an already-built schedule (a JSON array of periods) by calendar year.
#[napi]
pub fn group_interest_by_year(schedule_json: String) -> NapiResult<String> {
    let input: Schedule = serde_json::from_str(&schedule_json).map_err(to_napi_error)?;
    let output = schedule::group_interest_by_year(&input);
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[derive(Serialize)]
struct LevelPaymentOutput {
    payment: Money,
}

#[napi]
pub fn level_payment(input_json: String) -> NapiResult<String> {
    let input: LoanParameters = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let payment = schedule::level_payment(&input).map_err(to_napi_error)?;
    serde_json::to_string(&LevelPaymentOutput { payment }).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[napi]
pub fn analyze_scenarios(input_json: String) -> NapiResult<String> {
    let input: ScenarioSetInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = scenarios::analyze_scenarios(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// The built-in scenarios, starting on `start_date` (YYYY-MM-DD) or the
/// first of next month.
#[napi]
pub fn default_scenarios(start_date: Option<String>) -> NapiResult<String> {
    let start = match start_date {
        Some(s) => s.parse::<NaiveDate>().map_err(to_napi_error)?,
        None => calendar::default_start_date(),
    };
    serde_json::to_string(&scenarios::default_scenarios(start)).map_err(to_napi_error)
}
