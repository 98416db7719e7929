use napi::Result as NapiResult;
use napi_derive::napi;

use mortgage_budget_core::amortization::{self, LoanTerms};
use mortgage_budget_core::budget::{self, BudgetConfig};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Amortization
// ---------------------------------------------------------------------------

/// `{"principal", "annual_rate", "term_years"}` in, payment envelope out.
#[napi]
pub fn amortize(input_json: String) -> NapiResult<String> {
    let terms: LoanTerms = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = amortization::calculate_payment(&terms).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Budget
// ---------------------------------------------------------------------------

/// Any subset of the budget options in, budget summary envelope out.
/// Missing options take their defaults; `"{}"` gives the default budget.
#[napi]
pub fn budget_summary(input_json: String) -> NapiResult<String> {
    let config: BudgetConfig = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = budget::calculate_budget(&config).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// The default budget options, for seeding a form.
#[napi]
pub fn default_budget_config() -> NapiResult<String> {
    serde_json::to_string(&BudgetConfig::default()).map_err(to_napi_error)
}
