use std::str::FromStr;

use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;

use mortgage_pro_core::api::{self, ApiError};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn parse_decimal(field: &str, raw: &str) -> NapiResult<Decimal> {
    Decimal::from_str(raw.trim())
        .map_err(|e| to_napi_error(format!("{field}: {e}")))
}

// ---------------------------------------------------------------------------
// Engine (typed JSON in, computation envelope out)
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_emi(input_json: String) -> NapiResult<String> {
    let input: mortgage_pro_core::amortization::emi::LoanTerms =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        mortgage_pro_core::amortization::emi::calculate_emi(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn analyze_prepayment(input_json: String) -> NapiResult<String> {
    let input: mortgage_pro_core::amortization::prepayment::PrepaymentInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = mortgage_pro_core::amortization::prepayment::analyze_prepayment(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn amortization_schedule(input_json: String) -> NapiResult<String> {
    let input: mortgage_pro_core::amortization::prepayment::PrepaymentInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        mortgage_pro_core::amortization::schedule::build_schedule(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn analyze_rent_vs_buy(input_json: String) -> NapiResult<String> {
    let input: mortgage_pro_core::property::rent_vs_buy::RentVsBuyInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = mortgage_pro_core::property::rent_vs_buy::analyze_rent_vs_buy(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Monthly installment only, as a two-decimal string.
#[napi]
pub fn monthly_installment(
    principal: String,
    annual_rate_pct: String,
    tenure_years: u32,
) -> NapiResult<String> {
    let result = mortgage_pro_core::amortization::emi::compute_emi(
        parse_decimal("principal", &principal)?,
        parse_decimal("annual_rate_pct", &annual_rate_pct)?,
        tenure_years,
    )
    .map_err(to_napi_error)?;
    Ok(mortgage_pro_core::format_cents(result.monthly_installment))
}

#[napi]
pub fn classify_intent(text: String) -> NapiResult<String> {
    let reply = mortgage_pro_core::advisor::classify_intent(&text);
    serde_json::to_string(&reply).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Request boundary (form-style body in, status + JSON body out)
// ---------------------------------------------------------------------------

/// Status code and JSON body for the host's HTTP layer to send as-is.
#[napi(object)]
pub struct ApiReply {
    pub status: u32,
    pub body: String,
}

fn reply(result: Result<String, ApiError>) -> ApiReply {
    match result {
        Ok(body) => ApiReply { status: 200, body },
        Err(err) => ApiReply {
            status: u32::from(err.status),
            body: err.to_body(),
        },
    }
}

/// Dispatch a request body to the route it was posted to
/// (`calculate-emi`, `prepayment`, `buy-vs-rent`, `advisor`).
#[napi]
pub fn handle_request(route: String, body: String) -> ApiReply {
    let path = route.trim_start_matches('/');
    let path = path.strip_prefix("api/").unwrap_or(path);
    let result = match path {
        "calculate-emi" => api::handle_json(&body, api::handle_emi),
        "prepayment" => api::handle_json(&body, api::handle_prepayment),
        "buy-vs-rent" => api::handle_json(&body, api::handle_rent_vs_buy),
        "advisor" => api::handle_json(&body, api::handle_advisor),
        other => Err(ApiError {
            status: 404,
            error: format!("Unknown route: {other}"),
            field: None,
        }),
    };
    reply(result)
}

