//! Request/response boundary shared by the CLI and the Node bindings.
//!
//! Requests arrive as loosely-typed JSON (numbers or numeric strings, field
//! names as the web form posts them). They are coerced into engine inputs
//! here, so the engine only ever sees typed values. Responses carry currency
//! figures as two-decimal strings.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;

use crate::advisor::{classify_intent, AdvisorReply};
use crate::amortization::emi::{compute_emi, LoanTerms, MAX_TENURE_YEARS};
use crate::amortization::prepayment::simulate_prepayment;
use crate::error::MortgageError;
use crate::property::rent_vs_buy::{compare_rent_vs_buy, Verdict, MAX_HORIZON_YEARS};
use crate::types::format_cents;
use crate::MortgageResult;

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmiRequest {
    pub loan_amount: Option<Value>,
    pub interest_rate: Option<Value>,
    pub tenure_years: Option<Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrepaymentRequest {
    pub loan_amount: Option<Value>,
    pub interest_rate: Option<Value>,
    pub tenure_years: Option<Value>,
    pub extra_monthly: Option<Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RentVsBuyRequest {
    pub monthly_rent: Option<Value>,
    pub property_price: Option<Value>,
    pub years: Option<Value>,
    pub appreciation: Option<Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdvisorRequest {
    pub message: Option<String>,
}

impl EmiRequest {
    pub fn loan_terms(&self) -> MortgageResult<LoanTerms> {
        Ok(LoanTerms::new(
            decimal_field("loanAmount", &self.loan_amount)?,
            decimal_field("interestRate", &self.interest_rate)?,
            years_field("tenureYears", &self.tenure_years, MAX_TENURE_YEARS)?,
        ))
    }
}

impl PrepaymentRequest {
    pub fn loan_terms(&self) -> MortgageResult<LoanTerms> {
        Ok(LoanTerms::new(
            decimal_field("loanAmount", &self.loan_amount)?,
            decimal_field("interestRate", &self.interest_rate)?,
            years_field("tenureYears", &self.tenure_years, MAX_TENURE_YEARS)?,
        ))
    }

    pub fn extra_monthly(&self) -> MortgageResult<Decimal> {
        decimal_field("extraMonthly", &self.extra_monthly)
    }
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmiResponse {
    pub monthly_installment: String,
    pub total_interest: String,
    pub total_payment: String,
    pub principal: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrepaymentResponse {
    pub original_total_interest: String,
    pub new_total_interest: String,
    pub interest_savings: String,
    pub new_tenure_months: u32,
    pub reduced_tenure_months: u32,
    pub did_not_fully_amortize: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RentVsBuyResponse {
    pub total_rent_paid: String,
    pub future_value: String,
    pub net_gain_from_buying: String,
    pub verdict: Verdict,
    pub suggestion: String,
}

/// Client-facing error. Every engine failure is the caller's to fix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub status: u16,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl From<MortgageError> for ApiError {
    fn from(e: MortgageError) -> Self {
        let field = match &e {
            MortgageError::InvalidInput { field, .. } => Some(field.clone()),
            _ => None,
        };
        ApiError {
            status: 400,
            error: e.to_string(),
            field,
        }
    }
}

impl ApiError {
    /// JSON body for the transport layer. Falls back to a bare `error` object.
    pub fn to_body(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|_| serde_json::json!({ "error": self.error }).to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.error, self.status)
    }
}

impl std::error::Error for ApiError {}

pub type ApiResult<T> = Result<T, ApiError>;

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

pub fn handle_emi(req: &EmiRequest) -> ApiResult<EmiResponse> {
    let terms = req.loan_terms()?;
    let r = compute_emi(terms.principal, terms.annual_rate_pct, terms.tenure_years)?;
    Ok(EmiResponse {
        monthly_installment: format_cents(r.monthly_installment),
        total_interest: format_cents(r.total_interest),
        total_payment: format_cents(r.total_payment),
        principal: format_cents(r.principal),
    })
}

pub fn handle_prepayment(req: &PrepaymentRequest) -> ApiResult<PrepaymentResponse> {
    let terms = req.loan_terms()?;
    let extra = req.extra_monthly()?;
    let r = simulate_prepayment(&terms, extra)?;
    Ok(PrepaymentResponse {
        original_total_interest: format_cents(r.original_total_interest),
        new_total_interest: format_cents(r.new_total_interest),
        interest_savings: format_cents(r.interest_savings),
        new_tenure_months: r.new_tenure_months,
        reduced_tenure_months: r.reduced_tenure_months,
        did_not_fully_amortize: r.did_not_fully_amortize,
    })
}

pub fn handle_rent_vs_buy(req: &RentVsBuyRequest) -> ApiResult<RentVsBuyResponse> {
    let r = compare_rent_vs_buy(
        decimal_field("monthlyRent", &req.monthly_rent)?,
        decimal_field("propertyPrice", &req.property_price)?,
        years_field("years", &req.years, MAX_HORIZON_YEARS)?,
        decimal_field("appreciation", &req.appreciation)?,
    )?;
    Ok(RentVsBuyResponse {
        total_rent_paid: format_cents(r.total_rent_paid),
        future_value: format_cents(r.future_value),
        net_gain_from_buying: format_cents(r.net_gain_from_buying),
        verdict: r.verdict,
        suggestion: r.suggestion,
    })
}

pub fn handle_advisor(req: &AdvisorRequest) -> ApiResult<AdvisorReply> {
    let message = req
        .message
        .as_deref()
        .ok_or_else(|| MortgageError::invalid("message", "missing required field"))?;
    Ok(classify_intent(message))
}

/// Parse a raw JSON body, run `handler`, and serialise its response.
pub fn handle_json<Req, Resp>(
    body: &str,
    handler: impl FnOnce(&Req) -> ApiResult<Resp>,
) -> ApiResult<String>
where
    Req: DeserializeOwned,
    Resp: Serialize,
{
    let req: Req = serde_json::from_str(body).map_err(|e| ApiError {
        status: 400,
        error: format!("Malformed request body: {e}"),
        field: None,
    })?;
    let resp = handler(&req)?;
    serde_json::to_string(&resp).map_err(|e| ApiError::from(MortgageError::from(e)))
}

// ---------------------------------------------------------------------------
// Field coercion
// ---------------------------------------------------------------------------

fn missing(field: &str) -> MortgageError {
    MortgageError::invalid(field, "missing required field")
}

/// Coerce a JSON number or numeric string into a Decimal.
pub fn decimal_field(field: &str, value: &Option<Value>) -> MortgageResult<Decimal> {
    let text = match value {
        None | Some(Value::Null) => return Err(missing(field)),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::String(s)) if s.trim().is_empty() => return Err(missing(field)),
        Some(Value::String(s)) => s.trim().to_string(),
        Some(_) => return Err(MortgageError::invalid(field, "not a number")),
    };
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|_| MortgageError::invalid(field, "not a number"))
}

/// Coerce into a whole count, truncating any fractional part.
pub fn whole_field(field: &str, value: &Option<Value>) -> MortgageResult<u32> {
    decimal_field(field, value)?
        .trunc()
        .to_u32()
        .ok_or_else(|| MortgageError::invalid(field, "not a valid whole number"))
}

/// Whole number of years, at most `max`.
fn years_field(field: &str, value: &Option<Value>, max: u32) -> MortgageResult<u32> {
    let years = whole_field(field, value)?;
    if years > max {
        return Err(MortgageError::invalid(
            field,
            &format!("cannot exceed {max} years"),
        ));
    }
    Ok(years)
}
