//! Equated monthly installment (EMI) for a fixed-rate amortising loan.
//!
//! Closed-form level payment with an explicit straight-line branch for
//! interest-free loans. All math in `rust_decimal::Decimal`.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::MortgageError;
use crate::time_value::level_payment;
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::MortgageResult;

/// Longest tenure accepted, in years.
pub const MAX_TENURE_YEARS: u32 = 100;

/// Annual rate above which a warning is attached (percent).
const HIGH_RATE_WARNING_PCT: Decimal = dec!(30);

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

/// Fixed-rate loan terms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    /// Amount borrowed.
    pub principal: Money,
    /// Annual interest rate in percent (e.g., 8.5 = 8.5%).
    pub annual_rate_pct: Decimal,
    /// Contracted tenure in whole years.
    pub tenure_years: u32,
}

impl LoanTerms {
    pub fn new(principal: Money, annual_rate_pct: Decimal, tenure_years: u32) -> Self {
        Self {
            principal,
            annual_rate_pct,
            tenure_years,
        }
    }

    /// Check the loan preconditions, naming the first offending field.
    pub fn validate(&self) -> MortgageResult<()> {
        if self.principal <= Decimal::ZERO {
            return Err(MortgageError::invalid(
                "principal",
                "Principal must be positive",
            ));
        }
        if self.annual_rate_pct < Decimal::ZERO {
            return Err(MortgageError::invalid(
                "annual_rate_pct",
                "Annual rate cannot be negative",
            ));
        }
        if self.tenure_years == 0 {
            return Err(MortgageError::invalid(
                "tenure_years",
                "Tenure must be at least one year",
            ));
        }
        if self.tenure_years > MAX_TENURE_YEARS {
            return Err(MortgageError::invalid(
                "tenure_years",
                "Tenure cannot exceed 100 years",
            ));
        }
        Ok(())
    }

    /// Tenure converted to months.
    pub fn total_months(&self) -> MortgageResult<u32> {
        self.tenure_years
            .checked_mul(12)
            .ok_or_else(|| MortgageError::invalid("tenure_years", "Tenure is too long"))
    }

    /// Monthly rate as a decimal fraction: `annual_rate_pct / 1200`.
    pub fn monthly_rate(&self) -> Rate {
        self.annual_rate_pct / dec!(1200)
    }

    /// Baseline installment for these terms. Assumes the terms are valid.
    pub(crate) fn installment(&self) -> MortgageResult<Money> {
        level_payment(self.principal, self.monthly_rate(), self.total_months()?)
    }
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// EMI breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmiResult {
    /// Level monthly installment.
    pub monthly_installment: Money,
    /// Interest paid over the full tenure.
    pub total_interest: Money,
    /// Installment times tenure in months.
    pub total_payment: Money,
    /// Amount borrowed.
    pub principal: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Compute the EMI breakdown for the given loan parameters.
pub fn compute_emi(
    principal: Money,
    annual_rate_pct: Decimal,
    tenure_years: u32,
) -> MortgageResult<EmiResult> {
    breakdown(&LoanTerms::new(principal, annual_rate_pct, tenure_years))
}

/// Compute the EMI breakdown wrapped in the standard output envelope.
pub fn calculate_emi(input: &LoanTerms) -> MortgageResult<ComputationOutput<EmiResult>> {
    let start = Instant::now();

    let result = breakdown(input)?;

    let mut warnings = Vec::new();
    if input.annual_rate_pct > HIGH_RATE_WARNING_PCT {
        warnings.push(format!(
            "Annual rate of {}% is unusually high for a mortgage",
            input.annual_rate_pct
        ));
    }

    let methodology = if input.annual_rate_pct.is_zero() {
        "Straight-line repayment (zero interest)"
    } else {
        "Level-payment amortisation (EMI)"
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(methodology, input, warnings, elapsed, result))
}

pub(crate) fn breakdown(loan: &LoanTerms) -> MortgageResult<EmiResult> {
    loan.validate()?;

    let months = Decimal::from(loan.total_months()?);
    let emi = loan.installment()?;

    // P / n does not always terminate in decimal; an interest-free loan
    // repays exactly the principal.
    let (total_payment, total_interest) = if loan.annual_rate_pct.is_zero() {
        (loan.principal, Decimal::ZERO)
    } else {
        let total = emi
            .checked_mul(months)
            .ok_or_else(|| MortgageError::overflow("EMI total payment"))?;
        (total, total - loan.principal)
    };

    log::debug!(
        "emi: principal={} rate={}% years={} installment={}",
        loan.principal,
        loan.annual_rate_pct,
        loan.tenure_years,
        emi
    );

    Ok(EmiResult {
        monthly_installment: emi,
        total_interest,
        total_payment,
        principal: loan.principal,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
