//! Month-by-month amortisation schedule, with or without prepayment.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::emi::breakdown;
use super::prepayment::{amortise, PrepaymentInput};
use crate::error::MortgageError;
use crate::types::{with_metadata, ComputationOutput, Money};
use crate::MortgageResult;

/// One simulated month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRow {
    /// 1-based month number.
    pub month: u32,
    /// Cash paid this month (interest + principal actually applied).
    pub payment: Money,
    pub interest: Money,
    pub principal_paid: Money,
    pub closing_balance: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleOutput {
    pub monthly_installment: Money,
    pub extra_monthly_payment: Money,
    pub rows: Vec<ScheduleRow>,
    pub total_interest: Money,
    pub total_paid: Money,
    pub did_not_fully_amortize: bool,
}

/// Build the full schedule for the loan, applying any extra payment.
pub fn build_schedule(input: &PrepaymentInput) -> MortgageResult<ComputationOutput<ScheduleOutput>> {
    let start = Instant::now();
    input.validate()?;

    let loan = &input.loan;
    let total_months = loan.total_months()?;
    let emi = breakdown(loan)?.monthly_installment;

    let mut rows = Vec::new();
    let payment = emi
        .checked_add(input.extra_monthly_payment)
        .ok_or_else(|| MortgageError::overflow("monthly payment"))?;
    let run = amortise(
        loan.principal,
        loan.monthly_rate(),
        payment,
        total_months,
        |row| rows.push(row),
    )?;

    let total_paid = rows
        .iter()
        .try_fold(Decimal::ZERO, |acc, r| acc.checked_add(r.payment))
        .ok_or_else(|| MortgageError::overflow("schedule total paid"))?;

    let mut warnings = Vec::new();
    if !run.fully_amortised() {
        warnings.push(format!(
            "Balance of {} remains after the final scheduled month",
            run.balance.round_dp(2)
        ));
    }

    let output = ScheduleOutput {
        monthly_installment: emi,
        extra_monthly_payment: input.extra_monthly_payment,
        rows,
        total_interest: run.total_interest,
        total_paid,
        did_not_fully_amortize: !run.fully_amortised(),
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Amortisation schedule",
        input,
        warnings,
        elapsed,
        output,
    ))
}
