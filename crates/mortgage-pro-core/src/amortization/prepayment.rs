//! Extra-principal prepayment simulation.
//!
//! Replays the loan month by month with a constant extra payment on top of
//! the baseline EMI and reports the revised payoff month and interest total.
//! The loop is bounded by the contracted tenure; a balance still outstanding
//! at that point is reported through `did_not_fully_amortize`.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::emi::{breakdown, LoanTerms};
use super::schedule::ScheduleRow;
use crate::error::MortgageError;
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::MortgageResult;

/// Minimum balance threshold below which the loan is considered fully paid.
pub const BALANCE_EPSILON: Decimal = dec!(0.01);

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

/// Loan terms plus a constant extra monthly payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrepaymentInput {
    pub loan: LoanTerms,
    /// Paid every month on top of the EMI; zero means no prepayment.
    pub extra_monthly_payment: Money,
}

impl PrepaymentInput {
    pub fn validate(&self) -> MortgageResult<()> {
        self.loan.validate()?;
        if self.extra_monthly_payment < Decimal::ZERO {
            return Err(MortgageError::invalid(
                "extra_monthly_payment",
                "Extra monthly payment cannot be negative",
            ));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrepaymentResult {
    /// Baseline EMI used for the simulation.
    pub monthly_installment: Money,
    /// Interest over the contracted tenure without prepayment.
    pub original_total_interest: Money,
    /// Interest actually accrued with the extra payment applied.
    pub new_total_interest: Money,
    /// original - new.
    pub interest_savings: Money,
    /// Months until the balance reached zero (or the tenure cap).
    pub new_tenure_months: u32,
    /// Contracted months minus `new_tenure_months`.
    pub reduced_tenure_months: u32,
    /// True when the tenure cap was hit with balance above `BALANCE_EPSILON`.
    pub did_not_fully_amortize: bool,
    /// Balance left when the simulation stopped.
    pub residual_balance: Money,
}

/// Totals from a bounded month-by-month amortisation run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Amortised {
    pub months: u32,
    pub total_interest: Money,
    pub balance: Money,
}

impl Amortised {
    pub fn fully_amortised(&self) -> bool {
        self.balance <= BALANCE_EPSILON
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Simulate the loan with `extra_monthly_payment` added to every installment.
pub fn simulate_prepayment(
    loan: &LoanTerms,
    extra_monthly_payment: Money,
) -> MortgageResult<PrepaymentResult> {
    compute(&PrepaymentInput {
        loan: loan.clone(),
        extra_monthly_payment,
    })
}

/// Prepayment analysis wrapped in the standard output envelope.
pub fn analyze_prepayment(
    input: &PrepaymentInput,
) -> MortgageResult<ComputationOutput<PrepaymentResult>> {
    let start = Instant::now();

    let result = compute(input)?;

    let mut warnings = Vec::new();
    if result.did_not_fully_amortize {
        warnings.push(format!(
            "Loan did not fully amortise within {} months; residual balance {}",
            result.new_tenure_months,
            result.residual_balance.round_dp(2)
        ));
    }
    if input.extra_monthly_payment.is_zero() {
        warnings.push("No extra payment supplied; schedule matches the baseline".into());
    }

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Month-by-month amortisation with constant extra principal",
        input,
        warnings,
        elapsed,
        result,
    ))
}

fn compute(input: &PrepaymentInput) -> MortgageResult<PrepaymentResult> {
    input.validate()?;

    let loan = &input.loan;
    let total_months = loan.total_months()?;
    let baseline = breakdown(loan)?;
    let emi = baseline.monthly_installment;
    let payment = emi
        .checked_add(input.extra_monthly_payment)
        .ok_or_else(|| MortgageError::overflow("monthly payment"))?;

    let run = amortise(loan.principal, loan.monthly_rate(), payment, total_months, |_| {})?;

    let original_total_interest = baseline.total_interest;

    let did_not_fully_amortize = !run.fully_amortised();
    if did_not_fully_amortize {
        log::warn!(
            "prepayment: balance {} outstanding after {} months",
            run.balance,
            run.months
        );
    }
    log::debug!(
        "prepayment: extra={} payoff_month={} of {}",
        input.extra_monthly_payment,
        run.months,
        total_months
    );

    Ok(PrepaymentResult {
        monthly_installment: emi,
        original_total_interest,
        new_total_interest: run.total_interest,
        interest_savings: original_total_interest - run.total_interest,
        new_tenure_months: run.months,
        reduced_tenure_months: total_months - run.months,
        did_not_fully_amortize,
        residual_balance: run.balance,
    })
}

/// Apply `payment` every month against `principal` for at most `max_months`,
/// handing each month's row to `visit`.
///
/// Stops once the balance reaches zero. The final partial month pays only
/// what is owed; the balance is clamped at zero.
pub(crate) fn amortise(
    principal: Money,
    monthly_rate: Rate,
    payment: Money,
    max_months: u32,
    mut visit: impl FnMut(ScheduleRow),
) -> MortgageResult<Amortised> {
    let mut balance = principal;
    let mut total_interest = Decimal::ZERO;
    let mut months = 0u32;

    while balance > Decimal::ZERO && months < max_months {
        let interest = balance
            .checked_mul(monthly_rate)
            .ok_or_else(|| MortgageError::overflow("monthly interest"))?;
        total_interest = total_interest
            .checked_add(interest)
            .ok_or_else(|| MortgageError::overflow("cumulative interest"))?;

        let principal_paid = payment - interest;
        let opening = balance;
        balance = balance
            .checked_sub(principal_paid)
            .ok_or_else(|| MortgageError::overflow("outstanding balance"))?;
        if balance < Decimal::ZERO {
            balance = Decimal::ZERO;
        }
        months += 1;

        let applied = opening - balance;
        visit(ScheduleRow {
            month: months,
            payment: interest + applied,
            interest,
            principal_paid: applied,
            closing_balance: balance,
        });
    }

    Ok(Amortised {
        months,
        total_interest,
        balance,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const TOL: Decimal = dec!(0.01);

    fn assert_close(actual: Decimal, expected: Decimal, tol: Decimal, msg: &str) {
        let diff = (actual - expected).abs();
        assert!(
            diff <= tol,
            "{}: expected ~{}, got {} (diff = {})",
            msg,
            expected,
            actual,
            diff
        );
    }

    fn standard_loan() -> LoanTerms {
        LoanTerms::new(dec!(500_000), dec!(8), 20)
    }

    #[test]
    fn test_extra_1000_shortens_loan() {
        let r = simulate_prepayment(&standard_loan(), dec!(1000)).unwrap();
        assert_eq!(r.new_tenure_months, 156);
        assert_eq!(r.reduced_tenure_months, 84);
        assert!(r.interest_savings > Decimal::ZERO);
        assert_close(r.interest_savings, dec!(199_898.33), TOL, "savings");
        assert_close(r.original_total_interest, dec!(503_728.08), TOL, "original");
        assert!(!r.did_not_fully_amortize);
        assert_eq!(r.residual_balance, Decimal::ZERO);
    }

    #[test]
    fn test_zero_extra_runs_full_tenure() {
        let r = simulate_prepayment(&standard_loan(), Decimal::ZERO).unwrap();
        assert_eq!(r.new_tenure_months, 240);
        assert_eq!(r.reduced_tenure_months, 0);
        assert_close(r.interest_savings, Decimal::ZERO, TOL, "savings");
        assert!(!r.did_not_fully_amortize);
        assert!(r.residual_balance <= BALANCE_EPSILON);
    }

    #[test]
    fn test_savings_and_tenure_monotone_in_extra() {
        let extras = [dec!(100), dec!(500), dec!(1000), dec!(2000), dec!(5000), dec!(20000)];
        let results: Vec<PrepaymentResult> = extras
            .iter()
            .map(|e| simulate_prepayment(&standard_loan(), *e).unwrap())
            .collect();

        for pair in results.windows(2) {
            assert!(pair[1].new_tenure_months <= pair[0].new_tenure_months);
            assert!(pair[1].interest_savings >= pair[0].interest_savings);
        }
        for r in &results {
            assert!(r.new_tenure_months <= 240);
            assert!(r.interest_savings >= Decimal::ZERO);
        }
    }

    #[test]
    fn test_extra_exceeding_principal_pays_off_in_one_month() {
        let loan = LoanTerms::new(dec!(10_000), dec!(12), 5);
        let r = simulate_prepayment(&loan, dec!(50_000)).unwrap();
        assert_eq!(r.new_tenure_months, 1);
        // One month of interest at 1%.
        assert_eq!(r.new_total_interest, dec!(100));
        assert_eq!(r.reduced_tenure_months, 59);
    }

    #[test]
    fn test_zero_rate_with_extra_halves_tenure() {
        let loan = LoanTerms::new(dec!(120_000), Decimal::ZERO, 10);
        let r = simulate_prepayment(&loan, dec!(1000)).unwrap();
        assert_eq!(r.new_tenure_months, 60);
        assert_eq!(r.new_total_interest, Decimal::ZERO);
        assert_eq!(r.interest_savings, Decimal::ZERO);
        assert!(!r.did_not_fully_amortize);
    }

    #[test]
    fn test_zero_rate_without_extra_clears_balance() {
        let loan = LoanTerms::new(dec!(100_000), Decimal::ZERO, 30);
        let r = simulate_prepayment(&loan, Decimal::ZERO).unwrap();
        assert_eq!(r.new_tenure_months, 360);
        assert!(!r.did_not_fully_amortize);
    }

    #[test]
    fn test_interest_only_installment_is_flagged() {
        // (1 + 1000/1200)^240 leaves Decimal range; the EMI degrades to P * r.
        let loan = LoanTerms::new(dec!(100_000), dec!(1000), 20);
        let r = simulate_prepayment(&loan, Decimal::ZERO).unwrap();
        assert_eq!(r.new_tenure_months, 240);
        assert_eq!(r.reduced_tenure_months, 0);
        assert!(r.did_not_fully_amortize);
        assert_eq!(r.residual_balance, dec!(100_000));
    }

    #[test]
    fn test_envelope_warns_when_not_amortised() {
        let input = PrepaymentInput {
            loan: LoanTerms::new(dec!(100_000), dec!(1000), 20),
            extra_monthly_payment: Decimal::ZERO,
        };
        let out = analyze_prepayment(&input).unwrap();
        assert!(out.result.did_not_fully_amortize);
        assert!(out
            .warnings
            .iter()
            .any(|w| w.contains("did not fully amortise") && w.contains("100000")));
    }

    #[test]
    fn test_payment_below_interest_is_flagged_not_looped() {
        // 1% monthly interest on 1000 is 10; paying 5 grows the balance.
        let run = amortise(dec!(1000), dec!(0.01), dec!(5), 12, |_| {}).unwrap();
        assert_eq!(run.months, 12);
        assert!(run.balance > dec!(1000));
        assert!(!run.fully_amortised());
    }

    #[test]
    fn test_payment_equal_to_interest_never_reduces_balance() {
        let run = amortise(dec!(1000), dec!(0.01), dec!(10), 24, |_| {}).unwrap();
        assert_eq!(run.months, 24);
        assert_eq!(run.balance, dec!(1000));
        assert_eq!(run.total_interest, dec!(240));
        assert!(!run.fully_amortised());
    }

    #[test]
    fn test_amortise_visits_every_month() {
        let mut rows = Vec::new();
        let run = amortise(dec!(1000), Decimal::ZERO, dec!(300), 12, |row| rows.push(row)).unwrap();
        assert_eq!(run.months, 4);
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[3].principal_paid, dec!(100));
        assert_eq!(rows[3].closing_balance, Decimal::ZERO);
    }

    #[test]
    fn test_validation_negative_extra() {
        let err = simulate_prepayment(&standard_loan(), dec!(-1)).unwrap_err();
        match err {
            MortgageError::InvalidInput { field, .. } => {
                assert_eq!(field, "extra_monthly_payment")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_validation_propagates_loan_errors() {
        let loan = LoanTerms::new(dec!(-5), dec!(8), 20);
        assert!(simulate_prepayment(&loan, dec!(100)).is_err());
    }

    #[test]
    fn test_envelope_warns_on_zero_extra() {
        let input = PrepaymentInput {
            loan: standard_loan(),
            extra_monthly_payment: Decimal::ZERO,
        };
        let out = analyze_prepayment(&input).unwrap();
        assert_eq!(out.warnings.len(), 1);
        assert_eq!(out.metadata.precision, "rust_decimal_128bit");
    }
}
