#![cfg(feature = "amortization")]

use mortgage_pro_core::amortization::emi::{self, LoanTerms};
use mortgage_pro_core::amortization::prepayment::{self, PrepaymentInput};
use mortgage_pro_core::amortization::schedule;
use mortgage_pro_core::{round_cents, MortgageError};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// EMI tests
// ===========================================================================

fn reference_loan() -> LoanTerms {
    // 500k over 20 years at 8%
    LoanTerms::new(dec!(500_000), dec!(8), 20)
}

#[test]
fn test_emi_reference_loan_to_the_cent() {
    let out = emi::calculate_emi(&reference_loan()).unwrap();
    let r = &out.result;

    assert_eq!(round_cents(r.monthly_installment), dec!(4182.20));
    assert_eq!(round_cents(r.total_payment), dec!(1_003_728.08));
    assert_eq!(round_cents(r.total_interest), dec!(503_728.08));
    assert_eq!(r.principal, dec!(500_000));
}

#[test]
fn test_emi_relative_identity_across_grid() {
    for principal in [dec!(50_000), dec!(425_000), dec!(2_000_000)] {
        for rate in [dec!(0), dec!(3.75), dec!(8.5), dec!(14)] {
            for years in [1u32, 10, 30] {
                let r = emi::compute_emi(principal, rate, years).unwrap();
                let expected = r.monthly_installment * Decimal::from(years * 12);
                let rel = ((r.total_payment - expected) / expected).abs();
                assert!(rel < dec!(0.000001), "identity broken for {principal} {rate} {years}");
                assert!(r.total_interest >= Decimal::ZERO);
            }
        }
    }
}

#[test]
fn test_emi_zero_rate_invariant() {
    let r = emi::compute_emi(dec!(90_000), Decimal::ZERO, 15).unwrap();
    assert_eq!(r.total_interest, Decimal::ZERO);
    assert_eq!(r.monthly_installment, dec!(90_000) / dec!(180));
}

#[test]
fn test_emi_invalid_input_names_field() {
    let err = emi::compute_emi(dec!(100), dec!(5), 0).unwrap_err();
    assert!(matches!(
        err,
        MortgageError::InvalidInput { ref field, .. } if field == "tenure_years"
    ));
}

// ===========================================================================
// Prepayment tests
// ===========================================================================

#[test]
fn test_prepayment_reference_scenario() {
    let input = PrepaymentInput {
        loan: reference_loan(),
        extra_monthly_payment: dec!(1000),
    };
    let out = prepayment::analyze_prepayment(&input).unwrap();
    let r = &out.result;

    assert!(r.new_tenure_months < 240);
    assert!(r.interest_savings > Decimal::ZERO);
    assert_eq!(r.reduced_tenure_months, 240 - r.new_tenure_months);
    assert_eq!(r.interest_savings, r.original_total_interest - r.new_total_interest);
    assert!(out.warnings.is_empty());
}

#[test]
fn test_prepayment_zero_extra_boundary() {
    let r = prepayment::simulate_prepayment(&reference_loan(), Decimal::ZERO).unwrap();
    assert_eq!(r.new_tenure_months, 240);
    assert!(r.interest_savings.abs() < dec!(0.01));
    assert_eq!(r.did_not_fully_amortize, false);
}

#[test]
fn test_prepayment_monotone_over_fine_grid() {
    let loan = LoanTerms::new(dec!(350_000), dec!(6.25), 30);
    let mut last_months = u32::MAX;
    let mut last_savings = Decimal::MIN;

    let mut extra = dec!(50);
    while extra <= dec!(3000) {
        let r = prepayment::simulate_prepayment(&loan, extra).unwrap();
        assert!(r.new_tenure_months <= last_months);
        assert!(r.interest_savings >= last_savings);
        last_months = r.new_tenure_months;
        last_savings = r.interest_savings;
        extra += dec!(50);
    }
}

#[test]
fn test_schedule_agrees_with_prepayment_summary() {
    let input = PrepaymentInput {
        loan: LoanTerms::new(dec!(80_000), dec!(9), 10),
        extra_monthly_payment: dec!(250),
    };
    let sched = schedule::build_schedule(&input).unwrap().result;
    let summary = prepayment::simulate_prepayment(&input.loan, dec!(250)).unwrap();

    assert_eq!(sched.rows.len() as u32, summary.new_tenure_months);
    assert_eq!(sched.total_interest, summary.new_total_interest);
    assert_eq!(sched.did_not_fully_amortize, summary.did_not_fully_amortize);
}

#[test]
fn test_non_amortising_loan_reported_through_public_api() {
    let input = PrepaymentInput {
        loan: LoanTerms::new(dec!(100_000), dec!(1000), 20),
        extra_monthly_payment: dec!(0),
    };
    let out = prepayment::analyze_prepayment(&input).unwrap();
    let r = &out.result;

    assert!(r.did_not_fully_amortize);
    assert_eq!(r.new_tenure_months, 240);
    assert_eq!(r.residual_balance, dec!(100_000));
    assert!(out.warnings[0].starts_with("Loan did not fully amortise within 240 months"));

    let sched = schedule::build_schedule(&input).unwrap().result;
    assert!(sched.did_not_fully_amortize);
    assert_eq!(sched.rows.len(), 240);
}
