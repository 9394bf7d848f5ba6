use rust_decimal::{Decimal, MathematicalOps};

use crate::error::MortgageError;
use crate::types::{Money, Rate};
use crate::MortgageResult;

/// Compute (1 + rate)^periods by repeated squaring.
///
/// Returns `None` when the factor leaves Decimal range.
pub fn compound_factor(rate: Rate, periods: u32) -> Option<Decimal> {
    (Decimal::ONE + rate).checked_powu(u64::from(periods))
}

/// Level payment that fully amortises `principal` over `periods` at
/// `periodic_rate` per period.
///
/// Evaluated as `P * r / (1 - (1+r)^-n)`, which equals the textbook
/// `P * r * (1+r)^n / ((1+r)^n - 1)` without the large intermediate product.
/// A zero rate falls back to straight-line repayment `P / n`.
pub fn level_payment(principal: Money, periodic_rate: Rate, periods: u32) -> MortgageResult<Money> {
    if periods == 0 {
        return Err(MortgageError::InvalidInput {
            field: "periods".into(),
            reason: "Number of periods must be > 0".into(),
        });
    }

    if periodic_rate.is_zero() {
        return Ok(principal / Decimal::from(periods));
    }

    // Past Decimal range the discount term is indistinguishable from zero.
    let discount = match compound_factor(periodic_rate, periods) {
        Some(factor) if !factor.is_zero() => Decimal::ONE / factor,
        Some(_) => {
            return Err(MortgageError::DivisionByZero {
                context: "level payment compound factor".into(),
            })
        }
        None => Decimal::ZERO,
    };

    let denom = Decimal::ONE - discount;
    if denom.is_zero() {
        return Err(MortgageError::DivisionByZero {
            context: "level payment annuity factor".into(),
        });
    }

    principal
        .checked_mul(periodic_rate)
        .map(|interest| interest / denom)
        .ok_or_else(|| MortgageError::overflow("level payment"))
}

/// Future value of a lump sum compounded once per period.
pub fn future_value(present_value: Money, rate: Rate, periods: u32) -> MortgageResult<Money> {
    compound_factor(rate, periods)
        .and_then(|factor| present_value.checked_mul(factor))
        .ok_or_else(|| MortgageError::overflow("future value"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_compound_factor_basic() {
        assert_eq!(compound_factor(dec!(0.10), 2), Some(dec!(1.21)));
        assert_eq!(compound_factor(dec!(0.05), 0), Some(Decimal::ONE));
    }

    #[test]
    fn test_compound_factor_overflow_is_none() {
        assert_eq!(compound_factor(dec!(9), 40), None);
    }

    #[test]
    fn test_compound_factor_long_horizon_is_cheap() {
        assert_eq!(compound_factor(Decimal::ZERO, u32::MAX), Some(Decimal::ONE));
        assert_eq!(compound_factor(dec!(-1), u32::MAX), Some(Decimal::ZERO));
    }

    #[test]
    fn test_compound_factor_matches_repeated_multiplication() {
        let mut expected = Decimal::ONE;
        for _ in 0..24 {
            expected *= dec!(1.005);
        }
        let diff = (compound_factor(dec!(0.005), 24).unwrap() - expected).abs();
        assert!(diff < dec!(0.000000000001));
    }

    #[test]
    fn test_level_payment_matches_textbook_formula() {
        // 100k at 1% per month over 12 months: 8884.88
        let pmt = level_payment(dec!(100_000), dec!(0.01), 12).unwrap();
        assert!((pmt - dec!(8884.88)).abs() < dec!(0.01));
    }

    #[test]
    fn test_level_payment_zero_rate() {
        let pmt = level_payment(dec!(1200), Decimal::ZERO, 12).unwrap();
        assert_eq!(pmt, dec!(100));
    }

    #[test]
    fn test_level_payment_huge_rate_degrades_to_interest_only() {
        let pmt = level_payment(dec!(1000), dec!(9), 480).unwrap();
        assert_eq!(pmt, dec!(9000));
    }

    #[test]
    fn test_level_payment_zero_periods_rejected() {
        assert!(level_payment(dec!(1000), dec!(0.01), 0).is_err());
    }

    #[test]
    fn test_future_value_compounds() {
        let fv = future_value(dec!(100_000), dec!(0.12), 1).unwrap();
        assert_eq!(fv, dec!(112_000));
    }

    #[test]
    fn test_future_value_overflow_is_error() {
        let err = future_value(dec!(1_000_000), dec!(99), 20).unwrap_err();
        assert!(matches!(err, MortgageError::NumericOverflow { .. }));
    }
}
