//! Buy-versus-rent comparison.
//!
//! Cumulative rent over the horizon against compound appreciation of the
//! property. Financing cost, taxes and the opportunity cost of the down
//! payment are not modelled.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::MortgageError;
use crate::time_value::future_value;
use crate::types::{with_metadata, ComputationOutput, Money};
use crate::MortgageResult;

const BUY_SUGGESTION: &str = "Buying is likely better due to property appreciation.";
const RENT_SUGGESTION: &str = "Renting might be more economical in this timeframe.";

/// Longest comparison horizon accepted, in years.
pub const MAX_HORIZON_YEARS: u32 = 100;

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentVsBuyInput {
    pub monthly_rent: Money,
    pub property_price: Money,
    /// Horizon in whole years.
    pub years: u32,
    /// Annual appreciation in percent; negative models depreciation.
    pub appreciation_rate_pct: Decimal,
}

impl RentVsBuyInput {
    pub fn validate(&self) -> MortgageResult<()> {
        if self.monthly_rent <= Decimal::ZERO {
            return Err(MortgageError::invalid(
                "monthly_rent",
                "Monthly rent must be positive",
            ));
        }
        if self.property_price <= Decimal::ZERO {
            return Err(MortgageError::invalid(
                "property_price",
                "Property price must be positive",
            ));
        }
        if self.years == 0 {
            return Err(MortgageError::invalid(
                "years",
                "Horizon must be at least one year",
            ));
        }
        if self.years > MAX_HORIZON_YEARS {
            return Err(MortgageError::invalid(
                "years",
                "Horizon cannot exceed 100 years",
            ));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Buy,
    Rent,
}

impl Verdict {
    pub fn suggestion(self) -> &'static str {
        match self {
            Verdict::Buy => BUY_SUGGESTION,
            Verdict::Rent => RENT_SUGGESTION,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentVsBuyResult {
    pub total_rent_paid: Money,
    pub future_value: Money,
    /// future_value - property_price - total_rent_paid; positive favours buying.
    pub net_gain_from_buying: Money,
    pub verdict: Verdict,
    pub suggestion: String,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

pub fn compare_rent_vs_buy(
    monthly_rent: Money,
    property_price: Money,
    years: u32,
    appreciation_rate_pct: Decimal,
) -> MortgageResult<RentVsBuyResult> {
    compute(&RentVsBuyInput {
        monthly_rent,
        property_price,
        years,
        appreciation_rate_pct,
    })
}

/// Rent-vs-buy comparison wrapped in the standard output envelope.
pub fn analyze_rent_vs_buy(
    input: &RentVsBuyInput,
) -> MortgageResult<ComputationOutput<RentVsBuyResult>> {
    let start = Instant::now();

    let result = compute(input)?;

    let mut warnings = Vec::new();
    if input.appreciation_rate_pct < dec!(-100) {
        warnings.push(format!(
            "Appreciation of {}% implies a negative property value",
            input.appreciation_rate_pct
        ));
    }

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Cumulative rent vs compound property appreciation",
        input,
        warnings,
        elapsed,
        result,
    ))
}

fn compute(input: &RentVsBuyInput) -> MortgageResult<RentVsBuyResult> {
    input.validate()?;

    let total_rent_paid = input
        .monthly_rent
        .checked_mul(Decimal::from(12u64 * u64::from(input.years)))
        .ok_or_else(|| MortgageError::overflow("total rent paid"))?;

    let growth = input.appreciation_rate_pct / dec!(100);
    let future_value = future_value(input.property_price, growth, input.years)?;

    let net_gain_from_buying = future_value
        .checked_sub(input.property_price)
        .and_then(|gain| gain.checked_sub(total_rent_paid))
        .ok_or_else(|| MortgageError::overflow("net gain from buying"))?;
    // Ties go to renting.
    let verdict = if net_gain_from_buying > Decimal::ZERO {
        Verdict::Buy
    } else {
        Verdict::Rent
    };

    log::debug!(
        "rent_vs_buy: rent_paid={} future_value={} verdict={:?}",
        total_rent_paid,
        future_value,
        verdict
    );

    Ok(RentVsBuyResult {
        total_rent_paid,
        future_value,
        net_gain_from_buying,
        verdict,
        suggestion: verdict.suggestion().to_string(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
