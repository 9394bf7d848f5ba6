use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use mortgage_pro_core::amortization::emi::{self, LoanTerms};
use mortgage_pro_core::amortization::prepayment::{self, PrepaymentInput};
use mortgage_pro_core::amortization::schedule;

use crate::input;

/// Loan flags shared by every amortisation command
#[derive(Args)]
pub struct LoanArgs {
    /// Amount borrowed
    #[arg(long, alias = "loan-amount")]
    pub principal: Option<Decimal>,

    /// Annual interest rate in percent (e.g. 8.5 for 8.5%)
    #[arg(long, alias = "interest-rate")]
    pub rate: Option<Decimal>,

    /// Tenure in whole years
    #[arg(long, alias = "tenure-years")]
    pub years: Option<u32>,
}

impl LoanArgs {
    fn terms(&self) -> Result<LoanTerms, Box<dyn std::error::Error>> {
        Ok(LoanTerms::new(
            self.principal
                .ok_or("--principal is required (or provide --input)")?,
            self.rate.ok_or("--rate is required (or provide --input)")?,
            self.years.ok_or("--years is required (or provide --input)")?,
        ))
    }
}

/// Arguments for the EMI calculation
#[derive(Args)]
pub struct EmiArgs {
    #[command(flatten)]
    pub loan: LoanArgs,

    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for prepayment analysis and schedules
#[derive(Args)]
pub struct PrepaymentArgs {
    #[command(flatten)]
    pub loan: LoanArgs,

    /// Extra amount paid every month on top of the EMI
    #[arg(long, alias = "extra-monthly", default_value = "0")]
    pub extra: Decimal,

    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

impl PrepaymentArgs {
    fn resolve(&self) -> Result<PrepaymentInput, Box<dyn std::error::Error>> {
        match input::read_input(self.input.as_deref())? {
            Some(parsed) => Ok(parsed),
            None => Ok(PrepaymentInput {
                loan: self.loan.terms()?,
                extra_monthly_payment: self.extra,
            }),
        }
    }
}

pub fn run_emi(args: EmiArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loan: LoanTerms = match input::read_input(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => args.loan.terms()?,
    };
    let result = emi::calculate_emi(&loan)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_prepayment(args: PrepaymentArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let pp_input = args.resolve()?;
    let result = prepayment::analyze_prepayment(&pp_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_schedule(args: PrepaymentArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let pp_input = args.resolve()?;
    let result = schedule::build_schedule(&pp_input)?;
    Ok(serde_json::to_value(result)?)
}
