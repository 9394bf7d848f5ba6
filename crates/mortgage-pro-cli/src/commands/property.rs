use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use mortgage_pro_core::property::rent_vs_buy::{self, RentVsBuyInput};

use crate::input;

/// Arguments for the buy-vs-rent comparison
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct RentVsBuyArgs {
    /// Current monthly rent
    #[arg(long)]
    pub rent: Option<Decimal>,

    /// Purchase price of the property
    #[arg(long)]
    pub price: Option<Decimal>,

    /// Horizon in whole years
    #[arg(long)]
    pub years: Option<u32>,

    /// Annual appreciation in percent (negative for depreciation)
    #[arg(long, alias = "appreciation")]
    pub appreciation_pct: Option<Decimal>,

    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_rent_vs_buy(args: RentVsBuyArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let rvb_input: RentVsBuyInput = match input::read_input(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => RentVsBuyInput {
            monthly_rent: args.rent.ok_or("--rent is required (or provide --input)")?,
            property_price: args.price.ok_or("--price is required (or provide --input)")?,
            years: args.years.ok_or("--years is required (or provide --input)")?,
            appreciation_rate_pct: args
                .appreciation_pct
                .ok_or("--appreciation-pct is required (or provide --input)")?,
        },
    };
    let result = rent_vs_buy::analyze_rent_vs_buy(&rvb_input)?;
    Ok(serde_json::to_value(result)?)
}
