use clap::{Args, ValueEnum};
use serde_json::Value;

use mortgage_pro_core::api;

use crate::input;

/// Form-style endpoint to evaluate
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Route {
    CalculateEmi,
    Prepayment,
    BuyVsRent,
    Advisor,
}

/// Arguments for evaluating a raw form-style request body
#[derive(Args)]
pub struct RequestArgs {
    /// Endpoint the body is addressed to
    #[arg(value_enum)]
    pub route: Route,

    /// Path to a JSON/YAML body (otherwise read from stdin)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_request(args: RequestArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let body = input::read_body(args.input.as_deref())?;
    log::debug!("request {:?}: {}", args.route, body);

    let response = match args.route {
        Route::CalculateEmi => api::handle_json(&body, api::handle_emi),
        Route::Prepayment => api::handle_json(&body, api::handle_prepayment),
        Route::BuyVsRent => api::handle_json(&body, api::handle_rent_vs_buy),
        Route::Advisor => api::handle_json(&body, api::handle_advisor),
    }?;
    Ok(serde_json::from_str(&response)?)
}
