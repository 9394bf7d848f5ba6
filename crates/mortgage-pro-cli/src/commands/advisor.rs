use clap::Args;
use serde_json::Value;

use mortgage_pro_core::advisor;

/// Arguments for the keyword advisor
#[derive(Args)]
pub struct AdviseArgs {
    /// Question to classify, e.g. "should I rent or buy?"
    #[arg(required = true, num_args = 1..)]
    pub question: Vec<String>,
}

pub fn run_advise(args: AdviseArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let reply = advisor::classify_intent(&args.question.join(" "));
    Ok(serde_json::to_value(reply)?)
}
