mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::advisor::AdviseArgs;
use commands::amortization::{EmiArgs, PrepaymentArgs};
use commands::property::RentVsBuyArgs;
use commands::request::RequestArgs;

/// Mortgage EMI, prepayment and rent-vs-buy calculations
#[derive(Parser)]
#[command(
    name = "mpro",
    version,
    about = "Mortgage EMI, prepayment and rent-vs-buy calculations",
    long_about = "A CLI for mortgage calculations with decimal precision. Computes \
                  monthly installments, the effect of extra principal payments, full \
                  amortisation schedules, and a buy-versus-rent comparison."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log computation details to stderr (same as RUST_LOG=debug)
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate the equated monthly installment for a loan
    Emi(EmiArgs),
    /// Analyse the effect of an extra monthly payment
    Prepayment(PrepaymentArgs),
    /// Print the month-by-month amortisation schedule
    Schedule(PrepaymentArgs),
    /// Compare renting against buying over a horizon
    RentVsBuy(RentVsBuyArgs),
    /// Ask the keyword advisor a question
    Advise(AdviseArgs),
    /// Evaluate a raw form-style request body (camelCase fields, string or number values)
    Request(RequestArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_logging(verbose: bool) {
    let mut builder = env_logger::Builder::from_default_env();
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Emi(args) => commands::amortization::run_emi(args),
        Commands::Prepayment(args) => commands::amortization::run_prepayment(args),
        Commands::Schedule(args) => commands::amortization::run_schedule(args),
        Commands::RentVsBuy(args) => commands::property::run_rent_vs_buy(args),
        Commands::Advise(args) => commands::advisor::run_advise(args),
        Commands::Request(args) => commands::request::run_request(args),
        Commands::Version => {
            println!("mpro {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
