mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use log::debug;
use std::process;

use commands::budget::BudgetArgs;
use commands::payment::PaymentArgs;

/// Fixed-rate mortgage and household budget calculations
#[derive(Parser)]
#[command(
    name = "mortgage-budget",
    version,
    about = "Fixed-rate mortgage and household budget calculations",
    long_about = "Computes the level monthly payment on a fixed-rate mortgage and a \
                  monthly housing budget (principal, interest, tax, insurance) with its \
                  expense-to-income ratio, using decimal precision."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Monthly payment for a fixed-rate loan
    Payment(PaymentArgs),
    /// Monthly housing budget and expense-to-income ratio
    Budget(BudgetArgs),
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

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    debug!("output format: {:?}", cli.output);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Payment(args) => commands::payment::run_payment(args),
        Commands::Budget(args) => commands::budget::run_budget(args),
        Commands::Version => {
            println!("mortgage-budget {}", env!("CARGO_PKG_VERSION"));
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
