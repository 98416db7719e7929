use clap::Args;
use serde_json::Value;

use mortgage_budget_core::amortization::{self, LoanTerms};
use mortgage_budget_core::types::{Money, Rate, Years};

use crate::input;

/// Arguments for a single monthly payment calculation
#[derive(Args)]
pub struct PaymentArgs {
    /// Amount borrowed
    #[arg(long)]
    pub principal: Option<Money>,

    /// Nominal annual interest rate (e.g. 0.032 for 3.2%)
    #[arg(long)]
    pub annual_rate: Option<Rate>,

    /// Loan term in years; fractional terms are truncated to whole months
    #[arg(long, default_value = "30")]
    pub term_years: Years,

    /// Path to a JSON or YAML file with loan terms (overrides flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_payment(args: PaymentArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let terms: LoanTerms = if let Some(ref path) = args.input {
        input::file::read_config(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        LoanTerms::new(
            args.principal
                .ok_or("--principal is required (or provide --input)")?,
            args.annual_rate
                .ok_or("--annual-rate is required (or provide --input)")?,
            args.term_years,
        )
    };

    let result = amortization::calculate_payment(&terms)?;
    Ok(serde_json::to_value(result)?)
}
