use clap::Args;
use serde_json::Value;

use mortgage_budget_core::budget::{self, BudgetConfig};
use mortgage_budget_core::types::{Money, Rate, Years};

use crate::input;

/// Arguments for a household budget summary. Omitted flags take the
/// library defaults.
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct BudgetArgs {
    /// House price (default 1,000,000)
    #[arg(long)]
    pub price: Option<Money>,

    /// Down payment as a fraction of price (default 0.20)
    #[arg(long)]
    pub percent_down: Option<Rate>,

    /// Nominal annual mortgage rate (default 0.032)
    #[arg(long)]
    pub annual_rate: Option<Rate>,

    /// Mortgage term in years (default 30)
    #[arg(long)]
    pub term_years: Option<Years>,

    /// Gross yearly income (default 100,000)
    #[arg(long, alias = "income")]
    pub annual_income: Option<Money>,

    /// Yearly home insurance (default 1,000)
    #[arg(long, alias = "insurance")]
    pub annual_insurance: Option<Money>,

    /// Yearly property tax as a fraction of price (default 0.01)
    #[arg(long)]
    pub tax_rate: Option<Rate>,

    /// Other recurring monthly housing cost (default 0)
    #[arg(long, alias = "extra")]
    pub extra_monthly_expense: Option<Money>,

    /// Path to a JSON or YAML budget file (overrides flags)
    #[arg(long)]
    pub input: Option<String>,
}

impl BudgetArgs {
    fn to_config(&self) -> BudgetConfig {
        let defaults = BudgetConfig::default();
        BudgetConfig {
            price: self.price.unwrap_or(defaults.price),
            percent_down: self.percent_down.unwrap_or(defaults.percent_down),
            annual_rate: self.annual_rate.unwrap_or(defaults.annual_rate),
            term_years: self.term_years.unwrap_or(defaults.term_years),
            annual_income: self.annual_income.unwrap_or(defaults.annual_income),
            annual_insurance: self.annual_insurance.unwrap_or(defaults.annual_insurance),
            tax_rate: self.tax_rate.unwrap_or(defaults.tax_rate),
            extra_monthly_expense: self
                .extra_monthly_expense
                .unwrap_or(defaults.extra_monthly_expense),
        }
    }
}

pub fn run_budget(args: BudgetArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let config: BudgetConfig = if let Some(ref path) = args.input {
        input::file::read_config(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        args.to_config()
    };

    let result = budget::calculate_budget(&config)?;
    Ok(serde_json::to_value(result)?)
}
