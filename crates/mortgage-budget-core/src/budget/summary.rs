use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::affordability::{Affordability, FRONT_END_RATIO_LIMIT_PERCENT};
use super::model::{Budget, BudgetConfig};
use crate::types::{with_metadata, ComputationOutput, Money, Rate, Years};
use crate::MortgageBudgetResult;

/// Snapshot of a budget's inputs and every derived monthly figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetSummary {
    pub price: Money,
    pub percent_down: Rate,
    pub annual_rate: Rate,
    pub term_years: Years,
    pub annual_income: Money,
    pub annual_insurance: Money,
    pub tax_rate: Rate,
    pub extra_monthly_expense: Money,
    /// Cash paid up front (`price * percent_down`)
    pub down_payment: Money,
    pub loan_amount: Money,
    /// Principal and interest
    pub monthly_payment: Money,
    pub monthly_tax: Money,
    pub monthly_insurance: Money,
    /// PITI plus the extra monthly expense
    pub monthly_total: Money,
    /// Absent when income is zero
    pub expense_to_income_ratio_percent: Option<Rate>,
    pub affordability: Affordability,
}

impl Budget {
    pub fn summary(&self) -> BudgetSummary {
        let ratio = self.expense_to_income_ratio_percent();
        BudgetSummary {
            price: self.price(),
            percent_down: self.percent_down(),
            annual_rate: self.annual_rate(),
            term_years: self.term_years(),
            annual_income: self.annual_income(),
            annual_insurance: self.annual_insurance(),
            tax_rate: self.tax_rate(),
            extra_monthly_expense: self.extra_monthly_expense(),
            down_payment: self.down_payment(),
            loan_amount: self.loan_amount(),
            monthly_payment: self.monthly_payment(),
            monthly_tax: self.monthly_tax(),
            monthly_insurance: self.monthly_insurance(),
            monthly_total: self.monthly_total(),
            expense_to_income_ratio_percent: ratio,
            affordability: Affordability::assess(ratio),
        }
    }
}

/// Build a budget from `config` and summarise it in the standard envelope.
pub fn calculate_budget(config: &BudgetConfig) -> MortgageBudgetResult<ComputationOutput<BudgetSummary>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let budget = Budget::new(config)?;
    let summary = budget.summary();

    if config.percent_down < Decimal::ZERO || config.percent_down > Decimal::ONE {
        warnings.push(format!(
            "Down payment fraction {} is outside [0, 1]",
            config.percent_down
        ));
    }
    match (summary.affordability, summary.expense_to_income_ratio_percent) {
        (Affordability::Undefined, _) => {
            warnings.push("Annual income is zero; expense-to-income ratio is undefined".into())
        }
        (verdict, Some(ratio)) if !verdict.is_within_guideline() => warnings.push(format!(
            "Housing cost is {}% of gross income, above the {FRONT_END_RATIO_LIMIT_PERCENT}% guideline",
            ratio.round_dp(1)
        )),
        _ => {}
    }

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "PITI household budget with level-payment amortization",
        config,
        warnings,
        elapsed,
        summary,
    ))
}
