//! Household budget around a single fixed-rate mortgage.
//!
//! [`Budget`] caches the monthly mortgage payment and refreshes it eagerly
//! whenever price, down payment, rate or term change. Every other monthly
//! figure is derived on read.

use log::{debug, trace};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::amortization::{amortize, MONTHS_PER_YEAR};
use crate::error::MortgageBudgetError;
use crate::types::{Money, Rate, Years};
use crate::MortgageBudgetResult;

/// Construction options for a [`Budget`]. Any field omitted from JSON/YAML
/// takes its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BudgetConfig {
    /// House price (default 1,000,000)
    pub price: Money,
    /// Down payment as a fraction of price (default 0.20)
    pub percent_down: Rate,
    /// Nominal annual mortgage rate (default 0.032)
    pub annual_rate: Rate,
    /// Mortgage term in years (default 30)
    pub term_years: Years,
    /// Gross yearly income (default 100,000)
    pub annual_income: Money,
    /// Yearly home insurance bill (default 1,000)
    pub annual_insurance: Money,
    /// Yearly property tax as a fraction of price (default 0.01)
    pub tax_rate: Rate,
    /// Any other recurring monthly housing cost (default 0)
    pub extra_monthly_expense: Money,
}

impl Default for BudgetConfig {
    fn default() -> Self {
        Self {
            price: dec!(1000000),
            percent_down: dec!(0.20),
            annual_rate: dec!(0.032),
            term_years: dec!(30),
            annual_income: dec!(100000),
            annual_insurance: dec!(1000),
            tax_rate: dec!(0.01),
            extra_monthly_expense: Decimal::ZERO,
        }
    }
}

/// The four inputs that determine the mortgage payment.
#[derive(Debug, Clone, Copy, PartialEq)]
struct LoanInputs {
    price: Money,
    percent_down: Rate,
    annual_rate: Rate,
    term_years: Years,
}

impl LoanInputs {
    fn loan_amount(&self) -> MortgageBudgetResult<Money> {
        Decimal::ONE
            .checked_sub(self.percent_down)
            .and_then(|financed| self.price.checked_mul(financed))
            .ok_or_else(|| out_of_range("percent_down", "loan amount", self.percent_down))
    }

    fn payment(&self) -> MortgageBudgetResult<Money> {
        amortize(self.loan_amount()?, self.annual_rate, self.term_years)
    }
}

fn out_of_range(field: &str, figure: &str, value: Decimal) -> MortgageBudgetError {
    MortgageBudgetError::InvalidArgument {
        field: field.into(),
        reason: format!("{figure} for {field} {value} exceeds the representable range"),
    }
}

/// Mutable household budget with an always-current mortgage payment.
///
/// Every setter rejects a value whose derived figures would leave the
/// decimal range, so the accessors below never overflow.
#[derive(Debug, Clone, PartialEq)]
pub struct Budget {
    loan: LoanInputs,
    annual_income: Money,
    annual_insurance: Money,
    tax_rate: Rate,
    extra_monthly_expense: Money,
    monthly_payment: Money,
}

impl Budget {
    /// Build a budget, computing the initial payment. Fails if the loan
    /// inputs are rejected by [`amortize`] or a derived figure overflows.
    pub fn new(config: &BudgetConfig) -> MortgageBudgetResult<Self> {
        let loan = LoanInputs {
            price: config.price,
            percent_down: config.percent_down,
            annual_rate: config.annual_rate,
            term_years: config.term_years,
        };
        let monthly_payment = loan.payment()?;

        let budget = Self {
            loan,
            annual_income: config.annual_income,
            annual_insurance: config.annual_insurance,
            tax_rate: config.tax_rate,
            extra_monthly_expense: config.extra_monthly_expense,
            monthly_payment,
        };
        budget.check_figures()?;
        debug!(
            "budget created: loan {} at {} over {}y -> {}/month",
            budget.loan_amount(),
            loan.annual_rate,
            loan.term_years,
            monthly_payment
        );
        Ok(budget)
    }

    /// Current inputs as a config record.
    pub fn config(&self) -> BudgetConfig {
        BudgetConfig {
            price: self.loan.price,
            percent_down: self.loan.percent_down,
            annual_rate: self.loan.annual_rate,
            term_years: self.loan.term_years,
            annual_income: self.annual_income,
            annual_insurance: self.annual_insurance,
            tax_rate: self.tax_rate,
            extra_monthly_expense: self.extra_monthly_expense,
        }
    }

    /// Replace every input at once; on failure nothing is changed.
    pub fn apply(&mut self, config: &BudgetConfig) -> MortgageBudgetResult<()> {
        let mut next = self.with_loan(LoanInputs {
            price: config.price,
            percent_down: config.percent_down,
            annual_rate: config.annual_rate,
            term_years: config.term_years,
        })?;
        next.annual_income = config.annual_income;
        next.annual_insurance = config.annual_insurance;
        next.tax_rate = config.tax_rate;
        next.extra_monthly_expense = config.extra_monthly_expense;
        self.commit(next)
    }

    // -- loan inputs ------------------------------------------------------

    pub fn price(&self) -> Money {
        self.loan.price
    }

    pub fn set_price(&mut self, price: Money) -> MortgageBudgetResult<()> {
        let next = self.with_loan(LoanInputs { price, ..self.loan })?;
        self.commit(next)
    }

    pub fn percent_down(&self) -> Rate {
        self.loan.percent_down
    }

    pub fn set_percent_down(&mut self, percent_down: Rate) -> MortgageBudgetResult<()> {
        let next = self.with_loan(LoanInputs {
            percent_down,
            ..self.loan
        })?;
        self.commit(next)
    }

    pub fn annual_rate(&self) -> Rate {
        self.loan.annual_rate
    }

    pub fn set_annual_rate(&mut self, annual_rate: Rate) -> MortgageBudgetResult<()> {
        let next = self.with_loan(LoanInputs {
            annual_rate,
            ..self.loan
        })?;
        self.commit(next)
    }

    pub fn term_years(&self) -> Years {
        self.loan.term_years
    }

    pub fn set_term_years(&mut self, term_years: Years) -> MortgageBudgetResult<()> {
        let next = self.with_loan(LoanInputs {
            term_years,
            ..self.loan
        })?;
        self.commit(next)
    }

    // -- other inputs -----------------------------------------------------

    pub fn annual_income(&self) -> Money {
        self.annual_income
    }

    pub fn set_annual_income(&mut self, annual_income: Money) -> MortgageBudgetResult<()> {
        if annual_income == self.annual_income {
            return Ok(());
        }
        self.commit(Self {
            annual_income,
            ..self.clone()
        })
    }

    pub fn annual_insurance(&self) -> Money {
        self.annual_insurance
    }

    pub fn set_annual_insurance(&mut self, annual_insurance: Money) -> MortgageBudgetResult<()> {
        if annual_insurance == self.annual_insurance {
            return Ok(());
        }
        self.commit(Self {
            annual_insurance,
            ..self.clone()
        })
    }

    pub fn tax_rate(&self) -> Rate {
        self.tax_rate
    }

    pub fn set_tax_rate(&mut self, tax_rate: Rate) -> MortgageBudgetResult<()> {
        if tax_rate == self.tax_rate {
            return Ok(());
        }
        self.commit(Self {
            tax_rate,
            ..self.clone()
        })
    }

    pub fn extra_monthly_expense(&self) -> Money {
        self.extra_monthly_expense
    }

    pub fn set_extra_monthly_expense(&mut self, extra_monthly_expense: Money) -> MortgageBudgetResult<()> {
        if extra_monthly_expense == self.extra_monthly_expense {
            return Ok(());
        }
        self.commit(Self {
            extra_monthly_expense,
            ..self.clone()
        })
    }

    // -- derived ----------------------------------------------------------

    /// `price * (1 - percent_down)`
    pub fn loan_amount(&self) -> Money {
        self.loan.price * (Decimal::ONE - self.loan.percent_down)
    }

    /// `price * percent_down`
    pub fn down_payment(&self) -> Money {
        self.loan.price * self.loan.percent_down
    }

    /// Principal and interest, cached.
    pub fn monthly_payment(&self) -> Money {
        self.monthly_payment
    }

    pub fn monthly_tax(&self) -> Money {
        self.loan.price * self.tax_rate / MONTHS_PER_YEAR
    }

    pub fn monthly_insurance(&self) -> Money {
        self.annual_insurance / MONTHS_PER_YEAR
    }

    /// Principal, interest, tax, insurance and the extra monthly expense.
    pub fn monthly_total(&self) -> Money {
        self.monthly_payment + self.monthly_tax() + self.monthly_insurance() + self.extra_monthly_expense
    }

    /// Monthly housing cost as a percentage of monthly gross income.
    /// `None` when income is zero.
    pub fn expense_to_income_ratio_percent(&self) -> Option<Rate> {
        let monthly_income = self.annual_income / MONTHS_PER_YEAR;
        if monthly_income.is_zero() {
            return None;
        }
        Some(dec!(100) * self.monthly_total() / monthly_income)
    }

    /// Copy of `self` with new loan inputs and their payment.
    fn with_loan(&self, loan: LoanInputs) -> MortgageBudgetResult<Self> {
        if loan == self.loan {
            trace!("loan inputs unchanged; keeping cached payment {}", self.monthly_payment);
            return Ok(self.clone());
        }

        let loan_amount = loan.loan_amount()?;
        let monthly_payment = amortize(loan_amount, loan.annual_rate, loan.term_years)?;
        debug!(
            "payment recomputed: loan {} at {} over {}y -> {}/month (was {})",
            loan_amount,
            loan.annual_rate,
            loan.term_years,
            monthly_payment,
            self.monthly_payment
        );
        Ok(Self {
            loan,
            monthly_payment,
            ..self.clone()
        })
    }

    fn commit(&mut self, next: Self) -> MortgageBudgetResult<()> {
        next.check_figures()?;
        *self = next;
        Ok(())
    }

    /// Evaluate every derived figure with overflow checks, mirroring the
    /// accessors above.
    fn check_figures(&self) -> MortgageBudgetResult<()> {
        let price = self.loan.price;
        self.loan.loan_amount()?;
        price
            .checked_mul(self.loan.percent_down)
            .ok_or_else(|| out_of_range("percent_down", "down payment", self.loan.percent_down))?;

        let monthly_tax = price
            .checked_mul(self.tax_rate)
            .ok_or_else(|| out_of_range("tax_rate", "monthly tax", self.tax_rate))?
            / MONTHS_PER_YEAR;

        let monthly_total = self
            .monthly_payment
            .checked_add(monthly_tax)
            .and_then(|t| t.checked_add(self.annual_insurance / MONTHS_PER_YEAR))
            .and_then(|t| t.checked_add(self.extra_monthly_expense))
            .ok_or_else(|| out_of_range("extra_monthly_expense", "monthly total", self.extra_monthly_expense))?;

        let monthly_income = self.annual_income / MONTHS_PER_YEAR;
        if !monthly_income.is_zero() {
            dec!(100)
                .checked_mul(monthly_total)
                .and_then(|t| t.checked_div(monthly_income))
                .ok_or_else(|| out_of_range("annual_income", "expense-to-income ratio", self.annual_income))?;
        }
        Ok(())
    }
}

impl TryFrom<BudgetConfig> for Budget {
    type Error = MortgageBudgetError;

    fn try_from(config: BudgetConfig) -> Result<Self, Self::Error> {
        Budget::new(&config)
    }
}
