//! Fixed-rate amortization: the level monthly payment that retires a loan
//! over its term with interest compounded monthly at `annual_rate / 12`.

use log::trace;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::MortgageBudgetError;
use crate::types::{with_metadata, ComputationOutput, Money, Rate, Years};
use crate::MortgageBudgetResult;

pub const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Inputs to the amortization formula.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    /// Amount borrowed.
    pub principal: Money,
    /// Nominal annual rate (e.g. 0.032 = 3.2%).
    pub annual_rate: Rate,
    /// Term in years; fractional terms are truncated to whole months.
    pub term_years: Years,
}

impl LoanTerms {
    pub fn new(principal: Money, annual_rate: Rate, term_years: Years) -> Self {
        Self {
            principal,
            annual_rate,
            term_years,
        }
    }

    /// Number of whole monthly payments over the term.
    pub fn periods(&self) -> MortgageBudgetResult<u64> {
        monthly_periods(self.term_years)
    }

    /// Monthly compounding rate.
    pub fn monthly_rate(&self) -> Rate {
        self.annual_rate / MONTHS_PER_YEAR
    }
}

/// Result of a single payment calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentOutput {
    /// Level monthly payment covering principal and interest.
    pub monthly_payment: Money,
    /// Number of monthly payments.
    pub periods: u64,
    pub monthly_rate: Rate,
    /// Sum of all payments over the term.
    pub total_paid: Money,
    /// Total paid less principal.
    pub total_interest: Money,
}

/// Monthly payment for a fixed-rate loan.
///
/// With `n = floor(term_years * 12)` and `r = annual_rate / 12` this is
/// `principal * (1+r)^n / Σ_{i=1..n} (1+r)^(i-1)`, evaluated in its closed
/// form `principal * r * (1+r)^n / ((1+r)^n - 1)`. A zero rate gives
/// `principal / n`.
///
/// Fails with [`MortgageBudgetError::InvalidArgument`] when `principal < 0`,
/// `annual_rate < 0`, `term_years <= 0`, or the term is shorter than one month.
pub fn amortize(principal: Money, annual_rate: Rate, term_years: Years) -> MortgageBudgetResult<Money> {
    validate_terms(principal, annual_rate, term_years)?;

    let n = monthly_periods(term_years)?;
    let periods = Decimal::from(n);
    let monthly_rate = annual_rate / MONTHS_PER_YEAR;

    if monthly_rate.is_zero() {
        return Ok(principal / periods);
    }

    // (1+r)^n past the decimal range: the discounted sum of payments tends to 1/r.
    let growth = match (Decimal::ONE + monthly_rate).checked_powu(n) {
        Some(g) => g,
        None => {
            trace!("growth factor overflowed for {n} periods at {monthly_rate}; using interest-only limit");
            return monthly_interest(principal, annual_rate);
        }
    };

    // r * Σ (1+r)^(i-1); rounds to zero only for vanishing rates.
    let scaled_sum = growth - Decimal::ONE;
    if scaled_sum.is_zero() {
        return Ok(principal / periods);
    }

    monthly_interest(principal, annual_rate)?
        .checked_mul(growth / scaled_sum)
        .ok_or_else(|| payment_out_of_range(principal, annual_rate))
}

/// First month's interest, `principal * r`.
fn monthly_interest(principal: Money, annual_rate: Rate) -> MortgageBudgetResult<Money> {
    principal
        .checked_mul(annual_rate / MONTHS_PER_YEAR)
        .ok_or_else(|| payment_out_of_range(principal, annual_rate))
}

fn payment_out_of_range(principal: Money, annual_rate: Rate) -> MortgageBudgetError {
    MortgageBudgetError::InvalidArgument {
        field: "principal".into(),
        reason: format!("Monthly payment on {principal} at {annual_rate} exceeds the representable range"),
    }
}

/// [`amortize`] over a [`LoanTerms`] value.
pub fn amortize_terms(terms: &LoanTerms) -> MortgageBudgetResult<Money> {
    amortize(terms.principal, terms.annual_rate, terms.term_years)
}

/// Payment calculation wrapped in the standard output envelope.
pub fn calculate_payment(terms: &LoanTerms) -> MortgageBudgetResult<ComputationOutput<PaymentOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let monthly_payment = amortize_terms(terms)?;
    let periods = terms.periods()?;

    // periods() succeeded, so term_years * 12 fits
    let exact_periods = terms.term_years * MONTHS_PER_YEAR;
    if exact_periods != Decimal::from(periods) {
        warnings.push(format!(
            "Term of {} years is {exact_periods} months; truncated to {periods} whole payments",
            terms.term_years
        ));
    }

    let total_paid = monthly_payment
        .checked_mul(Decimal::from(periods))
        .ok_or_else(|| MortgageBudgetError::InvalidArgument {
            field: "term_years".into(),
            reason: format!("Total of {periods} payments of {monthly_payment} exceeds the representable range"),
        })?;
    let output = PaymentOutput {
        monthly_payment,
        periods,
        monthly_rate: terms.monthly_rate(),
        total_paid,
        total_interest: total_paid - terms.principal,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Level-payment amortization, monthly compounding",
        terms,
        warnings,
        elapsed,
        output,
    ))
}

fn validate_terms(principal: Money, annual_rate: Rate, term_years: Years) -> MortgageBudgetResult<()> {
    if principal < Decimal::ZERO {
        return Err(MortgageBudgetError::InvalidArgument {
            field: "principal".into(),
            reason: format!("Loan amount must be >= 0, got {principal}"),
        });
    }
    if annual_rate < Decimal::ZERO {
        return Err(MortgageBudgetError::InvalidArgument {
            field: "annual_rate".into(),
            reason: format!("Interest rate must be >= 0, got {annual_rate}"),
        });
    }
    if term_years <= Decimal::ZERO {
        return Err(MortgageBudgetError::InvalidArgument {
            field: "term_years".into(),
            reason: format!("Mortgage term must be > 0 years, got {term_years}"),
        });
    }
    Ok(())
}

fn monthly_periods(term_years: Years) -> MortgageBudgetResult<u64> {
    if term_years <= Decimal::ZERO {
        return Err(MortgageBudgetError::InvalidArgument {
            field: "term_years".into(),
            reason: format!("Mortgage term must be > 0 years, got {term_years}"),
        });
    }

    let n = term_years
        .checked_mul(MONTHS_PER_YEAR)
        .and_then(|months| months.floor().to_u64())
        .ok_or_else(|| MortgageBudgetError::InvalidArgument {
            field: "term_years".into(),
            reason: format!("Mortgage term of {term_years} years has too many monthly periods"),
        })?;

    if n == 0 {
        return Err(MortgageBudgetError::InvalidArgument {
            field: "term_years".into(),
            reason: format!("Mortgage term of {term_years} years is shorter than one monthly payment"),
        });
    }
    Ok(n)
}
