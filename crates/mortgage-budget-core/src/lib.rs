//! Fixed-rate mortgage payment and household budget calculations.
//!
//! [`amortization::amortize`] computes the level monthly payment for a loan;
//! [`budget::Budget`] keeps that payment current while tracking the tax,
//! insurance and income figures needed for a monthly housing budget.

pub mod amortization;
pub mod error;
pub mod types;

#[cfg(feature = "budget")]
pub mod budget;

pub use amortization::{amortize, LoanTerms};
pub use error::MortgageBudgetError;
pub use types::*;

#[cfg(feature = "budget")]
pub use budget::{Affordability, Budget, BudgetConfig, BudgetSummary};

/// Standard result type for all mortgage-budget operations
pub type MortgageBudgetResult<T> = Result<T, MortgageBudgetError>;
