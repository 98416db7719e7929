use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::Rate;

/// Conventional ceiling on housing cost as a share of gross monthly income.
pub const FRONT_END_RATIO_LIMIT_PERCENT: Decimal = dec!(28);

/// Rule-of-thumb verdict on an expense-to-income ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Affordability {
    /// Ratio at or below the 28% guideline.
    WithinGuideline,
    /// Ratio above the guideline.
    AboveGuideline,
    /// No income to compare against.
    Undefined,
}

impl Affordability {
    pub fn assess(ratio_percent: Option<Rate>) -> Self {
        match ratio_percent {
            Some(r) if r <= FRONT_END_RATIO_LIMIT_PERCENT => Affordability::WithinGuideline,
            Some(_) => Affordability::AboveGuideline,
            None => Affordability::Undefined,
        }
    }

    pub fn is_within_guideline(&self) -> bool {
        matches!(self, Affordability::WithinGuideline)
    }
}
