use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MortgageBudgetError {
    #[error("Invalid argument: {field} - {reason}")]
    InvalidArgument { field: String, reason: String },
}

impl MortgageBudgetError {
    /// Name of the offending parameter.
    pub fn field(&self) -> &str {
        match self {
            MortgageBudgetError::InvalidArgument { field, .. } => field,
        }
    }
}
