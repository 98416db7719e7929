pub mod affordability;
pub mod model;
pub mod summary;

pub use affordability::{Affordability, FRONT_END_RATIO_LIMIT_PERCENT};
pub use model::{Budget, BudgetConfig};
pub use summary::{calculate_budget, BudgetSummary};
