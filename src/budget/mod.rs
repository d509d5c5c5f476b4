//! Household budget projection feeding the cash-flow strategies

mod growth;

pub use growth::{BudgetGrowthProjector, BudgetProjection, MonthlyBudget, YearSnapshot, MIN_HORIZON_YEARS};
