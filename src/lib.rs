//! Loan Velocity - month-by-month mortgage payoff engine
//!
//! This library provides:
//! - Fixed annuity (EMI) payment calculation
//! - Household budget projection with annual income and expense growth
//! - Traditional, extra-payment and line-of-credit chunking amortizers
//! - Cash-flow sweep and paycheck-parking credit line policies
//! - Parallel scenario comparison across strategies

pub mod amortization;
pub mod budget;
pub mod error;
pub mod loan;
pub mod scenario;

// Re-export commonly used types
pub use amortization::{
    Amortizer, ExtraPaymentAmortizer, LineOfCreditAmortizer, MonthlyRecord, PayoffStatus, SimulationConfig,
    Strategy, StrategyResult, TraditionalAmortizer,
};
pub use budget::{BudgetGrowthProjector, BudgetProjection};
pub use error::{ScenarioLoadError, SimulationError};
pub use loan::{BudgetParameters, LineOfCreditParameters, LoanParameters, Scenario, StrategyMode};
pub use scenario::{ScenarioRunner, StrategyComparison};
