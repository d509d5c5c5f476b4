//! Loan, budget and credit line parameters and scenario loading

mod data;
pub mod loader;

pub use data::{
    BudgetParameters, LineOfCreditParameters, LoanParameters, Scenario, StrategyMode, MAX_TERM_YEARS, MONTHS_PER_YEAR,
};
pub use loader::{load_scenario_json, load_scenarios, load_scenarios_from_reader};
