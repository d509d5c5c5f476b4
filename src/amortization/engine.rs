//! Simulation configuration and the amortizer interface

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::schedule::StrategyResult;
use crate::budget::MIN_HORIZON_YEARS;

/// Configuration for a simulation run
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// Whether to keep the month-by-month schedule (balances are always kept)
    pub detailed_output: bool,

    /// Minimum number of years covered by the budget projection
    pub min_horizon_years: u32,

    /// First payment date; when set, records carry "Mon YYYY" labels
    pub start_date: Option<NaiveDate>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            detailed_output: true,
            min_horizon_years: MIN_HORIZON_YEARS,
            start_date: None,
        }
    }
}

/// The payoff strategies being compared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strategy {
    /// Fixed annuity payment only
    Traditional,
    /// Annuity payment plus free cash flow as extra principal
    ExtraPayment,
    /// Chunking from a revolving credit line
    LineOfCredit,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Strategy::Traditional, Strategy::ExtraPayment, Strategy::LineOfCredit];

    /// Display name used in reports
    pub fn label(&self) -> &'static str {
        match self {
            Strategy::Traditional => "Traditional EMI",
            Strategy::ExtraPayment => "Extra Payment",
            Strategy::LineOfCredit => "LOC Strategy",
        }
    }
}

/// A payoff strategy that can be simulated to completion.
///
/// Implementors validate their inputs on construction, so a simulation itself
/// cannot fail; conditions such as an exhausted term are reported through the
/// result's status.
pub trait Amortizer: Sync {
    fn strategy(&self) -> Strategy;

    /// Fixed annuity payment the strategy is built around
    fn base_payment(&self) -> f64;

    /// Run the monthly loop to payoff or to the end of the term
    fn amortize(&self, config: &SimulationConfig) -> StrategyResult;
}
