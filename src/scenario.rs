//! Scenario runner comparing the three payoff strategies
//!
//! Builds the budget projection once per scenario, then fans out to the
//! traditional, extra-payment and line-of-credit amortizers. The amortizers
//! only borrow immutable inputs, so they run in parallel on the rayon pool.

use log::info;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::amortization::{
    Amortizer, ExtraPaymentAmortizer, LineOfCreditAmortizer, SimulationConfig, Strategy, StrategyResult,
    TraditionalAmortizer,
};
use crate::budget::{BudgetGrowthProjector, BudgetProjection};
use crate::error::SimulationError;
use crate::loan::Scenario;

/// The three strategy results for one scenario
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyComparison {
    pub scenario_id: u32,
    pub projection: BudgetProjection,
    pub traditional: StrategyResult,
    pub extra_payment: StrategyResult,
    pub line_of_credit: StrategyResult,
}

impl StrategyComparison {
    pub fn result(&self, strategy: Strategy) -> &StrategyResult {
        match strategy {
            Strategy::Traditional => &self.traditional,
            Strategy::ExtraPayment => &self.extra_payment,
            Strategy::LineOfCredit => &self.line_of_credit,
        }
    }

    pub fn results(&self) -> [&StrategyResult; 3] {
        [&self.traditional, &self.extra_payment, &self.line_of_credit]
    }

    /// Interest saved relative to the traditional schedule
    pub fn interest_savings(&self, strategy: Strategy) -> f64 {
        self.traditional.total_interest - self.result(strategy).total_interest
    }

    /// Months shaved off the traditional payoff (negative if slower)
    pub fn months_saved(&self, strategy: Strategy) -> i64 {
        self.traditional.payoff_months as i64 - self.result(strategy).payoff_months as i64
    }

    /// Strategy with the lowest total interest among those that paid off
    pub fn best_strategy(&self) -> Strategy {
        Strategy::ALL
            .into_iter()
            .filter(|&s| self.result(s).status.is_paid_off())
            .min_by(|&a, &b| {
                self.result(a)
                    .total_interest
                    .total_cmp(&self.result(b).total_interest)
            })
            .unwrap_or(Strategy::Traditional)
    }

    /// Balance series padded with zeros to the longest one, for charting
    pub fn aligned_balances(&self) -> [Vec<f64>; 3] {
        let len = self.results().iter().map(|r| r.balances.len()).max().unwrap_or(0);
        self.results().map(|r| {
            let mut series = r.balances.clone();
            series.resize(len, 0.0);
            series
        })
    }
}

/// Runs scenarios against a shared simulation configuration
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    config: SimulationConfig,
}

impl ScenarioRunner {
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    /// Validate a scenario and simulate all three strategies
    pub fn run(&self, scenario: &Scenario) -> Result<StrategyComparison, SimulationError> {
        scenario.validate()?;

        let projection = BudgetGrowthProjector::new(
            scenario.budget,
            scenario.loan.term_years,
            self.config.min_horizon_years,
        )?
        .project();

        let traditional = TraditionalAmortizer::new(scenario.loan)?;
        let extra = ExtraPaymentAmortizer::new(scenario.loan, &projection)?;
        let loc = LineOfCreditAmortizer::new(scenario.loan, scenario.line_of_credit, &projection)?;

        info!(
            "Scenario {}: base payment {:.2}, running {} strategies",
            scenario.scenario_id,
            traditional.base_payment(),
            Strategy::ALL.len()
        );

        let config = &self.config;
        let (traditional, (extra_payment, line_of_credit)) = rayon::join(
            || traditional.amortize(config),
            || rayon::join(|| extra.amortize(config), || loc.amortize(config)),
        );

        Ok(StrategyComparison {
            scenario_id: scenario.scenario_id,
            projection,
            traditional,
            extra_payment,
            line_of_credit,
        })
    }

    /// Run many scenarios in parallel, one result per scenario in input order
    pub fn run_batch(&self, scenarios: &[Scenario]) -> Vec<Result<StrategyComparison, SimulationError>> {
        scenarios.par_iter().map(|scenario| self.run(scenario)).collect()
    }
}
