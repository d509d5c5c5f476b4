//! Yearly income/expense projection with month-level interpolation

use serde::{Deserialize, Serialize};

use crate::error::SimulationError;
use crate::loan::{BudgetParameters, MAX_TERM_YEARS, MONTHS_PER_YEAR};

/// Projections always cover at least this many years, even for short loans
pub const MIN_HORIZON_YEARS: u32 = 40;

/// Budget figures for one projection year
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearSnapshot {
    /// Years since simulation start (0 = initial values)
    pub year: u32,
    pub income: f64,
    pub expenses: f64,
    pub available: f64,
}

/// Budget figures seen by a strategy in a single month
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthlyBudget {
    pub income: f64,
    pub expenses: f64,
    /// Income less expenses, derived after interpolation
    pub available: f64,
}

impl MonthlyBudget {
    pub fn new(income: f64, expenses: f64) -> Self {
        Self {
            income,
            expenses,
            available: income - expenses,
        }
    }
}

/// Builds a [`BudgetProjection`] from a budget and loan term
#[derive(Debug, Clone)]
pub struct BudgetGrowthProjector {
    budget: BudgetParameters,
    horizon_years: u32,
}

impl BudgetGrowthProjector {
    /// Projector covering `max(term_years, min_horizon_years)` years.
    ///
    /// The horizon floor is capped at [`MAX_TERM_YEARS`]; a term beyond that
    /// is rejected like any other invalid loan.
    pub fn new(budget: BudgetParameters, term_years: u32, min_horizon_years: u32) -> Result<Self, SimulationError> {
        budget.validate()?;
        if term_years > MAX_TERM_YEARS {
            return Err(SimulationError::InvalidLoanParameters(format!(
                "term must not exceed {} years, got {}",
                MAX_TERM_YEARS, term_years
            )));
        }
        Ok(Self {
            budget,
            horizon_years: term_years.max(min_horizon_years.min(MAX_TERM_YEARS)),
        })
    }

    pub fn horizon_years(&self) -> u32 {
        self.horizon_years
    }

    /// Compound income and expenses once per year, or hold them flat when
    /// growth is disabled
    pub fn project(&self) -> BudgetProjection {
        let (income_factor, expense_factor) = if self.budget.growth_enabled {
            (
                1.0 + self.budget.annual_income_growth_percent / 100.0,
                1.0 + self.budget.annual_expense_growth_percent / 100.0,
            )
        } else {
            (1.0, 1.0)
        };

        let mut income = self.budget.monthly_income;
        let mut expenses = self.budget.monthly_expenses;
        let mut years = Vec::with_capacity(self.horizon_years as usize + 1);

        for year in 0..=self.horizon_years {
            if year > 0 {
                income *= income_factor;
                expenses *= expense_factor;
            }
            years.push(YearSnapshot {
                year,
                income,
                expenses,
                available: income - expenses,
            });
        }

        BudgetProjection { years }
    }
}

/// Ordered yearly snapshots, year 0 through the horizon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetProjection {
    years: Vec<YearSnapshot>,
}

impl BudgetProjection {
    /// Shorthand for projecting a budget over a loan term
    pub fn from_budget(budget: &BudgetParameters, term_years: u32) -> Result<Self, SimulationError> {
        Ok(BudgetGrowthProjector::new(*budget, term_years, MIN_HORIZON_YEARS)?.project())
    }

    pub fn years(&self) -> &[YearSnapshot] {
        &self.years
    }

    /// Snapshot for a year, clamped to the last projected year
    pub fn year(&self, year: u32) -> YearSnapshot {
        let last = self.years.len().saturating_sub(1);
        self.years[(year as usize).min(last)]
    }

    /// Budget for an absolute 1-based simulation month.
    ///
    /// Month `m` sits `(m % 12) / 12` of the way from year `m / 12` to the
    /// following year; income and expenses are interpolated linearly between
    /// those two annual points. This smooths the anniversary step rather than
    /// compounding monthly.
    pub fn budget_for_month(&self, month: u32) -> MonthlyBudget {
        let year = month / MONTHS_PER_YEAR;
        let frac = (month % MONTHS_PER_YEAR) as f64 / MONTHS_PER_YEAR as f64;

        let from = self.year(year);
        let to = self.year(year + 1);

        MonthlyBudget::new(
            from.income + (to.income - from.income) * frac,
            from.expenses + (to.expenses - from.expenses) * frac,
        )
    }
}
