//! Input parameter sets for a payoff simulation

use serde::{Deserialize, Serialize};

use crate::error::SimulationError;

/// Months per year used throughout rate and term conversions
pub const MONTHS_PER_YEAR: u32 = 12;

/// Longest mortgage term accepted, in years
pub const MAX_TERM_YEARS: u32 = 100;

/// Fixed-rate mortgage terms
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanParameters {
    /// Amount financed
    pub principal: f64,

    /// Nominal annual rate as a percentage (5.5 = 5.5%)
    pub annual_rate_percent: f64,

    /// Amortization term in years
    pub term_years: u32,
}

impl LoanParameters {
    /// Build and validate loan terms
    pub fn new(principal: f64, annual_rate_percent: f64, term_years: u32) -> Result<Self, SimulationError> {
        let loan = Self {
            principal,
            annual_rate_percent,
            term_years,
        };
        loan.validate()?;
        Ok(loan)
    }

    pub fn validate(&self) -> Result<(), SimulationError> {
        if !self.principal.is_finite() || self.principal <= 0.0 {
            return Err(SimulationError::InvalidLoanParameters(format!(
                "principal must be positive, got {}",
                self.principal
            )));
        }
        if !self.annual_rate_percent.is_finite() || self.annual_rate_percent < 0.0 {
            return Err(SimulationError::InvalidLoanParameters(format!(
                "annual rate must not be negative, got {}",
                self.annual_rate_percent
            )));
        }
        if self.term_years == 0 {
            return Err(SimulationError::InvalidLoanParameters(
                "term must be at least one year".to_string(),
            ));
        }
        if self.term_years > MAX_TERM_YEARS {
            return Err(SimulationError::InvalidLoanParameters(format!(
                "term must not exceed {} years, got {}",
                MAX_TERM_YEARS, self.term_years
            )));
        }
        Ok(())
    }

    /// Periodic rate applied each month
    pub fn monthly_rate(&self) -> f64 {
        self.annual_rate_percent / 100.0 / MONTHS_PER_YEAR as f64
    }

    /// Number of scheduled payments over the full term (saturating for
    /// terms that never passed validation)
    pub fn num_payments(&self) -> u32 {
        self.term_years.checked_mul(MONTHS_PER_YEAR).unwrap_or(u32::MAX)
    }
}

/// Household cash flow and its optional annual growth
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BudgetParameters {
    pub monthly_income: f64,
    pub monthly_expenses: f64,

    /// When false, income and expenses stay flat for the whole horizon
    pub growth_enabled: bool,

    /// Annual income growth as a percentage
    pub annual_income_growth_percent: f64,

    /// Annual expense growth as a percentage
    pub annual_expense_growth_percent: f64,
}

impl BudgetParameters {
    /// Flat budget with growth disabled
    pub fn flat(monthly_income: f64, monthly_expenses: f64) -> Self {
        Self {
            monthly_income,
            monthly_expenses,
            growth_enabled: false,
            annual_income_growth_percent: 0.0,
            annual_expense_growth_percent: 0.0,
        }
    }

    /// Budget compounding annually at the given percentages
    pub fn growing(
        monthly_income: f64,
        monthly_expenses: f64,
        annual_income_growth_percent: f64,
        annual_expense_growth_percent: f64,
    ) -> Self {
        Self {
            monthly_income,
            monthly_expenses,
            growth_enabled: true,
            annual_income_growth_percent,
            annual_expense_growth_percent,
        }
    }

    pub fn validate(&self) -> Result<(), SimulationError> {
        for (name, value) in [
            ("monthly income", self.monthly_income),
            ("monthly expenses", self.monthly_expenses),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(SimulationError::InvalidBudgetParameters(format!(
                    "{} must not be negative, got {}",
                    name, value
                )));
            }
        }
        // Growth rates are only read when growth is enabled, but a value at or
        // below -100% would drive the projection negative
        for (name, value) in [
            ("income growth", self.annual_income_growth_percent),
            ("expense growth", self.annual_expense_growth_percent),
        ] {
            if !value.is_finite() || value <= -100.0 {
                return Err(SimulationError::InvalidBudgetParameters(format!(
                    "{} must be above -100%, got {}%",
                    name, value
                )));
            }
        }
        Ok(())
    }

    /// Initial free cash flow (may be negative)
    pub fn available(&self) -> f64 {
        self.monthly_income - self.monthly_expenses
    }
}

/// How the line of credit is used between chunks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StrategyMode {
    /// Free cash flow after the mortgage payment pays the line down
    #[default]
    CashFlowSweep,
    /// All income is deposited onto the line; expenses and the mortgage
    /// payment are drawn back out of it
    PaycheckParking,
}

impl StrategyMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyMode::CashFlowSweep => "CashFlowSweep",
            StrategyMode::PaycheckParking => "PaycheckParking",
        }
    }

    /// Parse the names used in scenario sheets and on the command line
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "cashflowsweep" | "cash-flow-sweep" | "sweep" => Some(StrategyMode::CashFlowSweep),
            "paycheckparking" | "paycheck-parking" | "parking" => Some(StrategyMode::PaycheckParking),
            _ => None,
        }
    }
}

/// Revolving credit line used for chunking
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineOfCreditParameters {
    /// Credit limit
    pub limit: f64,

    /// Annual rate on the drawn balance as a percentage
    pub annual_rate_percent: f64,

    /// Lump sum moved onto the mortgage each time the line is clear
    pub chunk_size: f64,

    #[serde(default)]
    pub strategy_mode: StrategyMode,
}

impl LineOfCreditParameters {
    pub fn validate(&self) -> Result<(), SimulationError> {
        for (name, value) in [
            ("limit", self.limit),
            ("annual rate", self.annual_rate_percent),
            ("chunk size", self.chunk_size),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(SimulationError::InvalidLineOfCreditParameters(format!(
                    "{} must not be negative, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }

    pub fn monthly_rate(&self) -> f64 {
        self.annual_rate_percent / 100.0 / MONTHS_PER_YEAR as f64
    }

    /// Whether a chunk can ever be drawn against this line
    pub fn chunking_enabled(&self) -> bool {
        self.chunk_size > 0.0 && self.chunk_size <= self.limit
    }
}

/// A complete parameter tuple for one comparison run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub scenario_id: u32,
    pub loan: LoanParameters,
    pub budget: BudgetParameters,
    pub line_of_credit: LineOfCreditParameters,
}

impl Scenario {
    /// Validate every parameter group, loan first
    pub fn validate(&self) -> Result<(), SimulationError> {
        self.loan.validate()?;
        self.budget.validate()?;
        self.line_of_credit.validate()
    }
}

impl Default for Scenario {
    /// The calculator's starting inputs: a 300k, 5.5%, 30-year mortgage with
    /// 6k income, 4k expenses and a 20k line at 7% chunked in 10k steps
    fn default() -> Self {
        Self {
            scenario_id: 0,
            loan: LoanParameters {
                principal: 300_000.0,
                annual_rate_percent: 5.5,
                term_years: 30,
            },
            budget: BudgetParameters {
                monthly_income: 6_000.0,
                monthly_expenses: 4_000.0,
                growth_enabled: false,
                annual_income_growth_percent: 3.0,
                annual_expense_growth_percent: 2.0,
            },
            line_of_credit: LineOfCreditParameters {
                limit: 20_000.0,
                annual_rate_percent: 7.0,
                chunk_size: 10_000.0,
                strategy_mode: StrategyMode::CashFlowSweep,
            },
        }
    }
}
