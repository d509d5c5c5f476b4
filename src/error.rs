//! Error types for parameter validation, simulation and scenario loading

use thiserror::Error;

/// Failures that stop a simulation before its first month
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    #[error("invalid loan parameters: {0}")]
    InvalidLoanParameters(String),

    #[error("invalid budget parameters: {0}")]
    InvalidBudgetParameters(String),

    #[error("invalid line of credit parameters: {0}")]
    InvalidLineOfCreditParameters(String),

    /// The base payment never gets ahead of interest, so the balance cannot fall
    #[error("payment of {payment:.2} does not exceed first month's interest of {interest:.2}")]
    NonAmortizingPayment { payment: f64, interest: f64 },
}

/// Failures while reading scenarios from disk
#[derive(Debug, Error)]
pub enum ScenarioLoadError {
    #[error("failed to read scenario file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed scenario sheet: {0}")]
    Csv(#[from] csv::Error),

    #[error("malformed scenario document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("scenario {scenario_id}: unknown {field} value '{value}'")]
    UnknownValue {
        scenario_id: u32,
        field: &'static str,
        value: String,
    },

    #[error("scenario {scenario_id}: {source}")]
    Invalid {
        scenario_id: u32,
        #[source]
        source: SimulationError,
    },
}
