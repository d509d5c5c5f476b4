//! Load scenarios from a CSV scenario sheet or a JSON document

use super::{BudgetParameters, LineOfCreditParameters, LoanParameters, Scenario, StrategyMode};
use crate::error::ScenarioLoadError;
use csv::Reader;
use std::fs::File;
use std::path::Path;

/// Raw CSV row matching the scenario sheet columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "ScenarioID")]
    scenario_id: u32,
    #[serde(rename = "Principal")]
    principal: f64,
    #[serde(rename = "AnnualRate")]
    annual_rate: f64,
    #[serde(rename = "TermYears")]
    term_years: u32,
    #[serde(rename = "MonthlyIncome")]
    monthly_income: f64,
    #[serde(rename = "MonthlyExpenses")]
    monthly_expenses: f64,
    #[serde(rename = "GrowthEnabled")]
    growth_enabled: String,
    #[serde(rename = "IncomeGrowth", default)]
    income_growth: f64,
    #[serde(rename = "ExpenseGrowth", default)]
    expense_growth: f64,
    #[serde(rename = "LocLimit")]
    loc_limit: f64,
    #[serde(rename = "LocRate")]
    loc_rate: f64,
    #[serde(rename = "ChunkSize")]
    chunk_size: f64,
    #[serde(rename = "StrategyMode")]
    strategy_mode: String,
}

impl CsvRow {
    fn to_scenario(self) -> Result<Scenario, ScenarioLoadError> {
        let growth_enabled = match self.growth_enabled.trim().to_ascii_uppercase().as_str() {
            "Y" | "YES" | "TRUE" | "1" => true,
            "N" | "NO" | "FALSE" | "0" | "" => false,
            _ => {
                return Err(ScenarioLoadError::UnknownValue {
                    scenario_id: self.scenario_id,
                    field: "GrowthEnabled",
                    value: self.growth_enabled,
                })
            }
        };

        let strategy_mode = StrategyMode::parse(&self.strategy_mode).ok_or_else(|| {
            ScenarioLoadError::UnknownValue {
                scenario_id: self.scenario_id,
                field: "StrategyMode",
                value: self.strategy_mode.clone(),
            }
        })?;

        let scenario = Scenario {
            scenario_id: self.scenario_id,
            loan: LoanParameters {
                principal: self.principal,
                annual_rate_percent: self.annual_rate,
                term_years: self.term_years,
            },
            budget: BudgetParameters {
                monthly_income: self.monthly_income,
                monthly_expenses: self.monthly_expenses,
                growth_enabled,
                annual_income_growth_percent: self.income_growth,
                annual_expense_growth_percent: self.expense_growth,
            },
            line_of_credit: LineOfCreditParameters {
                limit: self.loc_limit,
                annual_rate_percent: self.loc_rate,
                chunk_size: self.chunk_size,
                strategy_mode,
            },
        };

        scenario.validate().map_err(|source| ScenarioLoadError::Invalid {
            scenario_id: scenario.scenario_id,
            source,
        })?;

        Ok(scenario)
    }
}

/// Load all scenarios from a CSV file
pub fn load_scenarios<P: AsRef<Path>>(path: P) -> Result<Vec<Scenario>, ScenarioLoadError> {
    let file = File::open(path)?;
    load_scenarios_from_reader(file)
}

/// Load scenarios from any reader (e.g., string buffer, stdin)
pub fn load_scenarios_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<Scenario>, ScenarioLoadError> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut scenarios = Vec::new();

    for result in csv_reader.deserialize() {
        let row: CsvRow = result?;
        scenarios.push(row.to_scenario()?);
    }

    Ok(scenarios)
}

/// Load a single scenario from a JSON document
pub fn load_scenario_json<P: AsRef<Path>>(path: P) -> Result<Scenario, ScenarioLoadError> {
    let file = File::open(path)?;
    let scenario: Scenario = serde_json::from_reader(file)?;
    scenario.validate().map_err(|source| ScenarioLoadError::Invalid {
        scenario_id: scenario.scenario_id,
        source,
    })?;
    Ok(scenario)
}
