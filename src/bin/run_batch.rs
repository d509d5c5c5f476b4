//! Run every scenario in a CSV sheet and write a strategy summary per scenario
//!
//! Usage: run_batch [scenarios.csv] [output.csv]

use std::time::Instant;

use anyhow::{Context, Result};
use log::warn;
use loan_velocity::loan::load_scenarios;
use loan_velocity::{PayoffStatus, ScenarioRunner, SimulationConfig, Strategy, StrategyComparison};
use serde::Serialize;

/// One output row per scenario and strategy
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct SummaryRow {
    #[serde(rename = "ScenarioID")]
    scenario_id: u32,
    strategy: &'static str,
    payoff_months: u32,
    payoff_years: f64,
    total_interest: f64,
    total_payments: f64,
    interest_savings: f64,
    months_saved: i64,
    status: &'static str,
    chunks_applied: u32,
    peak_loc_balance: f64,
}

fn status_name(status: &PayoffStatus) -> &'static str {
    match status {
        PayoffStatus::PaidOff => "PaidOff",
        PayoffStatus::TermExhausted { .. } => "TermExhausted",
        PayoffStatus::NonConvergent { .. } => "NonConvergent",
    }
}

fn summary_rows(comparison: &StrategyComparison) -> impl Iterator<Item = SummaryRow> + '_ {
    Strategy::ALL.into_iter().map(move |strategy| {
        let result = comparison.result(strategy);
        let line = result.line_of_credit.as_ref();
        SummaryRow {
            scenario_id: comparison.scenario_id,
            strategy: strategy.label(),
            payoff_months: result.payoff_months,
            payoff_years: result.payoff_years(),
            total_interest: result.total_interest,
            total_payments: result.total_payments,
            interest_savings: comparison.interest_savings(strategy),
            months_saved: comparison.months_saved(strategy),
            status: status_name(&result.status),
            chunks_applied: line.map_or(0, |l| l.chunks_applied),
            peak_loc_balance: line.map_or(0.0, |l| l.peak_loc_balance),
        }
    })
}

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let input_path = args.next().unwrap_or_else(|| "scenarios.csv".to_string());
    let output_path = args.next().unwrap_or_else(|| "batch_summary.csv".to_string());

    let start = Instant::now();
    println!("Loading scenarios from {}...", input_path);

    let scenarios = load_scenarios(&input_path).with_context(|| format!("Failed to load {}", input_path))?;
    println!("Loaded {} scenarios in {:?}", scenarios.len(), start.elapsed());

    // Schedules are not needed for the summary
    let runner = ScenarioRunner::new(SimulationConfig {
        detailed_output: false,
        ..SimulationConfig::default()
    });

    println!("Running simulations...");
    let sim_start = Instant::now();
    let results = runner.run_batch(&scenarios);
    println!("Simulations complete in {:?}", sim_start.elapsed());

    let mut writer =
        csv::Writer::from_path(&output_path).with_context(|| format!("Failed to create {}", output_path))?;

    let mut failed = 0;
    let mut loc_wins = 0;
    for (scenario, result) in scenarios.iter().zip(&results) {
        match result {
            Ok(comparison) => {
                if comparison.best_strategy() == Strategy::LineOfCredit {
                    loc_wins += 1;
                }
                for row in summary_rows(comparison) {
                    writer.serialize(row)?;
                }
            }
            Err(e) => {
                warn!("Scenario {} skipped: {}", scenario.scenario_id, e);
                failed += 1;
            }
        }
    }
    writer.flush()?;

    println!("Output written to {}", output_path);

    println!("\nBatch Summary:");
    println!("  Scenarios: {}", scenarios.len());
    println!("  Failed: {}", failed);
    println!("  Credit line cheapest: {}", loc_wins);
    println!("\nTotal time: {:?}", start.elapsed());

    Ok(())
}
