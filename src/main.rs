//! Loan Velocity CLI
//!
//! Compares the traditional, extra-payment and line-of-credit payoff
//! strategies for a single scenario.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use loan_velocity::loan::load_scenario_json;
use loan_velocity::{Scenario, ScenarioRunner, SimulationConfig, Strategy, StrategyComparison, StrategyMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(
    name = "loan_velocity",
    about = "Compare EMI, extra-payment and line-of-credit mortgage payoff strategies"
)]
struct Cli {
    #[arg(long, help = "JSON scenario file; individual flags override its values")]
    scenario: Option<PathBuf>,
    #[arg(long)]
    principal: Option<f64>,
    #[arg(long, help = "Annual mortgage rate in percent")]
    rate: Option<f64>,
    #[arg(long)]
    term_years: Option<u32>,
    #[arg(long)]
    income: Option<f64>,
    #[arg(long)]
    expenses: Option<f64>,
    #[arg(long, help = "Grow income and expenses annually")]
    growth: bool,
    #[arg(long, help = "Annual income growth in percent")]
    income_growth: Option<f64>,
    #[arg(long, help = "Annual expense growth in percent")]
    expense_growth: Option<f64>,
    #[arg(long)]
    loc_limit: Option<f64>,
    #[arg(long, help = "Annual credit line rate in percent")]
    loc_rate: Option<f64>,
    #[arg(long)]
    chunk_size: Option<f64>,
    #[arg(long, help = "Credit line policy: sweep or parking")]
    mode: Option<String>,
    #[arg(long, help = "First payment date (YYYY-MM-DD) for calendar labels")]
    start_date: Option<NaiveDate>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    #[arg(long, help = "Directory to write one schedule CSV per strategy")]
    schedule_dir: Option<PathBuf>,
}

impl Cli {
    fn scenario(&self) -> Result<Scenario> {
        let mut scenario = match &self.scenario {
            Some(path) => load_scenario_json(path)
                .with_context(|| format!("Failed to load scenario from {}", path.display()))?,
            None => Scenario::default(),
        };

        let loan = &mut scenario.loan;
        loan.principal = self.principal.unwrap_or(loan.principal);
        loan.annual_rate_percent = self.rate.unwrap_or(loan.annual_rate_percent);
        loan.term_years = self.term_years.unwrap_or(loan.term_years);

        let budget = &mut scenario.budget;
        budget.monthly_income = self.income.unwrap_or(budget.monthly_income);
        budget.monthly_expenses = self.expenses.unwrap_or(budget.monthly_expenses);
        budget.growth_enabled |= self.growth;
        budget.annual_income_growth_percent = self.income_growth.unwrap_or(budget.annual_income_growth_percent);
        budget.annual_expense_growth_percent = self.expense_growth.unwrap_or(budget.annual_expense_growth_percent);

        let line = &mut scenario.line_of_credit;
        line.limit = self.loc_limit.unwrap_or(line.limit);
        line.annual_rate_percent = self.loc_rate.unwrap_or(line.annual_rate_percent);
        line.chunk_size = self.chunk_size.unwrap_or(line.chunk_size);
        if let Some(mode) = &self.mode {
            line.strategy_mode =
                StrategyMode::parse(mode).ok_or_else(|| anyhow!("Unknown credit line mode '{}'", mode))?;
        }

        Ok(scenario)
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let scenario = cli.scenario()?;

    let runner = ScenarioRunner::new(SimulationConfig {
        start_date: cli.start_date,
        ..SimulationConfig::default()
    });
    let comparison = runner.run(&scenario).context("Simulation failed")?;

    match cli.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&comparison)?),
        OutputFormat::Text => print_summary(&scenario, &comparison),
    }

    if let Some(dir) = &cli.schedule_dir {
        write_schedules(dir, &comparison)?;
    }

    Ok(())
}

fn print_summary(scenario: &Scenario, comparison: &StrategyComparison) {
    println!("Loan Velocity v0.1.0");
    println!("====================\n");

    println!("Mortgage:");
    println!("  Principal: ${:.2}", scenario.loan.principal);
    println!("  Rate: {:.3}%", scenario.loan.annual_rate_percent);
    println!("  Term: {} years", scenario.loan.term_years);
    println!("  Monthly Payment: ${:.2}", comparison.traditional.base_payment);
    println!(
        "  Cash Flow: ${:.2} (growth {})",
        scenario.budget.available(),
        if scenario.budget.growth_enabled { "on" } else { "off" }
    );
    println!(
        "  Credit Line: ${:.0} at {:.2}%, chunk ${:.0}, {}",
        scenario.line_of_credit.limit,
        scenario.line_of_credit.annual_rate_percent,
        scenario.line_of_credit.chunk_size,
        scenario.line_of_credit.strategy_mode.as_str()
    );
    println!();

    println!(
        "{:<16} {:>8} {:>8} {:>16} {:>16} {:>16}",
        "Strategy", "Months", "Years", "Total Interest", "Total Paid", "Savings"
    );
    println!("{}", "-".repeat(86));

    for strategy in Strategy::ALL {
        let result = comparison.result(strategy);
        println!(
            "{:<16} {:>8} {:>8.1} {:>16.2} {:>16.2} {:>16.2}",
            strategy.label(),
            result.payoff_months,
            result.payoff_years(),
            result.total_interest,
            result.total_payments,
            comparison.interest_savings(strategy),
        );
        if !result.status.is_paid_off() {
            println!("  ! {:?}", result.status);
        }
    }

    if let Some(line) = &comparison.line_of_credit.line_of_credit {
        println!("\nCredit Line:");
        println!("  Chunks: {} (${:.2} total)", line.chunks_applied, line.total_chunked);
        println!("  Mortgage Interest: ${:.2}", line.mortgage_interest);
        println!("  Line Interest: ${:.2}", line.loc_interest);
        println!("  Peak Balance: ${:.2}", line.peak_loc_balance);
        if line.months_over_limit > 0 {
            println!("  Months Over Limit: {}", line.months_over_limit);
        }
        if line.total_unfunded_draw > 0.0 {
            println!("  Unfunded Draws: ${:.2}", line.total_unfunded_draw);
        }
    }

    println!("\nBest Strategy: {}", comparison.best_strategy().label());
}

fn schedule_file_name(strategy: Strategy) -> &'static str {
    match strategy {
        Strategy::Traditional => "traditional_schedule.csv",
        Strategy::ExtraPayment => "extra_payment_schedule.csv",
        Strategy::LineOfCredit => "line_of_credit_schedule.csv",
    }
}

fn write_schedules(dir: &Path, comparison: &StrategyComparison) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;

    for strategy in Strategy::ALL {
        let path = dir.join(schedule_file_name(strategy));
        let mut writer =
            csv::Writer::from_path(&path).with_context(|| format!("Failed to create {}", path.display()))?;
        for row in &comparison.result(strategy).records {
            writer.serialize(row)?;
        }
        writer.flush()?;
        println!("Schedule written to: {}", path.display());
    }

    Ok(())
}
