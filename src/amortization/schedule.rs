//! Schedule output structures and the recorder that assembles them

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

use super::engine::{SimulationConfig, Strategy};
use crate::loan::{StrategyMode, MONTHS_PER_YEAR};

/// A single row of an amortization schedule for one month.
///
/// All strategies share this shape; fields a strategy never touches stay at
/// zero. Currency fields are unrounded amounts in the loan's currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyRecord {
    // Timing
    pub month: u32,
    pub calendar_label: String,

    // Interest charged this month
    pub interest: f64,
    pub mortgage_interest: f64,
    pub loc_interest: f64,

    // Mortgage principal reduction, by source
    pub principal: f64,
    pub principal_from_base: f64,
    pub principal_from_extra: f64,
    pub principal_from_chunk: f64,

    pub cumulative_interest: f64,

    /// Income less expenses for the month (cash-flow strategies only)
    pub available_cash: f64,

    // Ending balances
    pub ending_balance: f64,
    pub ending_loc_balance: f64,

    // Credit line movements
    pub loc_drawn: f64,
    pub loc_deposited: f64,
    pub unfunded_draw: f64,
    pub chunk_applied: bool,
}

impl MonthlyRecord {
    /// Create a new record with zeroed amounts
    pub fn new(month: u32) -> Self {
        Self {
            month,
            calendar_label: String::new(),
            interest: 0.0,
            mortgage_interest: 0.0,
            loc_interest: 0.0,
            principal: 0.0,
            principal_from_base: 0.0,
            principal_from_extra: 0.0,
            principal_from_chunk: 0.0,
            cumulative_interest: 0.0,
            available_cash: 0.0,
            ending_balance: 0.0,
            ending_loc_balance: 0.0,
            loc_drawn: 0.0,
            loc_deposited: 0.0,
            unfunded_draw: 0.0,
            chunk_applied: false,
        }
    }
}

/// How a simulation ended
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PayoffStatus {
    /// Every balance reached zero within the term
    PaidOff,
    /// The term ran out with mortgage principal still owed
    TermExhausted { residual_balance: f64 },
    /// The credit line strategy did not clear both balances within the term
    NonConvergent { mortgage_balance: f64, loc_balance: f64 },
}

impl PayoffStatus {
    pub fn is_paid_off(&self) -> bool {
        matches!(self, PayoffStatus::PaidOff)
    }
}

/// Credit line totals for the LOC strategy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineOfCreditSummary {
    pub strategy_mode: StrategyMode,
    pub mortgage_interest: f64,
    pub loc_interest: f64,
    /// Chunks transferred, including the opening one
    pub chunks_applied: u32,
    pub total_chunked: f64,
    pub peak_loc_balance: f64,
    /// Months ending with the line above its limit
    pub months_over_limit: u32,
    /// Paycheck-parking draws refused at the limit
    pub total_unfunded_draw: f64,
}

impl LineOfCreditSummary {
    pub fn new(strategy_mode: StrategyMode) -> Self {
        Self {
            strategy_mode,
            mortgage_interest: 0.0,
            loc_interest: 0.0,
            chunks_applied: 0,
            total_chunked: 0.0,
            peak_loc_balance: 0.0,
            months_over_limit: 0,
            total_unfunded_draw: 0.0,
        }
    }
}

/// Complete result of one strategy simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyResult {
    pub strategy: Strategy,
    pub principal: f64,
    /// Fixed annuity payment used by the strategy
    pub base_payment: f64,
    pub total_interest: f64,
    /// Interest plus the original principal
    pub total_payments: f64,
    pub payoff_months: u32,
    pub status: PayoffStatus,
    /// Mortgage balance by month, starting with the original principal
    pub balances: Vec<f64>,
    /// Monthly schedule (empty when detailed output is disabled)
    pub records: Vec<MonthlyRecord>,
    pub line_of_credit: Option<LineOfCreditSummary>,
}

impl StrategyResult {
    /// Payoff time in years
    pub fn payoff_years(&self) -> f64 {
        self.payoff_months as f64 / MONTHS_PER_YEAR as f64
    }

    /// Mortgage balance after the last simulated month
    pub fn final_balance(&self) -> f64 {
        self.balances.last().copied().unwrap_or(0.0)
    }
}

/// Produces the calendar label for a simulation month
#[derive(Debug, Clone, Copy)]
pub struct CalendarLabeler {
    start_date: Option<NaiveDate>,
}

impl CalendarLabeler {
    pub fn new(start_date: Option<NaiveDate>) -> Self {
        Self { start_date }
    }

    /// "Mar 2027" when a start date is known, otherwise "Year 1, Month 3"
    pub fn label(&self, month: u32) -> String {
        let offset = month.saturating_sub(1);
        if let Some(date) = self
            .start_date
            .and_then(|start| start.checked_add_months(Months::new(offset)))
        {
            return date.format("%b %Y").to_string();
        }
        format!(
            "Year {}, Month {}",
            offset / MONTHS_PER_YEAR + 1,
            offset % MONTHS_PER_YEAR + 1
        )
    }
}

/// Accumulates monthly records and balances into a [`StrategyResult`]
#[derive(Debug)]
pub struct ScheduleRecorder {
    strategy: Strategy,
    principal: f64,
    base_payment: f64,
    detailed_output: bool,
    labeler: CalendarLabeler,
    cumulative_interest: f64,
    months: u32,
    balances: Vec<f64>,
    records: Vec<MonthlyRecord>,
}

impl ScheduleRecorder {
    pub fn new(strategy: Strategy, principal: f64, base_payment: f64, config: &SimulationConfig) -> Self {
        Self {
            strategy,
            principal,
            base_payment,
            detailed_output: config.detailed_output,
            labeler: CalendarLabeler::new(config.start_date),
            cumulative_interest: 0.0,
            months: 0,
            balances: vec![principal],
            records: Vec::new(),
        }
    }

    /// Record a month: stamps the running interest total and calendar label
    pub fn record(&mut self, mut row: MonthlyRecord) {
        self.cumulative_interest += row.interest;
        self.months += 1;
        self.balances.push(row.ending_balance);

        if self.detailed_output {
            row.cumulative_interest = self.cumulative_interest;
            row.calendar_label = self.labeler.label(row.month);
            self.records.push(row);
        }
    }

    pub fn finish(self, status: PayoffStatus, line_of_credit: Option<LineOfCreditSummary>) -> StrategyResult {
        StrategyResult {
            strategy: self.strategy,
            principal: self.principal,
            base_payment: self.base_payment,
            total_interest: self.cumulative_interest,
            total_payments: self.cumulative_interest + self.principal,
            payoff_months: self.months,
            status,
            balances: self.balances,
            records: self.records,
            line_of_credit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_labels() {
        let labeler = CalendarLabeler::new(None);
        assert_eq!(labeler.label(1), "Year 1, Month 1");
        assert_eq!(labeler.label(12), "Year 1, Month 12");
        assert_eq!(labeler.label(13), "Year 2, Month 1");
    }

    #[test]
    fn test_dated_labels() {
        let start = NaiveDate::from_ymd_opt(2026, 11, 1).unwrap();
        let labeler = CalendarLabeler::new(Some(start));
        assert_eq!(labeler.label(1), "Nov 2026");
        assert_eq!(labeler.label(3), "Jan 2027");
    }

    #[test]
    fn test_recorder_accumulates() {
        let config = SimulationConfig::default();
        let mut recorder = ScheduleRecorder::new(Strategy::Traditional, 1_000.0, 510.0, &config);

        let mut first = MonthlyRecord::new(1);
        first.interest = 10.0;
        first.principal = 500.0;
        first.ending_balance = 500.0;
        recorder.record(first);

        let mut second = MonthlyRecord::new(2);
        second.interest = 5.0;
        second.principal = 500.0;
        recorder.record(second);

        let result = recorder.finish(PayoffStatus::PaidOff, None);
        assert_eq!(result.payoff_months, 2);
        assert_eq!(result.balances, vec![1_000.0, 500.0, 0.0]);
        assert_eq!(result.total_interest, 15.0);
        assert_eq!(result.total_payments, 1_015.0);
        assert_eq!(result.records[1].cumulative_interest, 15.0);
        assert_eq!(result.records[1].calendar_label, "Year 1, Month 2");
    }

    #[test]
    fn test_summary_only_output() {
        let config = SimulationConfig {
            detailed_output: false,
            ..SimulationConfig::default()
        };
        let mut recorder = ScheduleRecorder::new(Strategy::Traditional, 1_000.0, 1_000.0, &config);
        recorder.record(MonthlyRecord::new(1));

        let result = recorder.finish(PayoffStatus::PaidOff, None);
        assert!(result.records.is_empty());
        assert_eq!(result.balances.len(), 2);
        assert_eq!(result.payoff_months, 1);
    }
}
