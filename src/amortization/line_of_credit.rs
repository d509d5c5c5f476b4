//! Line of credit chunking (velocity banking) strategy
//!
//! Two balances evolve together: the mortgage and a revolving credit line. A
//! chunk drawn from the line is applied to mortgage principal up front; the
//! line is then worked back down, and each time it is clear another chunk is
//! drawn. How the line is worked down depends on the [`StrategyMode`]:
//!
//! - **CashFlowSweep**: cash left after the mortgage payment repays the line.
//!   The line never grows between chunks beyond the month's interest.
//! - **PaycheckParking**: income is deposited onto the line and expenses plus
//!   the mortgage payment are drawn from it, so utilization can rise as well
//!   as fall. A draw that would push the line past its limit is refused and
//!   reported as unfunded. Interest is never refused, so a line held at its
//!   limit can end the month above it; such months are counted.

use log::{debug, warn};

use super::engine::{Amortizer, SimulationConfig, Strategy};
use super::payment::{ensure_amortizing, monthly_payment};
use super::schedule::{LineOfCreditSummary, MonthlyRecord, PayoffStatus, ScheduleRecorder, StrategyResult};
use super::state::{settle, BalanceState, BALANCE_EPSILON};
use crate::budget::{BudgetProjection, MonthlyBudget};
use crate::error::SimulationError;
use crate::loan::{LineOfCreditParameters, LoanParameters, StrategyMode};

/// Cash moving through the credit line in one month
#[derive(Debug, Clone, Copy, PartialEq)]
struct LineMovement {
    /// Line balance after the month's interest and movements
    balance: f64,
    deposited: f64,
    drawn: f64,
    /// Part of the requested draw refused at the limit
    unfunded: f64,
}

/// Inputs to one month's draw-down step
#[derive(Debug, Clone, Copy)]
struct MonthFlows {
    budget: MonthlyBudget,
    /// Mandatory mortgage interest plus principal paid this month
    mortgage_payment: f64,
    loc_interest: f64,
    limit: f64,
}

/// Run the month's draw-down policy against the current line balance
fn draw_down(mode: StrategyMode, loc_balance: f64, flows: &MonthFlows) -> LineMovement {
    match mode {
        StrategyMode::CashFlowSweep => sweep_step(loc_balance, flows),
        StrategyMode::PaycheckParking => parking_step(loc_balance, flows),
    }
}

fn sweep_step(loc_balance: f64, flows: &MonthFlows) -> LineMovement {
    let owed = loc_balance + flows.loc_interest;
    let remaining = flows.budget.available - flows.mortgage_payment;
    // Never more than owed, never more than the cash left, never a draw
    let payment = owed.min(remaining).max(0.0);

    LineMovement {
        balance: settle((owed - payment).max(0.0)),
        deposited: payment,
        drawn: 0.0,
        unfunded: 0.0,
    }
}

fn parking_step(loc_balance: f64, flows: &MonthFlows) -> LineMovement {
    let owed = loc_balance + flows.loc_interest;
    let deposit = flows.budget.income;
    let draw = flows.budget.expenses + flows.mortgage_payment;

    if draw > deposit {
        let shortfall = draw - deposit;
        let requested = owed + shortfall;
        // Only the new draw is refused at the limit; accrued interest stays owed
        let unfunded = (requested - flows.limit).clamp(0.0, shortfall);
        LineMovement {
            balance: settle(requested - unfunded),
            deposited: deposit,
            drawn: draw - unfunded,
            unfunded,
        }
    } else {
        LineMovement {
            balance: settle((owed - (deposit - draw)).max(0.0)),
            deposited: deposit,
            drawn: draw,
            unfunded: 0.0,
        }
    }
}

/// Mortgage paid down by chunks drawn from a revolving credit line
#[derive(Debug, Clone)]
pub struct LineOfCreditAmortizer<'a> {
    loan: LoanParameters,
    line: LineOfCreditParameters,
    base_payment: f64,
    projection: &'a BudgetProjection,
}

impl<'a> LineOfCreditAmortizer<'a> {
    pub fn new(
        loan: LoanParameters,
        line: LineOfCreditParameters,
        projection: &'a BudgetProjection,
    ) -> Result<Self, SimulationError> {
        loan.validate()?;
        Self::with_base_payment(loan, line, monthly_payment(&loan), projection)
    }

    pub fn with_base_payment(
        loan: LoanParameters,
        line: LineOfCreditParameters,
        base_payment: f64,
        projection: &'a BudgetProjection,
    ) -> Result<Self, SimulationError> {
        loan.validate()?;
        line.validate()?;
        ensure_amortizing(&loan, base_payment)?;
        Ok(Self {
            loan,
            line,
            base_payment,
            projection,
        })
    }
}

impl Amortizer for LineOfCreditAmortizer<'_> {
    fn strategy(&self) -> Strategy {
        Strategy::LineOfCredit
    }

    fn base_payment(&self) -> f64 {
        self.base_payment
    }

    fn amortize(&self, config: &SimulationConfig) -> StrategyResult {
        let mortgage_rate = self.loan.monthly_rate();
        let loc_rate = self.line.monthly_rate();
        let term_months = self.loan.num_payments();
        let chunking = self.line.chunking_enabled();

        let mut state = BalanceState::new(self.loan.principal);
        let mut summary = LineOfCreditSummary::new(self.line.strategy_mode);
        let mut recorder =
            ScheduleRecorder::new(Strategy::LineOfCredit, self.loan.principal, self.base_payment, config);

        // Opening chunk, reported with the first month
        let mut opening_chunk = 0.0;
        if chunking {
            opening_chunk = state.transfer_chunk(self.line.chunk_size);
            summary.chunks_applied += 1;
            summary.total_chunked += opening_chunk;
            summary.peak_loc_balance = state.loc_balance;
            debug!("Opening chunk of {:.2} applied to mortgage", opening_chunk);
        }

        while state.month < term_months && !state.is_settled() {
            state.advance_month();

            let budget = self.projection.budget_for_month(state.month);
            let mortgage_interest = state.mortgage_balance * mortgage_rate;
            let loc_interest = state.loc_balance * loc_rate;

            let mortgage_principal = state.pay_mortgage(self.base_payment - mortgage_interest);

            let flows = MonthFlows {
                budget,
                mortgage_payment: mortgage_interest + mortgage_principal,
                loc_interest,
                limit: self.line.limit,
            };
            let movement = draw_down(self.line.strategy_mode, state.loc_balance, &flows);
            state.set_loc_balance(movement.balance);

            let mut row = MonthlyRecord::new(state.month);
            row.interest = mortgage_interest + loc_interest;
            row.mortgage_interest = mortgage_interest;
            row.loc_interest = loc_interest;
            row.principal_from_base = mortgage_principal;
            row.available_cash = budget.available;
            row.loc_deposited = movement.deposited;
            row.loc_drawn = movement.drawn;
            row.unfunded_draw = movement.unfunded;

            if opening_chunk > 0.0 {
                row.chunk_applied = true;
                row.principal_from_chunk += opening_chunk;
                row.loc_drawn += opening_chunk;
                opening_chunk = 0.0;
            }

            if chunking && state.loc_balance == 0.0 && state.mortgage_balance > self.line.chunk_size {
                let chunk = state.transfer_chunk(self.line.chunk_size);
                row.chunk_applied = true;
                row.principal_from_chunk += chunk;
                row.loc_drawn += chunk;
                summary.chunks_applied += 1;
                summary.total_chunked += chunk;
                debug!(
                    "Month {}: chunk of {:.2} applied, mortgage now {:.2}",
                    state.month, chunk, state.mortgage_balance
                );
            }

            if movement.unfunded > 0.0 {
                summary.total_unfunded_draw += movement.unfunded;
                warn!(
                    "Month {}: {:.2} of draws refused at the {:.2} credit limit",
                    state.month, movement.unfunded, self.line.limit
                );
            }
            if state.loc_balance > self.line.limit + BALANCE_EPSILON {
                summary.months_over_limit += 1;
                warn!(
                    "Month {}: credit line at {:.2} exceeds its {:.2} limit",
                    state.month, state.loc_balance, self.line.limit
                );
            }

            summary.mortgage_interest += mortgage_interest;
            summary.loc_interest += loc_interest;
            summary.peak_loc_balance = summary.peak_loc_balance.max(state.loc_balance);

            row.principal = row.principal_from_base + row.principal_from_chunk;
            row.ending_balance = state.mortgage_balance;
            row.ending_loc_balance = state.loc_balance;
            recorder.record(row);
        }

        let status = if state.is_settled() {
            PayoffStatus::PaidOff
        } else {
            warn!(
                "Credit line strategy did not converge in {} months: mortgage {:.2}, line {:.2}",
                term_months, state.mortgage_balance, state.loc_balance
            );
            PayoffStatus::NonConvergent {
                mortgage_balance: state.mortgage_balance,
                loc_balance: state.loc_balance,
            }
        };

        recorder.finish(status, Some(summary))
    }
}
