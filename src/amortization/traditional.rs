//! Fixed-payment (EMI) strategy

use log::warn;

use super::engine::{Amortizer, SimulationConfig, Strategy};
use super::payment::{ensure_amortizing, monthly_payment};
use super::schedule::{MonthlyRecord, PayoffStatus, ScheduleRecorder, StrategyResult};
use super::state::BalanceState;
use crate::error::SimulationError;
use crate::loan::LoanParameters;

/// Pays the same annuity amount every month until the balance reaches zero
#[derive(Debug, Clone)]
pub struct TraditionalAmortizer {
    loan: LoanParameters,
    payment: f64,
}

impl TraditionalAmortizer {
    /// Amortizer paying the standard annuity payment for the loan
    pub fn new(loan: LoanParameters) -> Result<Self, SimulationError> {
        loan.validate()?;
        Self::with_payment(loan, monthly_payment(&loan))
    }

    /// Amortizer paying a caller-chosen monthly amount
    pub fn with_payment(loan: LoanParameters, payment: f64) -> Result<Self, SimulationError> {
        loan.validate()?;
        ensure_amortizing(&loan, payment)?;
        Ok(Self { loan, payment })
    }
}

impl Amortizer for TraditionalAmortizer {
    fn strategy(&self) -> Strategy {
        Strategy::Traditional
    }

    fn base_payment(&self) -> f64 {
        self.payment
    }

    fn amortize(&self, config: &SimulationConfig) -> StrategyResult {
        let rate = self.loan.monthly_rate();
        let term_months = self.loan.num_payments();
        let mut state = BalanceState::new(self.loan.principal);
        let mut recorder = ScheduleRecorder::new(Strategy::Traditional, self.loan.principal, self.payment, config);

        while state.month < term_months && !state.mortgage_paid() {
            state.advance_month();

            let interest = state.mortgage_balance * rate;
            let principal = state.pay_mortgage(self.payment - interest);

            let mut row = MonthlyRecord::new(state.month);
            row.interest = interest;
            row.mortgage_interest = interest;
            row.principal = principal;
            row.principal_from_base = principal;
            row.ending_balance = state.mortgage_balance;
            recorder.record(row);
        }

        let status = if state.mortgage_paid() {
            PayoffStatus::PaidOff
        } else {
            warn!(
                "Traditional schedule ended at month {} with {:.2} still owed",
                state.month, state.mortgage_balance
            );
            PayoffStatus::TermExhausted {
                residual_balance: state.mortgage_balance,
            }
        };

        recorder.finish(status, None)
    }
}
