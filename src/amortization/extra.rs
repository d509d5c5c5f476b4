//! Base payment plus extra principal from free monthly cash flow

use log::{debug, warn};

use super::engine::{Amortizer, SimulationConfig, Strategy};
use super::payment::{ensure_amortizing, monthly_payment};
use super::schedule::{MonthlyRecord, PayoffStatus, ScheduleRecorder, StrategyResult};
use super::state::BalanceState;
use crate::budget::BudgetProjection;
use crate::error::SimulationError;
use crate::loan::LoanParameters;

/// Pays the annuity amount plus whatever cash flow is left over after it.
///
/// The base payment is fixed for the life of the loan; the extra component is
/// re-read from the budget projection every month, so it grows or shrinks
/// with income and expenses.
#[derive(Debug, Clone)]
pub struct ExtraPaymentAmortizer<'a> {
    loan: LoanParameters,
    base_payment: f64,
    projection: &'a BudgetProjection,
}

impl<'a> ExtraPaymentAmortizer<'a> {
    pub fn new(loan: LoanParameters, projection: &'a BudgetProjection) -> Result<Self, SimulationError> {
        loan.validate()?;
        Self::with_base_payment(loan, monthly_payment(&loan), projection)
    }

    pub fn with_base_payment(
        loan: LoanParameters,
        base_payment: f64,
        projection: &'a BudgetProjection,
    ) -> Result<Self, SimulationError> {
        loan.validate()?;
        ensure_amortizing(&loan, base_payment)?;
        Ok(Self {
            loan,
            base_payment,
            projection,
        })
    }

    /// Extra principal available in a month: cash flow beyond the base payment
    pub fn extra_for_month(&self, month: u32) -> f64 {
        (self.projection.budget_for_month(month).available - self.base_payment).max(0.0)
    }
}

impl Amortizer for ExtraPaymentAmortizer<'_> {
    fn strategy(&self) -> Strategy {
        Strategy::ExtraPayment
    }

    fn base_payment(&self) -> f64 {
        self.base_payment
    }

    fn amortize(&self, config: &SimulationConfig) -> StrategyResult {
        let rate = self.loan.monthly_rate();
        let term_months = self.loan.num_payments();
        let mut state = BalanceState::new(self.loan.principal);
        let mut recorder =
            ScheduleRecorder::new(Strategy::ExtraPayment, self.loan.principal, self.base_payment, config);

        debug!(
            "Extra payment schedule: base {:.2}, opening extra {:.2}",
            self.base_payment,
            self.extra_for_month(1)
        );

        while state.month < term_months && !state.mortgage_paid() {
            state.advance_month();

            let available = self.projection.budget_for_month(state.month).available;
            let extra = (available - self.base_payment).max(0.0);

            let interest = state.mortgage_balance * rate;
            let from_base = state.pay_mortgage(self.base_payment - interest);
            let from_extra = state.pay_mortgage(extra);

            let mut row = MonthlyRecord::new(state.month);
            row.interest = interest;
            row.mortgage_interest = interest;
            row.principal_from_base = from_base;
            row.principal_from_extra = from_extra;
            row.principal = from_base + from_extra;
            row.available_cash = available;
            row.ending_balance = state.mortgage_balance;
            recorder.record(row);
        }

        let status = if state.mortgage_paid() {
            PayoffStatus::PaidOff
        } else {
            warn!(
                "Extra payment schedule ended at month {} with {:.2} still owed",
                state.month, state.mortgage_balance
            );
            PayoffStatus::TermExhausted {
                residual_balance: state.mortgage_balance,
            }
        };

        recorder.finish(status, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amortization::TraditionalAmortizer;
    use crate::loan::BudgetParameters;
    use approx::assert_abs_diff_eq;

    fn reference_loan() -> LoanParameters {
        LoanParameters::new(300_000.0, 5.5, 30).unwrap()
    }

    fn run(loan: LoanParameters, budget: BudgetParameters) -> StrategyResult {
        let projection = BudgetProjection::from_budget(&budget, loan.term_years).unwrap();
        ExtraPaymentAmortizer::new(loan, &projection)
            .unwrap()
            .amortize(&SimulationConfig::default())
    }

    #[test]
    fn test_no_spare_cash_matches_traditional() {
        let loan = reference_loan();
        let base = monthly_payment(&loan);
        // Nothing left over after the base payment, ever
        let extra = run(loan, BudgetParameters::flat(base, base));
        let traditional = TraditionalAmortizer::new(loan)
            .unwrap()
            .amortize(&SimulationConfig::default());

        assert_eq!(extra.payoff_months, traditional.payoff_months);
        assert_eq!(extra.balances, traditional.balances);
        assert_eq!(extra.total_interest, traditional.total_interest);
        assert!(extra.records.iter().all(|r| r.principal_from_extra == 0.0));
    }

    #[test]
    fn test_negative_cash_flow_is_no_extra() {
        let loan = reference_loan();
        let extra = run(loan, BudgetParameters::flat(3_000.0, 4_000.0));
        let traditional = TraditionalAmortizer::new(loan)
            .unwrap()
            .amortize(&SimulationConfig::default());

        assert_eq!(extra.balances, traditional.balances);
        assert!(extra.records[0].available_cash < 0.0);
    }

    #[test]
    fn test_spare_cash_shortens_payoff() {
        let loan = reference_loan();
        let result = run(loan, BudgetParameters::flat(6_000.0, 4_000.0));

        assert!(result.status.is_paid_off());
        assert!(result.payoff_months < 360);

        let first = &result.records[0];
        assert_abs_diff_eq!(first.principal_from_extra, 2_000.0 - 1703.37, epsilon = 0.01);
        assert_abs_diff_eq!(first.principal, first.principal_from_base + first.principal_from_extra);

        let principal: f64 = result.records.iter().map(|r| r.principal).sum();
        assert_abs_diff_eq!(principal, 300_000.0, epsilon = 0.03);
    }

    #[test]
    fn test_final_month_extra_is_capped() {
        let loan = reference_loan();
        let result = run(loan, BudgetParameters::flat(20_000.0, 4_000.0));
        let last = result.records.last().unwrap();

        assert_eq!(last.ending_balance, 0.0);
        assert!(last.principal_from_extra < 16_000.0 - 1703.37);
        assert!(result.balances.iter().all(|&b| b >= 0.0));
    }

    #[test]
    fn test_growth_increases_extra_over_time() {
        let loan = reference_loan();
        let flat = run(loan, BudgetParameters::flat(6_000.0, 4_000.0));
        let growing = run(loan, BudgetParameters::growing(6_000.0, 4_000.0, 3.0, 2.0));

        assert!(growing.payoff_months < flat.payoff_months);
        assert!(growing.total_interest < flat.total_interest);

        let early = growing.records[0].principal_from_extra;
        let later = growing.records[36].principal_from_extra;
        assert!(later > early, "Extra payment should grow with income");
    }
}
