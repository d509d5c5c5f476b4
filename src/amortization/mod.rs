//! Month-by-month payoff simulation for each strategy

mod engine;
mod extra;
mod line_of_credit;
mod payment;
mod schedule;
mod state;
mod traditional;

pub use engine::{Amortizer, SimulationConfig, Strategy};
pub use extra::ExtraPaymentAmortizer;
pub use line_of_credit::LineOfCreditAmortizer;
pub use payment::{annuity_payment, ensure_amortizing, monthly_payment};
pub use schedule::{
    CalendarLabeler, LineOfCreditSummary, MonthlyRecord, PayoffStatus, ScheduleRecorder, StrategyResult,
};
pub use state::{settle, BalanceState, BALANCE_EPSILON};
pub use traditional::TraditionalAmortizer;
