//! Balance state carried from month to month during a simulation

/// Balances below half a cent are treated as paid off.
///
/// The final annuity payment can leave floating-point dust behind; it is
/// settled into that payment so the schedule closes at exactly zero.
pub const BALANCE_EPSILON: f64 = 0.005;

/// Clamp a currency amount at zero, dropping sub-cent dust
pub fn settle(amount: f64) -> f64 {
    if amount < BALANCE_EPSILON {
        0.0
    } else {
        amount
    }
}

/// Mortgage and credit line balances at a point in the simulation
#[derive(Debug, Clone)]
pub struct BalanceState {
    /// Current simulation month (0 before the first month, then 1-indexed)
    pub month: u32,

    /// Outstanding mortgage principal
    pub mortgage_balance: f64,

    /// Drawn line of credit balance
    pub loc_balance: f64,
}

impl BalanceState {
    /// Initialize state at simulation start
    pub fn new(principal: f64) -> Self {
        Self {
            month: 0,
            mortgage_balance: principal,
            loc_balance: 0.0,
        }
    }

    /// Advance to next month
    pub fn advance_month(&mut self) {
        self.month += 1;
    }

    /// Apply up to `amount` of principal to the mortgage.
    ///
    /// Returns the principal actually applied, which never exceeds the
    /// outstanding balance and is never negative.
    pub fn pay_mortgage(&mut self, amount: f64) -> f64 {
        let mut applied = amount.max(0.0).min(self.mortgage_balance);
        let remaining = settle(self.mortgage_balance - applied);
        if remaining == 0.0 {
            applied = self.mortgage_balance;
        }
        self.mortgage_balance = remaining;
        applied
    }

    /// Move a chunk from the credit line onto the mortgage.
    ///
    /// The transfer is capped at the outstanding mortgage; returns the amount
    /// moved.
    pub fn transfer_chunk(&mut self, chunk: f64) -> f64 {
        let applied = self.pay_mortgage(chunk);
        self.loc_balance += applied;
        applied
    }

    pub fn set_loc_balance(&mut self, balance: f64) {
        self.loc_balance = settle(balance);
    }

    pub fn mortgage_paid(&self) -> bool {
        self.mortgage_balance == 0.0
    }

    /// Both the mortgage and the credit line are cleared
    pub fn is_settled(&self) -> bool {
        self.mortgage_balance == 0.0 && self.loc_balance == 0.0
    }
}
