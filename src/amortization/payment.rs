//! Fixed annuity payment (EMI)

use crate::error::SimulationError;
use crate::loan::LoanParameters;

/// Monthly annuity payment for a principal, annual rate (percent) and term.
///
/// Uses the standard amortization formula:
/// EMI = P × i × (1 + i)^n / [(1 + i)^n - 1]
///
/// Where:
/// - P = principal
/// - i = monthly rate (annual_rate_percent / 100 / 12)
/// - n = number of monthly payments (term_years × 12)
///
/// A zero rate degenerates to straight-line repayment, P / n. Rates too
/// small to move `(1 + i)^n` converge on the same value.
pub fn annuity_payment(principal: f64, annual_rate_percent: f64, term_years: u32) -> Result<f64, SimulationError> {
    let loan = LoanParameters::new(principal, annual_rate_percent, term_years)?;
    Ok(monthly_payment(&loan))
}

/// Annuity payment for already validated loan terms
pub fn monthly_payment(loan: &LoanParameters) -> f64 {
    let i = loan.monthly_rate();
    let n = loan.num_payments() as f64;

    // (1 + i)^n - 1, computed without cancellation for very small rates
    let growth = (n * i.ln_1p()).exp_m1();
    if i == 0.0 || growth <= 0.0 {
        return loan.principal / n;
    }

    loan.principal * i * (1.0 + growth) / growth
}

/// Reject a payment that cannot get ahead of the first month's interest
pub fn ensure_amortizing(loan: &LoanParameters, payment: f64) -> Result<(), SimulationError> {
    let interest = loan.principal * loan.monthly_rate();
    if !payment.is_finite() || payment <= interest || payment <= 0.0 {
        return Err(SimulationError::NonAmortizingPayment { payment, interest });
    }
    Ok(())
}
