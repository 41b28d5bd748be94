//! Growth rate needed for the invested differential to repay the alternative loan
//!
//! Two figures are produced: a quick closed-form estimate that ignores the
//! monthly contributions, and a bisection solve over the full contribution
//! stream.

use log::warn;

/// Monthly-rate search interval for the solver
const SOLVER_LOW: f64 = -0.05;
const SOLVER_HIGH: f64 = 0.10;

const SOLVER_TOLERANCE: f64 = 1e-12;
const SOLVER_MAX_ITERATIONS: usize = 200;

/// Quick estimate of the annual growth (percent) needed to reach `payment_amount`
///
/// Returns 0 when the simulated final balance already covers the payment. The
/// estimate compounds the start capital alone, so it overstates the rate
/// whenever contributions are positive. None when it cannot be computed.
pub fn estimate_minimum_growth_rate(
    final_balance: Option<f64>,
    payment_month: u32,
    payment_amount: f64,
    start_capital: f64,
) -> Option<f64> {
    if matches!(final_balance, Some(balance) if balance >= payment_amount) {
        return Some(0.0);
    }
    if start_capital <= 0.0 || payment_month == 0 {
        warn!(
            "Minimum growth rate not estimable (start capital {:.2}, payment month {})",
            start_capital, payment_month
        );
        return None;
    }

    let years_to_grow = payment_month as f64 / 12.0;
    let rate = (payment_amount / start_capital).powf(1.0 / years_to_grow) - 1.0;
    Some((rate * 100.0).max(0.0))
}

/// Future value at `payment_month` of the start capital plus monthly contributions
///
/// Contribution `i` (0-based, paid in month i+1) compounds for
/// `payment_month - (i + 1)` months, matching grow-then-contribute ordering.
fn future_value(start_capital: f64, contributions: &[f64], payment_month: u32, monthly_rate: f64) -> f64 {
    let growth = 1.0 + monthly_rate;
    let mut value = start_capital * growth.powi(payment_month as i32);
    for (idx, &contribution) in contributions.iter().enumerate().take(payment_month as usize) {
        value += contribution * growth.powi(payment_month as i32 - idx as i32 - 1);
    }
    value
}

/// Solve the annual growth rate (percent) at which start capital and
/// contributions compound to exactly `payment_amount` by `payment_month`
///
/// Bisection over monthly rates in [-5%, +10%]; None when the target is not
/// bracketed by that interval.
pub fn solve_required_growth_rate(
    start_capital: f64,
    contributions: &[f64],
    payment_month: u32,
    payment_amount: f64,
) -> Option<f64> {
    if payment_month == 0 {
        return None;
    }
    let gap = |rate: f64| future_value(start_capital, contributions, payment_month, rate) - payment_amount;

    let mut low = SOLVER_LOW;
    let mut high = SOLVER_HIGH;
    let mut gap_low = gap(low);
    let gap_high = gap(high);

    if !gap_low.is_finite() || !gap_high.is_finite() || gap_low * gap_high > 0.0 {
        warn!("Required growth rate not bracketed by monthly rates [{}, {}]", SOLVER_LOW, SOLVER_HIGH);
        return None;
    }

    for _ in 0..SOLVER_MAX_ITERATIONS {
        let mid = (low + high) / 2.0;
        let gap_mid = gap(mid);

        if gap_mid.abs() < SOLVER_TOLERANCE || (high - low) / 2.0 < SOLVER_TOLERANCE {
            return Some(((1.0 + mid).powi(12) - 1.0) * 100.0);
        }

        if gap_mid * gap_low < 0.0 {
            high = mid;
        } else {
            low = mid;
            gap_low = gap_mid;
        }
    }

    None
}
