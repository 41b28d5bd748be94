//! Core amortization engine for monthly loan repayment schedules

use log::debug;
use std::collections::BTreeMap;

use super::annual::aggregate_annual;
use super::params::{LoanParameters, LoanType, ModularSchedule};
use super::records::{LoanCalculationResult, LoanStatistics, MonthlyLoanRecord};
use super::state::AmortizationState;
use crate::config::SimulationConfig;
use crate::error::{Result, SimulationError};

/// Level payment of an annuity: PMT = P * r(1+r)^n / ((1+r)^n - 1)
///
/// Falls back to straight-line repayment P / n when the rate is zero.
pub fn annuity_payment(principal: f64, monthly_rate: f64, months: u32) -> f64 {
    if months == 0 {
        return 0.0;
    }
    if monthly_rate > 0.0 {
        let growth = (1.0 + monthly_rate).powi(months as i32);
        principal * (monthly_rate * growth) / (growth - 1.0)
    } else {
        principal / months as f64
    }
}

/// Main amortization engine
#[derive(Debug, Clone, Default)]
pub struct LoanEngine {
    config: SimulationConfig,
}

impl LoanEngine {
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Generate the monthly and annual schedule plus statistics for one loan
    ///
    /// A modular loan needs a schedule; months missing from it repay no principal.
    /// Schedules passed with other loan types are ignored.
    pub fn amortize(
        &self,
        params: &LoanParameters,
        schedule: Option<&ModularSchedule>,
    ) -> Result<LoanCalculationResult> {
        params.validate()?;

        let scheduled = match (params.loan_type, schedule) {
            (LoanType::Modular, None) => return Err(SimulationError::MissingSchedule),
            (LoanType::Modular, Some(schedule)) => {
                schedule.validate()?;
                let amounts = schedule.amounts_by_month();
                if let Some((&last, _)) = amounts.iter().next_back() {
                    if last > params.total_months() {
                        debug!(
                            "Ignoring schedule entries after month {} (last entry: month {})",
                            params.total_months(),
                            last
                        );
                    }
                }
                amounts
            }
            _ => BTreeMap::new(),
        };

        let monthly_data = self.run_schedule(params, &scheduled);
        let annual_data = aggregate_annual(&monthly_data);
        let statistics = LoanStatistics::from_monthly(&monthly_data);

        debug!(
            "Amortized {:?} loan of {:.2} over {} months: interest {:.2}, insurance {:.2}",
            params.loan_type,
            params.principal,
            monthly_data.len(),
            statistics.total_interest_paid,
            statistics.total_insurance_paid
        );

        Ok(LoanCalculationResult {
            monthly_data,
            annual_data,
            statistics,
        })
    }

    /// Monthly credit insurance premium: flat rate on the original principal
    pub fn monthly_insurance_premium(&self, params: &LoanParameters) -> f64 {
        params.principal * self.config.credit_insurance_annual_rate * params.insurance_coverage_pct / 12.0
    }

    fn run_schedule(&self, params: &LoanParameters, scheduled: &BTreeMap<u32, f64>) -> Vec<MonthlyLoanRecord> {
        let monthly_rate = params.monthly_rate();
        let total_months = params.total_months();
        let tolerance = self.config.payoff_tolerance;

        let level_payment = match params.loan_type {
            LoanType::Annuity => annuity_payment(
                params.principal,
                monthly_rate,
                total_months - params.delay_months,
            ),
            LoanType::Bullet | LoanType::Modular => 0.0,
        };
        let insurance = self.monthly_insurance_premium(params);

        let mut state = AmortizationState::new(params.principal);
        let mut rows = Vec::with_capacity(total_months as usize);

        for month in 1..=total_months {
            state.advance_month();

            let remaining = state.remaining_principal;
            let interest = remaining * monthly_rate;

            let (mut principal_portion, mut payment) = match params.loan_type {
                LoanType::Annuity if month <= params.delay_months => (0.0, interest),
                LoanType::Annuity => (level_payment - interest, level_payment),
                LoanType::Bullet => {
                    let portion = if month == total_months { remaining } else { 0.0 };
                    (portion, interest + portion)
                }
                LoanType::Modular => {
                    let portion = scheduled.get(&month).copied().unwrap_or(0.0).min(remaining);
                    (portion, interest + portion)
                }
            };

            // Snap to the outstanding balance so the loan pays off exactly
            if (remaining - principal_portion).abs() < tolerance {
                principal_portion = remaining;
                payment = principal_portion + interest;
            }

            state.apply(principal_portion, interest, insurance, tolerance);

            rows.push(MonthlyLoanRecord {
                month: state.month,
                year: state.year(),
                payment_excluding_insurance: payment,
                interest,
                principal_payment: principal_portion,
                insurance_premium: insurance,
                total_monthly_payment: payment + insurance,
                remaining_principal: state.remaining_principal,
                cumulative_principal_paid: state.cumulative_principal,
                cumulative_interest_paid: state.cumulative_interest,
                cumulative_insurance_paid: state.cumulative_insurance,
            });
        }

        rows
    }
}

/// Amortize a loan with the default configuration
pub fn amortize_loan(
    params: &LoanParameters,
    schedule: Option<&ModularSchedule>,
) -> Result<LoanCalculationResult> {
    LoanEngine::default().amortize(params, schedule)
}
