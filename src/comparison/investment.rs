//! Investment of the monthly payment differential between two loans

use serde::{Deserialize, Serialize};

use crate::error::{ensure_finite, ensure_non_negative, Result, SimulationError};
use crate::loan::MonthlyLoanRecord;

/// Investment side of a loan comparison
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentParams {
    /// Capital invested before month 1
    #[serde(default)]
    pub start_capital: Option<f64>,

    /// Annual growth in percent (8.0 = 8%); None uses the configured default
    #[serde(default)]
    pub annual_growth_rate: Option<f64>,

    /// Start capital of the reference scenario, overriding `start_capital`
    #[serde(default)]
    pub ref_invest_capital: Option<f64>,

    /// Start capital of the alternative scenario, overriding `start_capital`
    #[serde(default)]
    pub alt_invest_capital: Option<f64>,
}

impl InvestmentParams {
    pub fn new(start_capital: f64, annual_growth_rate: f64) -> Self {
        Self {
            start_capital: Some(start_capital),
            annual_growth_rate: Some(annual_growth_rate),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("startCapital", self.start_capital),
            ("refInvestCapital", self.ref_invest_capital),
            ("altInvestCapital", self.alt_invest_capital),
        ] {
            if let Some(value) = value {
                ensure_non_negative(field, value)?;
            }
        }
        if let Some(rate) = self.annual_growth_rate {
            ensure_finite("annualGrowthRate", rate)?;
            if rate <= -100.0 {
                return Err(SimulationError::invalid(
                    "annualGrowthRate",
                    format!("must be > -100, got {}", rate),
                ));
            }
        }
        Ok(())
    }

    pub fn reference_start_capital(&self) -> f64 {
        self.ref_invest_capital.or(self.start_capital).unwrap_or(0.0)
    }

    pub fn alternative_start_capital(&self) -> f64 {
        self.alt_invest_capital.or(self.start_capital).unwrap_or(0.0)
    }

    /// Annual growth in percent, falling back to `default_pct`
    pub fn growth_rate_pct(&self, default_pct: f64) -> f64 {
        self.annual_growth_rate.unwrap_or(default_pct)
    }
}

/// Monthly compounding rate equivalent to an annual percentage
pub fn monthly_growth_rate(annual_pct: f64) -> f64 {
    (1.0 + annual_pct / 100.0).powf(1.0 / 12.0) - 1.0
}

/// Alternative-loan month extended with the investment position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentSimulationRecord {
    #[serde(flatten)]
    pub loan: MonthlyLoanRecord,
    pub investment_balance: f64,
    /// Reference outlay minus alternative outlay (negative = withdrawal)
    pub monthly_contribution: f64,
    pub cumulative_investment_contribution: f64,
    /// Investment balance minus the alternative's remaining principal
    pub net_worth: f64,
}

/// Reference scenario: start capital compounding with no contributions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceInvestmentRecord {
    pub month: u32,
    pub investment_balance: f64,
}

/// Outlay of a loan in a month, 0 once the schedule has ended
fn outlay(schedule: &[MonthlyLoanRecord], month: u32) -> f64 {
    schedule
        .get(month as usize - 1)
        .map_or(0.0, |row| row.total_monthly_payment)
}

/// Invest the monthly payment differential while holding the alternative loan
///
/// Each month the balance grows first, then takes the differential. Rows are
/// emitted only for months the alternative loan covers, but the balance keeps
/// running over the longer of the two schedules.
pub fn simulate_investment(
    reference: &[MonthlyLoanRecord],
    alternative: &[MonthlyLoanRecord],
    start_capital: f64,
    monthly_rate: f64,
) -> Vec<InvestmentSimulationRecord> {
    let horizon = reference.len().max(alternative.len()) as u32;
    let mut balance = start_capital;
    let mut cumulative_contribution = start_capital;
    let mut records = Vec::with_capacity(alternative.len());

    for month in 1..=horizon {
        balance *= 1.0 + monthly_rate;

        let contribution = outlay(reference, month) - outlay(alternative, month);
        balance += contribution;
        cumulative_contribution += contribution;

        if let Some(row) = alternative.get(month as usize - 1) {
            records.push(InvestmentSimulationRecord {
                loan: row.clone(),
                investment_balance: balance,
                monthly_contribution: contribution,
                cumulative_investment_contribution: cumulative_contribution,
                net_worth: balance - row.remaining_principal,
            });
        }
    }

    records
}

pub fn simulate_reference_path(start_capital: f64, monthly_rate: f64, months: u32) -> Vec<ReferenceInvestmentRecord> {
    let mut balance = start_capital;
    (1..=months)
        .map(|month| {
            balance *= 1.0 + monthly_rate;
            ReferenceInvestmentRecord {
                month,
                investment_balance: balance,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loan::{amortize_loan, LoanParameters, LoanType};
    use approx::assert_relative_eq;

    #[test]
    fn test_monthly_rate_compounds_to_annual() {
        let r = monthly_growth_rate(8.0);
        assert_relative_eq!((1.0 + r).powi(12), 1.08, max_relative = 1e-12);
        assert_eq!(monthly_growth_rate(0.0), 0.0);
    }

    #[test]
    fn test_identical_loans_only_compound() {
        let loan = amortize_loan(&LoanParameters::new(LoanType::Annuity, 100_000.0, 3.0, 5), None).unwrap();
        let r = monthly_growth_rate(6.0);
        let records = simulate_investment(&loan.monthly_data, &loan.monthly_data, 10_000.0, r);

        assert_eq!(records.len(), 60);
        for record in &records {
            assert_eq!(record.monthly_contribution, 0.0);
            assert_eq!(record.cumulative_investment_contribution, 10_000.0);
        }
        assert_relative_eq!(records[59].investment_balance, 10_000.0 * 1.06f64.powi(5), max_relative = 1e-9);
        assert_relative_eq!(records[59].net_worth, records[59].investment_balance);
    }

    #[test]
    fn test_differential_invested_after_growth() {
        let reference = amortize_loan(&LoanParameters::new(LoanType::Annuity, 100_000.0, 3.0, 10), None).unwrap();
        let alternative = amortize_loan(&LoanParameters::new(LoanType::Bullet, 100_000.0, 3.0, 10), None).unwrap();
        let r = 0.005;
        let records = simulate_investment(&reference.monthly_data, &alternative.monthly_data, 1_000.0, r);

        let diff = reference.monthly_data[0].total_monthly_payment - alternative.monthly_data[0].total_monthly_payment;
        assert!(diff > 0.0);
        assert_relative_eq!(records[0].monthly_contribution, diff);
        assert_relative_eq!(records[0].investment_balance, 1_000.0 * 1.005 + diff, max_relative = 1e-12);
        assert_relative_eq!(
            records[0].net_worth,
            records[0].investment_balance - 100_000.0,
            max_relative = 1e-12
        );

        // Final month: bullet repays everything, so the contribution is a withdrawal
        assert!(records[119].monthly_contribution < 0.0);
        assert_eq!(records[119].loan.remaining_principal, 0.0);
    }

    #[test]
    fn test_shorter_alternative_keeps_running_balance() {
        let reference = amortize_loan(&LoanParameters::new(LoanType::Bullet, 50_000.0, 2.0, 4), None).unwrap();
        let alternative = amortize_loan(&LoanParameters::new(LoanType::Bullet, 50_000.0, 2.0, 2), None).unwrap();
        let records = simulate_investment(&reference.monthly_data, &alternative.monthly_data, 0.0, 0.0);

        // Rows only for the alternative's 24 months
        assert_eq!(records.len(), 24);
        assert_eq!(records[23].loan.month, 24);
    }

    #[test]
    fn test_reference_path() {
        let path = simulate_reference_path(1_000.0, 0.01, 3);
        assert_eq!(path.len(), 3);
        assert_eq!(path[2].month, 3);
        assert_relative_eq!(path[2].investment_balance, 1_000.0 * 1.01f64.powi(3), max_relative = 1e-12);
    }

    #[test]
    fn test_params_capital_overrides_and_validation() {
        let params = InvestmentParams {
            alt_invest_capital: Some(5_000.0),
            ..InvestmentParams::new(20_000.0, 7.0)
        };
        assert_eq!(params.alternative_start_capital(), 5_000.0);
        assert_eq!(params.reference_start_capital(), 20_000.0);
        assert_eq!(InvestmentParams::default().growth_rate_pct(8.0), 8.0);
        assert_eq!(InvestmentParams::new(0.0, 0.0).growth_rate_pct(8.0), 0.0);

        assert!(InvestmentParams::new(-1.0, 5.0).validate().is_err());
        assert!(InvestmentParams::new(1.0, -100.0).validate().is_err());
        assert!(InvestmentParams::new(1.0, -50.0).validate().is_ok());
    }
}
