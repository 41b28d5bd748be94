//! Amortization output structures

use serde::{Deserialize, Serialize};

/// A single row of the monthly repayment schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyLoanRecord {
    // Timing
    pub month: u32,
    /// Relative loan year, ceil(month / 12)
    pub year: u32,

    // Flows for the month
    pub payment_excluding_insurance: f64,
    pub interest: f64,
    pub principal_payment: f64,
    pub insurance_premium: f64,
    pub total_monthly_payment: f64,

    // Balances after the month
    pub remaining_principal: f64,
    pub cumulative_principal_paid: f64,
    pub cumulative_interest_paid: f64,
    pub cumulative_insurance_paid: f64,
}

impl MonthlyLoanRecord {
    /// Interest plus insurance paid so far
    pub fn cumulative_cost(&self) -> f64 {
        self.cumulative_interest_paid + self.cumulative_insurance_paid
    }
}

/// Yearly aggregate of monthly rows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnualLoanRecord {
    pub year: u32,

    // Sums over the year's months
    pub annual_interest: f64,
    pub annual_principal: f64,
    pub annual_insurance: f64,
    pub annual_total_payment: f64,

    // Snapshots from the year's last month
    pub remaining_principal_year_end: f64,
    pub cumulative_interest_year_end: f64,
    pub cumulative_insurance_year_end: f64,
    pub cumulative_principal_year_end: f64,
}

impl AnnualLoanRecord {
    /// Start a year from its first month
    pub(crate) fn open(row: &MonthlyLoanRecord) -> Self {
        Self {
            year: row.year,
            annual_interest: row.interest,
            annual_principal: row.principal_payment,
            annual_insurance: row.insurance_premium,
            annual_total_payment: row.total_monthly_payment,
            remaining_principal_year_end: row.remaining_principal,
            cumulative_interest_year_end: row.cumulative_interest_paid,
            cumulative_insurance_year_end: row.cumulative_insurance_paid,
            cumulative_principal_year_end: row.cumulative_principal_paid,
        }
    }

    /// Fold a later month of the same year into the aggregate
    pub(crate) fn absorb(&mut self, row: &MonthlyLoanRecord) {
        self.annual_interest += row.interest;
        self.annual_principal += row.principal_payment;
        self.annual_insurance += row.insurance_premium;
        self.annual_total_payment += row.total_monthly_payment;

        self.remaining_principal_year_end = row.remaining_principal;
        self.cumulative_interest_year_end = row.cumulative_interest_paid;
        self.cumulative_insurance_year_end = row.cumulative_insurance_paid;
        self.cumulative_principal_year_end = row.cumulative_principal_paid;
    }
}

/// Totals over the full term
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanStatistics {
    pub total_principal_paid: f64,
    pub total_interest_paid: f64,
    pub total_insurance_paid: f64,
    /// Interest + insurance
    pub total_loan_costs: f64,
    /// Peak total monthly outlay over all months
    pub highest_monthly_payment: f64,
}

impl LoanStatistics {
    /// Pull totals from the final row and scan every row for the peak outlay
    pub fn from_monthly(monthly: &[MonthlyLoanRecord]) -> Self {
        let Some(last) = monthly.last() else {
            return Self::default();
        };

        let highest_monthly_payment = monthly
            .iter()
            .map(|r| r.total_monthly_payment)
            .fold(f64::NEG_INFINITY, f64::max);

        Self {
            total_principal_paid: last.cumulative_principal_paid,
            total_interest_paid: last.cumulative_interest_paid,
            total_insurance_paid: last.cumulative_insurance_paid,
            total_loan_costs: last.cumulative_cost(),
            highest_monthly_payment,
        }
    }
}

/// Complete amortization result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanCalculationResult {
    pub monthly_data: Vec<MonthlyLoanRecord>,
    pub annual_data: Vec<AnnualLoanRecord>,
    pub statistics: LoanStatistics,
}

impl LoanCalculationResult {
    pub fn total_months(&self) -> u32 {
        self.monthly_data.last().map(|r| r.month).unwrap_or(0)
    }

    /// Row for a given month (1-indexed)
    pub fn month(&self, month: u32) -> Option<&MonthlyLoanRecord> {
        let idx = (month as usize).checked_sub(1)?;
        self.monthly_data.get(idx)
    }

    /// Remaining principal after the last month
    pub fn final_remaining_principal(&self) -> f64 {
        self.monthly_data
            .last()
            .map(|r| r.remaining_principal)
            .unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(month: u32, outlay: f64) -> MonthlyLoanRecord {
        MonthlyLoanRecord {
            month,
            year: (month + 11) / 12,
            payment_excluding_insurance: outlay - 1.0,
            interest: 2.0,
            principal_payment: outlay - 3.0,
            insurance_premium: 1.0,
            total_monthly_payment: outlay,
            remaining_principal: 100.0 - month as f64,
            cumulative_principal_paid: month as f64,
            cumulative_interest_paid: 2.0 * month as f64,
            cumulative_insurance_paid: month as f64,
        }
    }

    #[test]
    fn test_statistics_scan_all_months_for_peak() {
        let rows = vec![row(1, 10.0), row(2, 50.0), row(3, 20.0)];
        let stats = LoanStatistics::from_monthly(&rows);

        assert_eq!(stats.highest_monthly_payment, 50.0);
        assert_eq!(stats.total_interest_paid, 6.0);
        assert_eq!(stats.total_insurance_paid, 3.0);
        assert_eq!(stats.total_loan_costs, 9.0);
    }

    #[test]
    fn test_camel_case_json() {
        let json = serde_json::to_value(row(1, 10.0)).unwrap();
        assert!(json.get("totalMonthlyPayment").is_some());
        assert!(json.get("cumulativeInsurancePaid").is_some());
    }

    #[test]
    fn test_month_lookup() {
        let rows = vec![row(1, 10.0), row(2, 50.0)];
        let stats = LoanStatistics::from_monthly(&rows);
        let result = LoanCalculationResult {
            monthly_data: rows,
            annual_data: Vec::new(),
            statistics: stats,
        };
        assert_eq!(result.month(2).map(|r| r.total_monthly_payment), Some(50.0));
        assert!(result.month(0).is_none());
        assert!(result.month(3).is_none());
        assert_eq!(result.total_months(), 2);
    }
}
