//! Yearly aggregation of monthly schedules and year-by-year loan comparison

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::records::{AnnualLoanRecord, MonthlyLoanRecord};

/// Group monthly rows by relative year
///
/// Flow columns are summed; balance columns are taken from each year's last month.
pub fn aggregate_annual(monthly: &[MonthlyLoanRecord]) -> Vec<AnnualLoanRecord> {
    let mut annual: Vec<AnnualLoanRecord> = Vec::new();

    for row in monthly {
        match annual.last_mut() {
            Some(current) if current.year == row.year => current.absorb(row),
            _ => annual.push(AnnualLoanRecord::open(row)),
        }
    }

    annual.sort_by_key(|r| r.year);
    annual
}

/// Year-by-year difference between two loans (alternative minus reference)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnualDifference {
    pub year: u32,
    pub annual_interest: f64,
    pub annual_principal: f64,
    pub annual_insurance: f64,
    pub annual_total_payment: f64,
    pub remaining_principal_year_end: f64,
}

/// Outer-join two annual tables on year; a year missing on one side counts as zeros
pub fn compare_annual(reference: &[AnnualLoanRecord], alternative: &[AnnualLoanRecord]) -> Vec<AnnualDifference> {
    let mut years: BTreeMap<u32, (Option<&AnnualLoanRecord>, Option<&AnnualLoanRecord>)> = BTreeMap::new();
    for row in reference {
        years.entry(row.year).or_default().0 = Some(row);
    }
    for row in alternative {
        years.entry(row.year).or_default().1 = Some(row);
    }

    years
        .into_iter()
        .map(|(year, (reference, alternative))| {
            let diff = |field: fn(&AnnualLoanRecord) -> f64| {
                alternative.map(field).unwrap_or(0.0) - reference.map(field).unwrap_or(0.0)
            };
            AnnualDifference {
                year,
                annual_interest: diff(|r| r.annual_interest),
                annual_principal: diff(|r| r.annual_principal),
                annual_insurance: diff(|r| r.annual_insurance),
                annual_total_payment: diff(|r| r.annual_total_payment),
                remaining_principal_year_end: diff(|r| r.remaining_principal_year_end),
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
    fn test_flows_sum_and_snapshots_from_last_month() {
        let params = LoanParameters::new(LoanType::Annuity, 90_000.0, 2.9, 3);
        let result = amortize_loan(&params, None).unwrap();
        let annual = aggregate_annual(&result.monthly_data);

        assert_eq!(annual.len(), 3);
        for (idx, year) in annual.iter().enumerate() {
            let months = &result.monthly_data[idx * 12..(idx + 1) * 12];
            let interest: f64 = months.iter().map(|m| m.interest).sum();
            let outlay: f64 = months.iter().map(|m| m.total_monthly_payment).sum();
            assert_relative_eq!(year.annual_interest, interest, max_relative = 1e-12);
            assert_relative_eq!(year.annual_total_payment, outlay, max_relative = 1e-12);
            assert_eq!(year.remaining_principal_year_end, months[11].remaining_principal);
            assert_eq!(year.cumulative_principal_year_end, months[11].cumulative_principal_paid);
        }
    }

    #[test]
    fn test_compare_annual_outer_join() {
        let short = amortize_loan(&LoanParameters::new(LoanType::Bullet, 50_000.0, 3.0, 2), None).unwrap();
        let long = amortize_loan(&LoanParameters::new(LoanType::Bullet, 50_000.0, 3.0, 4), None).unwrap();

        let diffs = compare_annual(&short.annual_data, &long.annual_data);
        assert_eq!(diffs.len(), 4);

        // Year 2: the short loan repays, the long one does not
        assert_relative_eq!(diffs[1].annual_principal, -50_000.0);
        assert_relative_eq!(diffs[1].remaining_principal_year_end, 50_000.0);

        // Year 4 exists only in the alternative
        assert_relative_eq!(diffs[3].annual_principal, 50_000.0);
        assert_relative_eq!(diffs[3].annual_interest, long.annual_data[3].annual_interest);
    }

    #[test]
    fn test_empty_input() {
        assert!(aggregate_annual(&[]).is_empty());
        assert!(compare_annual(&[], &[]).is_empty());
    }
}
