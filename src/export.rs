//! CSV export of schedules and simulation tables

use log::info;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::comparison::{ComparisonResult, InvestmentSimulationRecord};
use crate::error::Result;
use crate::insurance::LifeInsuranceRow;
use crate::loan::{AnnualLoanRecord, LoanCalculationResult, MonthlyLoanRecord};

fn write_rows<W: Write, T: Serialize>(writer: W, rows: &[T]) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    for row in rows {
        csv.serialize(row)?;
    }
    csv.flush()?;
    Ok(())
}

pub fn write_monthly_csv<W: Write>(writer: W, rows: &[MonthlyLoanRecord]) -> Result<()> {
    write_rows(writer, rows)
}

pub fn write_annual_csv<W: Write>(writer: W, rows: &[AnnualLoanRecord]) -> Result<()> {
    write_rows(writer, rows)
}

pub fn write_life_insurance_csv<W: Write>(writer: W, rows: &[LifeInsuranceRow]) -> Result<()> {
    write_rows(writer, rows)
}

/// Flat investment row; the csv serializer cannot handle the flattened loan record
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InvestmentCsvRow {
    month: u32,
    year: u32,
    total_monthly_payment: f64,
    remaining_principal: f64,
    investment_balance: f64,
    monthly_contribution: f64,
    cumulative_investment_contribution: f64,
    net_worth: f64,
}

impl From<&InvestmentSimulationRecord> for InvestmentCsvRow {
    fn from(record: &InvestmentSimulationRecord) -> Self {
        Self {
            month: record.loan.month,
            year: record.loan.year,
            total_monthly_payment: record.loan.total_monthly_payment,
            remaining_principal: record.loan.remaining_principal,
            investment_balance: record.investment_balance,
            monthly_contribution: record.monthly_contribution,
            cumulative_investment_contribution: record.cumulative_investment_contribution,
            net_worth: record.net_worth,
        }
    }
}

pub fn write_investment_csv<W: Write>(writer: W, rows: &[InvestmentSimulationRecord]) -> Result<()> {
    let flat: Vec<InvestmentCsvRow> = rows.iter().map(InvestmentCsvRow::from).collect();
    write_rows(writer, &flat)
}

/// Write `<prefix>_monthly.csv` and `<prefix>_annual.csv` into `dir`
pub fn export_loan_tables(dir: &Path, prefix: &str, result: &LoanCalculationResult) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)?;

    let monthly_path = dir.join(format!("{}_monthly.csv", prefix));
    write_monthly_csv(File::create(&monthly_path)?, &result.monthly_data)?;

    let annual_path = dir.join(format!("{}_annual.csv", prefix));
    write_annual_csv(File::create(&annual_path)?, &result.annual_data)?;

    info!("Wrote {} and {}", monthly_path.display(), annual_path.display());
    Ok(vec![monthly_path, annual_path])
}

/// Write both loans' tables plus the investment table when one was simulated
pub fn export_comparison_tables(dir: &Path, result: &ComparisonResult) -> Result<Vec<PathBuf>> {
    let mut written = export_loan_tables(dir, "reference", &result.reference_loan)?;
    written.extend(export_loan_tables(dir, "alternative", &result.alternative_loan)?);

    if let Some(simulation) = &result.investment_simulation {
        let path = dir.join("investment.csv");
        write_investment_csv(File::create(&path)?, simulation)?;
        info!("Wrote {}", path.display());
        written.push(path);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparison::{compare_loans, InvestmentParams};
    use crate::insurance::{calculate_life_insurance, BiometricProfile, LifeInsuranceParameters, PaymentType};
    use crate::loan::{amortize_loan, LoanParameters, LoanType};

    fn lines(buffer: &[u8]) -> Vec<String> {
        String::from_utf8(buffer.to_vec())
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_monthly_and_annual_csv() {
        let result = amortize_loan(&LoanParameters::new(LoanType::Annuity, 120_000.0, 2.0, 2), None).unwrap();

        let mut monthly = Vec::new();
        write_monthly_csv(&mut monthly, &result.monthly_data).unwrap();
        let monthly = lines(&monthly);
        assert_eq!(monthly.len(), 25);
        assert!(monthly[0].starts_with("month,year,paymentExcludingInsurance"));
        assert!(monthly[1].starts_with("1,1,"));

        let mut annual = Vec::new();
        write_annual_csv(&mut annual, &result.annual_data).unwrap();
        let annual = lines(&annual);
        assert_eq!(annual.len(), 3);
        assert!(annual[0].starts_with("year,annualInterest"));
    }

    #[test]
    fn test_life_insurance_csv() {
        let params = LifeInsuranceParameters {
            client: BiometricProfile::new(30, false),
            loan_amount: 100_000.0,
            term_years: 1,
            coverage_percentage: 1.0,
            payment_type: PaymentType::Distributed,
            based_on_remaining_capital: true,
        };
        let result = calculate_life_insurance(&params).unwrap();

        let mut buffer = Vec::new();
        write_life_insurance_csv(&mut buffer, &result.amortization_table).unwrap();
        let rows = lines(&buffer);
        assert_eq!(rows.len(), 13);
        assert_eq!(rows[0], "month,year,premium,cumulativePremium,coverage");
    }

    #[test]
    fn test_investment_csv_is_flat() {
        let reference = LoanParameters::new(LoanType::Annuity, 100_000.0, 3.0, 1);
        let alternative = LoanParameters::new(LoanType::Bullet, 100_000.0, 3.0, 1);
        let result = compare_loans(&reference, &alternative, Some(&InvestmentParams::new(1_000.0, 5.0)), None).unwrap();

        let mut buffer = Vec::new();
        write_investment_csv(&mut buffer, result.investment_simulation.as_ref().unwrap()).unwrap();
        let rows = lines(&buffer);
        assert_eq!(rows.len(), 13);
        assert_eq!(
            rows[0],
            "month,year,totalMonthlyPayment,remainingPrincipal,investmentBalance,monthlyContribution,cumulativeInvestmentContribution,netWorth"
        );
    }
}
