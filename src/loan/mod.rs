//! Loan amortization for annuity, bullet and modular repayment structures

mod params;
mod records;
mod state;
mod engine;
mod annual;
mod affordability;

pub use params::{LoanParameters, LoanType, ModularSchedule, ScheduleEntry, DEFAULT_OWN_CONTRIBUTION_PCT, MAX_TERM_YEARS};
pub use records::{AnnualLoanRecord, LoanCalculationResult, LoanStatistics, MonthlyLoanRecord};
pub use engine::{amortize_loan, annuity_payment, LoanEngine};
pub use annual::{aggregate_annual, compare_annual, AnnualDifference};
pub use affordability::{assess_affordability, AffordabilityReport, DebtRatioAssessment};
