//! Loan comparison and investment-vs-debt simulation

mod investment;
mod growth;
mod engine;

pub use investment::{
    monthly_growth_rate, simulate_investment, simulate_reference_path, InvestmentParams, InvestmentSimulationRecord,
    ReferenceInvestmentRecord,
};
pub use growth::{estimate_minimum_growth_rate, solve_required_growth_rate};
pub use engine::{compare_loans, ComparisonResult, ComparisonStats, InvestmentSummary, LoanComparator};
