//! Mortgage Simulator - Financial simulation engine for mortgage loans and credit insurance
//!
//! This library provides:
//! - Monthly and yearly amortization schedules for annuity, bullet and modular loans
//! - Credit life insurance premiums from client biometrics
//! - Home insurance quotes from property characteristics
//! - Reference vs alternative loan comparison with an investment overlay
//! - Batch and rate-sensitivity runs, CSV export and a JSON dispatch layer

pub mod error;
pub mod config;
pub mod loan;
pub mod insurance;
pub mod comparison;
pub mod scenario;
pub mod export;
pub mod api;

// Re-export commonly used types
pub use error::{Result, SimulationError};
pub use config::SimulationConfig;
pub use loan::{amortize_loan, LoanCalculationResult, LoanEngine, LoanParameters, LoanType, ModularSchedule};
pub use insurance::{calculate_home_insurance, calculate_life_insurance};
pub use comparison::{compare_loans, ComparisonResult, InvestmentParams, LoanComparator};
pub use scenario::ScenarioRunner;
