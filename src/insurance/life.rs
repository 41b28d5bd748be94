//! Credit life insurance premiums from client biometrics and loan details
//!
//! Pricing is a base rate per 1000 of coverage scaled by multiplicative
//! risk factors. A lump sum is the undiscounted sum of flat-coverage monthly
//! premiums; no actuarial present-value reduction is applied.

use log::debug;
use serde::{Deserialize, Serialize};

use super::risk::{AgeRiskTable, BmiBand};
use crate::error::{ensure_non_negative, ensure_positive, Result, SimulationError};
use crate::loan::{LoanParameters, MAX_TERM_YEARS};

/// Base monthly premium per 1000 of coverage
pub const BASE_MONTHLY_PREMIUM_PER_1000: f64 = 0.15;

pub const SMOKER_RISK_FACTOR: f64 = 1.7;
pub const MALE_RISK_FACTOR: f64 = 1.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

/// How the premium is paid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentType {
    /// Whole-term premium charged in month 1
    LumpSum,
    /// Premium charged every month on that month's coverage
    Distributed,
}

/// Client data relevant for underwriting
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BiometricProfile {
    pub age: Option<u32>,
    #[serde(default)]
    pub smoker: bool,
    /// Height in cm
    #[serde(default)]
    pub height: Option<f64>,
    /// Weight in kg
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub gender: Option<Gender>,
}

impl BiometricProfile {
    pub fn new(age: u32, smoker: bool) -> Self {
        Self {
            age: Some(age),
            smoker,
            ..Default::default()
        }
    }

    fn validate(&self) -> Result<u32> {
        if let Some(height) = self.height {
            ensure_positive("client.height", height)?;
        }
        if let Some(weight) = self.weight {
            ensure_positive("client.weight", weight)?;
        }
        self.age
            .ok_or_else(|| SimulationError::invalid("client.age", "age is required for life insurance"))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LifeInsuranceParameters {
    pub client: BiometricProfile,
    pub loan_amount: f64,
    pub term_years: u32,
    /// Share of the loan amount insured (1.0 = 100%)
    pub coverage_percentage: f64,
    pub payment_type: PaymentType,
    /// Coverage follows a linearly declining balance instead of staying flat
    #[serde(default)]
    pub based_on_remaining_capital: bool,
}

impl LifeInsuranceParameters {
    /// Insure a loan's principal over its term
    pub fn for_loan(
        client: BiometricProfile,
        loan: &LoanParameters,
        coverage_percentage: f64,
        payment_type: PaymentType,
        based_on_remaining_capital: bool,
    ) -> Self {
        Self {
            client,
            loan_amount: loan.principal,
            term_years: loan.term_years,
            coverage_percentage,
            payment_type,
            based_on_remaining_capital,
        }
    }

    pub fn total_months(&self) -> u32 {
        self.term_years * 12
    }
}

/// Breakdown of the multiplicative risk loading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LifeRiskFactors {
    pub age: f64,
    pub bmi: f64,
    pub smoker: f64,
    pub term: f64,
    pub gender: f64,
}

impl LifeRiskFactors {
    pub fn assess(client: &BiometricProfile, age: u32, term_years: u32) -> Self {
        let bmi = match (client.height, client.weight) {
            (Some(height), Some(weight)) => BmiBand::from_measurements(height, weight).risk_factor(),
            _ => 1.0,
        };

        Self {
            age: AgeRiskTable.factor(age),
            bmi,
            smoker: if client.smoker { SMOKER_RISK_FACTOR } else { 1.0 },
            term: 1.0 + term_years as f64 / 100.0,
            gender: match client.gender {
                Some(Gender::Male) => MALE_RISK_FACTOR,
                Some(Gender::Female) | None => 1.0,
            },
        }
    }

    pub fn combined(&self) -> f64 {
        self.age * self.bmi * self.smoker * self.term * self.gender
    }

    /// Monthly premium per 1000 of coverage
    pub fn premium_rate(&self) -> f64 {
        BASE_MONTHLY_PREMIUM_PER_1000 * self.combined()
    }
}

/// One month of the premium/coverage table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LifeInsuranceRow {
    pub month: u32,
    pub year: u32,
    pub premium: f64,
    pub cumulative_premium: f64,
    pub coverage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LifeInsuranceResult {
    /// Average monthly premium (total / months), also under lump-sum payment
    pub monthly_premium: f64,
    pub total_premium: f64,
    /// Maximum (initial) coverage
    pub coverage_amount: f64,
    pub risk_factors: LifeRiskFactors,
    pub amortization_table: Vec<LifeInsuranceRow>,
}

/// Price credit life insurance and build the monthly premium/coverage table
pub fn calculate_life_insurance(params: &LifeInsuranceParameters) -> Result<LifeInsuranceResult> {
    let age = params.client.validate()?;
    ensure_non_negative("coveragePercentage", params.coverage_percentage)?;
    ensure_non_negative("loanAmount", params.loan_amount)?;
    if params.term_years == 0 || params.term_years > MAX_TERM_YEARS {
        return Err(SimulationError::invalid(
            "termYears",
            format!("must be between 1 and {}, got {}", MAX_TERM_YEARS, params.term_years),
        ));
    }

    let risk_factors = LifeRiskFactors::assess(&params.client, age, params.term_years);
    let premium_rate = risk_factors.premium_rate();
    let total_months = params.total_months();
    let max_coverage = params.loan_amount * params.coverage_percentage;

    let mut amortization_table = Vec::with_capacity(total_months as usize);
    let mut cumulative_premium = 0.0;

    for month in 1..=total_months {
        let coverage = if params.based_on_remaining_capital {
            max_coverage * (1.0 - (month - 1) as f64 / total_months as f64)
        } else {
            max_coverage
        };

        let premium = match params.payment_type {
            PaymentType::Distributed => coverage / 1000.0 * premium_rate,
            PaymentType::LumpSum if month == 1 => max_coverage / 1000.0 * premium_rate * total_months as f64,
            PaymentType::LumpSum => 0.0,
        };
        cumulative_premium += premium;

        amortization_table.push(LifeInsuranceRow {
            month,
            year: month.div_ceil(12),
            premium,
            cumulative_premium,
            coverage,
        });
    }

    let total_premium = cumulative_premium;
    debug!(
        "Life premium for age {} over {} months: rate {:.4}/1000, total {:.2}",
        age, total_months, premium_rate, total_premium
    );

    Ok(LifeInsuranceResult {
        monthly_premium: total_premium / total_months as f64,
        total_premium,
        coverage_amount: max_coverage,
        risk_factors,
        amortization_table,
    })
}
