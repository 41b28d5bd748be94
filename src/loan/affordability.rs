//! Debt ratio assessment for one or more borrowers sharing a loan

use serde::{Deserialize, Serialize};

use super::records::LoanCalculationResult;
use crate::error::{ensure_non_negative, Result, SimulationError};

/// Debt ratio bands (percent of monthly income)
pub const GOOD_DEBT_RATIO_MAX: f64 = 33.0;
pub const MODERATE_DEBT_RATIO_MAX: f64 = 43.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DebtRatioAssessment {
    Good,
    Moderate,
    High,
}

impl DebtRatioAssessment {
    pub fn from_ratio(debt_ratio: f64) -> Self {
        if debt_ratio <= GOOD_DEBT_RATIO_MAX {
            DebtRatioAssessment::Good
        } else if debt_ratio <= MODERATE_DEBT_RATIO_MAX {
            DebtRatioAssessment::Moderate
        } else {
            DebtRatioAssessment::High
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AffordabilityReport {
    /// First month's total outlay as a percentage of monthly income
    pub debt_ratio: Option<f64>,
    pub assessment: Option<DebtRatioAssessment>,
    pub client_count: u32,
    pub per_client_insurance_paid: f64,
}

/// Assess a loan against the borrowers' combined monthly income
///
/// Without income (0) only the per-client split is reported.
pub fn assess_affordability(
    result: &LoanCalculationResult,
    monthly_income: f64,
    client_count: u32,
) -> Result<AffordabilityReport> {
    ensure_non_negative("monthlyIncome", monthly_income)?;
    if client_count == 0 {
        return Err(SimulationError::invalid("clientCount", "must be at least 1"));
    }

    let debt_ratio = match result.monthly_data.first() {
        Some(first) if monthly_income > 0.0 => Some(first.total_monthly_payment / monthly_income * 100.0),
        _ => None,
    };

    Ok(AffordabilityReport {
        debt_ratio,
        assessment: debt_ratio.map(DebtRatioAssessment::from_ratio),
        client_count,
        per_client_insurance_paid: result.statistics.total_insurance_paid / client_count as f64,
    })
}
