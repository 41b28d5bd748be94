//! Loan parameter structures matching the web layer's JSON format

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{ensure_non_negative, ensure_positive, Result, SimulationError};

/// Default calendar start year when the caller gives none
fn default_start_year() -> i32 {
    2025
}

fn default_coverage() -> f64 {
    1.0
}

/// Longest accepted loan term
pub const MAX_TERM_YEARS: u32 = 100;

/// Own contribution share (percent of purchase price) used when none is known
pub const DEFAULT_OWN_CONTRIBUTION_PCT: f64 = 10.0;

/// Repayment structure of the loan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoanType {
    /// Level monthly payment (interest + principal)
    Annuity,
    /// Interest only, full principal in the final month
    Bullet,
    /// Interest plus a caller-defined principal schedule
    Modular,
}

/// Parameters for a single loan calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanParameters {
    pub loan_type: LoanType,

    /// Borrowed amount
    pub principal: f64,

    /// Annual interest rate in percent (3.6 = 3.6%)
    pub interest_rate: f64,

    /// Loan term in whole years
    pub term_years: u32,

    #[serde(default)]
    pub own_contribution: f64,

    #[serde(default)]
    pub purchase_price: Option<f64>,

    /// Interest-only grace period at the start of an annuity loan
    #[serde(default)]
    pub delay_months: u32,

    #[serde(default = "default_start_year")]
    pub start_year: i32,

    /// Share of the principal covered by credit insurance (1.0 = 100%)
    #[serde(default = "default_coverage")]
    pub insurance_coverage_pct: f64,
}

impl LoanParameters {
    /// Create parameters with the web layer's defaults for optional fields
    pub fn new(loan_type: LoanType, principal: f64, interest_rate: f64, term_years: u32) -> Self {
        Self {
            loan_type,
            principal,
            interest_rate,
            term_years,
            own_contribution: 0.0,
            purchase_price: None,
            delay_months: 0,
            start_year: default_start_year(),
            insurance_coverage_pct: default_coverage(),
        }
    }

    /// Total number of monthly periods
    pub fn total_months(&self) -> u32 {
        self.term_years * 12
    }

    /// Monthly interest rate as a decimal
    pub fn monthly_rate(&self) -> f64 {
        self.interest_rate / 100.0 / 12.0
    }

    pub fn validate(&self) -> Result<()> {
        ensure_positive("principal", self.principal)?;
        ensure_non_negative("interestRate", self.interest_rate)?;
        if self.term_years == 0 || self.term_years > MAX_TERM_YEARS {
            return Err(SimulationError::invalid(
                "termYears",
                format!("must be between 1 and {}, got {}", MAX_TERM_YEARS, self.term_years),
            ));
        }
        ensure_non_negative("ownContribution", self.own_contribution)?;
        ensure_non_negative("insuranceCoveragePct", self.insurance_coverage_pct)?;
        if let Some(price) = self.purchase_price {
            ensure_non_negative("purchasePrice", price)?;
            if self.principal > price {
                return Err(SimulationError::invalid(
                    "principal",
                    format!("{} exceeds purchase price {}", self.principal, price),
                ));
            }
        }
        // Bullet and modular loans ignore the grace period
        if self.loan_type == LoanType::Annuity && self.delay_months >= self.total_months() {
            return Err(SimulationError::invalid(
                "delayMonths",
                format!(
                    "grace period of {} months leaves no repayment months in a {}-month term",
                    self.delay_months,
                    self.total_months()
                ),
            ));
        }
        Ok(())
    }

    /// Split a purchase price into (principal, own contribution)
    ///
    /// The own contribution percentage is clamped to [0, 100].
    pub fn split_purchase_price(purchase_price: f64, own_contribution_pct: f64) -> (f64, f64) {
        let pct = own_contribution_pct.clamp(0.0, 100.0);
        let own_contribution = purchase_price * pct / 100.0;
        (purchase_price - own_contribution, own_contribution)
    }

    /// Re-derive principal and own contribution for a new purchase price
    ///
    /// When `preserve_share` is set and a purchase price is already known, the
    /// current own contribution share carries over; otherwise 10% is assumed.
    pub fn with_purchase_price(&self, new_purchase_price: f64, preserve_share: bool) -> Self {
        let pct = match self.purchase_price {
            Some(price) if preserve_share && price > 0.0 => self.own_contribution / price * 100.0,
            _ => DEFAULT_OWN_CONTRIBUTION_PCT,
        };
        let (principal, own_contribution) = Self::split_purchase_price(new_purchase_price, pct);

        Self {
            principal,
            own_contribution,
            purchase_price: Some(new_purchase_price),
            ..self.clone()
        }
    }
}

/// One scheduled principal repayment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// Repayment month (1-indexed)
    pub month: u32,
    pub amount: f64,
}

/// Custom principal repayment plan for modular loans
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModularSchedule {
    pub schedule: Vec<ScheduleEntry>,
}

impl ModularSchedule {
    pub fn new(schedule: Vec<ScheduleEntry>) -> Self {
        Self { schedule }
    }

    /// Single repayment of `amount` in `month`
    pub fn single(month: u32, amount: f64) -> Self {
        Self::new(vec![ScheduleEntry { month, amount }])
    }

    pub fn validate(&self) -> Result<()> {
        for entry in &self.schedule {
            if entry.month == 0 {
                return Err(SimulationError::invalid("schedule.month", "months are 1-indexed"));
            }
            ensure_non_negative("schedule.amount", entry.amount)?;
        }
        Ok(())
    }

    /// Month -> amount lookup; a later entry for the same month replaces an earlier one
    pub fn amounts_by_month(&self) -> BTreeMap<u32, f64> {
        self.schedule
            .iter()
            .map(|entry| (entry.month, entry.amount))
            .collect()
    }
}
