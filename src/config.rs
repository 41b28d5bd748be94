//! Engine configuration
//!
//! Everything that would otherwise be a hidden constant or ambient state
//! (current calendar year, insurance rate, payoff tolerance) lives here and
//! is handed explicitly to each calculator.

use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;

/// Annual rate of the simplified credit insurance premium, on original principal
pub const DEFAULT_CREDIT_INSURANCE_RATE: f64 = 0.0036;

/// Residual balance below which a loan is treated as paid off
pub const DEFAULT_PAYOFF_TOLERANCE: f64 = 0.01;

/// Investment growth (annual %) used when the caller gives none
pub const DEFAULT_ANNUAL_GROWTH_RATE: f64 = 8.0;

/// Configuration shared by all calculators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SimulationConfig {
    /// Annual credit insurance rate applied to the original principal
    pub credit_insurance_annual_rate: f64,

    /// Rounding-snap and dust-clamp threshold for remaining principal
    pub payoff_tolerance: f64,

    /// Default investment growth, annual percentage
    pub default_annual_growth_rate: f64,

    /// Calendar year used to age buildings (None = today)
    pub valuation_year: Option<i32>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            credit_insurance_annual_rate: DEFAULT_CREDIT_INSURANCE_RATE,
            payoff_tolerance: DEFAULT_PAYOFF_TOLERANCE,
            default_annual_growth_rate: DEFAULT_ANNUAL_GROWTH_RATE,
            valuation_year: None,
        }
    }
}

impl SimulationConfig {
    /// Load a config from a JSON file; missing fields take their defaults
    pub fn from_json_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&text)?;
        Ok(config)
    }

    /// Pin the valuation year (useful for reproducible quotes)
    pub fn at_valuation_year(mut self, year: i32) -> Self {
        self.valuation_year = Some(year);
        self
    }

    /// Valuation year, falling back to the local calendar year
    pub fn effective_valuation_year(&self) -> i32 {
        self.valuation_year
            .unwrap_or_else(|| chrono::Local::now().year())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: SimulationConfig = serde_json::from_str(r#"{"valuationYear": 2030}"#).unwrap();
        assert_eq!(config.valuation_year, Some(2030));
        assert_eq!(config.credit_insurance_annual_rate, DEFAULT_CREDIT_INSURANCE_RATE);
        assert_eq!(config.payoff_tolerance, DEFAULT_PAYOFF_TOLERANCE);
        assert_eq!(config.effective_valuation_year(), 2030);
    }

    #[test]
    fn test_unpinned_year_is_current() {
        let config = SimulationConfig::default();
        assert!(config.effective_valuation_year() >= 2024);
    }
}
