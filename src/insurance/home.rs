//! Home insurance quotes from property characteristics

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::risk::{BuildingAgeBracket, PropertyType};
use crate::config::SimulationConfig;
use crate::error::{ensure_non_negative, ensure_positive, Result};
use crate::loan::LoanParameters;

/// Base annual premium per 1000 of coverage
pub const BASE_YEARLY_PREMIUM_PER_1000: f64 = 0.3;

pub const DEFAULT_CONSTRUCTION_YEAR: i32 = 2000;
pub const DEFAULT_SQUARE_METERS: f64 = 100.0;
pub const DEFAULT_DEDUCTIBLE: f64 = 500.0;

/// Elasticity of the premium to the deductible
const DEDUCTIBLE_EXPONENT: f64 = 0.15;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeInsuranceParameters {
    pub property_value: f64,
    pub property_type: PropertyType,
    #[serde(default)]
    pub construction_year: Option<i32>,
    #[serde(default)]
    pub square_meters: Option<f64>,
    #[serde(default)]
    pub deductible: Option<f64>,
    /// Share of the property value insured (1.0 = 100%)
    pub coverage_percentage: f64,
}

impl HomeInsuranceParameters {
    pub fn new(property_value: f64, property_type: PropertyType, coverage_percentage: f64) -> Self {
        Self {
            property_value,
            property_type,
            construction_year: None,
            square_meters: None,
            deductible: None,
            coverage_percentage,
        }
    }

    /// Insure the property financed by a loan, valued at its purchase price
    ///
    /// Without a known purchase price the principal is used.
    pub fn for_loan(loan: &LoanParameters, property_type: PropertyType, coverage_percentage: f64) -> Self {
        let property_value = loan.purchase_price.unwrap_or(loan.principal);
        Self::new(property_value, property_type, coverage_percentage)
    }

    pub fn construction_year(&self) -> i32 {
        self.construction_year.unwrap_or(DEFAULT_CONSTRUCTION_YEAR)
    }

    pub fn square_meters(&self) -> f64 {
        self.square_meters.unwrap_or(DEFAULT_SQUARE_METERS)
    }

    pub fn deductible(&self) -> f64 {
        self.deductible.unwrap_or(DEFAULT_DEDUCTIBLE)
    }

    fn validate(&self) -> Result<()> {
        ensure_non_negative("propertyValue", self.property_value)?;
        ensure_non_negative("coveragePercentage", self.coverage_percentage)?;
        ensure_positive("squareMeters", self.square_meters())?;
        ensure_positive("deductible", self.deductible())?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeRiskFactors {
    pub property_type: f64,
    pub construction_year: f64,
    pub size: f64,
    pub deductible: f64,
}

impl HomeRiskFactors {
    pub fn combined(&self) -> f64 {
        self.property_type * self.construction_year * self.size * self.deductible
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeInsuranceResult {
    pub monthly_premium: f64,
    pub yearly_premium: f64,
    pub coverage_amount: f64,
    pub deductible: f64,
    pub risk_factors: HomeRiskFactors,
}

/// Prices home insurance against a fixed valuation year
#[derive(Debug, Clone, Default)]
pub struct HomeInsuranceCalculator {
    config: SimulationConfig,
}

impl HomeInsuranceCalculator {
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    pub fn quote(&self, params: &HomeInsuranceParameters) -> Result<HomeInsuranceResult> {
        params.validate()?;

        if params.property_type == PropertyType::Other {
            warn!("Unpriced property type, using neutral risk factor 1.0");
        }

        let building_age = self.config.effective_valuation_year() - params.construction_year();
        let deductible = params.deductible();
        let risk_factors = HomeRiskFactors {
            property_type: params.property_type.risk_factor(),
            construction_year: BuildingAgeBracket::from_age(building_age).risk_factor(),
            size: (params.square_meters() / 100.0).sqrt(),
            deductible: (DEFAULT_DEDUCTIBLE / deductible).powf(DEDUCTIBLE_EXPONENT),
        };

        let coverage_amount = params.property_value * params.coverage_percentage;
        let yearly_premium = coverage_amount / 1000.0 * BASE_YEARLY_PREMIUM_PER_1000 * risk_factors.combined();

        debug!(
            "Home quote: {:?} aged {} years, coverage {:.2}, yearly premium {:.2}",
            params.property_type, building_age, coverage_amount, yearly_premium
        );

        Ok(HomeInsuranceResult {
            monthly_premium: yearly_premium / 12.0,
            yearly_premium,
            coverage_amount,
            deductible,
            risk_factors,
        })
    }
}

/// Quote home insurance with the default configuration (valuation year = today)
pub fn calculate_home_insurance(params: &HomeInsuranceParameters) -> Result<HomeInsuranceResult> {
    HomeInsuranceCalculator::default().quote(params)
}
