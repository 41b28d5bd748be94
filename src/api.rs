//! JSON request envelopes and operation dispatch
//!
//! Shared by the CLI and the Lambda handler: both hand over an operation name
//! and a JSON body and get a JSON value back.

use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;

use crate::comparison::{InvestmentParams, LoanComparator};
use crate::config::SimulationConfig;
use crate::error::{Result, SimulationError};
use crate::insurance::{calculate_life_insurance, HomeInsuranceCalculator, HomeInsuranceParameters, LifeInsuranceParameters};
use crate::loan::{assess_affordability, AffordabilityReport, LoanCalculationResult, LoanEngine, LoanParameters, ModularSchedule};
use crate::scenario::{LoanScenario, RateSensitivityPoint, ScenarioOutcome, ScenarioRunner};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Amortize,
    LifeInsurance,
    HomeInsurance,
    Compare,
    Batch,
}

impl FromStr for Operation {
    type Err = SimulationError;

    /// Accepts bare names and URL paths ("/compare", "/api/compare-loans")
    fn from_str(name: &str) -> Result<Self> {
        let name = name.trim_matches('/');
        match name.strip_prefix("api/").unwrap_or(name) {
            "amortize" | "calculate-loan" => Ok(Operation::Amortize),
            "life" | "life-insurance" => Ok(Operation::LifeInsurance),
            "home" | "home-insurance" => Ok(Operation::HomeInsurance),
            "compare" | "compare-loans" => Ok(Operation::Compare),
            "batch" => Ok(Operation::Batch),
            other => Err(SimulationError::UnknownOperation(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmortizeRequest {
    #[serde(flatten)]
    pub loan: LoanParameters,
    #[serde(default)]
    pub modular_schedule: Option<ModularSchedule>,
    /// Combined monthly income of the borrowers, enables the affordability report
    #[serde(default)]
    pub monthly_income: Option<f64>,
    #[serde(default)]
    pub client_count: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AmortizeResponse {
    #[serde(flatten)]
    pub result: LoanCalculationResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affordability: Option<AffordabilityReport>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareRequest {
    pub reference_loan: LoanParameters,
    pub alternative_loan: LoanParameters,
    #[serde(default)]
    pub investment_params: Option<InvestmentParams>,
    #[serde(default)]
    pub modular_schedule: Option<ModularSchedule>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensitivityRequest {
    pub loan: LoanParameters,
    pub rates: Vec<f64>,
    #[serde(default)]
    pub modular_schedule: Option<ModularSchedule>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchRequest {
    #[serde(default)]
    pub scenarios: Vec<LoanScenario>,
    #[serde(default)]
    pub sensitivity: Option<SensitivityRequest>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchResponse {
    pub outcomes: Vec<ScenarioOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sensitivity: Option<Vec<RateSensitivityPoint>>,
}

/// Routes parsed requests to the calculators under one configuration
#[derive(Debug, Clone, Default)]
pub struct Api {
    config: SimulationConfig,
}

impl Api {
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    /// Parse `body` for the named operation and return the JSON result
    pub fn dispatch(&self, operation: &str, body: &str) -> Result<Value> {
        let operation: Operation = operation.parse()?;
        debug!("Dispatching {:?} ({} byte body)", operation, body.len());
        self.handle(operation, body)
    }

    pub fn handle(&self, operation: Operation, body: &str) -> Result<Value> {
        let value = match operation {
            Operation::Amortize => {
                let request: AmortizeRequest = serde_json::from_str(body)?;
                serde_json::to_value(self.amortize(&request)?)?
            }
            Operation::LifeInsurance => {
                let params: LifeInsuranceParameters = serde_json::from_str(body)?;
                serde_json::to_value(calculate_life_insurance(&params)?)?
            }
            Operation::HomeInsurance => {
                let params: HomeInsuranceParameters = serde_json::from_str(body)?;
                serde_json::to_value(HomeInsuranceCalculator::new(self.config.clone()).quote(&params)?)?
            }
            Operation::Compare => {
                let request: CompareRequest = serde_json::from_str(body)?;
                let result = LoanComparator::new(self.config.clone()).compare(
                    &request.reference_loan,
                    &request.alternative_loan,
                    request.investment_params.as_ref(),
                    request.modular_schedule.as_ref(),
                )?;
                serde_json::to_value(result)?
            }
            Operation::Batch => {
                let request: BatchRequest = serde_json::from_str(body)?;
                serde_json::to_value(self.batch(&request)?)?
            }
        };
        Ok(value)
    }

    pub fn amortize(&self, request: &AmortizeRequest) -> Result<AmortizeResponse> {
        let result = LoanEngine::new(self.config.clone()).amortize(&request.loan, request.modular_schedule.as_ref())?;

        let affordability = match (request.monthly_income, request.client_count) {
            (None, None) => None,
            (income, count) => Some(assess_affordability(&result, income.unwrap_or(0.0), count.unwrap_or(1))?),
        };

        Ok(AmortizeResponse { result, affordability })
    }

    pub fn batch(&self, request: &BatchRequest) -> Result<BatchResponse> {
        let runner = ScenarioRunner::new(self.config.clone());
        let sensitivity = match &request.sensitivity {
            Some(sweep) => Some(runner.run_rate_sensitivity(&sweep.loan, &sweep.rates, sweep.modular_schedule.as_ref())?),
            None => None,
        };

        Ok(BatchResponse {
            outcomes: runner.run_batch(&request.scenarios),
            sensitivity,
        })
    }
}

/// Dispatch with the default configuration
pub fn dispatch(operation: &str, body: &str) -> Result<Value> {
    Api::default().dispatch(operation, body)
}
