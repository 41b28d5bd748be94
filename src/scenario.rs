//! Scenario runner for batch loan calculations
//!
//! Holds one engine configuration and fans many loan parameter sets out over
//! the rayon thread pool. Results come back in input order.

use log::{debug, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::SimulationConfig;
use crate::error::Result;
use crate::loan::{LoanCalculationResult, LoanEngine, LoanParameters, LoanStatistics, LoanType, ModularSchedule};

/// One named loan to amortize in a batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanScenario {
    #[serde(default)]
    pub name: String,
    #[serde(flatten)]
    pub loan: LoanParameters,
    #[serde(default)]
    pub modular_schedule: Option<ModularSchedule>,
}

impl LoanScenario {
    pub fn new(name: impl Into<String>, loan: LoanParameters) -> Self {
        Self {
            name: name.into(),
            loan,
            modular_schedule: None,
        }
    }
}

/// Headline figures of one batch entry; failed entries carry the error text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioOutcome {
    pub name: String,
    pub loan_type: LoanType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_month_payment: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statistics: Option<LoanStatistics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ScenarioOutcome {
    fn from_result(scenario: &LoanScenario, result: Result<LoanCalculationResult>) -> Self {
        match result {
            Ok(result) => Self {
                name: scenario.name.clone(),
                loan_type: scenario.loan.loan_type,
                first_month_payment: result.monthly_data.first().map(|r| r.total_monthly_payment),
                statistics: Some(result.statistics),
                error: None,
            },
            Err(err) => {
                warn!("Scenario '{}' failed: {}", scenario.name, err);
                Self {
                    name: scenario.name.clone(),
                    loan_type: scenario.loan.loan_type,
                    first_month_payment: None,
                    statistics: None,
                    error: Some(err.to_string()),
                }
            }
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Loan cost at one interest rate of a sensitivity sweep
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateSensitivityPoint {
    pub interest_rate: f64,
    pub first_month_payment: f64,
    pub total_interest_paid: f64,
    pub total_loan_costs: f64,
}

#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    engine: LoanEngine,
}

impl ScenarioRunner {
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            engine: LoanEngine::new(config),
        }
    }

    pub fn config(&self) -> &SimulationConfig {
        self.engine.config()
    }

    /// Amortize a single scenario
    pub fn run(&self, scenario: &LoanScenario) -> Result<LoanCalculationResult> {
        self.engine.amortize(&scenario.loan, scenario.modular_schedule.as_ref())
    }

    /// Amortize every scenario in parallel; one failure does not stop the batch
    pub fn run_batch(&self, scenarios: &[LoanScenario]) -> Vec<ScenarioOutcome> {
        let outcomes: Vec<ScenarioOutcome> = scenarios
            .par_iter()
            .map(|scenario| ScenarioOutcome::from_result(scenario, self.run(scenario)))
            .collect();

        debug!(
            "Batch of {} scenarios: {} succeeded",
            outcomes.len(),
            outcomes.iter().filter(|o| o.is_ok()).count()
        );
        outcomes
    }

    /// Re-run one loan at each interest rate (percent)
    pub fn run_rate_sensitivity(
        &self,
        base: &LoanParameters,
        rates: &[f64],
        schedule: Option<&ModularSchedule>,
    ) -> Result<Vec<RateSensitivityPoint>> {
        rates
            .par_iter()
            .map(|&rate| -> Result<RateSensitivityPoint> {
                let params = LoanParameters {
                    interest_rate: rate,
                    ..base.clone()
                };
                let result = self.engine.amortize(&params, schedule)?;
                Ok(RateSensitivityPoint {
                    interest_rate: rate,
                    first_month_payment: result
                        .monthly_data
                        .first()
                        .map_or(0.0, |r| r.total_monthly_payment),
                    total_interest_paid: result.statistics.total_interest_paid,
                    total_loan_costs: result.statistics.total_loan_costs,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loan::amortize_loan;

    fn scenarios() -> Vec<LoanScenario> {
        vec![
            LoanScenario::new("annuity", LoanParameters::new(LoanType::Annuity, 200_000.0, 3.6, 20)),
            LoanScenario::new("bullet", LoanParameters::new(LoanType::Bullet, 200_000.0, 3.6, 20)),
            LoanScenario::new("broken", LoanParameters::new(LoanType::Modular, 200_000.0, 3.6, 20)),
        ]
    }

    #[test]
    fn test_batch_keeps_order_and_isolates_failures() {
        let runner = ScenarioRunner::default();
        let outcomes = runner.run_batch(&scenarios());

        assert_eq!(outcomes.len(), 3);
        assert_eq!(outcomes[0].name, "annuity");
        assert!(outcomes[0].is_ok());
        assert!(outcomes[1].is_ok());
        assert!(!outcomes[2].is_ok());
        assert!(outcomes[2].error.as_ref().unwrap().contains("schedule"));
    }

    #[test]
    fn test_batch_matches_sequential() {
        let runner = ScenarioRunner::default();
        let outcomes = runner.run_batch(&scenarios()[..2]);
        for (scenario, outcome) in scenarios().iter().zip(&outcomes) {
            let direct = amortize_loan(&scenario.loan, None).unwrap();
            assert_eq!(outcome.statistics.as_ref(), Some(&direct.statistics));
        }
    }

    #[test]
    fn test_rate_sensitivity_monotone() {
        let runner = ScenarioRunner::default();
        let base = LoanParameters::new(LoanType::Annuity, 250_000.0, 3.0, 25);
        let points = runner.run_rate_sensitivity(&base, &[2.0, 3.0, 4.0, 5.0], None).unwrap();

        assert_eq!(points.len(), 4);
        assert_eq!(points[1].interest_rate, 3.0);
        for pair in points.windows(2) {
            assert!(pair[1].total_interest_paid > pair[0].total_interest_paid);
            assert!(pair[1].first_month_payment > pair[0].first_month_payment);
        }
    }

    #[test]
    fn test_rate_sensitivity_rejects_negative_rate() {
        let runner = ScenarioRunner::default();
        let base = LoanParameters::new(LoanType::Annuity, 250_000.0, 3.0, 25);
        assert!(runner.run_rate_sensitivity(&base, &[3.0, -1.0], None).is_err());
    }

    #[test]
    fn test_scenario_json_is_flat() {
        let scenario: LoanScenario = serde_json::from_str(
            r#"{"name":"m","loanType":"modular","principal":1000,"interestRate":1,"termYears":1,
                "modularSchedule":{"schedule":[{"month":6,"amount":1000}]}}"#,
        )
        .unwrap();
        let result = ScenarioRunner::default().run(&scenario).unwrap();
        assert_eq!(result.final_remaining_principal(), 0.0);
    }
}
