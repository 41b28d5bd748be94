//! Reference vs alternative loan comparison with optional investment overlay

use log::debug;
use serde::{Deserialize, Serialize};

use super::growth::{estimate_minimum_growth_rate, solve_required_growth_rate};
use super::investment::{
    monthly_growth_rate, simulate_investment, simulate_reference_path, InvestmentParams, InvestmentSimulationRecord,
    ReferenceInvestmentRecord,
};
use crate::config::SimulationConfig;
use crate::error::Result;
use crate::loan::{compare_annual, AnnualDifference, LoanCalculationResult, LoanEngine, LoanParameters, ModularSchedule};

/// Investment outcome over the alternative loan's term
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentSummary {
    pub start_investment: f64,
    pub end_investment_balance: f64,
    /// End balance minus everything contributed (start capital included)
    pub net_investment_growth: f64,
    /// Investment growth minus the alternative loan's interest and insurance
    pub net_final_result: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonStats {
    /// Alternative total loan costs minus reference total loan costs
    pub total_cost_difference: f64,
    /// Net worth in the last simulated month (0 without an investment overlay)
    pub net_worth_end_of_term: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub investment_summary: Option<InvestmentSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    pub reference_loan: LoanCalculationResult,
    pub alternative_loan: LoanCalculationResult,
    pub investment_simulation: Option<Vec<InvestmentSimulationRecord>>,
    pub reference_investment: Option<Vec<ReferenceInvestmentRecord>>,
    /// Quick estimate, annual percent
    pub minimum_required_growth_rate: Option<f64>,
    /// Bisection solve over the contribution stream, annual percent
    pub solved_required_growth_rate: Option<f64>,
    pub comparison_stats: ComparisonStats,
    pub annual_differences: Vec<AnnualDifference>,
}

/// Runs loan comparisons with a shared configuration
#[derive(Debug, Clone, Default)]
pub struct LoanComparator {
    engine: LoanEngine,
}

impl LoanComparator {
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            engine: LoanEngine::new(config),
        }
    }

    pub fn config(&self) -> &SimulationConfig {
        self.engine.config()
    }

    /// Amortize both loans and, when investment parameters are given, invest
    /// the monthly outlay differential while holding the alternative loan
    ///
    /// The modular schedule applies to the alternative loan only.
    pub fn compare(
        &self,
        reference: &LoanParameters,
        alternative: &LoanParameters,
        investment: Option<&InvestmentParams>,
        schedule: Option<&ModularSchedule>,
    ) -> Result<ComparisonResult> {
        if let Some(investment) = investment {
            investment.validate()?;
        }

        let (reference_loan, alternative_loan) = rayon::join(
            || self.engine.amortize(reference, None),
            || self.engine.amortize(alternative, schedule),
        );
        let (reference_loan, alternative_loan) = (reference_loan?, alternative_loan?);

        let annual_differences = compare_annual(&reference_loan.annual_data, &alternative_loan.annual_data);
        let comparison_stats = ComparisonStats {
            total_cost_difference: alternative_loan.statistics.total_loan_costs
                - reference_loan.statistics.total_loan_costs,
            net_worth_end_of_term: 0.0,
            investment_summary: None,
        };

        let mut result = ComparisonResult {
            reference_loan,
            alternative_loan,
            investment_simulation: None,
            reference_investment: None,
            minimum_required_growth_rate: None,
            solved_required_growth_rate: None,
            comparison_stats,
            annual_differences,
        };

        if let Some(investment) = investment {
            self.overlay_investment(&mut result, investment);
        }

        debug!(
            "Compared {:?} vs {:?}: cost difference {:.2}, net worth at end {:.2}",
            reference.loan_type,
            alternative.loan_type,
            result.comparison_stats.total_cost_difference,
            result.comparison_stats.net_worth_end_of_term
        );

        Ok(result)
    }

    fn overlay_investment(&self, result: &mut ComparisonResult, investment: &InvestmentParams) {
        let growth_pct = investment.growth_rate_pct(self.config().default_annual_growth_rate);
        let monthly_rate = monthly_growth_rate(growth_pct);
        let start_capital = investment.alternative_start_capital();

        let reference_months = result.reference_loan.monthly_data.len();
        let alternative = &result.alternative_loan;
        let horizon = reference_months.max(alternative.monthly_data.len()) as u32;

        let simulation = simulate_investment(
            &result.reference_loan.monthly_data,
            &alternative.monthly_data,
            start_capital,
            monthly_rate,
        );

        let final_month = alternative.total_months();
        let target = alternative.statistics.total_principal_paid;
        let final_balance = simulation.last().map(|r| r.investment_balance);

        result.minimum_required_growth_rate =
            estimate_minimum_growth_rate(final_balance, final_month, target, start_capital);

        let contributions: Vec<f64> = simulation.iter().map(|r| r.monthly_contribution).collect();
        result.solved_required_growth_rate = solve_required_growth_rate(start_capital, &contributions, final_month, target);

        if let Some(last) = simulation.last() {
            result.comparison_stats.net_worth_end_of_term = last.net_worth;
            let net_investment_growth = last.investment_balance - last.cumulative_investment_contribution;
            result.comparison_stats.investment_summary = Some(InvestmentSummary {
                start_investment: start_capital,
                end_investment_balance: last.investment_balance,
                net_investment_growth,
                net_final_result: net_investment_growth - alternative.statistics.total_loan_costs,
            });
        }

        result.reference_investment = Some(simulate_reference_path(
            investment.reference_start_capital(),
            monthly_rate,
            horizon,
        ));
        result.investment_simulation = Some(simulation);
    }
}

/// Compare two loans with the default configuration
pub fn compare_loans(
    reference: &LoanParameters,
    alternative: &LoanParameters,
    investment: Option<&InvestmentParams>,
    schedule: Option<&ModularSchedule>,
) -> Result<ComparisonResult> {
    LoanComparator::default().compare(reference, alternative, investment, schedule)
}
