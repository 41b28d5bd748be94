//! End-to-end scenarios through the public API

use approx::{assert_abs_diff_eq, assert_relative_eq};
use mortgage_sim::api::dispatch;
use mortgage_sim::insurance::{
    BiometricProfile, HomeInsuranceCalculator, HomeInsuranceParameters, LifeInsuranceParameters, PaymentType,
    PropertyType,
};
use mortgage_sim::loan::{ModularSchedule, ScheduleEntry};
use mortgage_sim::{
    amortize_loan, calculate_life_insurance, compare_loans, InvestmentParams, LoanParameters, LoanType,
    SimulationConfig,
};

#[test]
fn annuity_200k_at_3_6_over_20_years() {
    let params = LoanParameters::new(LoanType::Annuity, 200_000.0, 3.6, 20);
    let result = amortize_loan(&params, None).unwrap();

    let r: f64 = 0.003;
    let growth = (1.0 + r).powi(240);
    let closed_form = 200_000.0 * r * growth / (growth - 1.0);

    assert_relative_eq!(result.monthly_data[0].payment_excluding_insurance, closed_form, max_relative = 1e-9);
    assert_abs_diff_eq!(closed_form, 1170.22, epsilon = 0.01);
    assert_eq!(result.month(240).unwrap().remaining_principal, 0.0);

    let principal: f64 = result.monthly_data.iter().map(|m| m.principal_payment).sum();
    assert_abs_diff_eq!(principal, 200_000.0, epsilon = 0.01);
}

#[test]
fn zero_rate_bullet_100k_over_10_years() {
    let params = LoanParameters::new(LoanType::Bullet, 100_000.0, 0.0, 10);
    let result = amortize_loan(&params, None).unwrap();

    for month in 1..=119 {
        let row = result.month(month).unwrap();
        assert_eq!(row.interest, 0.0);
        assert_eq!(row.principal_payment, 0.0);
        assert_eq!(row.payment_excluding_insurance, 0.0);
    }
    assert_eq!(result.month(120).unwrap().principal_payment, 100_000.0);
}

#[test]
fn amortization_round_trips_interest_and_insurance() {
    let params = LoanParameters::new(LoanType::Annuity, 412_345.0, 4.25, 30);
    let result = amortize_loan(&params, None).unwrap();

    let interest: f64 = result.monthly_data.iter().map(|m| m.interest).sum();
    let insurance: f64 = result.monthly_data.iter().map(|m| m.insurance_premium).sum();
    assert_eq!(interest, result.statistics.total_interest_paid);
    assert_eq!(insurance, result.statistics.total_insurance_paid);
    assert_eq!(result, amortize_loan(&params, None).unwrap());
}

#[test]
fn life_insurance_declining_coverage_boundary() {
    let params = LifeInsuranceParameters {
        client: BiometricProfile::new(40, false),
        loan_amount: 300_000.0,
        term_years: 20,
        coverage_percentage: 1.0,
        payment_type: PaymentType::Distributed,
        based_on_remaining_capital: true,
    };
    let result = calculate_life_insurance(&params).unwrap();

    assert_eq!(result.amortization_table[0].coverage, 300_000.0);
    let last = result.amortization_table.last().unwrap();
    assert_eq!(last.month, 240);
    assert_eq!(last.year, 20);
    assert_relative_eq!(last.coverage, 1_250.0, max_relative = 1e-12);
}

#[test]
fn life_insurance_flat_coverage() {
    let params = LifeInsuranceParameters {
        client: BiometricProfile::new(52, true),
        loan_amount: 180_000.0,
        term_years: 15,
        coverage_percentage: 0.6,
        payment_type: PaymentType::LumpSum,
        based_on_remaining_capital: false,
    };
    let result = calculate_life_insurance(&params).unwrap();
    assert!(result.amortization_table.iter().all(|row| row.coverage == 180_000.0 * 0.6));
}

#[test]
fn home_insurance_scales_with_value() {
    let calculator = HomeInsuranceCalculator::new(SimulationConfig::default().at_valuation_year(2025));
    let base = HomeInsuranceParameters {
        construction_year: Some(1960),
        square_meters: Some(160.0),
        deductible: Some(250.0),
        ..HomeInsuranceParameters::new(300_000.0, PropertyType::Cottage, 0.9)
    };
    let doubled = HomeInsuranceParameters {
        property_value: 600_000.0,
        ..base.clone()
    };

    let a = calculator.quote(&base).unwrap();
    let b = calculator.quote(&doubled).unwrap();
    assert_relative_eq!(b.coverage_amount, 2.0 * a.coverage_amount, max_relative = 1e-12);
    assert_relative_eq!(b.yearly_premium, 2.0 * a.yearly_premium, max_relative = 1e-12);
    assert_relative_eq!(a.monthly_premium, a.yearly_premium / 12.0);
}

#[test]
fn comparison_annuity_vs_modular_with_investment() {
    let reference = LoanParameters::new(LoanType::Annuity, 250_000.0, 3.4, 25);
    let alternative = LoanParameters::new(LoanType::Modular, 250_000.0, 3.7, 25);
    let schedule = ModularSchedule::new(vec![
        ScheduleEntry { month: 60, amount: 50_000.0 },
        ScheduleEntry { month: 180, amount: 100_000.0 },
        ScheduleEntry { month: 300, amount: 100_000.0 },
    ]);
    let investment = InvestmentParams::new(25_000.0, 7.0);

    let result = compare_loans(&reference, &alternative, Some(&investment), Some(&schedule)).unwrap();

    assert_eq!(result.alternative_loan.final_remaining_principal(), 0.0);
    let simulation = result.investment_simulation.as_ref().unwrap();
    assert_eq!(simulation.len(), 300);
    assert_eq!(
        result.comparison_stats.net_worth_end_of_term,
        simulation.last().unwrap().net_worth
    );
    assert_eq!(
        result.comparison_stats.total_cost_difference,
        result.alternative_loan.statistics.total_loan_costs - result.reference_loan.statistics.total_loan_costs
    );
    let estimate = result.minimum_required_growth_rate.unwrap();
    assert!(estimate >= 0.0);
    assert_eq!(result.annual_differences.len(), 25);
}

#[test]
fn json_dispatch_matches_library_call() {
    let body = r#"{"loanType":"annuity","principal":200000,"interestRate":3.6,"termYears":20}"#;
    let value = dispatch("/amortize", body).unwrap();

    let direct = amortize_loan(&LoanParameters::new(LoanType::Annuity, 200_000.0, 3.6, 20), None).unwrap();
    assert_eq!(
        value["statistics"]["totalInterestPaid"].as_f64().unwrap(),
        direct.statistics.total_interest_paid
    );
    assert_eq!(value["monthlyData"][239]["remainingPrincipal"].as_f64().unwrap(), 0.0);
}

#[test]
fn json_dispatch_life_insurance() {
    let body = r#"{
        "client": {"age": 40, "smoker": false},
        "loanAmount": 300000,
        "termYears": 20,
        "coveragePercentage": 1.0,
        "paymentType": "DISTRIBUTED",
        "basedOnRemainingCapital": true
    }"#;
    let value = dispatch("life-insurance", body).unwrap();
    let table = value["amortizationTable"].as_array().unwrap();
    assert_eq!(table.len(), 240);
    assert_eq!(table[0]["coverage"].as_f64().unwrap(), 300_000.0);
}

#[test]
fn json_dispatch_rejects_missing_age() {
    let body = r#"{"client": {}, "loanAmount": 1, "termYears": 1, "coveragePercentage": 1.0, "paymentType": "LUMP_SUM"}"#;
    let err = dispatch("life-insurance", body).unwrap_err();
    assert!(err.is_client_error());
}
