//! Life and home insurance premium calculators

mod risk;
mod life;
mod home;

pub use risk::{AgeRiskTable, BmiBand, BuildingAgeBracket, PropertyType};
pub use life::{
    calculate_life_insurance, BiometricProfile, Gender, LifeInsuranceParameters, LifeInsuranceResult,
    LifeInsuranceRow, LifeRiskFactors, PaymentType,
};
pub use home::{
    calculate_home_insurance, HomeInsuranceCalculator, HomeInsuranceParameters, HomeInsuranceResult,
    HomeRiskFactors,
};
