//! Static risk tables for life and home insurance pricing
//!
//! Every table is a closed enum or a fixed anchor list so lookups are
//! exhaustive at compile time; unknown property types fall into `Other`.

use serde::{Deserialize, Serialize};

/// Age anchors and their mortality risk factors, ascending by age
const AGE_RISK_ANCHORS: [(u32, f64); 13] = [
    (18, 0.5),
    (25, 0.6),
    (30, 0.7),
    (35, 0.85),
    (40, 1.0),
    (45, 1.2),
    (50, 1.5),
    (55, 1.9),
    (60, 2.5),
    (65, 3.2),
    (70, 4.0),
    (75, 5.0),
    (80, 6.5),
];

/// Piecewise-linear age risk table
#[derive(Debug, Clone, Copy, Default)]
pub struct AgeRiskTable;

impl AgeRiskTable {
    /// Risk factor for an age
    ///
    /// Ages outside the anchor range clamp to the nearest anchor; ages between
    /// anchors interpolate linearly.
    pub fn factor(&self, age: u32) -> f64 {
        let (min_age, min_factor) = AGE_RISK_ANCHORS[0];
        let (max_age, max_factor) = AGE_RISK_ANCHORS[AGE_RISK_ANCHORS.len() - 1];

        if age <= min_age {
            return min_factor;
        }
        if age >= max_age {
            return max_factor;
        }

        for pair in AGE_RISK_ANCHORS.windows(2) {
            let (lower_age, lower_factor) = pair[0];
            let (upper_age, upper_factor) = pair[1];
            if age == lower_age {
                return lower_factor;
            }
            if age < upper_age {
                let position = (age - lower_age) as f64 / (upper_age - lower_age) as f64;
                return lower_factor + position * (upper_factor - lower_factor);
            }
        }

        max_factor
    }
}

/// Body-mass-index bands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BmiBand {
    /// < 18.5
    Underweight,
    /// [18.5, 25)
    Normal,
    /// [25, 30)
    Overweight,
    /// [30, 35)
    ObeseClass1,
    /// [35, 40)
    ObeseClass2,
    /// >= 40
    ObeseClass3,
}

impl BmiBand {
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < 18.5 {
            BmiBand::Underweight
        } else if bmi < 25.0 {
            BmiBand::Normal
        } else if bmi < 30.0 {
            BmiBand::Overweight
        } else if bmi < 35.0 {
            BmiBand::ObeseClass1
        } else if bmi < 40.0 {
            BmiBand::ObeseClass2
        } else {
            BmiBand::ObeseClass3
        }
    }

    /// Band from height (cm) and weight (kg)
    pub fn from_measurements(height_cm: f64, weight_kg: f64) -> Self {
        let height_m = height_cm / 100.0;
        Self::from_bmi(weight_kg / (height_m * height_m))
    }

    pub fn risk_factor(&self) -> f64 {
        match self {
            BmiBand::Underweight => 1.2,
            BmiBand::Normal => 1.0,
            BmiBand::Overweight => 1.1,
            BmiBand::ObeseClass1 => 1.3,
            BmiBand::ObeseClass2 => 1.6,
            BmiBand::ObeseClass3 => 2.0,
        }
    }
}

/// Property types with a priced risk factor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PropertyType {
    Apartment,
    DetachedHouse,
    SemiDetachedHouse,
    TerracedHouse,
    Bungalow,
    Mansion,
    Cottage,
    Farmhouse,
    Condo,
    Loft,
    Studio,
    /// Any type outside the priced set
    #[serde(other)]
    Other,
}

impl PropertyType {
    pub fn risk_factor(&self) -> f64 {
        match self {
            PropertyType::Apartment => 0.85,
            PropertyType::DetachedHouse => 1.1,
            PropertyType::SemiDetachedHouse => 1.0,
            PropertyType::TerracedHouse => 0.95,
            PropertyType::Bungalow => 1.15,
            PropertyType::Mansion => 1.4,
            PropertyType::Cottage => 1.2,
            PropertyType::Farmhouse => 1.25,
            PropertyType::Condo => 0.9,
            PropertyType::Loft => 1.0,
            PropertyType::Studio => 0.8,
            PropertyType::Other => 1.0,
        }
    }
}

/// Building age brackets (years since construction)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BuildingAgeBracket {
    /// <= 5 years
    New,
    /// <= 15 years
    Recent,
    /// <= 30 years
    Established,
    /// <= 50 years
    Mature,
    /// <= 75 years
    Old,
    /// > 75 years
    Historic,
}

impl BuildingAgeBracket {
    pub fn from_age(building_age: i32) -> Self {
        match building_age {
            i32::MIN..=5 => BuildingAgeBracket::New,
            6..=15 => BuildingAgeBracket::Recent,
            16..=30 => BuildingAgeBracket::Established,
            31..=50 => BuildingAgeBracket::Mature,
            51..=75 => BuildingAgeBracket::Old,
            _ => BuildingAgeBracket::Historic,
        }
    }

    pub fn risk_factor(&self) -> f64 {
        match self {
            BuildingAgeBracket::New => 0.85,
            BuildingAgeBracket::Recent => 0.9,
            BuildingAgeBracket::Established => 1.0,
            BuildingAgeBracket::Mature => 1.15,
            BuildingAgeBracket::Old => 1.3,
            BuildingAgeBracket::Historic => 1.5,
        }
    }
}
