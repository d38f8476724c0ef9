//! Soil quality scoring
//!
//! The single implementation of the soil score, used both when soil provider
//! data is ingested and when a farmer is scored for credit.

use tracing::debug;

use crate::models::{SoilData, SoilProperties, SoilSuitability};

/// Score used when no property was measured
pub const NEUTRAL_SOIL_SCORE: f64 = 50.0;

const PH_WEIGHT: f64 = 0.25;
const ORGANIC_MATTER_WEIGHT: f64 = 0.25;
const NITROGEN_WEIGHT: f64 = 0.20;
const PHOSPHORUS_WEIGHT: f64 = 0.15;
const POTASSIUM_WEIGHT: f64 = 0.15;

/// Optimal pH band for most staple crops
const PH_OPTIMUM: (f64, f64) = (6.0, 7.5);
/// pH units outside the optimum at which the sub-score reaches 0
const PH_TOLERANCE: f64 = 2.0;

/// Levels at which each nutrient sub-score saturates at 100
const ORGANIC_MATTER_SUFFICIENT: f64 = 3.0;
const NITROGEN_SUFFICIENT: f64 = 2.0;
const PHOSPHORUS_SUFFICIENT: f64 = 30.0;
const POTASSIUM_SUFFICIENT: f64 = 0.5;

/// Weighted 0-100 quality score. Missing properties are left out and the
/// remaining weights renormalised.
pub fn soil_quality_score(properties: &SoilProperties) -> f64 {
    let components = [
        (measured(properties.ph).map(ph_score), PH_WEIGHT),
        (
            measured(properties.organic_matter)
                .map(|v| sufficiency_score(v, ORGANIC_MATTER_SUFFICIENT)),
            ORGANIC_MATTER_WEIGHT,
        ),
        (
            measured(properties.nitrogen).map(|v| sufficiency_score(v, NITROGEN_SUFFICIENT)),
            NITROGEN_WEIGHT,
        ),
        (
            measured(properties.phosphorus).map(|v| sufficiency_score(v, PHOSPHORUS_SUFFICIENT)),
            PHOSPHORUS_WEIGHT,
        ),
        (
            measured(properties.potassium).map(|v| sufficiency_score(v, POTASSIUM_SUFFICIENT)),
            POTASSIUM_WEIGHT,
        ),
    ];

    let (weighted, total_weight) = components
        .iter()
        .filter_map(|(score, weight)| score.map(|s| (s * weight, *weight)))
        .fold((0.0, 0.0), |(sum, weights), (value, weight)| (sum + value, weights + weight));

    if total_weight == 0.0 {
        return NEUTRAL_SOIL_SCORE;
    }
    (weighted / total_weight).clamp(0.0, 100.0)
}

/// Score soil properties into the record consumed by credit scoring
pub fn score_soil(properties: SoilProperties) -> SoilData {
    let quality_score = soil_quality_score(&properties);
    let suitability = SoilSuitability::from_score(quality_score);
    debug!(quality_score, ?suitability, "Scored soil");
    SoilData {
        quality_score,
        suitability,
        properties: Some(properties),
    }
}

fn measured(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

fn ph_score(ph: f64) -> f64 {
    let (low, high) = PH_OPTIMUM;
    let distance = if ph < low {
        low - ph
    } else if ph > high {
        ph - high
    } else {
        0.0
    };
    (100.0 * (1.0 - distance / PH_TOLERANCE)).max(0.0)
}

fn sufficiency_score(value: f64, sufficient: f64) -> f64 {
    (value / sufficient * 100.0).clamp(0.0, 100.0)
}
