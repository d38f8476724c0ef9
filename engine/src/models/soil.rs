//! Soil models

use serde::{Deserialize, Serialize};

use crate::types::Language;

/// Laboratory or sensor soil measurements. Any field may be missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SoilProperties {
    #[serde(default)]
    pub ph: Option<f64>,
    /// Organic matter (%)
    #[serde(default)]
    pub organic_matter: Option<f64>,
    /// Total nitrogen (g/kg)
    #[serde(default)]
    pub nitrogen: Option<f64>,
    /// Available phosphorus (mg/kg)
    #[serde(default)]
    pub phosphorus: Option<f64>,
    /// Exchangeable potassium (cmol/kg)
    #[serde(default)]
    pub potassium: Option<f64>,
}

/// Agronomic suitability derived from the soil quality score
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SoilSuitability {
    /// 80+
    Excellent,
    /// 60-79
    Good,
    /// 40-59
    Moderate,
    /// Below 40
    Poor,
}

impl SoilSuitability {
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            SoilSuitability::Excellent
        } else if score >= 60.0 {
            SoilSuitability::Good
        } else if score >= 40.0 {
            SoilSuitability::Moderate
        } else {
            SoilSuitability::Poor
        }
    }

    pub fn label(&self, language: Language) -> &'static str {
        match (self, language) {
            (SoilSuitability::Excellent, Language::French) => "excellente",
            (SoilSuitability::Good, Language::French) => "bonne",
            (SoilSuitability::Moderate, Language::French) => "moyenne",
            (SoilSuitability::Poor, Language::French) => "faible",
            (SoilSuitability::Excellent, Language::English) => "excellent",
            (SoilSuitability::Good, Language::English) => "good",
            (SoilSuitability::Moderate, Language::English) => "moderate",
            (SoilSuitability::Poor, Language::English) => "poor",
        }
    }
}

/// Scored soil record as consumed by credit scoring
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SoilData {
    /// 0-100
    pub quality_score: f64,
    pub suitability: SoilSuitability,
    #[serde(default)]
    pub properties: Option<SoilProperties>,
}
