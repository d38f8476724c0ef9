//! Micro-insurance premium models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{ensure_in_range, EngineError, EngineResult};
use crate::types::Language;

/// Continuous risk indicator in `[0, 1]` used for pricing.
///
/// Not to be confused with [`crate::RiskLevel`], the categorical outcome of
/// crop risk classification.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, PartialOrd)]
#[serde(try_from = "f64", into = "f64")]
pub struct RiskIndex(f64);

impl RiskIndex {
    pub fn new(value: f64) -> EngineResult<Self> {
        ensure_in_range("risk_index", value, 0.0, 1.0)?;
        Ok(Self(value))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for RiskIndex {
    type Error = EngineError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        RiskIndex::new(value)
    }
}

impl From<RiskIndex> for f64 {
    fn from(index: RiskIndex) -> Self {
        index.0
    }
}

/// Input for a premium quote
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PremiumInput {
    pub crop_type: String,
    /// Hectares
    pub farm_size: f64,
    #[serde(alias = "risk_level")]
    pub risk_index: RiskIndex,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub language: Language,
}

/// Reporting category of a quote. Never used for clamping.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PremiumRiskCategory {
    Low,
    Medium,
    High,
}

impl PremiumRiskCategory {
    pub fn label(&self, language: Language) -> &'static str {
        match (self, language) {
            (PremiumRiskCategory::Low, Language::French) => "faible",
            (PremiumRiskCategory::Medium, Language::French) => "moyen",
            (PremiumRiskCategory::High, Language::French) => "élevé",
            (PremiumRiskCategory::Low, Language::English) => "low",
            (PremiumRiskCategory::Medium, Language::English) => "medium",
            (PremiumRiskCategory::High, Language::English) => "high",
        }
    }
}

/// Intermediate pricing figures (FCFA)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PremiumBreakdown {
    pub base_premium: Decimal,
    pub crop_risk_factor: Decimal,
    pub regional_risk_factor: Decimal,
    /// Rounded up to the pricing step, before the affordability clamp
    pub adjusted_premium: Decimal,
}

/// A premium quote (FCFA)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PremiumResult {
    pub monthly_premium: Decimal,
    pub coverage_amount: Decimal,
    pub risk_category: PremiumRiskCategory,
    pub explanation: String,
    pub breakdown: PremiumBreakdown,
}
