//! Crop risk classification models

use serde::{Deserialize, Serialize};

use crate::models::weather::IndicatorReport;

/// Categorical crop risk level
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    /// Score below 30
    Low,
    /// Score 30-59
    Medium,
    /// Score 60-79
    High,
    /// Score 80+
    Critical,
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "Low"),
            RiskLevel::Medium => write!(f, "Medium"),
            RiskLevel::High => write!(f, "High"),
            RiskLevel::Critical => write!(f, "Critical"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RiskType {
    Drought,
    Flood,
    /// Reserved for wind-driven events reported by alerting collaborators
    Storm,
    HeatStress,
    Multiple,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum AlertLevel {
    Info,
    Warning,
    Danger,
    Emergency,
}

impl RiskLevel {
    /// Tier a 0-100 risk score
    pub fn from_score(score: u32) -> Self {
        if score >= 80 {
            RiskLevel::Critical
        } else if score >= 60 {
            RiskLevel::High
        } else if score >= 30 {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    pub fn alert_level(&self) -> AlertLevel {
        match self {
            RiskLevel::Critical => AlertLevel::Emergency,
            RiskLevel::High => AlertLevel::Danger,
            RiskLevel::Medium => AlertLevel::Warning,
            RiskLevel::Low => AlertLevel::Info,
        }
    }
}

/// Indicator values that fired a trigger
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RiskTriggers {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consecutive_dry_days: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_precipitation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precipitation_anomaly: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature_anomaly: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub farm_size: Option<f64>,
}

impl RiskTriggers {
    pub fn is_empty(&self) -> bool {
        *self == RiskTriggers::default()
    }
}

/// Risk classification for one farm
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RiskAnalysis {
    pub risk_level: RiskLevel,
    pub risk_type: RiskType,
    /// 0-100
    pub risk_score: u32,
    pub triggers: RiskTriggers,
    pub recommendations: Vec<String>,
    pub compensation_eligible: bool,
    pub alert_level: AlertLevel,
}

/// Indicators and classification produced from one weather series
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RiskAssessment {
    pub indicators: IndicatorReport,
    pub analysis: RiskAnalysis,
}
