//! Farmer credit scoring models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::soil::SoilData;
use crate::types::Language;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum YieldTrend {
    Increasing,
    Stable,
    Decreasing,
}

/// Harvest history summary
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct YieldData {
    /// Tonnes per hectare
    pub average_yield: f64,
    pub trend: YieldTrend,
    /// 0-100
    pub reliability_score: f64,
}

/// Micro-insurance track record
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct InsuranceHistory {
    /// Share of premiums paid on time (%)
    pub payment_reliability: f64,
    pub years_with_insurance: u32,
    pub claims_submitted: u32,
    pub total_policies: u32,
    pub active_policies: u32,
}

/// Access to markets and post-harvest infrastructure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MarketAccessData {
    /// Kilometres to the nearest market
    pub distance_to_market: f64,
    /// Transport cost per trip (FCFA, thousands)
    pub transport_cost: f64,
    #[serde(default)]
    pub access_to_storage: bool,
    #[serde(default)]
    pub access_to_processing: bool,
    #[serde(default)]
    pub cooperative_membership: bool,
}

/// Everything the scorer needs for one farmer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreditInput {
    pub crop_type: String,
    /// Hectares
    pub farm_size: f64,
    #[serde(default)]
    pub soil: Option<SoilData>,
    pub yields: YieldData,
    #[serde(default)]
    pub insurance: Option<InsuranceHistory>,
    #[serde(default)]
    pub market: Option<MarketAccessData>,
    #[serde(default)]
    pub language: Language,
}

/// Component scores, each 0-100
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CreditSubScores {
    pub soil_quality: f64,
    pub historical_yields: f64,
    pub insurance_history: f64,
    pub market_access: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CreditRiskLevel {
    /// 700+
    Low,
    /// 500-699
    Medium,
    /// Below 500
    High,
}

impl std::fmt::Display for CreditRiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CreditRiskLevel::Low => write!(f, "Low"),
            CreditRiskLevel::Medium => write!(f, "Medium"),
            CreditRiskLevel::High => write!(f, "High"),
        }
    }
}

/// Credit decision for one farmer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FarmerCreditScore {
    /// 0-1000
    pub overall_score: u32,
    pub sub_scores: CreditSubScores,
    pub risk_level: CreditRiskLevel,
    /// FCFA
    pub eligible_amount: Decimal,
    /// Annual rate (%)
    pub interest_rate: Decimal,
    /// Months
    pub repayment_period: u32,
    pub recommendation: String,
    /// Gaps in the input that were filled with defaults
    pub warnings: Vec<String>,
}
