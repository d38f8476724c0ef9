//! Weather data models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One day of a provider's weather series
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyObservation {
    pub date: NaiveDate,
    /// Daily precipitation (mm)
    pub precipitation: f64,
    /// Daily maximum temperature (°C)
    pub temperature_max: f64,
    /// Daily minimum temperature (°C)
    pub temperature_min: f64,
    /// Mean relative humidity (%)
    #[serde(default)]
    pub humidity: Option<f64>,
    /// Wind speed at 2 m (m/s)
    #[serde(default)]
    pub wind_speed: Option<f64>,
}

impl DailyObservation {
    pub fn mean_temperature(&self) -> f64 {
        (self.temperature_max + self.temperature_min) / 2.0
    }
}

/// Scalar climate indicators reduced from a daily series
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClimateIndicators {
    /// Longest dry run anywhere in the series or the trailing run, whichever is longer
    pub consecutive_dry_days: u32,
    /// Dry run ending at the last observation
    pub current_dry_spell: u32,
    pub total_precipitation: f64,
    pub average_temperature: f64,
    pub max_temperature: f64,
    /// Mean reference evapotranspiration (mm/day)
    pub et0: f64,
    /// Deviation of total precipitation from the monthly normal (%)
    pub precipitation_anomaly: f64,
    /// Deviation of average temperature from the monthly normal (%)
    pub temperature_anomaly: f64,
    pub observed_days: usize,
}

/// Outcome of reducing a weather series
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum IndicatorReport {
    Computed(ClimateIndicators),
    InsufficientData {
        observed_days: usize,
        required_days: usize,
    },
}

impl IndicatorReport {
    pub fn indicators(&self) -> Option<&ClimateIndicators> {
        match self {
            IndicatorReport::Computed(indicators) => Some(indicators),
            IndicatorReport::InsufficientData { .. } => None,
        }
    }

    pub fn is_insufficient(&self) -> bool {
        matches!(self, IndicatorReport::InsufficientData { .. })
    }
}

/// A single provider's reading for one date and location
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeatherReading {
    pub source: String,
    pub precipitation: f64,
    pub temperature_max: f64,
    pub temperature_min: f64,
    #[serde(default)]
    pub humidity: Option<f64>,
    #[serde(default)]
    pub wind_speed: Option<f64>,
}

/// Cross-source agreement verdict
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DataQuality {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl DataQuality {
    /// Whether readings agree closely enough to be averaged
    pub fn is_trustworthy(&self) -> bool {
        matches!(self, DataQuality::Excellent | DataQuality::Good)
    }
}

impl std::fmt::Display for DataQuality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataQuality::Excellent => write!(f, "Excellent"),
            DataQuality::Good => write!(f, "Good"),
            DataQuality::Fair => write!(f, "Fair"),
            DataQuality::Poor => write!(f, "Poor"),
        }
    }
}

/// Result of validating readings from several providers
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValidationResult {
    pub source_count: usize,
    pub precipitation_variance: f64,
    pub temperature_variance: f64,
    pub precipitation_cv: f64,
    pub temperature_cv: f64,
    pub data_quality: DataQuality,
    pub warnings: Vec<String>,
    pub recommendations: Vec<String>,
}

/// How a reliable reading was obtained
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum ReadingMethod {
    /// Mean of all sources
    Averaged,
    /// Single reading picked by source priority
    Fallback { source: String },
}

/// A single trustworthy daily value for downstream callers
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReliableReading {
    #[serde(flatten)]
    pub method: ReadingMethod,
    pub sources_used: usize,
    pub precipitation: f64,
    pub temperature_max: f64,
    pub temperature_min: f64,
    pub humidity: Option<f64>,
    pub wind_speed: Option<f64>,
}

/// Cross-source check together with the reading to use
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SourceValidation {
    pub validation: ValidationResult,
    pub reliable_reading: Option<ReliableReading>,
}
