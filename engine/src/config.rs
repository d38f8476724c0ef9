//! Reference data for the decisioning engine
//!
//! Crop thresholds, pricing factors, climatological normals and credit tiers
//! are plain data so deployments can tune them without touching code:
//! 1. Built-in West African defaults (`EngineConfig::default()`)
//! 2. Any subset overridden from a TOML/JSON document; sections left out keep
//!    their defaults. Crop profiles merge per crop: listing one crop replaces
//!    that crop's profile and leaves the other built-in crops in place.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::types::{Crop, Region};

/// Complete engine configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    pub indicators: IndicatorSettings,
    pub climate_normals: ClimateNormals,
    /// Crop used when a crop name is not recognised
    pub default_crop: Crop,
    #[serde(deserialize_with = "merge_with_builtin_crops")]
    pub crops: BTreeMap<Crop, CropProfile>,
    pub pricing: PricingSettings,
    pub validation: ValidationSettings,
    pub credit: CreditSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct IndicatorSettings {
    /// Days below this precipitation (mm) are dry
    pub dry_day_threshold_mm: f64,
    /// Shorter series produce an insufficient-data report
    pub min_series_days: usize,
    /// Relative humidity (%) assumed when a provider omits it
    pub default_humidity: f64,
    /// Wind speed (m/s) assumed when a provider omits it
    pub default_wind_speed: f64,
}

/// Long-term monthly averages, January first
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClimateNormals {
    pub months: Vec<MonthlyNormal>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct MonthlyNormal {
    /// Expected precipitation total over a 30-day window (mm)
    pub precipitation: f64,
    /// Expected mean temperature (°C)
    pub temperature: f64,
}

impl ClimateNormals {
    /// Normal for a 1-based month
    pub fn for_month(&self, month: u32) -> Option<&MonthlyNormal> {
        month
            .checked_sub(1)
            .and_then(|index| self.months.get(index as usize))
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DroughtThresholds {
    pub warning: u32,
    pub critical: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CriticalThreshold {
    pub critical: f64,
}

/// Climate thresholds for one crop
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CropThresholds {
    /// Consecutive dry days
    pub drought_days: DroughtThresholds,
    /// Precipitation total over the series (mm)
    pub flood_precipitation: CriticalThreshold,
    /// Maximum daily temperature (°C)
    pub heat_stress: CriticalThreshold,
}

/// Per-crop reference data
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CropProfile {
    pub thresholds: CropThresholds,
    /// Premium multiplier
    pub risk_factor: Decimal,
    /// Loan repayment period override (months)
    #[serde(default)]
    pub repayment_months: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PricingSettings {
    /// FCFA per hectare per month
    pub base_rate_per_hectare: Decimal,
    pub minimum_premium: Decimal,
    pub maximum_premium: Decimal,
    /// Adjusted premiums are rounded up to a multiple of this
    pub rounding_step: Decimal,
    /// Coverage is this many times the monthly premium
    pub coverage_multiplier: Decimal,
    pub unknown_crop_risk_factor: Decimal,
    pub regional_factors: BTreeMap<Region, Decimal>,
    pub default_regional_factor: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ValidationSettings {
    pub minimum_sources: usize,
    /// Most trusted provider first
    pub source_priority: Vec<String>,
}

/// Loan terms for one credit risk tier
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CreditTier {
    /// Lowest overall score in this tier
    pub min_score: u32,
    pub amount_multiplier: Decimal,
    /// Annual rate (%)
    pub interest_rate: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CreditSettings {
    /// Loan value of one tonne of expected harvest (FCFA)
    pub amount_per_tonne: Decimal,
    pub low_risk: CreditTier,
    pub medium_risk: CreditTier,
    pub high_risk: CreditTier,
    pub base_repayment_months: u32,
    pub low_risk_extension_months: u32,
    pub high_risk_reduction_months: u32,
    pub min_repayment_months: u32,
}

impl EngineConfig {
    /// Parse a JSON reference-data document on top of the defaults
    pub fn from_json(json: &str) -> EngineResult<Self> {
        let config: EngineConfig = serde_json::from_str(json)
            .map_err(|e| EngineError::Configuration(format!("Invalid reference data: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Check internal consistency of the tables
    pub fn validate(&self) -> EngineResult<()> {
        if self.climate_normals.months.len() != 12 {
            return Err(EngineError::Configuration(format!(
                "climate_normals must have 12 months, found {}",
                self.climate_normals.months.len()
            )));
        }
        if !self.crops.contains_key(&self.default_crop) {
            return Err(EngineError::Configuration(format!(
                "default crop `{}` has no profile",
                self.default_crop
            )));
        }
        for (crop, profile) in &self.crops {
            let drought = profile.thresholds.drought_days;
            if drought.warning > drought.critical {
                return Err(EngineError::Configuration(format!(
                    "{}: drought warning ({}) exceeds critical ({})",
                    crop, drought.warning, drought.critical
                )));
            }
            if profile.risk_factor <= Decimal::ZERO {
                return Err(EngineError::Configuration(format!(
                    "{}: risk factor must be positive",
                    crop
                )));
            }
        }
        if self.indicators.min_series_days == 0 {
            return Err(EngineError::Configuration(
                "indicators.min_series_days must be at least 1".to_string(),
            ));
        }

        let pricing = &self.pricing;
        if pricing.minimum_premium <= Decimal::ZERO
            || pricing.minimum_premium > pricing.maximum_premium
        {
            return Err(EngineError::Configuration(
                "pricing bounds must satisfy 0 < minimum <= maximum".to_string(),
            ));
        }
        if pricing.rounding_step <= Decimal::ZERO {
            return Err(EngineError::Configuration(
                "pricing.rounding_step must be positive".to_string(),
            ));
        }

        if self.validation.minimum_sources < 2 {
            return Err(EngineError::Configuration(
                "validation.minimum_sources must be at least 2".to_string(),
            ));
        }

        let credit = &self.credit;
        if !(credit.low_risk.min_score > credit.medium_risk.min_score
            && credit.medium_risk.min_score > credit.high_risk.min_score)
        {
            return Err(EngineError::Configuration(
                "credit tiers must have strictly decreasing min_score".to_string(),
            ));
        }
        if credit.min_repayment_months == 0 {
            return Err(EngineError::Configuration(
                "credit.min_repayment_months must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

fn crop_profile(
    warning: u32,
    critical: u32,
    flood: f64,
    heat: f64,
    risk_factor: Decimal,
    repayment_months: Option<u32>,
) -> CropProfile {
    CropProfile {
        thresholds: CropThresholds {
            drought_days: DroughtThresholds { warning, critical },
            flood_precipitation: CriticalThreshold { critical: flood },
            heat_stress: CriticalThreshold { critical: heat },
        },
        risk_factor,
        repayment_months,
    }
}

fn merge_with_builtin_crops<'de, D>(
    deserializer: D,
) -> Result<BTreeMap<Crop, CropProfile>, D::Error>
where
    D: Deserializer<'de>,
{
    let overrides = BTreeMap::<Crop, CropProfile>::deserialize(deserializer)?;
    let mut crops = builtin_crops();
    crops.extend(overrides);
    Ok(crops)
}

/// Maize thresholds, also the last resort for unknown crops
pub(crate) fn maize_profile() -> CropProfile {
    crop_profile(10, 15, 300.0, 35.0, Decimal::new(7, 1), None)
}

fn builtin_crops() -> BTreeMap<Crop, CropProfile> {
    BTreeMap::from([
        (Crop::Maize, maize_profile()),
        (Crop::Rice, crop_profile(5, 10, 400.0, 35.0, Decimal::new(8, 1), Some(6))),
        (Crop::Millet, crop_profile(15, 25, 250.0, 40.0, Decimal::new(5, 1), None)),
        (Crop::Sorghum, crop_profile(14, 21, 250.0, 40.0, Decimal::new(5, 1), None)),
        (Crop::Cotton, crop_profile(12, 18, 300.0, 38.0, Decimal::new(9, 1), Some(8))),
        (Crop::Groundnut, crop_profile(10, 18, 250.0, 37.0, Decimal::new(6, 1), None)),
        (Crop::Cowpea, crop_profile(12, 20, 200.0, 38.0, Decimal::new(6, 1), None)),
        (Crop::Cassava, crop_profile(20, 30, 350.0, 38.0, Decimal::new(4, 1), None)),
        (Crop::Yam, crop_profile(12, 20, 350.0, 36.0, Decimal::new(5, 1), None)),
    ])
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            indicators: IndicatorSettings::default(),
            climate_normals: ClimateNormals::default(),
            default_crop: Crop::Maize,
            crops: builtin_crops(),
            pricing: PricingSettings::default(),
            validation: ValidationSettings::default(),
            credit: CreditSettings::default(),
        }
    }
}

impl Default for IndicatorSettings {
    fn default() -> Self {
        Self {
            dry_day_threshold_mm: 1.0,
            min_series_days: 7,
            default_humidity: 60.0,
            default_wind_speed: 2.0,
        }
    }
}

impl Default for ClimateNormals {
    /// Sudano-Sahelian station averages
    fn default() -> Self {
        let table = [
            (1.0, 25.0),
            (2.0, 27.5),
            (6.0, 30.5),
            (20.0, 32.0),
            (60.0, 31.0),
            (100.0, 28.5),
            (180.0, 27.0),
            (230.0, 26.0),
            (140.0, 26.5),
            (40.0, 28.0),
            (3.0, 27.0),
            (1.0, 25.0),
        ];
        Self {
            months: table
                .iter()
                .map(|&(precipitation, temperature)| MonthlyNormal {
                    precipitation,
                    temperature,
                })
                .collect(),
        }
    }
}

impl Default for PricingSettings {
    fn default() -> Self {
        Self {
            base_rate_per_hectare: Decimal::from(200),
            minimum_premium: Decimal::from(200),
            maximum_premium: Decimal::from(1000),
            rounding_step: Decimal::from(10),
            coverage_multiplier: Decimal::from(30),
            unknown_crop_risk_factor: Decimal::new(6, 1),
            regional_factors: BTreeMap::from([
                (Region::Sahel, Decimal::new(9, 1)),
                (Region::Sudan, Decimal::new(7, 1)),
                (Region::Guinea, Decimal::new(5, 1)),
                (Region::Coastal, Decimal::new(6, 1)),
            ]),
            default_regional_factor: Decimal::new(7, 1),
        }
    }
}

impl Default for ValidationSettings {
    fn default() -> Self {
        Self {
            minimum_sources: 2,
            source_priority: ["open_meteo", "nasa_power", "openweathermap", "weatherapi"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl Default for CreditSettings {
    fn default() -> Self {
        Self {
            amount_per_tonne: Decimal::from(200_000),
            low_risk: CreditTier {
                min_score: 700,
                amount_multiplier: Decimal::new(15, 1),
                interest_rate: Decimal::new(85, 1),
            },
            medium_risk: CreditTier {
                min_score: 500,
                amount_multiplier: Decimal::ONE,
                interest_rate: Decimal::new(120, 1),
            },
            high_risk: CreditTier {
                min_score: 0,
                amount_multiplier: Decimal::new(5, 1),
                interest_rate: Decimal::new(180, 1),
            },
            base_repayment_months: 12,
            low_risk_extension_months: 6,
            high_risk_reduction_months: 3,
            min_repayment_months: 6,
        }
    }
}
