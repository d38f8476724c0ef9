//! Crop risk classification from climate indicators
//!
//! Triggers are additive: no single trigger decides the tier on its own.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::config::{maize_profile, CropProfile, EngineConfig};
use crate::error::{ensure_positive, EngineResult};
use crate::models::{
    AlertLevel, ClimateIndicators, IndicatorReport, RiskAnalysis, RiskLevel, RiskTriggers,
    RiskType,
};
use crate::types::Crop;

const DROUGHT_CRITICAL_POINTS: u32 = 40;
const DROUGHT_WARNING_POINTS: u32 = 25;
const FLOOD_POINTS: u32 = 35;
const HEAT_POINTS: u32 = 30;
const RAINFALL_DEFICIT_POINTS: u32 = 20;
const WARM_ANOMALY_POINTS: u32 = 15;
const LARGE_FARM_POINTS: u32 = 5;

/// Dry days that turn a flood into a compound event
const FLOOD_AFTER_DRY_SPELL_DAYS: u32 = 10;
/// Precipitation anomaly (%) below which a deficit is reported
const RAINFALL_DEFICIT_ANOMALY: f64 = -50.0;
/// Temperature anomaly (%) above which warming is reported
const WARM_ANOMALY: f64 = 15.0;
/// Hectares above which a farm is considered more exposed
const LARGE_FARM_HECTARES: f64 = 5.0;

pub const INSUFFICIENT_DATA_RECOMMENDATION: &str =
    "insufficient data — manual monitoring advised";

/// Classifies climate indicators against crop thresholds
#[derive(Debug, Clone)]
pub struct CropRiskClassifier {
    crops: BTreeMap<Crop, CropProfile>,
    default_crop: Crop,
    /// Built-in maize profile, used when the configured default crop has none
    builtin_default: CropProfile,
}

impl CropRiskClassifier {
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            crops: config.crops.clone(),
            default_crop: config.default_crop,
            builtin_default: maize_profile(),
        }
    }

    fn profile(&self, crop_type: &str) -> (Crop, &CropProfile) {
        let requested = Crop::parse(crop_type);
        if let Some(profile) = requested.and_then(|crop| self.crops.get(&crop).map(|p| (crop, p))) {
            return profile;
        }
        warn!(crop_type, fallback = %self.default_crop, "Unknown crop, using default thresholds");
        match self.crops.get(&self.default_crop) {
            Some(profile) => (self.default_crop, profile),
            None => (Crop::Maize, &self.builtin_default),
        }
    }

    /// Classify a farm's climate risk.
    ///
    /// Insufficient data never fails: it yields [`CropRiskClassifier::fallback`].
    pub fn classify(
        &self,
        report: &IndicatorReport,
        crop_type: &str,
        farm_size: f64,
    ) -> EngineResult<RiskAnalysis> {
        ensure_positive("farm_size", farm_size)?;

        match report {
            IndicatorReport::Computed(indicators) => {
                Ok(self.classify_indicators(indicators, crop_type, farm_size))
            }
            IndicatorReport::InsufficientData { observed_days, .. } => {
                warn!(observed_days, "Classifying with insufficient weather data");
                Ok(Self::fallback())
            }
        }
    }

    /// Fixed analysis used when indicators could not be computed
    pub fn fallback() -> RiskAnalysis {
        RiskAnalysis {
            risk_level: RiskLevel::Medium,
            risk_type: RiskType::Drought,
            risk_score: 50,
            triggers: RiskTriggers::default(),
            recommendations: vec![INSUFFICIENT_DATA_RECOMMENDATION.to_string()],
            compensation_eligible: false,
            alert_level: AlertLevel::Warning,
        }
    }

    fn classify_indicators(
        &self,
        indicators: &ClimateIndicators,
        crop_type: &str,
        farm_size: f64,
    ) -> RiskAnalysis {
        let (crop, profile) = self.profile(crop_type);
        let thresholds = &profile.thresholds;

        let mut score = 0u32;
        let mut risk_type: Option<RiskType> = None;
        let mut compensation_eligible = false;
        let mut triggers = RiskTriggers::default();
        let mut recommendations = Vec::new();

        let dry_days = indicators.consecutive_dry_days;
        if dry_days >= thresholds.drought_days.critical {
            score += DROUGHT_CRITICAL_POINTS;
            risk_type = Some(RiskType::Drought);
            compensation_eligible = true;
            triggers.consecutive_dry_days = Some(dry_days);
            recommendations.push(format!(
                "Urgent: {} consecutive dry days exceed the critical limit for {} ({} days). Irrigate immediately if water is available.",
                dry_days, crop, thresholds.drought_days.critical
            ));
        } else if dry_days >= thresholds.drought_days.warning {
            score += DROUGHT_WARNING_POINTS;
            triggers.consecutive_dry_days = Some(dry_days);
            recommendations.push(format!(
                "Dry spell of {} days: plan supplementary irrigation and mulch to conserve soil moisture.",
                dry_days
            ));
        }

        let precipitation = indicators.total_precipitation;
        if precipitation >= thresholds.flood_precipitation.critical {
            score += FLOOD_POINTS;
            compensation_eligible = true;
            triggers.total_precipitation = Some(precipitation);
            risk_type = Some(if dry_days >= FLOOD_AFTER_DRY_SPELL_DAYS {
                RiskType::Multiple
            } else {
                RiskType::Flood
            });
            recommendations.push(format!(
                "Flood risk: {:.0} mm of rain recorded. Clear drainage channels and protect stored harvest.",
                precipitation
            ));
        }

        let max_temperature = indicators.max_temperature;
        if max_temperature >= thresholds.heat_stress.critical {
            score += HEAT_POINTS;
            compensation_eligible = true;
            triggers.max_temperature = Some(max_temperature);
            risk_type = Some(match risk_type {
                Some(RiskType::Drought | RiskType::Multiple) => RiskType::Multiple,
                _ => RiskType::HeatStress,
            });
            recommendations.push(format!(
                "Heat stress: {:.1} °C reached. Water early in the morning and provide shade for seedlings.",
                max_temperature
            ));
        }

        if indicators.precipitation_anomaly < RAINFALL_DEFICIT_ANOMALY {
            score += RAINFALL_DEFICIT_POINTS;
            triggers.precipitation_anomaly = Some(indicators.precipitation_anomaly);
            recommendations.push(format!(
                "Rainfall is {:.0}% below the seasonal normal. Consider drought-tolerant varieties for the next planting.",
                indicators.precipitation_anomaly.abs()
            ));
        }

        if indicators.temperature_anomaly > WARM_ANOMALY {
            score += WARM_ANOMALY_POINTS;
            triggers.temperature_anomaly = Some(indicators.temperature_anomaly);
            recommendations.push(format!(
                "Temperatures are {:.0}% above the seasonal normal. Monitor crops for wilting.",
                indicators.temperature_anomaly
            ));
        }

        if farm_size > LARGE_FARM_HECTARES {
            score += LARGE_FARM_POINTS;
            triggers.farm_size = Some(farm_size);
        }

        let risk_score = score.min(100);
        let risk_level = RiskLevel::from_score(risk_score);
        if risk_level == RiskLevel::Low {
            recommendations.push(
                "Favorable conditions: continue regular crop monitoring.".to_string(),
            );
        }

        debug!(%crop, risk_score, ?risk_level, "Classified crop risk");

        RiskAnalysis {
            risk_level,
            risk_type: risk_type.unwrap_or(RiskType::Drought),
            risk_score,
            triggers,
            recommendations,
            compensation_eligible,
            alert_level: risk_level.alert_level(),
        }
    }
}
