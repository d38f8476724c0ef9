//! Facade owning one instance of every component

use chrono::NaiveDate;
use tracing::info;

use crate::classifier::CropRiskClassifier;
use crate::config::EngineConfig;
use crate::credit::CreditScorer;
use crate::error::EngineResult;
use crate::indicators::WeatherIndicatorCalculator;
use crate::models::{
    CreditInput, DailyObservation, FarmerCreditScore, IndicatorReport, PremiumInput,
    PremiumResult, ReliableReading, RiskAnalysis, RiskAssessment, SoilData, SoilProperties,
    SourceValidation, ValidationResult, WeatherReading,
};
use crate::pricing::PremiumPricer;
use crate::soil;
use crate::validator::MultiSourceValidator;

/// Decisioning engine built from one [`EngineConfig`].
///
/// Stateless after construction; share it behind an `Arc`.
#[derive(Debug, Clone)]
pub struct Engine {
    config: EngineConfig,
    calculator: WeatherIndicatorCalculator,
    classifier: CropRiskClassifier,
    validator: MultiSourceValidator,
    pricer: PremiumPricer,
    scorer: CreditScorer,
}

impl Engine {
    /// Validate `config` and build every component from it
    pub fn new(config: EngineConfig) -> EngineResult<Self> {
        config.validate()?;
        info!(
            crops = config.crops.len(),
            default_crop = %config.default_crop,
            "Decisioning engine configured"
        );
        Ok(Self::build(config))
    }

    fn build(config: EngineConfig) -> Self {
        Self {
            calculator: WeatherIndicatorCalculator::from_config(&config),
            classifier: CropRiskClassifier::from_config(&config),
            validator: MultiSourceValidator::from_config(&config),
            pricer: PremiumPricer::from_config(&config),
            scorer: CreditScorer::from_config(&config),
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn climate_indicators(
        &self,
        series: &[DailyObservation],
        latitude: f64,
        reference_date: NaiveDate,
    ) -> EngineResult<IndicatorReport> {
        self.calculator.calculate(series, latitude, reference_date)
    }

    pub fn classify(
        &self,
        report: &IndicatorReport,
        crop_type: &str,
        farm_size: f64,
    ) -> EngineResult<RiskAnalysis> {
        self.classifier.classify(report, crop_type, farm_size)
    }

    /// Series to indicators to classification in one call
    pub fn assess(
        &self,
        series: &[DailyObservation],
        latitude: f64,
        reference_date: NaiveDate,
        crop_type: &str,
        farm_size: f64,
    ) -> EngineResult<RiskAssessment> {
        let indicators = self.climate_indicators(series, latitude, reference_date)?;
        let analysis = self.classify(&indicators, crop_type, farm_size)?;
        Ok(RiskAssessment {
            indicators,
            analysis,
        })
    }

    pub fn validate_readings(&self, readings: &[WeatherReading]) -> ValidationResult {
        self.validator.validate(readings)
    }

    pub fn reliable_reading(
        &self,
        readings: &[WeatherReading],
        validation: &ValidationResult,
    ) -> Option<ReliableReading> {
        self.validator.reliable_reading(readings, validation)
    }

    /// Validate readings and pick the reading to use
    pub fn validate_sources(&self, readings: &[WeatherReading]) -> SourceValidation {
        let validation = self.validate_readings(readings);
        let reliable_reading = self.reliable_reading(readings, &validation);
        SourceValidation {
            validation,
            reliable_reading,
        }
    }

    pub fn quote_premium(&self, input: &PremiumInput) -> EngineResult<PremiumResult> {
        self.pricer.quote(input)
    }

    pub fn score_credit(&self, input: &CreditInput) -> EngineResult<FarmerCreditScore> {
        self.scorer.score(input)
    }

    pub fn score_soil(&self, properties: SoilProperties) -> SoilData {
        soil::score_soil(properties)
    }
}

impl Default for Engine {
    /// Built-in tables, which always pass validation
    fn default() -> Self {
        Self::build(EngineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::models::{DataQuality, ReadingMethod, RiskType};

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_engine_is_send_sync() {
        assert_send_sync::<Engine>();
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = EngineConfig::default();
        config.climate_normals.months.truncate(11);
        assert!(matches!(Engine::new(config), Err(EngineError::Configuration(_))));
    }

    #[test]
    fn test_default_config_accepted() {
        let engine = Engine::new(EngineConfig::default()).unwrap();
        assert_eq!(engine.config(), Engine::default().config());
    }

    #[test]
    fn test_assess_short_series_uses_fallback() {
        let engine = Engine::default();
        let date = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
        let series = vec![DailyObservation {
            date,
            precipitation: 0.0,
            temperature_max: 35.0,
            temperature_min: 24.0,
            humidity: None,
            wind_speed: None,
        }];
        let assessment = engine.assess(&series, 12.4, date, "maize", 2.0).unwrap();
        assert!(assessment.indicators.is_insufficient());
        assert_eq!(assessment.analysis, CropRiskClassifier::fallback());
        assert_eq!(assessment.analysis.risk_type, RiskType::Drought);
    }

    #[test]
    fn test_validate_sources_single_reading() {
        let engine = Engine::default();
        let reading = WeatherReading {
            source: "nasa_power".to_string(),
            precipitation: 4.0,
            temperature_max: 34.0,
            temperature_min: 22.0,
            humidity: None,
            wind_speed: None,
        };
        let result = engine.validate_sources(&[reading]);
        assert_eq!(result.validation.data_quality, DataQuality::Poor);
        let reliable = result.reliable_reading.unwrap();
        assert_eq!(
            reliable.method,
            ReadingMethod::Fallback {
                source: "nasa_power".to_string()
            }
        );
        assert_eq!(reliable.precipitation, 4.0);
    }
}
