//! Climate risk integration tests
//!
//! Covers the weather side of the engine end to end:
//! - Scenario A: prolonged dry spell on maize
//! - Scenario C: two sources at the good/fair boundary
//! - Risk score bounds and compensation eligibility
//! - Source agreement for identical and missing readings

use agrishield_engine::{
    AlertLevel, ClimateIndicators, Crop, CropRiskClassifier, DailyObservation, DataQuality,
    Engine, EngineConfig, IndicatorReport, ReadingMethod, RiskLevel, RiskType, WeatherReading,
};
use chrono::NaiveDate;
use proptest::prelude::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Daily series starting 1 July with constant temperatures
fn series(precipitation: &[f64]) -> Vec<DailyObservation> {
    let start = date(2024, 7, 1);
    precipitation
        .iter()
        .enumerate()
        .map(|(i, &p)| DailyObservation {
            date: start + chrono::Duration::days(i as i64),
            precipitation: p,
            temperature_max: 33.0,
            temperature_min: 22.0,
            humidity: Some(55.0),
            wind_speed: Some(2.5),
        })
        .collect()
}

fn reading(source: &str, precipitation: f64, temperature_max: f64) -> WeatherReading {
    WeatherReading {
        source: source.to_string(),
        precipitation,
        temperature_max,
        temperature_min: 22.0,
        humidity: None,
        wind_speed: None,
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Scenario A: 25 dry days on maize (critical 15)
    #[test]
    fn test_scenario_a_drought_on_maize() {
        let engine = Engine::default();
        let assessment = engine
            .assess(&series(&[0.0; 25]), 12.37, date(2024, 7, 25), "maize", 2.0)
            .unwrap();

        let indicators = assessment.indicators.indicators().unwrap();
        assert_eq!(indicators.consecutive_dry_days, 25);

        let analysis = assessment.analysis;
        assert!(analysis.risk_score >= 40);
        assert_eq!(analysis.risk_type, RiskType::Drought);
        assert!(analysis.compensation_eligible);
        assert_eq!(analysis.triggers.consecutive_dry_days, Some(25));
    }

    /// Scenario C: 8 mm and 12 mm give CV 0.2 exactly, still good
    #[test]
    fn test_scenario_c_boundary_is_good() {
        let engine = Engine::default();
        let readings = [reading("open_meteo", 8.0, 33.0), reading("nasa_power", 12.0, 33.0)];
        let result = engine.validate_sources(&readings);

        assert!((result.validation.precipitation_cv - 0.2).abs() < 1e-12);
        assert_eq!(result.validation.data_quality, DataQuality::Good);
        let reliable = result.reliable_reading.unwrap();
        assert_eq!(reliable.method, ReadingMethod::Averaged);
        assert_eq!(reliable.sources_used, 2);
        assert!((reliable.precipitation - 10.0).abs() < 1e-12);
    }

    /// Diverging sources fall back to the most trusted provider
    #[test]
    fn test_diverging_sources_fall_back_by_priority() {
        let engine = Engine::default();
        let readings = [
            reading("weatherapi", 2.0, 31.0),
            reading("local_station", 30.0, 36.0),
            reading("nasa_power", 9.0, 33.0),
        ];
        let result = engine.validate_sources(&readings);
        assert_eq!(result.validation.data_quality, DataQuality::Poor);
        assert!(result
            .validation
            .warnings
            .contains(&"large divergence between sources".to_string()));
        assert_eq!(
            result.reliable_reading.unwrap().method,
            ReadingMethod::Fallback {
                source: "nasa_power".to_string()
            }
        );
    }

    /// Flood after a long dry spell is reported as multiple hazards
    #[test]
    fn test_flood_after_dry_spell_is_multiple() {
        let mut rain = vec![0.0; 12];
        rain.extend([200.0, 150.0, 120.0]);
        let engine = Engine::default();
        let assessment = engine
            .assess(&series(&rain), 9.3, date(2024, 7, 15), "rice", 1.5)
            .unwrap();
        let analysis = assessment.analysis;
        assert_eq!(analysis.risk_type, RiskType::Multiple);
        assert!(analysis.compensation_eligible);
    }

    /// Wet, mild weeks on cassava are low risk
    #[test]
    fn test_favourable_conditions() {
        let engine = Engine::default();
        let assessment = engine
            .assess(&series(&[6.0; 30]), 7.5, date(2024, 7, 30), "manioc", 1.0)
            .unwrap();
        let analysis = assessment.analysis;
        assert_eq!(analysis.risk_level, RiskLevel::Low);
        assert_eq!(analysis.alert_level, AlertLevel::Info);
        assert_eq!(analysis.risk_type, RiskType::Drought);
        assert!(!analysis.compensation_eligible);
        assert!(analysis
            .recommendations
            .last()
            .unwrap()
            .starts_with("Favorable conditions"));
    }

    /// Insufficient data never errors
    #[test]
    fn test_insufficient_data_fallback() {
        let engine = Engine::default();
        let report = engine
            .climate_indicators(&series(&[0.0; 3]), 12.0, date(2024, 7, 3))
            .unwrap();
        assert!(report.is_insufficient());
        let analysis = engine.classify(&report, "maize", 1.0).unwrap();
        assert_eq!(analysis, CropRiskClassifier::fallback());
        assert_eq!(analysis.risk_score, 50);
        assert_eq!(analysis.risk_level, RiskLevel::Medium);
        assert!(!analysis.compensation_eligible);
    }

    /// Custom reference data changes thresholds without code changes
    #[test]
    fn test_custom_reference_data() {
        let mut config = EngineConfig::default();
        if let Some(maize) = config.crops.get_mut(&Crop::Maize) {
            maize.thresholds.drought_days.warning = 3;
            maize.thresholds.drought_days.critical = 5;
        }
        let engine = Engine::new(config).unwrap();
        let assessment = engine
            .assess(&series(&[0.0; 8]), 12.0, date(2024, 7, 8), "maize", 1.0)
            .unwrap();
        assert!(assessment.analysis.compensation_eligible);
        assert_eq!(assessment.analysis.risk_type, RiskType::Drought);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    /// Indicators spanning calm to extreme conditions
    fn indicators_strategy() -> impl Strategy<Value = ClimateIndicators> {
        (
            0u32..=60,
            0.0f64..=600.0,
            15.0f64..=48.0,
            -100.0f64..=200.0,
            -30.0f64..=40.0,
        )
            .prop_map(|(dry, rain, tmax, rain_anomaly, temp_anomaly)| ClimateIndicators {
                consecutive_dry_days: dry,
                current_dry_spell: dry,
                total_precipitation: rain,
                average_temperature: tmax - 6.0,
                max_temperature: tmax,
                et0: 5.0,
                precipitation_anomaly: rain_anomaly,
                temperature_anomaly: temp_anomaly,
                observed_days: 30,
            })
    }

    fn crop_strategy() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("maize".to_string()),
            Just("riz".to_string()),
            Just("millet".to_string()),
            Just("cotton".to_string()),
            Just("cassava".to_string()),
            Just("quinoa".to_string()),
        ]
    }

    /// Integer-valued millimetres and degrees
    fn reading_values_strategy() -> impl Strategy<Value = (f64, f64)> {
        (0u32..=200, 20u32..=45).prop_map(|(p, t)| (f64::from(p), f64::from(t)))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Risk score stays within 0-100 and matches its level and alert
        #[test]
        fn prop_risk_score_bounded(
            indicators in indicators_strategy(),
            crop in crop_strategy(),
            farm_size in 0.1f64..50.0
        ) {
            let engine = Engine::default();
            let analysis = engine
                .classify(&IndicatorReport::Computed(indicators), &crop, farm_size)
                .unwrap();
            prop_assert!(analysis.risk_score <= 100);
            prop_assert_eq!(analysis.risk_level, RiskLevel::from_score(analysis.risk_score));
            prop_assert_eq!(analysis.alert_level, analysis.risk_level.alert_level());
        }

        /// Any critical trigger makes the farm eligible for compensation
        #[test]
        fn prop_critical_trigger_is_eligible(indicators in indicators_strategy()) {
            let config = EngineConfig::default();
            let thresholds = config.crops[&Crop::Maize].thresholds;
            let engine = Engine::new(config).unwrap();
            let analysis = engine
                .classify(&IndicatorReport::Computed(indicators.clone()), "maize", 2.0)
                .unwrap();

            let critical = indicators.consecutive_dry_days >= thresholds.drought_days.critical
                || indicators.total_precipitation >= thresholds.flood_precipitation.critical
                || indicators.max_temperature >= thresholds.heat_stress.critical;
            prop_assert_eq!(analysis.compensation_eligible, critical);
        }

        /// Fewer than two readings are always poor
        #[test]
        fn prop_single_reading_is_poor((p, t) in reading_values_strategy(), empty in any::<bool>()) {
            let engine = Engine::default();
            let readings = if empty { vec![] } else { vec![reading("open_meteo", p, t)] };
            let result = engine.validate_sources(&readings);
            prop_assert_eq!(result.validation.data_quality, DataQuality::Poor);
            prop_assert_eq!(result.reliable_reading.is_none(), empty);
        }

        /// Identical readings have no variance and excellent quality
        #[test]
        fn prop_identical_readings_are_excellent(
            (p, t) in reading_values_strategy(),
            count in 2usize..=6
        ) {
            let engine = Engine::default();
            let readings: Vec<WeatherReading> =
                (0..count).map(|i| reading(&format!("source_{}", i), p, t)).collect();
            let result = engine.validate_sources(&readings);
            prop_assert_eq!(result.validation.precipitation_variance, 0.0);
            prop_assert_eq!(result.validation.temperature_variance, 0.0);
            prop_assert_eq!(result.validation.data_quality, DataQuality::Excellent);
            let reliable = result.reliable_reading.unwrap();
            prop_assert_eq!(reliable.method, ReadingMethod::Averaged);
            prop_assert_eq!(reliable.precipitation, p);
        }

        /// Dry-day count never exceeds the series length
        #[test]
        fn prop_dry_days_within_series(rain in prop::collection::vec(0.0f64..20.0, 7..60)) {
            let engine = Engine::default();
            let report = engine
                .climate_indicators(&series(&rain), 12.0, date(2024, 8, 31))
                .unwrap();
            let indicators = report.indicators().unwrap();
            prop_assert!(indicators.consecutive_dry_days as usize <= rain.len());
            prop_assert!(indicators.current_dry_spell <= indicators.consecutive_dry_days);
            prop_assert!(indicators.et0 >= 0.0);
        }
    }
}
