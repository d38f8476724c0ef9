//! Reduction of a daily weather series into climate indicators
//!
//! Evapotranspiration follows the FAO-56 Penman-Monteith approximation with
//! solar radiation estimated from the daily temperature range (Hargreaves
//! radiation formula), since providers rarely report measured radiation.

use std::f64::consts::PI;

use chrono::{Datelike, NaiveDate};
use tracing::{debug, warn};

use crate::config::{ClimateNormals, EngineConfig, IndicatorSettings};
use crate::error::{ensure_in_range, EngineResult};
use crate::models::{ClimateIndicators, DailyObservation, IndicatorReport};

/// Solar constant (MJ m⁻² min⁻¹)
const SOLAR_CONSTANT: f64 = 0.0820;
/// Psychrometric constant (kPa °C⁻¹)
const PSYCHROMETRIC_CONSTANT: f64 = 0.665;
/// Hargreaves radiation adjustment coefficient for interior locations
const RADIATION_COEFFICIENT: f64 = 0.16;

/// Reduces a daily series into [`ClimateIndicators`]
#[derive(Debug, Clone)]
pub struct WeatherIndicatorCalculator {
    settings: IndicatorSettings,
    normals: ClimateNormals,
}

impl WeatherIndicatorCalculator {
    pub fn new(settings: IndicatorSettings, normals: ClimateNormals) -> Self {
        Self { settings, normals }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.indicators.clone(), config.climate_normals.clone())
    }

    /// Compute indicators for `series` (oldest first) at `latitude`.
    ///
    /// `reference_date` selects the monthly normals used for anomalies.
    /// Series shorter than the configured minimum produce
    /// [`IndicatorReport::InsufficientData`].
    pub fn calculate(
        &self,
        series: &[DailyObservation],
        latitude: f64,
        reference_date: NaiveDate,
    ) -> EngineResult<IndicatorReport> {
        ensure_in_range("latitude", latitude, -90.0, 90.0)?;

        if series.len() < self.settings.min_series_days {
            warn!(
                observed_days = series.len(),
                required_days = self.settings.min_series_days,
                "Weather series too short for indicators"
            );
            return Ok(IndicatorReport::InsufficientData {
                observed_days: series.len(),
                required_days: self.settings.min_series_days,
            });
        }

        let (longest_dry_run, current_dry_spell) = self.dry_runs(series);
        let total_precipitation: f64 = series.iter().map(|d| d.precipitation).sum();
        let average_temperature =
            series.iter().map(DailyObservation::mean_temperature).sum::<f64>() / series.len() as f64;
        let max_temperature = series
            .iter()
            .map(|d| d.temperature_max)
            .fold(f64::NEG_INFINITY, f64::max);
        let et0 = series
            .iter()
            .map(|d| self.daily_et0(d, latitude))
            .sum::<f64>()
            / series.len() as f64;

        let (precipitation_anomaly, temperature_anomaly) =
            match self.normals.for_month(reference_date.month()) {
                Some(normal) => (
                    percent_deviation(total_precipitation, normal.precipitation),
                    percent_deviation(average_temperature, normal.temperature),
                ),
                None => (0.0, 0.0),
            };

        let indicators = ClimateIndicators {
            consecutive_dry_days: longest_dry_run.max(current_dry_spell),
            current_dry_spell,
            total_precipitation,
            average_temperature,
            max_temperature,
            et0,
            precipitation_anomaly,
            temperature_anomaly,
            observed_days: series.len(),
        };
        debug!(?indicators, "Computed climate indicators");

        Ok(IndicatorReport::Computed(indicators))
    }

    /// Longest dry run anywhere and the run ending at the last day
    fn dry_runs(&self, series: &[DailyObservation]) -> (u32, u32) {
        let mut longest = 0;
        let mut current = 0;
        for day in series {
            if day.precipitation < self.settings.dry_day_threshold_mm {
                current += 1;
                longest = longest.max(current);
            } else {
                current = 0;
            }
        }
        (longest, current)
    }

    fn daily_et0(&self, day: &DailyObservation, latitude: f64) -> f64 {
        let humidity = day.humidity.unwrap_or(self.settings.default_humidity);
        let wind = day.wind_speed.unwrap_or(self.settings.default_wind_speed);
        let t_max = day.temperature_max;
        let t_min = day.temperature_min;
        let t_mean = day.mean_temperature();

        let es = (saturation_vapor_pressure(t_max) + saturation_vapor_pressure(t_min)) / 2.0;
        let ea = es * humidity / 100.0;
        let delta = 4098.0 * es / (t_mean + 237.3).powi(2);

        let ra = extraterrestrial_radiation(latitude, day.date.ordinal());
        let rs = RADIATION_COEFFICIENT * (t_max - t_min).abs().sqrt() * ra;

        let numerator = 0.408 * delta * rs
            + PSYCHROMETRIC_CONSTANT * 900.0 / (t_mean + 273.0) * wind * (es - ea);
        let denominator = delta + PSYCHROMETRIC_CONSTANT * (1.0 + 0.34 * wind);

        let et0 = numerator / denominator;
        if et0.is_finite() {
            et0.max(0.0)
        } else {
            0.0
        }
    }
}

/// Saturation vapour pressure at `temperature` °C (kPa)
fn saturation_vapor_pressure(temperature: f64) -> f64 {
    0.6108 * (17.27 * temperature / (temperature + 237.3)).exp()
}

/// Daily extraterrestrial radiation (MJ m⁻² day⁻¹), FAO-56 eq. 21
pub fn extraterrestrial_radiation(latitude: f64, day_of_year: u32) -> f64 {
    let phi = latitude.to_radians();
    let angle = 2.0 * PI * day_of_year as f64 / 365.0;
    let inverse_distance = 1.0 + 0.033 * angle.cos();
    let declination = 0.409 * (angle - 1.39).sin();
    let sunset_angle = (-phi.tan() * declination.tan()).clamp(-1.0, 1.0).acos();

    let ra = (24.0 * 60.0 / PI)
        * SOLAR_CONSTANT
        * inverse_distance
        * (sunset_angle * phi.sin() * declination.sin()
            + phi.cos() * declination.cos() * sunset_angle.sin());
    ra.max(0.0)
}

fn percent_deviation(value: f64, normal: f64) -> f64 {
    if normal == 0.0 {
        return 0.0;
    }
    (value - normal) / normal * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calculator() -> WeatherIndicatorCalculator {
        WeatherIndicatorCalculator::from_config(&EngineConfig::default())
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn series(precipitation: &[f64]) -> Vec<DailyObservation> {
        let start = date(2024, 7, 1);
        precipitation
            .iter()
            .enumerate()
            .map(|(i, &p)| DailyObservation {
                date: start + chrono::Duration::days(i as i64),
                precipitation: p,
                temperature_max: 33.0,
                temperature_min: 23.0,
                humidity: Some(70.0),
                wind_speed: Some(2.0),
            })
            .collect()
    }

    fn computed(report: IndicatorReport) -> ClimateIndicators {
        match report {
            IndicatorReport::Computed(indicators) => indicators,
            other => panic!("expected computed indicators, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_series_is_insufficient() {
        let report = calculator().calculate(&[], 12.0, date(2024, 7, 31)).unwrap();
        assert_eq!(
            report,
            IndicatorReport::InsufficientData {
                observed_days: 0,
                required_days: 7
            }
        );
    }

    #[test]
    fn test_short_series_is_insufficient() {
        let report = calculator()
            .calculate(&series(&[0.0; 6]), 12.0, date(2024, 7, 31))
            .unwrap();
        assert!(report.is_insufficient());
    }

    #[test]
    fn test_invalid_latitude_rejected() {
        assert!(calculator()
            .calculate(&series(&[0.0; 10]), 95.0, date(2024, 7, 31))
            .is_err());
    }

    #[test]
    fn test_dry_day_runs() {
        // 5-day dry run in the middle, 2-day trailing run
        let data = [3.0, 0.0, 0.0, 0.0, 0.5, 0.9, 12.0, 4.0, 0.0, 0.2];
        let indicators = computed(
            calculator()
                .calculate(&series(&data), 12.0, date(2024, 7, 10))
                .unwrap(),
        );
        assert_eq!(indicators.consecutive_dry_days, 5);
        assert_eq!(indicators.current_dry_spell, 2);
    }

    #[test]
    fn test_all_dry_series() {
        let indicators = computed(
            calculator()
                .calculate(&series(&[0.0; 25]), 12.0, date(2024, 7, 25))
                .unwrap(),
        );
        assert_eq!(indicators.consecutive_dry_days, 25);
        assert_eq!(indicators.current_dry_spell, 25);
        assert_eq!(indicators.total_precipitation, 0.0);
    }

    #[test]
    fn test_totals_and_temperatures() {
        let mut data = series(&[10.0, 0.0, 5.0, 0.0, 0.0, 20.0, 5.0]);
        data[3].temperature_max = 39.5;
        let indicators = computed(calculator().calculate(&data, 12.0, date(2024, 7, 7)).unwrap());

        assert!((indicators.total_precipitation - 40.0).abs() < 1e-9);
        assert!((indicators.max_temperature - 39.5).abs() < 1e-9);
        let expected_avg = (28.0 * 6.0 + (39.5 + 23.0) / 2.0) / 7.0;
        assert!((indicators.average_temperature - expected_avg).abs() < 1e-9);
        assert_eq!(indicators.observed_days, 7);
    }

    #[test]
    fn test_anomalies_use_reference_month() {
        // July normal: 180 mm, 27 °C
        let indicators = computed(
            calculator()
                .calculate(&series(&[3.0; 30]), 12.0, date(2024, 7, 30))
                .unwrap(),
        );
        assert!((indicators.precipitation_anomaly - (90.0 - 180.0) / 180.0 * 100.0).abs() < 1e-9);
        assert!((indicators.temperature_anomaly - (28.0 - 27.0) / 27.0 * 100.0).abs() < 1e-9);

        // Same series judged against August normals
        let august = computed(
            calculator()
                .calculate(&series(&[3.0; 30]), 12.0, date(2024, 8, 5))
                .unwrap(),
        );
        assert!(august.precipitation_anomaly < indicators.precipitation_anomaly);
    }

    #[test]
    fn test_et0_is_plausible() {
        let indicators = computed(
            calculator()
                .calculate(&series(&[0.0; 10]), 12.0, date(2024, 7, 10))
                .unwrap(),
        );
        assert!(indicators.et0 > 0.0);
        assert!(indicators.et0 < 15.0, "et0 = {}", indicators.et0);
    }

    #[test]
    fn test_et0_defaults_missing_humidity_and_wind() {
        let mut data = series(&[0.0; 10]);
        let with_values = computed(calculator().calculate(&data, 12.0, date(2024, 7, 10)).unwrap());
        for day in &mut data {
            day.humidity = None;
            day.wind_speed = None;
        }
        let with_defaults = computed(calculator().calculate(&data, 12.0, date(2024, 7, 10)).unwrap());
        assert!(with_defaults.et0 > 0.0);
        // Drier default air (60 %) increases demand
        assert!(with_defaults.et0 > with_values.et0);
    }

    #[test]
    fn test_extraterrestrial_radiation_reference_value() {
        // FAO-56 example 8: 20°S on 3 September, Ra = 32.2 MJ m-2 day-1
        let ra = extraterrestrial_radiation(-20.0, 246);
        assert!((ra - 32.2).abs() < 0.2, "ra = {}", ra);
    }

    #[test]
    fn test_polar_night_has_no_radiation() {
        assert_eq!(extraterrestrial_radiation(80.0, 355), 0.0);
    }

    #[test]
    fn test_percent_deviation_zero_normal() {
        assert_eq!(percent_deviation(10.0, 0.0), 0.0);
        assert_eq!(percent_deviation(15.0, 10.0), 50.0);
    }
}
