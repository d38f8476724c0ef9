//! Cross-checking of weather readings from independent providers

use tracing::{debug, warn};

use crate::config::{EngineConfig, ValidationSettings};
use crate::models::{DataQuality, ReadingMethod, ReliableReading, ValidationResult, WeatherReading};

/// Coefficient-of-variation ceilings (precipitation, temperature) per bucket.
/// Bounds are inclusive.
const EXCELLENT_CV: (f64, f64) = (0.10, 0.05);
const GOOD_CV: (f64, f64) = (0.20, 0.10);
const FAIR_CV: (f64, f64) = (0.40, 0.15);

/// Above these a dedicated divergence warning is always emitted
const PRECIPITATION_WARNING_CV: f64 = 0.30;
const TEMPERATURE_WARNING_CV: f64 = 0.10;

#[derive(Debug, Clone)]
pub struct MultiSourceValidator {
    settings: ValidationSettings,
}

impl MultiSourceValidator {
    pub fn new(settings: ValidationSettings) -> Self {
        Self { settings }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.validation.clone())
    }

    /// Judge agreement between readings for one date and location
    pub fn validate(&self, readings: &[WeatherReading]) -> ValidationResult {
        if readings.len() < self.settings.minimum_sources {
            warn!(
                sources = readings.len(),
                required = self.settings.minimum_sources,
                "Not enough weather sources to cross-validate"
            );
            return ValidationResult {
                source_count: readings.len(),
                precipitation_variance: 0.0,
                temperature_variance: 0.0,
                precipitation_cv: 0.0,
                temperature_cv: 0.0,
                data_quality: DataQuality::Poor,
                warnings: vec!["insufficient data for validation".to_string()],
                recommendations: vec!["retry later".to_string()],
            };
        }

        let precipitation: Vec<f64> = readings.iter().map(|r| r.precipitation).collect();
        let temperature: Vec<f64> = readings.iter().map(|r| r.temperature_max).collect();
        let (precipitation_mean, precipitation_variance) = mean_and_variance(&precipitation);
        let (temperature_mean, temperature_variance) = mean_and_variance(&temperature);
        let precipitation_cv = coefficient_of_variation(precipitation_mean, precipitation_variance);
        let temperature_cv = coefficient_of_variation(temperature_mean, temperature_variance);

        let mut warnings = Vec::new();
        let mut recommendations = Vec::new();

        let data_quality = classify_quality(precipitation_cv, temperature_cv);
        match data_quality {
            DataQuality::Excellent | DataQuality::Good => {
                recommendations.push("Sources agree: the averaged reading can be used.".to_string());
            }
            DataQuality::Fair => {
                warnings.push("moderate divergence between sources".to_string());
                recommendations
                    .push("Use the averaged reading with caution for payout decisions.".to_string());
            }
            DataQuality::Poor => {
                warnings.push("large divergence between sources".to_string());
                recommendations.push(
                    "Manual verification required: compare with a local rain gauge or field report."
                        .to_string(),
                );
            }
        }

        if precipitation_cv > PRECIPITATION_WARNING_CV {
            warnings.push(format!(
                "precipitation differs strongly between sources (CV {:.0}%)",
                precipitation_cv * 100.0
            ));
        }
        if temperature_cv > TEMPERATURE_WARNING_CV {
            warnings.push(format!(
                "maximum temperature differs strongly between sources (CV {:.0}%)",
                temperature_cv * 100.0
            ));
        }

        debug!(
            sources = readings.len(),
            precipitation_cv,
            temperature_cv,
            quality = %data_quality,
            "Validated weather sources"
        );

        ValidationResult {
            source_count: readings.len(),
            precipitation_variance,
            temperature_variance,
            precipitation_cv,
            temperature_cv,
            data_quality,
            warnings,
            recommendations,
        }
    }

    /// Single trustworthy reading: the mean when sources agree, otherwise the
    /// reading from the most trusted source. `None` without readings.
    pub fn reliable_reading(
        &self,
        readings: &[WeatherReading],
        validation: &ValidationResult,
    ) -> Option<ReliableReading> {
        if readings.is_empty() {
            return None;
        }

        if validation.data_quality.is_trustworthy() && readings.len() >= 2 {
            let count = readings.len() as f64;
            return Some(ReliableReading {
                method: ReadingMethod::Averaged,
                sources_used: readings.len(),
                precipitation: readings.iter().map(|r| r.precipitation).sum::<f64>() / count,
                temperature_max: readings.iter().map(|r| r.temperature_max).sum::<f64>() / count,
                temperature_min: readings.iter().map(|r| r.temperature_min).sum::<f64>() / count,
                humidity: mean_present(readings.iter().map(|r| r.humidity)),
                wind_speed: mean_present(readings.iter().map(|r| r.wind_speed)),
            });
        }

        let chosen = readings
            .iter()
            .enumerate()
            .min_by_key(|(index, reading)| (self.priority_rank(&reading.source), *index))
            .map(|(_, reading)| reading)?;

        warn!(
            source = %chosen.source,
            quality = %validation.data_quality,
            "Falling back to single weather source"
        );

        Some(ReliableReading {
            method: ReadingMethod::Fallback {
                source: chosen.source.clone(),
            },
            sources_used: 1,
            precipitation: chosen.precipitation,
            temperature_max: chosen.temperature_max,
            temperature_min: chosen.temperature_min,
            humidity: chosen.humidity,
            wind_speed: chosen.wind_speed,
        })
    }

    /// Position in the priority list; unknown sources rank last
    fn priority_rank(&self, source: &str) -> usize {
        self.settings
            .source_priority
            .iter()
            .position(|known| known.eq_ignore_ascii_case(source.trim()))
            .unwrap_or(self.settings.source_priority.len())
    }
}

fn classify_quality(precipitation_cv: f64, temperature_cv: f64) -> DataQuality {
    let within = |(p, t): (f64, f64)| precipitation_cv <= p && temperature_cv <= t;
    if within(EXCELLENT_CV) {
        DataQuality::Excellent
    } else if within(GOOD_CV) {
        DataQuality::Good
    } else if within(FAIR_CV) {
        DataQuality::Fair
    } else {
        DataQuality::Poor
    }
}

/// Population mean and variance
fn mean_and_variance(values: &[f64]) -> (f64, f64) {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    (mean, variance)
}

fn coefficient_of_variation(mean: f64, variance: f64) -> f64 {
    if mean == 0.0 {
        return 0.0;
    }
    variance.sqrt() / mean.abs()
}

fn mean_present(values: impl Iterator<Item = Option<f64>>) -> Option<f64> {
    let present: Vec<f64> = values.flatten().collect();
    if present.is_empty() {
        None
    } else {
        Some(present.iter().sum::<f64>() / present.len() as f64)
    }
}
