//! WebAssembly module for the AgriShield mobile app
//!
//! Provides offline, on-device access to the decisioning engine:
//! - Climate indicators and crop risk classification
//! - Multi-source weather validation
//! - Premium quotes and credit scores
//! - Soil scoring
//!
//! Every function takes and returns JSON strings using the same shapes as
//! the HTTP API.

use agrishield_engine::{
    CreditInput, DailyObservation, Engine, EngineConfig, IndicatorReport, PremiumInput,
    SoilProperties, WeatherReading,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

// Re-export engine types for use in JavaScript bindings
pub use agrishield_engine::models::*;
pub use agrishield_engine::types::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    web_sys::console::log_1(&JsValue::from_str(&format!(
        "AgriShield engine {} ready",
        env!("CARGO_PKG_VERSION")
    )));
}

/// Compute climate indicators for a daily series
#[wasm_bindgen]
pub fn climate_indicators(
    series_json: &str,
    latitude: f64,
    reference_date: &str,
) -> Result<String, JsValue> {
    compute_indicators(&Engine::default(), series_json, latitude, reference_date)
        .map_err(to_js_error)
}

/// Cross-validate provider readings and pick the reading to use
#[wasm_bindgen]
pub fn validate_sources(readings_json: &str) -> Result<String, JsValue> {
    validate_readings(&Engine::default(), readings_json).map_err(to_js_error)
}

/// Series to risk classification in one call
#[wasm_bindgen]
pub fn assess_risk(request_json: &str) -> Result<String, JsValue> {
    assess(&Engine::default(), request_json).map_err(to_js_error)
}

/// Classify previously computed indicators
#[wasm_bindgen]
pub fn classify_risk(
    indicators_json: &str,
    crop_type: &str,
    farm_size: f64,
) -> Result<String, JsValue> {
    classify(&Engine::default(), indicators_json, crop_type, farm_size).map_err(to_js_error)
}

/// Quote a monthly premium
#[wasm_bindgen]
pub fn quote_premium(input_json: &str) -> Result<String, JsValue> {
    premium(&Engine::default(), input_json).map_err(to_js_error)
}

/// Score a farmer for micro-credit
#[wasm_bindgen]
pub fn score_credit(input_json: &str) -> Result<String, JsValue> {
    credit(&Engine::default(), input_json).map_err(to_js_error)
}

/// Score measured soil properties
#[wasm_bindgen]
pub fn score_soil(properties_json: &str) -> Result<String, JsValue> {
    soil(&Engine::default(), properties_json).map_err(to_js_error)
}

/// Engine bound to caller-supplied reference data
#[wasm_bindgen]
pub struct DecisionEngine {
    engine: Engine,
}

#[wasm_bindgen]
impl DecisionEngine {
    /// Engine with the built-in reference data
    #[wasm_bindgen(constructor)]
    pub fn new() -> DecisionEngine {
        DecisionEngine {
            engine: Engine::default(),
        }
    }

    /// Engine with reference data supplied as JSON
    #[wasm_bindgen(js_name = fromReferenceData)]
    pub fn from_reference_data(reference_json: &str) -> Result<DecisionEngine, JsValue> {
        let engine = engine_from_reference_data(reference_json).map_err(to_js_error)?;
        Ok(DecisionEngine { engine })
    }

    #[wasm_bindgen(js_name = climateIndicators)]
    pub fn climate_indicators(
        &self,
        series_json: &str,
        latitude: f64,
        reference_date: &str,
    ) -> Result<String, JsValue> {
        compute_indicators(&self.engine, series_json, latitude, reference_date)
            .map_err(to_js_error)
    }

    #[wasm_bindgen(js_name = validateSources)]
    pub fn validate_sources(&self, readings_json: &str) -> Result<String, JsValue> {
        validate_readings(&self.engine, readings_json).map_err(to_js_error)
    }

    #[wasm_bindgen(js_name = assessRisk)]
    pub fn assess_risk(&self, request_json: &str) -> Result<String, JsValue> {
        assess(&self.engine, request_json).map_err(to_js_error)
    }

    #[wasm_bindgen(js_name = classifyRisk)]
    pub fn classify_risk(
        &self,
        indicators_json: &str,
        crop_type: &str,
        farm_size: f64,
    ) -> Result<String, JsValue> {
        classify(&self.engine, indicators_json, crop_type, farm_size).map_err(to_js_error)
    }

    #[wasm_bindgen(js_name = quotePremium)]
    pub fn quote_premium(&self, input_json: &str) -> Result<String, JsValue> {
        premium(&self.engine, input_json).map_err(to_js_error)
    }

    #[wasm_bindgen(js_name = scoreCredit)]
    pub fn score_credit(&self, input_json: &str) -> Result<String, JsValue> {
        credit(&self.engine, input_json).map_err(to_js_error)
    }

    #[wasm_bindgen(js_name = scoreSoil)]
    pub fn score_soil(&self, properties_json: &str) -> Result<String, JsValue> {
        soil(&self.engine, properties_json).map_err(to_js_error)
    }
}

impl Default for DecisionEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn engine_from_reference_data(reference_json: &str) -> Result<Engine, String> {
    let config = EngineConfig::from_json(reference_json).map_err(|e| e.to_string())?;
    Engine::new(config).map_err(|e| e.to_string())
}

fn to_js_error(message: String) -> JsValue {
    js_sys::Error::new(&message).into()
}

fn parse<'a, T: Deserialize<'a>>(what: &str, json: &'a str) -> Result<T, String> {
    serde_json::from_str(json).map_err(|e| format!("Invalid {} JSON: {}", what, e))
}

fn render<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization failed: {}", e))
}

fn compute_indicators(
    engine: &Engine,
    series_json: &str,
    latitude: f64,
    reference_date: &str,
) -> Result<String, String> {
    let series: Vec<DailyObservation> = parse("series", series_json)?;
    let date = NaiveDate::parse_from_str(reference_date, "%Y-%m-%d")
        .map_err(|e| format!("Invalid reference date: {}", e))?;
    let report = engine
        .climate_indicators(&series, latitude, date)
        .map_err(|e| e.to_string())?;
    render(&report)
}

fn validate_readings(engine: &Engine, readings_json: &str) -> Result<String, String> {
    let readings: Vec<WeatherReading> = parse("readings", readings_json)?;
    render(&engine.validate_sources(&readings))
}

#[derive(Deserialize)]
struct AssessRequest {
    series: Vec<DailyObservation>,
    latitude: f64,
    reference_date: NaiveDate,
    crop_type: String,
    farm_size: f64,
}

fn assess(engine: &Engine, request_json: &str) -> Result<String, String> {
    let request: AssessRequest = parse("request", request_json)?;
    let assessment = engine
        .assess(
            &request.series,
            request.latitude,
            request.reference_date,
            &request.crop_type,
            request.farm_size,
        )
        .map_err(|e| e.to_string())?;
    render(&assessment)
}

fn classify(
    engine: &Engine,
    indicators_json: &str,
    crop_type: &str,
    farm_size: f64,
) -> Result<String, String> {
    let report: IndicatorReport = parse("indicators", indicators_json)?;
    let analysis = engine
        .classify(&report, crop_type, farm_size)
        .map_err(|e| e.to_string())?;
    render(&analysis)
}

fn premium(engine: &Engine, input_json: &str) -> Result<String, String> {
    let input: PremiumInput = parse("premium input", input_json)?;
    let result = engine
        .quote_premium(&input)
        .map_err(|e| e.to_string())?;
    render(&result)
}

fn credit(engine: &Engine, input_json: &str) -> Result<String, String> {
    let input: CreditInput = parse("credit input", input_json)?;
    let result = engine
        .score_credit(&input)
        .map_err(|e| e.to_string())?;
    render(&result)
}

fn soil(engine: &Engine, properties_json: &str) -> Result<String, String> {
    let properties: SoilProperties = parse("soil", properties_json)?;
    render(&engine.score_soil(properties))
}
