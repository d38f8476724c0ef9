//! HTTP handlers for weather indicator and source validation endpoints

use agrishield_engine::{DailyObservation, IndicatorReport, SourceValidation, WeatherReading};
use axum::{extract::rejection::JsonRejection, extract::State, Json};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::AppResult;
use crate::AppState;

/// Daily series to reduce into climate indicators
#[derive(Debug, Deserialize)]
pub struct IndicatorsRequest {
    pub series: Vec<DailyObservation>,
    pub latitude: f64,
    /// Selects the monthly climate normals
    pub reference_date: NaiveDate,
}

/// Compute climate indicators for a daily series
pub async fn compute_indicators(
    State(state): State<AppState>,
    payload: Result<Json<IndicatorsRequest>, JsonRejection>,
) -> AppResult<Json<IndicatorReport>> {
    let Json(request) = payload?;
    let report =
        state
            .engine
            .climate_indicators(&request.series, request.latitude, request.reference_date)?;
    Ok(Json(report))
}

/// Readings from several providers for the same day and place
#[derive(Debug, Deserialize)]
pub struct ValidateSourcesRequest {
    pub readings: Vec<WeatherReading>,
}

/// Cross-validate provider readings and pick the reading to use
pub async fn validate_sources(
    State(state): State<AppState>,
    payload: Result<Json<ValidateSourcesRequest>, JsonRejection>,
) -> AppResult<Json<SourceValidation>> {
    let Json(request) = payload?;
    Ok(Json(state.engine.validate_sources(&request.readings)))
}
