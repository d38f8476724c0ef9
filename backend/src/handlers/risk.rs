//! HTTP handlers for crop risk endpoints

use agrishield_engine::{DailyObservation, IndicatorReport, RiskAnalysis, RiskAssessment};
use axum::{extract::rejection::JsonRejection, extract::State, Json};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::AppResult;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct AssessRiskRequest {
    pub series: Vec<DailyObservation>,
    pub latitude: f64,
    pub reference_date: NaiveDate,
    pub crop_type: String,
    /// Hectares
    pub farm_size: f64,
}

/// Compute indicators from a series and classify them in one call
pub async fn assess_risk(
    State(state): State<AppState>,
    payload: Result<Json<AssessRiskRequest>, JsonRejection>,
) -> AppResult<Json<RiskAssessment>> {
    let Json(request) = payload?;
    let assessment = state.engine.assess(
        &request.series,
        request.latitude,
        request.reference_date,
        &request.crop_type,
        request.farm_size,
    )?;
    Ok(Json(assessment))
}

#[derive(Debug, Deserialize)]
pub struct ClassifyRiskRequest {
    pub indicators: IndicatorReport,
    pub crop_type: String,
    pub farm_size: f64,
}

/// Classify previously computed indicators
pub async fn classify_risk(
    State(state): State<AppState>,
    payload: Result<Json<ClassifyRiskRequest>, JsonRejection>,
) -> AppResult<Json<RiskAnalysis>> {
    let Json(request) = payload?;
    let analysis =
        state
            .engine
            .classify(&request.indicators, &request.crop_type, request.farm_size)?;
    Ok(Json(analysis))
}
