//! HTTP handlers for soil scoring

use agrishield_engine::{SoilData, SoilProperties};
use axum::{extract::rejection::JsonRejection, extract::State, Json};

use crate::error::AppResult;
use crate::AppState;

/// Score measured soil properties
pub async fn score_soil(
    State(state): State<AppState>,
    payload: Result<Json<SoilProperties>, JsonRejection>,
) -> AppResult<Json<SoilData>> {
    let Json(properties) = payload?;
    Ok(Json(state.engine.score_soil(properties)))
}
