//! HTTP handlers for farmer credit scoring

use agrishield_engine::{CreditInput, FarmerCreditScore};
use axum::{extract::rejection::JsonRejection, extract::State, Json};

use crate::error::AppResult;
use crate::AppState;

/// Score a farmer for micro-credit
pub async fn score_credit(
    State(state): State<AppState>,
    payload: Result<Json<CreditInput>, JsonRejection>,
) -> AppResult<Json<FarmerCreditScore>> {
    let Json(input) = payload?;
    Ok(Json(state.engine.score_credit(&input)?))
}
