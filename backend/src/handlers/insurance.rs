//! HTTP handlers for micro-insurance endpoints

use agrishield_engine::{PremiumInput, PremiumResult};
use axum::{extract::rejection::JsonRejection, extract::State, Json};

use crate::error::AppResult;
use crate::AppState;

/// Quote a monthly premium
pub async fn quote_premium(
    State(state): State<AppState>,
    payload: Result<Json<PremiumInput>, JsonRejection>,
) -> AppResult<Json<PremiumResult>> {
    let Json(input) = payload?;
    let result = state.engine.quote_premium(&input)?;
    tracing::info!(
        crop_type = %input.crop_type,
        monthly_premium = %result.monthly_premium,
        "Premium quoted"
    );
    Ok(Json(result))
}
