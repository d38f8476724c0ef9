//! Route definitions for the AgriShield API

use axum::{routing::post, Router};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/weather", weather_routes())
        .nest("/risk", risk_routes())
        .nest("/insurance", insurance_routes())
        .nest("/credit", credit_routes())
        .nest("/soil", soil_routes())
}

/// Climate indicators and multi-source validation
fn weather_routes() -> Router<AppState> {
    Router::new()
        .route("/indicators", post(handlers::compute_indicators))
        .route("/validate", post(handlers::validate_sources))
}

/// Crop risk classification
fn risk_routes() -> Router<AppState> {
    Router::new()
        .route("/assess", post(handlers::assess_risk))
        .route("/classify", post(handlers::classify_risk))
}

fn insurance_routes() -> Router<AppState> {
    Router::new().route("/premium", post(handlers::quote_premium))
}

fn credit_routes() -> Router<AppState> {
    Router::new().route("/score", post(handlers::score_credit))
}

fn soil_routes() -> Router<AppState> {
    Router::new().route("/score", post(handlers::score_soil))
}
