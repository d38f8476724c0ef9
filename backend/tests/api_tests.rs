//! HTTP API integration tests
//!
//! Drives the router in-process for every endpoint:
//! - Happy paths for weather, risk, insurance, credit and soil routes
//! - Error mapping to the bilingual error body

use agrishield_backend::error::AppError;
use agrishield_backend::{create_app, AppState, Config};
use agrishield_engine::{Engine, EngineError};
use axum::{
    body::Body,
    http::{Request, StatusCode},
    response::IntoResponse,
    Router,
};
use proptest::prelude::*;
use serde_json::{json, Value};
use tower::ServiceExt;

fn app() -> Router {
    create_app(AppState::new(Engine::default(), Config::default()))
}

async fn post_json(uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(request).await
}

async fn send(request: Request<Body>) -> (StatusCode, Value) {
    let response = app().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

/// Daily series of `days` days starting 1 July
fn dry_series(days: u32) -> Value {
    let series: Vec<Value> = (1..=days)
        .map(|day| {
            json!({
                "date": format!("2024-07-{:02}", day),
                "precipitation": 0.0,
                "temperature_max": 34.0,
                "temperature_min": 23.0
            })
        })
        .collect();
    Value::Array(series)
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[tokio::test]
    async fn test_health() {
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["crops"], 9);
    }

    #[tokio::test]
    async fn test_weather_indicators() {
        let (status, body) = post_json(
            "/api/v1/weather/indicators",
            json!({
                "series": dry_series(20),
                "latitude": 12.37,
                "reference_date": "2024-07-20"
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "computed");
        assert_eq!(body["consecutive_dry_days"], 20);
    }

    #[tokio::test]
    async fn test_weather_indicators_insufficient_data() {
        let (status, body) = post_json(
            "/api/v1/weather/indicators",
            json!({ "series": [], "latitude": 12.37, "reference_date": "2024-07-20" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "insufficient_data");
        assert_eq!(body["required_days"], 7);
    }

    #[tokio::test]
    async fn test_weather_validate() {
        let (status, body) = post_json(
            "/api/v1/weather/validate",
            json!({
                "readings": [
                    { "source": "open_meteo", "precipitation": 8.0, "temperature_max": 33.0, "temperature_min": 22.0 },
                    { "source": "nasa_power", "precipitation": 12.0, "temperature_max": 33.0, "temperature_min": 22.0 }
                ]
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["validation"]["data_quality"], "good");
        assert_eq!(body["reliable_reading"]["method"], "averaged");
        assert_eq!(body["reliable_reading"]["precipitation"], 10.0);
    }

    #[tokio::test]
    async fn test_risk_assess_drought() {
        let (status, body) = post_json(
            "/api/v1/risk/assess",
            json!({
                "series": dry_series(25),
                "latitude": 12.37,
                "reference_date": "2024-07-25",
                "crop_type": "maize",
                "farm_size": 2.0
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["analysis"]["risk_type"], "drought");
        assert_eq!(body["analysis"]["compensation_eligible"], true);
    }

    #[tokio::test]
    async fn test_risk_classify_insufficient_data() {
        let (status, body) = post_json(
            "/api/v1/risk/classify",
            json!({
                "indicators": { "status": "insufficient_data", "observed_days": 2, "required_days": 7 },
                "crop_type": "millet",
                "farm_size": 1.0
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["risk_level"], "medium");
        assert_eq!(body["risk_score"], 50);
        assert_eq!(body["alert_level"], "warning");
    }

    #[tokio::test]
    async fn test_insurance_premium() {
        let (status, body) = post_json(
            "/api/v1/insurance/premium",
            json!({ "crop_type": "maize", "farm_size": 2.0, "risk_index": 0.5, "language": "english" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["monthly_premium"], "300");
        assert_eq!(body["coverage_amount"], "9000");
        assert_eq!(body["risk_category"], "low");
    }

    #[tokio::test]
    async fn test_insurance_premium_invalid_farm_size() {
        let (status, body) = post_json(
            "/api/v1/insurance/premium",
            json!({ "crop_type": "maize", "farm_size": 0.0, "risk_index": 0.5 }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "INVALID_INPUT");
        assert_eq!(body["error"]["field"], "farm_size");
        assert!(body["error"]["message_fr"].as_str().unwrap().starts_with("Valeur invalide"));
    }

    #[tokio::test]
    async fn test_insurance_premium_oversized_farm() {
        let (status, body) = post_json(
            "/api/v1/insurance/premium",
            json!({ "crop_type": "maize", "farm_size": 1e27, "risk_index": 0.5 }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "INVALID_INPUT");
        assert_eq!(body["error"]["field"], "farm_size");
    }

    #[tokio::test]
    async fn test_insurance_premium_risk_out_of_range() {
        let (status, body) = post_json(
            "/api/v1/insurance/premium",
            json!({ "crop_type": "maize", "farm_size": 2.0, "risk_index": 1.4 }),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "INVALID_REQUEST_BODY");
    }

    #[tokio::test]
    async fn test_malformed_json() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/soil/score")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "INVALID_REQUEST_BODY");
    }

    #[tokio::test]
    async fn test_credit_score() {
        let (status, body) = post_json(
            "/api/v1/credit/score",
            json!({
                "crop_type": "cotton",
                "farm_size": 3.0,
                "soil": { "quality_score": 72.0, "suitability": "good" },
                "yields": { "average_yield": 1.8, "trend": "stable", "reliability_score": 70.0 },
                "insurance": {
                    "payment_reliability": 90.0,
                    "years_with_insurance": 2,
                    "claims_submitted": 1,
                    "total_policies": 2,
                    "active_policies": 1
                },
                "language": "english"
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let score = body["overall_score"].as_u64().unwrap();
        assert!(score <= 1000);
        assert_eq!(body["warnings"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_soil_score() {
        let (status, body) = post_json(
            "/api/v1/soil/score",
            json!({ "ph": 6.5, "organic_matter": 3.2, "nitrogen": 2.1, "phosphorus": 32.0, "potassium": 0.6 }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["suitability"], "excellent");
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let request = Request::builder()
            .uri("/api/v1/unknown")
            .body(Body::empty())
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    fn field_strategy() -> impl Strategy<Value = String> {
        "[a-z_]{1,20}(\\.[a-z_]{1,12})?"
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Engine input errors always map to 400 with the field echoed
        #[test]
        fn prop_invalid_input_maps_to_bad_request(
            field in field_strategy(),
            message in "[ -~]{0,40}"
        ) {
            let error = AppError::from(EngineError::invalid(field, message));
            let response = error.into_response();
            prop_assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        }

        /// Configuration errors are server errors
        #[test]
        fn prop_configuration_maps_to_server_error(message in "[ -~]{0,40}") {
            let response = AppError::from(EngineError::Configuration(message)).into_response();
            prop_assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }
}
