//! Error handling for the AgriShield server
//!
//! Provides consistent error responses in English and French

use agrishield_engine::EngineError;
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Validation errors
    #[error("Invalid input for `{field}`: {message}")]
    InvalidInput { field: String, message: String },

    #[error("Invalid request body: {0}")]
    InvalidJson(#[from] JsonRejection),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl From<EngineError> for AppError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::InvalidInput { field, message } => AppError::InvalidInput { field, message },
            EngineError::Configuration(msg) => AppError::Configuration(msg),
        }
    }
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message_en: String,
    pub message_fr: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_detail) = match &self {
            AppError::InvalidInput { field, message } => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "INVALID_INPUT".to_string(),
                    message_en: format!("Invalid value for {}: {}", field, message),
                    message_fr: format!("Valeur invalide pour {} : {}", field, message),
                    field: Some(field.clone()),
                },
            ),
            AppError::InvalidJson(rejection) => (
                rejection.status(),
                ErrorDetail {
                    code: "INVALID_REQUEST_BODY".to_string(),
                    message_en: rejection.body_text(),
                    message_fr: format!("Corps de requête invalide : {}", rejection.body_text()),
                    field: None,
                },
            ),
            AppError::Configuration(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "CONFIGURATION_ERROR".to_string(),
                    message_en: format!("Configuration error: {}", msg),
                    message_fr: format!("Erreur de configuration : {}", msg),
                    field: None,
                },
            ),
        };

        // Log the error for debugging
        tracing::error!("Error: {:?}", self);

        (status, Json(ErrorResponse { error: error_detail })).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
