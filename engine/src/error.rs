//! Error types for the decisioning engine
//!
//! Only two things are errors: nonsensical numeric input at the boundary and
//! inconsistent reference data. Missing data and unknown crops or regions are
//! resolved by documented fallbacks and never reach this type.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("Invalid input for `{field}`: {message}")]
    InvalidInput { field: String, message: String },

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl EngineError {
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        EngineError::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Field name for input errors, if any
    pub fn field(&self) -> Option<&str> {
        match self {
            EngineError::InvalidInput { field, .. } => Some(field),
            EngineError::Configuration(_) => None,
        }
    }
}

pub type EngineResult<T> = Result<T, EngineError>;

/// Reject non-finite or non-positive values (farm sizes, areas)
pub fn ensure_positive(field: &str, value: f64) -> EngineResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(EngineError::invalid(field, format!("must be greater than 0, got {value}")));
    }
    Ok(())
}

/// Reject non-finite or negative values (yields, distances, costs)
pub fn ensure_non_negative(field: &str, value: f64) -> EngineResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(EngineError::invalid(field, format!("must not be negative, got {value}")));
    }
    Ok(())
}

/// Reject values outside an inclusive range
pub fn ensure_in_range(field: &str, value: f64, min: f64, max: f64) -> EngineResult<()> {
    if !value.is_finite() || value < min || value > max {
        return Err(EngineError::invalid(
            field,
            format!("must be between {min} and {max}, got {value}"),
        ));
    }
    Ok(())
}
