//! Estimation errors
//!
//! Three kinds reach the caller: validation failures and unsupported crops
//! (client errors) and internal failures (server errors). Internal causes are
//! kept for logging but never shown to the caller.

use serde::Serialize;
use thiserror::Error;

/// Caller-facing message for internal failures
pub const INTERNAL_ERROR_MESSAGE: &str =
    "An internal error occurred while generating the prediction";

/// Machine-readable error classification returned alongside every message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    ValidationError,
    UnsupportedCrop,
    InternalError,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::ValidationError => "validation_error",
            ErrorKind::UnsupportedCrop => "unsupported_crop",
            ErrorKind::InternalError => "internal_error",
        }
    }

    pub fn is_client_error(&self) -> bool {
        !matches!(self, ErrorKind::InternalError)
    }
}

/// Rejected request input, reported before any computation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Temperature and rainfall must be numeric values")]
    NonNumericReading,

    #[error("Soil quality must be a number between 0 and 100")]
    SoilQualityNotNumeric,

    #[error("Soil quality must be between 0 and 100, got {0}")]
    SoilQualityOutOfRange(f64),

    #[error("{0} must be a string")]
    NotAString(&'static str),

    #[error("Request body must be a JSON object: {0}")]
    MalformedBody(String),

    #[error("Batch contains {len} requests, the maximum is {max}")]
    BatchTooLarge { len: usize, max: usize },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EstimateError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Crop '{crop}' is not supported. Supported crops: {supported}")]
    UnsupportedCrop { crop: String, supported: String },

    #[error("Internal estimation failure: {0}")]
    Internal(String),
}

impl EstimateError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EstimateError::Validation(_) => ErrorKind::ValidationError,
            EstimateError::UnsupportedCrop { .. } => ErrorKind::UnsupportedCrop,
            EstimateError::Internal(_) => ErrorKind::InternalError,
        }
    }

    /// Message safe to return to the caller
    pub fn public_message(&self) -> String {
        match self {
            EstimateError::Internal(_) => INTERNAL_ERROR_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}
