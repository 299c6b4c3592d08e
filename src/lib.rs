//! Crop Yield Estimator
//!
//! Rule-based stand-in for a machine-learning yield predictor. Given a crop
//! and environmental readings it returns a yield estimate (with bounded
//! random jitter), a confidence score, risk flags and recommendations.
//!
//! Module layout:
//! - `crops/`: static crop reference table and regional multipliers
//! - `request`: request defaults, coercion and validation
//! - `estimator/`: yield factors, risks, confidence, recommendations, jitter
//! - `error`: error taxonomy shared by the library and the HTTP layer
//! - `config`: environment-driven server configuration
//! - `api_server` (feature `api`): Axum router over the estimator

pub mod config;
pub mod crops;
pub mod error;
pub mod estimator;
pub mod request;

#[cfg(feature = "api")]
pub mod api_server;

// Re-export commonly used types
pub use config::ServerConfig;
pub use crops::{CropProfile, CropSummary, CropTable};
pub use error::{ErrorKind, EstimateError, ValidationError};
pub use estimator::{
    FixedJitter, JitterMode, JitterSource, PredictionResult, RiskFlag, UniformJitter,
    YieldEstimator,
};
pub use request::PredictionRequest;

#[cfg(feature = "api")]
pub use api_server::{create_router, AppState};
