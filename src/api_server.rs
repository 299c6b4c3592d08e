//! Axum API Server
//!
//! Thin HTTP transport over the yield estimator. Request bodies are read as
//! raw bytes and parsed by the request module so that malformed input is
//! reported in the same `{error, kind}` shape as every other failure.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::config::ServerConfig;
use crate::crops::CropDetail;
use crate::error::{EstimateError, ValidationError, INTERNAL_ERROR_MESSAGE};
use crate::estimator::{JitterMode, PredictionResult, YieldEstimator, MAX_BATCH_SIZE};
use crate::request::PredictionRequest;

pub const SERVICE_NAME: &str = "Crop Yield Prediction Service";

// ============================================================================
// Application State
// ============================================================================

#[derive(Clone)]
pub struct AppState {
    pub estimator: YieldEstimator,
    pub jitter: JitterMode,
}

impl AppState {
    pub fn new(jitter: JitterMode) -> Self {
        Self {
            estimator: YieldEstimator::default(),
            jitter,
        }
    }

    pub fn from_config(config: &ServerConfig) -> Self {
        Self::new(config.jitter)
    }
}

// ============================================================================
// Router
// ============================================================================

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Service description + health check
        .route("/", get(service_info))
        .route("/health", get(health_check))

        // Crop reference table
        .route("/crops", get(list_crops))
        .route("/crops/:name", get(get_crop))

        // Predictions
        .route("/predict", post(predict))
        .route("/predict/batch", post(predict_batch))

        .fallback(route_not_found)

        // Middleware (applied in reverse order)
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ============================================================================
// Endpoint Handlers
// ============================================================================

async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "serviceName": SERVICE_NAME,
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Static description of the available operations
async fn service_info(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "service": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Rule-based crop yield estimates with risk flags and recommendations",
        "supported_crops": state.estimator.table().ids(),
        "jitter": state.jitter.label(),
        "endpoints": [
            {
                "method": "POST",
                "path": "/predict",
                "description": "Predict yield for one crop",
                "body": {
                    "crop_name": "wheat",
                    "temperature": 25,
                    "rainfall": 600,
                    "soil_quality": 80,
                    "region": "Andhra Pradesh",
                },
            },
            {
                "method": "POST",
                "path": "/predict/batch",
                "description": format!("Predict up to {} requests at once", MAX_BATCH_SIZE),
                "body": { "requests": [{ "crop_name": "rice" }] },
            },
            { "method": "GET", "path": "/crops", "description": "List supported crops" },
            { "method": "GET", "path": "/crops/:name", "description": "Crop details, diseases and pests" },
            { "method": "GET", "path": "/health", "description": "Service health" },
        ],
    }))
}

async fn list_crops(State(state): State<AppState>) -> impl IntoResponse {
    let table = state.estimator.table();
    Json(json!({
        "count": table.len(),
        "crops": table.summaries(),
    }))
}

async fn get_crop(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<CropDetail>, AppError> {
    let table = state.estimator.table();
    let crop = table.get(&name).ok_or_else(|| {
        AppError::NotFound(format!(
            "Crop '{}' not found. Supported crops: {}",
            name,
            table.ids().join(", ")
        ))
    })?;

    Ok(Json(crop.detail()))
}

/// POST /predict
///
/// Body fields are optional; see `PredictionRequest` for defaults.
async fn predict(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<PredictionResult>, AppError> {
    let request = PredictionRequest::from_slice(&body).map_err(EstimateError::from)?;

    let result = state
        .jitter
        .with_source(|source| state.estimator.predict(&request, source))?;

    tracing::info!(
        "Predicted {} {} for {} in {} ({} risks, confidence {})",
        result.yield_value,
        result.unit,
        result.crop,
        request.region,
        result.risks.len(),
        result.confidence
    );
    tracing::debug!("Yield factors: {:?}, jitter {:+.4}", result.yield_factors, result.jitter);

    Ok(Json(result))
}

#[derive(serde::Deserialize)]
struct BatchPredictionRequest {
    requests: Vec<Value>,
}

/// POST /predict/batch
///
/// Body: { "requests": [ {...}, ... ] }
///
/// Each item succeeds or fails on its own; results keep input order.
/// CPU work runs on the blocking pool and fans out with rayon.
async fn predict_batch(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Value>, AppError> {
    let batch: BatchPredictionRequest = serde_json::from_slice(&body)
        .map_err(|e| EstimateError::from(ValidationError::MalformedBody(e.to_string())))?;

    let count = batch.requests.len();
    tracing::info!("Predicting batch of {} requests", count);

    let estimator = state.estimator;
    let jitter = state.jitter;
    let results = tokio::task::spawn_blocking(move || {
        estimator.predict_batch(&batch.requests, jitter)
    })
    .await
    .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))??;

    let mut succeeded = 0;
    let items: Vec<Value> = results
        .into_iter()
        .enumerate()
        .map(|(index, outcome)| match outcome {
            Ok(prediction) => {
                succeeded += 1;
                json!({
                    "index": index,
                    "status": "ok",
                    "prediction": prediction,
                })
            }
            Err(err) => {
                log_estimate_error(&err);
                json!({
                    "index": index,
                    "status": "error",
                    "kind": err.kind(),
                    "error": err.public_message(),
                })
            }
        })
        .collect();

    Ok(Json(json!({
        "count": count,
        "succeeded": succeeded,
        "failed": count - succeeded,
        "results": items,
    })))
}

async fn route_not_found() -> AppError {
    AppError::NotFound("No such endpoint. See GET / for the available operations".to_string())
}

// ============================================================================
// Error Handling
// ============================================================================

#[derive(Debug)]
enum AppError {
    Estimate(EstimateError),
    NotFound(String),
    Internal(String),
}

impl From<EstimateError> for AppError {
    fn from(err: EstimateError) -> Self {
        AppError::Estimate(err)
    }
}

fn log_estimate_error(err: &EstimateError) {
    if err.kind().is_client_error() {
        tracing::warn!("Rejected prediction request: {}", err);
    } else {
        tracing::error!("Prediction failed: {}", err);
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, kind, message) = match self {
            AppError::Estimate(err) => {
                log_estimate_error(&err);
                let kind = err.kind();
                let status = if kind.is_client_error() {
                    StatusCode::BAD_REQUEST
                } else {
                    StatusCode::INTERNAL_SERVER_ERROR
                };
                (status, kind.as_str(), err.public_message())
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    INTERNAL_ERROR_MESSAGE.to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": message,
            "kind": kind,
        }));

        (status, body).into_response()
    }
}
