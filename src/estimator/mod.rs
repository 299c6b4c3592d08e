//! Yield Estimator
//!
//! Combines the crop reference table with a validated request:
//! - `factors`: base yield and the four multiplicative adjustments
//! - `risk`: ordered risk flags
//! - `confidence`: step function over the risk count
//! - `recommendations`: rule-based advice
//! - `jitter`: injectable ±10% perturbation
//!
//! The estimator holds no mutable state; the only non-determinism is the
//! jitter source passed in by the caller.

pub mod confidence;
pub mod factors;
pub mod jitter;
pub mod recommendations;
pub mod risk;

use rayon::prelude::*;
use serde::Serialize;
use serde_json::Value;

use crate::crops::{CropProfile, CropTable};
use crate::error::{EstimateError, ValidationError};
use crate::request::PredictionRequest;

pub use confidence::confidence_score;
pub use factors::{rainfall_factor, soil_factor, temperature_factor, YieldFactors, FACTOR_FLOOR};
pub use jitter::{FixedJitter, JitterMode, JitterSource, UniformJitter, JITTER_SPAN};
pub use recommendations::generate_recommendations;
pub use risk::{assess_risks, RiskFlag, POOR_SOIL_THRESHOLD};

pub const YIELD_UNIT: &str = "tons/acre";

/// Upper bound on requests in one batch
pub const MAX_BATCH_SIZE: usize = 1000;

/// Round to 2 decimal places
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Readings the estimate was computed from
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnvironmentalFactors {
    pub temperature: f64,
    pub rainfall: f64,
    pub soil_quality: f64,
    pub region: String,
}

impl From<&PredictionRequest> for EnvironmentalFactors {
    fn from(request: &PredictionRequest) -> Self {
        Self {
            temperature: request.temperature,
            rainfall: request.rainfall,
            soil_quality: request.soil_quality,
            region: request.region.clone(),
        }
    }
}

/// One yield prediction, created fresh per request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionResult {
    /// Crop display name (e.g., "Wheat")
    pub crop: String,

    /// One-line summary, e.g. "Predicted yield for Wheat: 3.82 tons/acre"
    pub prediction: String,

    /// Estimated yield, 2 decimal places
    pub yield_value: f64,
    pub unit: &'static str,

    /// 0.60, 0.75 or 0.85
    pub confidence: f64,

    pub risks: Vec<RiskFlag>,
    pub recommendations: Vec<String>,
    pub environmental_factors: EnvironmentalFactors,
    pub yield_factors: YieldFactors,
    pub jitter: f64,
    pub growth_period_days: u32,

    /// RFC 3339 (UTC)
    pub timestamp: String,
}

/// Stateless estimator over a crop table
#[derive(Debug, Clone, Copy)]
pub struct YieldEstimator {
    table: &'static CropTable,
}

impl Default for YieldEstimator {
    fn default() -> Self {
        Self::new(CropTable::global())
    }
}

impl YieldEstimator {
    pub fn new(table: &'static CropTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &'static CropTable {
        self.table
    }

    /// Resolve a crop name, mapping a miss to `UnsupportedCrop`
    pub fn crop(&self, crop_name: &str) -> Result<&'static CropProfile, EstimateError> {
        self.table
            .get(crop_name)
            .ok_or_else(|| EstimateError::UnsupportedCrop {
                crop: crop_name.to_string(),
                supported: self.table.ids().join(", "),
            })
    }

    /// Full prediction for a request
    pub fn predict<J: JitterSource + ?Sized>(
        &self,
        request: &PredictionRequest,
        jitter: &mut J,
    ) -> Result<PredictionResult, EstimateError> {
        request.validate()?;
        let crop = self.crop(&request.crop_name)?;

        let factors = YieldFactors::compute(crop, request);
        let offset = jitter.next_offset();
        let yield_value = round2(factors.apply(crop.yield_range.midpoint(), offset));

        if !yield_value.is_finite() {
            return Err(EstimateError::Internal(format!(
                "non-finite yield for {} (factors: {:?}, jitter: {})",
                crop.id, factors, offset
            )));
        }

        let risks = assess_risks(crop, request);
        let confidence = confidence_score(risks.len());
        let recommendations = generate_recommendations(crop, request, &risks);

        Ok(PredictionResult {
            crop: crop.name.to_string(),
            prediction: format!(
                "Predicted yield for {}: {:.2} {}",
                crop.name, yield_value, YIELD_UNIT
            ),
            yield_value,
            unit: YIELD_UNIT,
            confidence,
            risks,
            recommendations,
            environmental_factors: EnvironmentalFactors::from(request),
            yield_factors: factors,
            jitter: offset,
            growth_period_days: crop.growth_period_days,
            timestamp: chrono::Utc::now().to_rfc3339(),
        })
    }

    /// Parse and predict a JSON request body
    pub fn predict_json<J: JitterSource + ?Sized>(
        &self,
        body: &Value,
        jitter: &mut J,
    ) -> Result<PredictionResult, EstimateError> {
        let request = PredictionRequest::from_json(body)?;
        self.predict(&request, jitter)
    }

    /// Predict many JSON requests in parallel.
    ///
    /// Items fail independently; the output keeps input order.
    pub fn predict_batch(
        &self,
        bodies: &[Value],
        mode: JitterMode,
    ) -> Result<Vec<Result<PredictionResult, EstimateError>>, EstimateError> {
        if bodies.len() > MAX_BATCH_SIZE {
            return Err(ValidationError::BatchTooLarge {
                len: bodies.len(),
                max: MAX_BATCH_SIZE,
            }
            .into());
        }

        Ok(bodies
            .par_iter()
            .map(|body| mode.with_source(|source| self.predict_json(body, source)))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use serde_json::json;

    fn predict_exact(request: &PredictionRequest) -> Result<PredictionResult, EstimateError> {
        YieldEstimator::default().predict(request, &mut FixedJitter::zero())
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(3.822), 3.82);
        assert_eq!(round2(1.29766), 1.3);
        assert_eq!(round2(-0.456), -0.46);
    }

    #[test]
    fn test_default_wheat_exact() {
        // 3.25 * 1.0 * 1.0 * 1.12 * 1.05 = 3.822
        let result = predict_exact(&PredictionRequest::default()).unwrap();
        assert_relative_eq!(result.yield_value, 3.82, epsilon = 1e-9);
        assert_eq!(result.unit, "tons/acre");
        assert_eq!(result.confidence, 0.85);
        assert!(result.risks.is_empty());
        assert_eq!(result.recommendations.len(), 1);
        assert_eq!(result.crop, "Wheat");
        assert_eq!(result.prediction, "Predicted yield for Wheat: 3.82 tons/acre");
        assert_eq!(result.growth_period_days, 120);
    }

    #[test]
    fn test_jitter_scales_result() {
        let request = PredictionRequest::default();
        let estimator = YieldEstimator::default();

        let high = estimator.predict(&request, &mut FixedJitter::new(0.1)).unwrap();
        let low = estimator.predict(&request, &mut FixedJitter::new(-0.1)).unwrap();

        // 3.822 * 1.1 = 4.2042, 3.822 * 0.9 = 3.4398
        assert_relative_eq!(high.yield_value, 4.2, epsilon = 1e-9);
        assert_relative_eq!(low.yield_value, 3.44, epsilon = 1e-9);
        assert_relative_eq!(high.jitter, 0.1);
    }

    #[test]
    fn test_harsh_conditions() {
        let request = PredictionRequest {
            temperature: 5.0,
            rainfall: 100.0,
            soil_quality: 30.0,
            ..PredictionRequest::default()
        };
        let result = predict_exact(&request).unwrap();

        // 3.25 * 0.6 * (0.6 + 100/450*0.4) * 0.92 * 1.05 = 1.2977
        assert_relative_eq!(result.yield_value, 1.3, epsilon = 1e-9);
        assert_eq!(result.confidence, 0.6);
        let kinds: Vec<_> = result.risks.iter().map(RiskFlag::kind).collect();
        assert_eq!(kinds, vec!["low_temperature", "drought", "poor_soil"]);
    }

    #[test]
    fn test_unsupported_crop() {
        let err = predict_exact(&PredictionRequest::for_crop("banana")).unwrap_err();
        assert!(matches!(err, EstimateError::UnsupportedCrop { ref crop, .. } if crop == "banana"));
        assert!(err.to_string().contains("banana"));
        assert!(err.to_string().contains("wheat, rice, corn, cotton, sugarcane"));
    }

    #[test]
    fn test_validation_runs_before_lookup() {
        let request = PredictionRequest {
            crop_name: "banana".to_string(),
            soil_quality: 150.0,
            ..PredictionRequest::default()
        };
        let err = predict_exact(&request).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::ValidationError);
    }

    #[test]
    fn test_non_finite_yield_is_internal_error() {
        struct NanJitter;
        impl JitterSource for NanJitter {
            fn next_offset(&mut self) -> f64 {
                f64::NAN
            }
        }

        let err = YieldEstimator::default()
            .predict(&PredictionRequest::default(), &mut NanJitter)
            .unwrap_err();
        assert!(matches!(err, EstimateError::Internal(_)));
    }

    #[test]
    fn test_predict_json() {
        let result = YieldEstimator::default()
            .predict_json(&json!({"crop_name": "RICE", "rainfall": 1200}), &mut FixedJitter::zero())
            .unwrap();
        // 2.75 * 1.0 * 1.0 * 1.12 * 1.05 = 3.234
        assert_eq!(result.crop, "Rice");
        assert_relative_eq!(result.yield_value, 3.23, epsilon = 1e-9);
    }

    #[test]
    fn test_batch_keeps_order_and_isolates_failures() {
        let bodies = vec![
            json!({"crop_name": "wheat"}),
            json!({"crop_name": "banana"}),
            json!({"soil_quality": 150}),
            json!({"crop_name": "corn", "region": "Punjab"}),
        ];
        let results = YieldEstimator::default()
            .predict_batch(&bodies, JitterMode::Fixed(0.0))
            .unwrap();

        assert_eq!(results.len(), 4);
        assert_relative_eq!(results[0].as_ref().unwrap().yield_value, 3.82, epsilon = 1e-9);
        assert!(matches!(results[1], Err(EstimateError::UnsupportedCrop { .. })));
        assert!(matches!(results[2], Err(EstimateError::Validation(_))));
        // 3.5 * 1.12 * 1.10 = 4.312
        assert_relative_eq!(results[3].as_ref().unwrap().yield_value, 4.31, epsilon = 1e-9);
    }

    #[test]
    fn test_batch_size_limit() {
        let bodies = vec![json!({}); MAX_BATCH_SIZE + 1];
        let err = YieldEstimator::default()
            .predict_batch(&bodies, JitterMode::Random)
            .unwrap_err();
        assert!(matches!(
            err,
            EstimateError::Validation(ValidationError::BatchTooLarge { .. })
        ));
    }
}
