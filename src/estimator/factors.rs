//! Yield adjustment factors
//!
//! Base yield is the midpoint of the crop's yield range, scaled by four
//! multiplicative factors (temperature, rainfall, soil, region).
//!
//! The below-range branches scale by `value / optimal_min` while the
//! above-range branches scale by distance past `optimal_max`. They are not
//! symmetric and are kept as-is: a reading at or below zero can push the
//! temperature factor under 0.5. Temperature and rainfall factors are
//! floored at `FACTOR_FLOOR` so extreme readings drive the estimate to zero
//! instead of flipping its sign.

use serde::Serialize;

use crate::crops::{region_factor, CropProfile, Range};
use crate::request::PredictionRequest;

/// Lowest value a temperature or rainfall factor can take
pub const FACTOR_FLOOR: f64 = 0.0;

/// Per-dimension multipliers used for one estimate
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct YieldFactors {
    pub temperature: f64,
    pub rainfall: f64,
    pub soil: f64,
    pub region: f64,
}

impl YieldFactors {
    pub fn compute(crop: &CropProfile, request: &PredictionRequest) -> Self {
        Self {
            temperature: temperature_factor(request.temperature, &crop.optimal_temp),
            rainfall: rainfall_factor(request.rainfall, &crop.optimal_rainfall),
            soil: soil_factor(request.soil_quality),
            region: region_factor(&request.region),
        }
    }

    /// Neutral conditions: every factor 1.0
    pub fn neutral() -> Self {
        Self {
            temperature: 1.0,
            rainfall: 1.0,
            soil: 1.0,
            region: 1.0,
        }
    }

    /// `base * temp * rain * soil * region * (1 + jitter)`, unrounded
    pub fn apply(&self, base: f64, jitter: f64) -> f64 {
        base * self.temperature * self.rainfall * self.soil * self.region * (1.0 + jitter)
    }
}

/// 1.0 inside the optimal window; `0.5 + (t / min) * 0.3` below it;
/// loses 0.3 per 10°C above it. Never below `FACTOR_FLOOR`.
pub fn temperature_factor(temperature: f64, optimal: &Range) -> f64 {
    let factor = if temperature < optimal.min {
        0.5 + (temperature / optimal.min) * 0.3
    } else if temperature > optimal.max {
        1.0 - ((temperature - optimal.max) / 10.0) * 0.3
    } else {
        1.0
    };
    factor.max(FACTOR_FLOOR)
}

/// 1.0 inside the optimal window; `0.6 + (r / min) * 0.4` below it;
/// loses 0.4 per 500mm above it. Never below `FACTOR_FLOOR`.
pub fn rainfall_factor(rainfall: f64, optimal: &Range) -> f64 {
    let factor = if rainfall < optimal.min {
        0.6 + (rainfall / optimal.min) * 0.4
    } else if rainfall > optimal.max {
        1.0 - ((rainfall - optimal.max) / 500.0) * 0.4
    } else {
        1.0
    };
    factor.max(FACTOR_FLOOR)
}

/// Linear 0.8 (soil quality 0) to 1.2 (soil quality 100)
pub fn soil_factor(soil_quality: f64) -> f64 {
    0.8 + (soil_quality / 100.0) * 0.4
}
