//! Crop Profile definition
//!
//! Agronomic parameters for a single crop: optimal temperature and rainfall
//! windows, growing season length, expected yield range and the diseases and
//! pests it is known for.

use serde::Serialize;

/// Closed interval used for optimal-condition and yield ranges.
///
/// Every range in the reference table satisfies `min < max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Inclusive on both ends
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.0
    }

    /// Format for display, e.g. `15-25°C` or `2.5-4.0 tons/acre`
    pub fn format(&self, precision: usize, unit: &str) -> String {
        format!("{:.*}-{:.*}{}", precision, self.min, precision, self.max, unit)
    }
}

/// Static agronomic reference data for one crop.
#[derive(Debug, Clone)]
pub struct CropProfile {
    /// Lowercase lookup key (e.g., "wheat")
    pub id: &'static str,

    /// Display name (e.g., "Wheat")
    pub name: &'static str,

    /// Temperature window (°C) under which the temperature factor is 1.0
    pub optimal_temp: Range,

    /// Seasonal rainfall window (mm) under which the rainfall factor is 1.0
    pub optimal_rainfall: Range,

    pub growth_period_days: u32,

    /// Expected yield (tons/acre); its midpoint is the base estimate
    pub yield_range: Range,

    pub diseases: &'static [&'static str],
    pub pests: &'static [&'static str],
}

impl CropProfile {
    pub fn temperature_label(&self) -> String {
        self.optimal_temp.format(0, "°C")
    }

    pub fn rainfall_label(&self) -> String {
        self.optimal_rainfall.format(0, "mm")
    }

    pub fn yield_label(&self) -> String {
        self.yield_range.format(1, " tons/acre")
    }

    /// Listing entry with ranges pre-formatted as strings
    pub fn summary(&self) -> CropSummary {
        CropSummary {
            id: self.id,
            name: self.name,
            optimal_temperature: self.temperature_label(),
            optimal_rainfall: self.rainfall_label(),
            growth_period: format!("{} days", self.growth_period_days),
            yield_range: self.yield_label(),
        }
    }

    /// Summary plus the raw ranges and the known diseases and pests
    pub fn detail(&self) -> CropDetail {
        CropDetail {
            summary: self.summary(),
            optimal_temp: self.optimal_temp,
            optimal_rainfall: self.optimal_rainfall,
            growth_period_days: self.growth_period_days,
            yield_bounds: self.yield_range,
            diseases: self.diseases.to_vec(),
            pests: self.pests.to_vec(),
        }
    }
}

/// One row of the crop listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CropSummary {
    pub id: &'static str,
    pub name: &'static str,
    pub optimal_temperature: String,
    pub optimal_rainfall: String,
    pub growth_period: String,
    pub yield_range: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CropDetail {
    #[serde(flatten)]
    pub summary: CropSummary,
    pub optimal_temp: Range,
    pub optimal_rainfall: Range,
    pub growth_period_days: u32,
    pub yield_bounds: Range,
    pub diseases: Vec<&'static str>,
    pub pests: Vec<&'static str>,
}
