//! Risk assessment
//!
//! Flags are evaluated in a fixed order: low temperature, high temperature,
//! drought, flooding, poor soil. A reading is either below or above its
//! window, never both, so each environmental dimension contributes at most
//! one flag.

use serde::{Serialize, Serializer};

use crate::crops::{CropProfile, Range};
use crate::request::PredictionRequest;

/// Soil quality below this is flagged
pub const POOR_SOIL_THRESHOLD: f64 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RiskFlag {
    LowTemperature { value: f64, optimal: Range },
    HighTemperature { value: f64, optimal: Range },
    Drought { value: f64, optimal: Range },
    Flooding { value: f64, optimal: Range },
    PoorSoil { value: f64 },
}

impl RiskFlag {
    pub fn kind(&self) -> &'static str {
        match self {
            RiskFlag::LowTemperature { .. } => "low_temperature",
            RiskFlag::HighTemperature { .. } => "high_temperature",
            RiskFlag::Drought { .. } => "drought",
            RiskFlag::Flooding { .. } => "flooding",
            RiskFlag::PoorSoil { .. } => "poor_soil",
        }
    }

    /// Human-readable warning embedding the reading and the optimal range
    pub fn message(&self) -> String {
        match self {
            RiskFlag::LowTemperature { value, optimal } => format!(
                "Low temperature risk: {}°C is below the optimal range ({})",
                value,
                optimal.format(0, "°C")
            ),
            RiskFlag::HighTemperature { value, optimal } => format!(
                "High temperature risk: {}°C is above the optimal range ({})",
                value,
                optimal.format(0, "°C")
            ),
            RiskFlag::Drought { value, optimal } => format!(
                "Drought risk: rainfall of {}mm is below the optimal range ({})",
                value,
                optimal.format(0, "mm")
            ),
            RiskFlag::Flooding { value, optimal } => format!(
                "Flooding risk: rainfall of {}mm exceeds the optimal range ({})",
                value,
                optimal.format(0, "mm")
            ),
            RiskFlag::PoorSoil { value } => format!(
                "Poor soil quality: {}/100 is below the recommended minimum of {}",
                value, POOR_SOIL_THRESHOLD
            ),
        }
    }
}

impl Serialize for RiskFlag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.message())
    }
}

/// Ordered risk flags for a request against a crop
pub fn assess_risks(crop: &CropProfile, request: &PredictionRequest) -> Vec<RiskFlag> {
    let mut risks = Vec::new();
    let temp = crop.optimal_temp;
    let rain = crop.optimal_rainfall;

    if request.temperature < temp.min {
        risks.push(RiskFlag::LowTemperature { value: request.temperature, optimal: temp });
    } else if request.temperature > temp.max {
        risks.push(RiskFlag::HighTemperature { value: request.temperature, optimal: temp });
    }

    if request.rainfall < rain.min {
        risks.push(RiskFlag::Drought { value: request.rainfall, optimal: rain });
    } else if request.rainfall > rain.max {
        risks.push(RiskFlag::Flooding { value: request.rainfall, optimal: rain });
    }

    if request.soil_quality < POOR_SOIL_THRESHOLD {
        risks.push(RiskFlag::PoorSoil { value: request.soil_quality });
    }

    risks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crops::CropTable;

    fn wheat() -> &'static CropProfile {
        CropTable::global().get("wheat").unwrap()
    }

    fn request(temperature: f64, rainfall: f64, soil_quality: f64) -> PredictionRequest {
        PredictionRequest {
            temperature,
            rainfall,
            soil_quality,
            ..PredictionRequest::default()
        }
    }

    fn kinds(risks: &[RiskFlag]) -> Vec<&'static str> {
        risks.iter().map(RiskFlag::kind).collect()
    }

    #[test]
    fn test_no_risks_at_defaults() {
        assert!(assess_risks(wheat(), &PredictionRequest::default()).is_empty());
    }

    #[test]
    fn test_fixed_order() {
        let risks = assess_risks(wheat(), &request(5.0, 100.0, 30.0));
        assert_eq!(kinds(&risks), vec!["low_temperature", "drought", "poor_soil"]);

        let risks = assess_risks(wheat(), &request(40.0, 900.0, 10.0));
        assert_eq!(kinds(&risks), vec!["high_temperature", "flooding", "poor_soil"]);
    }

    #[test]
    fn test_boundaries_are_not_risks() {
        assert!(assess_risks(wheat(), &request(15.0, 450.0, 60.0)).is_empty());
        assert!(assess_risks(wheat(), &request(25.0, 650.0, 60.0)).is_empty());
    }

    #[test]
    fn test_messages_embed_value_and_range() {
        let risks = assess_risks(wheat(), &request(5.0, 100.0, 30.0));
        assert_eq!(
            risks[0].message(),
            "Low temperature risk: 5°C is below the optimal range (15-25°C)"
        );
        assert_eq!(
            risks[1].message(),
            "Drought risk: rainfall of 100mm is below the optimal range (450-650mm)"
        );
        assert_eq!(
            risks[2].message(),
            "Poor soil quality: 30/100 is below the recommended minimum of 60"
        );
    }

    #[test]
    fn test_serializes_as_message() {
        let risk = RiskFlag::Flooding { value: 2600.5, optimal: Range::new(1000.0, 2000.0) };
        let json = serde_json::to_value(risk).unwrap();
        assert_eq!(
            json,
            "Flooding risk: rainfall of 2600.5mm exceeds the optimal range (1000-2000mm)"
        );
    }
}
