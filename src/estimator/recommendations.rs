//! Recommendation generation
//!
//! Independent rules, evaluated in order and freely combined. Only wheat and
//! rice carry crop-specific advice.

use crate::crops::CropProfile;
use crate::request::PredictionRequest;

use super::risk::RiskFlag;

pub const COLD_THRESHOLD_C: f64 = 15.0;
pub const HEAT_THRESHOLD_C: f64 = 35.0;
pub const DRY_THRESHOLD_MM: f64 = 400.0;
pub const WET_THRESHOLD_MM: f64 = 2000.0;

/// Wheat above this temperature gets variety advice
pub const WHEAT_HEAT_THRESHOLD_C: f64 = 30.0;

/// Rice below this rainfall gets irrigation advice
pub const RICE_DRY_THRESHOLD_MM: f64 = 1000.0;

pub fn generate_recommendations(
    crop: &CropProfile,
    request: &PredictionRequest,
    risks: &[RiskFlag],
) -> Vec<String> {
    let mut recommendations = Vec::new();

    if risks.is_empty() {
        recommendations.push(format!(
            "Conditions are optimal for {}. Continue with standard cultivation practices.",
            crop.name.to_lowercase()
        ));
    }

    if request.temperature < COLD_THRESHOLD_C {
        recommendations.push(
            "Consider cold-resistant varieties and protective covers during cold spells"
                .to_string(),
        );
    }
    if request.temperature > HEAT_THRESHOLD_C {
        recommendations.push(
            "Provide shade nets and increase irrigation frequency to reduce heat stress"
                .to_string(),
        );
    }

    if request.rainfall < DRY_THRESHOLD_MM {
        recommendations.push(
            "Adopt drought-management techniques such as drip irrigation and mulching"
                .to_string(),
        );
    }
    if request.rainfall > WET_THRESHOLD_MM {
        recommendations
            .push("Improve field drainage to prevent waterlogging and root rot".to_string());
    }

    match crop.id {
        "wheat" if request.temperature > WHEAT_HEAT_THRESHOLD_C => {
            recommendations.push(
                "For wheat, switch to early-sowing or late-maturing heat-tolerant varieties"
                    .to_string(),
            );
        }
        "rice" if request.rainfall < RICE_DRY_THRESHOLD_MM => {
            recommendations.push(
                "Rice needs standing water: supplement rainfall with regular irrigation"
                    .to_string(),
            );
        }
        _ => {}
    }

    recommendations
}
