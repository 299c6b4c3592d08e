//! Prediction request contract
//!
//! Requests arrive as loosely-typed JSON. Absent (or null) fields take the
//! defaults below; numeric readings may be JSON numbers or numeric strings.
//! Both snake_case and the camelCase names posted by the web dashboard
//! (`cropName`, `soilQuality`) are accepted.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ValidationError;

pub const DEFAULT_CROP: &str = "wheat";
pub const DEFAULT_TEMPERATURE: f64 = 25.0;
pub const DEFAULT_RAINFALL: f64 = 600.0;
pub const DEFAULT_SOIL_QUALITY: f64 = 80.0;
pub const DEFAULT_REGION: &str = "Andhra Pradesh";

/// Validated prediction input
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionRequest {
    pub crop_name: String,

    /// Mean growing-season temperature (°C)
    pub temperature: f64,

    /// Seasonal rainfall (mm)
    pub rainfall: f64,

    /// Soil quality index, 0-100
    pub soil_quality: f64,

    pub region: String,
}

impl Default for PredictionRequest {
    fn default() -> Self {
        Self {
            crop_name: DEFAULT_CROP.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            rainfall: DEFAULT_RAINFALL,
            soil_quality: DEFAULT_SOIL_QUALITY,
            region: DEFAULT_REGION.to_string(),
        }
    }
}

impl PredictionRequest {
    /// Default request for a given crop
    pub fn for_crop(crop_name: impl Into<String>) -> Self {
        Self {
            crop_name: crop_name.into(),
            ..Self::default()
        }
    }

    /// Check readings are usable before any computation
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.temperature.is_finite() || !self.rainfall.is_finite() {
            return Err(ValidationError::NonNumericReading);
        }
        if !self.soil_quality.is_finite() {
            return Err(ValidationError::SoilQualityNotNumeric);
        }
        if !(0.0..=100.0).contains(&self.soil_quality) {
            return Err(ValidationError::SoilQualityOutOfRange(self.soil_quality));
        }
        Ok(())
    }

    /// Parse and validate a JSON request body
    pub fn from_json(value: &Value) -> Result<Self, ValidationError> {
        if !value.is_object() {
            return Err(ValidationError::MalformedBody(format!(
                "expected an object, got {}",
                json_type_name(value)
            )));
        }

        let raw: RawPredictionRequest = serde_json::from_value(value.clone())
            .map_err(|e| ValidationError::MalformedBody(e.to_string()))?;

        raw.into_request()
    }

    /// Parse raw bytes; an empty body means "all defaults"
    pub fn from_slice(body: &[u8]) -> Result<Self, ValidationError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }

        let value: Value = serde_json::from_slice(body)
            .map_err(|e| ValidationError::MalformedBody(e.to_string()))?;

        Self::from_json(&value)
    }
}

/// Untyped request fields as received
#[derive(Debug, Default, Deserialize)]
pub struct RawPredictionRequest {
    #[serde(default, alias = "cropName")]
    pub crop_name: Option<Value>,

    #[serde(default)]
    pub temperature: Option<Value>,

    #[serde(default)]
    pub rainfall: Option<Value>,

    #[serde(default, alias = "soilQuality")]
    pub soil_quality: Option<Value>,

    #[serde(default)]
    pub region: Option<Value>,
}

impl RawPredictionRequest {
    /// Apply defaults, coerce numeric strings and validate
    pub fn into_request(self) -> Result<PredictionRequest, ValidationError> {
        let temperature = numeric_field(self.temperature.as_ref(), DEFAULT_TEMPERATURE);
        let rainfall = numeric_field(self.rainfall.as_ref(), DEFAULT_RAINFALL);
        let (Some(temperature), Some(rainfall)) = (temperature, rainfall) else {
            return Err(ValidationError::NonNumericReading);
        };

        let soil_quality = numeric_field(self.soil_quality.as_ref(), DEFAULT_SOIL_QUALITY)
            .ok_or(ValidationError::SoilQualityNotNumeric)?;

        let request = PredictionRequest {
            crop_name: string_field(self.crop_name, DEFAULT_CROP, "crop_name")?,
            temperature,
            rainfall,
            soil_quality,
            region: string_field(self.region, DEFAULT_REGION, "region")?,
        };

        request.validate()?;
        Ok(request)
    }
}

/// `None` when the value is present but not a finite number
fn numeric_field(value: Option<&Value>, default: f64) -> Option<f64> {
    let parsed = match value {
        None | Some(Value::Null) => Some(default),
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(_) => None,
    };
    parsed.filter(|v| v.is_finite())
}

fn string_field(
    value: Option<Value>,
    default: &str,
    field: &'static str,
) -> Result<String, ValidationError> {
    match value {
        None | Some(Value::Null) => Ok(default.to_string()),
        Some(Value::String(s)) => Ok(s),
        Some(_) => Err(ValidationError::NotAString(field)),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_object_takes_defaults() {
        let req = PredictionRequest::from_json(&json!({})).unwrap();
        assert_eq!(req, PredictionRequest::default());
        assert_eq!(req.crop_name, "wheat");
        assert_eq!(req.region, "Andhra Pradesh");
    }

    #[test]
    fn test_empty_body_takes_defaults() {
        assert_eq!(PredictionRequest::from_slice(b"").unwrap(), PredictionRequest::default());
        assert_eq!(PredictionRequest::from_slice(b"  \n").unwrap(), PredictionRequest::default());
    }

    #[test]
    fn test_nulls_take_defaults() {
        let req = PredictionRequest::from_json(&json!({
            "crop_name": null,
            "temperature": null,
            "soil_quality": null
        }))
        .unwrap();
        assert_eq!(req, PredictionRequest::default());
    }

    #[test]
    fn test_camel_case_aliases() {
        let req = PredictionRequest::from_json(&json!({
            "cropName": "Rice",
            "soilQuality": 55
        }))
        .unwrap();
        assert_eq!(req.crop_name, "Rice");
        assert_eq!(req.soil_quality, 55.0);
    }

    #[test]
    fn test_numeric_strings_are_coerced() {
        let req = PredictionRequest::from_json(&json!({
            "temperature": "31.5",
            "rainfall": " 420 ",
            "soil_quality": "70"
        }))
        .unwrap();
        assert_eq!(req.temperature, 31.5);
        assert_eq!(req.rainfall, 420.0);
        assert_eq!(req.soil_quality, 70.0);
    }

    #[test]
    fn test_non_numeric_rainfall_is_rejected() {
        let err = PredictionRequest::from_json(&json!({"rainfall": "abc"})).unwrap_err();
        assert_eq!(err, ValidationError::NonNumericReading);
        assert!(err.to_string().contains("Temperature and rainfall"));
    }

    #[test]
    fn test_non_numeric_temperature_is_rejected() {
        for bad in [json!("hot"), json!(true), json!([25]), json!({"c": 25}), json!("NaN")] {
            let err = PredictionRequest::from_json(&json!({"temperature": bad})).unwrap_err();
            assert_eq!(err, ValidationError::NonNumericReading);
        }
    }

    #[test]
    fn test_soil_quality_bounds() {
        let err = PredictionRequest::from_json(&json!({"soil_quality": 150})).unwrap_err();
        assert_eq!(err, ValidationError::SoilQualityOutOfRange(150.0));
        assert!(err.to_string().contains("between 0 and 100"));

        let err = PredictionRequest::from_json(&json!({"soil_quality": -1})).unwrap_err();
        assert_eq!(err, ValidationError::SoilQualityOutOfRange(-1.0));

        assert!(PredictionRequest::from_json(&json!({"soil_quality": 0})).is_ok());
        assert!(PredictionRequest::from_json(&json!({"soil_quality": 100})).is_ok());
    }

    #[test]
    fn test_soil_quality_must_be_numeric() {
        let err = PredictionRequest::from_json(&json!({"soil_quality": "rich"})).unwrap_err();
        assert_eq!(err, ValidationError::SoilQualityNotNumeric);
    }

    #[test]
    fn test_readings_checked_before_soil() {
        let err = PredictionRequest::from_json(&json!({
            "temperature": "abc",
            "soil_quality": 500
        }))
        .unwrap_err();
        assert_eq!(err, ValidationError::NonNumericReading);
    }

    #[test]
    fn test_crop_name_must_be_string() {
        let err = PredictionRequest::from_json(&json!({"crop_name": 7})).unwrap_err();
        assert_eq!(err, ValidationError::NotAString("crop_name"));
    }

    #[test]
    fn test_non_object_body_is_malformed() {
        assert!(matches!(
            PredictionRequest::from_json(&json!([1, 2])),
            Err(ValidationError::MalformedBody(_))
        ));
        assert!(matches!(
            PredictionRequest::from_slice(b"{not json"),
            Err(ValidationError::MalformedBody(_))
        ));
    }

    #[test]
    fn test_validate_direct_construction() {
        let mut req = PredictionRequest::default();
        req.temperature = f64::NAN;
        assert_eq!(req.validate(), Err(ValidationError::NonNumericReading));

        let mut req = PredictionRequest::default();
        req.soil_quality = 100.5;
        assert_eq!(req.validate(), Err(ValidationError::SoilQualityOutOfRange(100.5)));
    }
}
