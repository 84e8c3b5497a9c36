// Schema validation of raw API payloads
//
// The remote store is loosely typed, so every record crosses a strict
// validation boundary before it can reach the cache: required fields must
// be present and well-shaped, decibel values must be finite non-negative
// numbers. Failures name the offending field. No business-logic inference
// happens here.
use crate::application::errors::SchemaError;
use crate::domain::location::Location;
use crate::domain::measurement::MeasurementPoint;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub struct RawLocationsPayload {
    #[serde(default)]
    pub locations: Vec<RawLocation>,
}

#[derive(Debug, Deserialize)]
pub struct RawLocation {
    pub id: Option<Value>,
    pub label: Option<Value>,
    pub latitude: Option<Value>,
    pub longitude: Option<Value>,
    pub radius: Option<Value>,
    pub active: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct RawMeasurementsPayload {
    #[serde(default)]
    pub measurements: Vec<RawMeasurement>,
}

#[derive(Debug, Deserialize)]
pub struct RawMeasurement {
    pub timestamp: Option<Value>,
    pub min: Option<Value>,
    pub max: Option<Value>,
}

fn require(field: &'static str, value: &Option<Value>) -> Result<Value, SchemaError> {
    match value {
        Some(Value::Null) | None => Err(SchemaError::MissingField(field)),
        Some(value) => Ok(value.clone()),
    }
}

fn decibel(field: &'static str, value: &Option<Value>) -> Result<f64, SchemaError> {
    let value = require(field, value)?;
    let level = value
        .as_f64()
        .ok_or_else(|| SchemaError::invalid(field, "expected a numeric decibel level"))?;
    if !level.is_finite() {
        return Err(SchemaError::invalid(field, "decibel level is not finite"));
    }
    if level < 0.0 {
        return Err(SchemaError::invalid(
            field,
            format!("decibel level {level} is negative"),
        ));
    }
    Ok(level)
}

fn timestamp(field: &'static str, value: &Option<Value>) -> Result<DateTime<Utc>, SchemaError> {
    let value = require(field, value)?;
    let text = value
        .as_str()
        .ok_or_else(|| SchemaError::invalid(field, "expected an RFC 3339 string"))?;
    DateTime::parse_from_rfc3339(text)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| SchemaError::invalid(field, format!("not a valid RFC 3339 timestamp: {e}")))
}

fn number(field: &'static str, value: &Option<Value>) -> Result<f64, SchemaError> {
    require(field, value)?
        .as_f64()
        .ok_or_else(|| SchemaError::invalid(field, "expected a number"))
}

/// Validate one raw reading into a `MeasurementPoint` owned by `device_id`.
pub fn validate_measurement(
    raw: &RawMeasurement,
    device_id: &str,
) -> Result<MeasurementPoint, SchemaError> {
    Ok(MeasurementPoint {
        device_id: device_id.to_string(),
        timestamp: timestamp("timestamp", &raw.timestamp)?,
        min_dba: decibel("min", &raw.min)?,
        max_dba: decibel("max", &raw.max)?,
    })
}

pub fn validate_location(raw: &RawLocation) -> Result<Location, SchemaError> {
    // The API sends numeric IDs for some devices; coerce them to strings
    // so device IDs stay opaque downstream.
    let id = match require("id", &raw.id)? {
        Value::String(id) => id,
        Value::Number(id) => id.to_string(),
        _ => return Err(SchemaError::invalid("id", "expected a string or number")),
    };

    let label = require("label", &raw.label)?
        .as_str()
        .ok_or_else(|| SchemaError::invalid("label", "expected a string"))?
        .to_string();

    let radius = require("radius", &raw.radius)?
        .as_i64()
        .and_then(|r| i32::try_from(r).ok())
        .ok_or_else(|| SchemaError::invalid("radius", "expected a 32-bit integer"))?;

    let active = require("active", &raw.active)?
        .as_bool()
        .ok_or_else(|| SchemaError::invalid("active", "expected a boolean"))?;

    Ok(Location {
        id,
        label,
        latitude: number("latitude", &raw.latitude)?,
        longitude: number("longitude", &raw.longitude)?,
        radius,
        active,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn raw_measurement(json: &str) -> RawMeasurement {
        serde_json::from_str(json).unwrap()
    }

    fn raw_location(json: &str) -> RawLocation {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_valid_measurement() {
        let raw = raw_measurement(
            r#"{"timestamp": "2024-05-01T12:05:00+00:00", "min": 41.5, "max": 67}"#,
        );
        let point = validate_measurement(&raw, "d1").unwrap();

        assert_eq!(point.device_id, "d1");
        assert_eq!(
            point.timestamp,
            Utc.with_ymd_and_hms(2024, 5, 1, 12, 5, 0).unwrap()
        );
        assert_eq!(point.min_dba, 41.5);
        assert_eq!(point.max_dba, 67.0);
    }

    #[test]
    fn test_missing_min_names_the_field() {
        let raw = raw_measurement(r#"{"timestamp": "2024-05-01T12:05:00Z", "max": 67}"#);
        let err = validate_measurement(&raw, "d1").unwrap_err();
        assert_eq!(err, SchemaError::MissingField("min"));
        assert_eq!(err.field(), "min");
    }

    #[test]
    fn test_negative_max_is_out_of_range() {
        let raw =
            raw_measurement(r#"{"timestamp": "2024-05-01T12:05:00Z", "min": 40, "max": -1}"#);
        let err = validate_measurement(&raw, "d1").unwrap_err();
        assert_eq!(err.field(), "max");
        assert!(matches!(err, SchemaError::InvalidValue { .. }));
    }

    #[test]
    fn test_non_numeric_decibel_is_rejected() {
        let raw = raw_measurement(
            r#"{"timestamp": "2024-05-01T12:05:00Z", "min": "loud", "max": 67}"#,
        );
        let err = validate_measurement(&raw, "d1").unwrap_err();
        assert_eq!(err.field(), "min");
    }

    #[test]
    fn test_null_field_counts_as_missing() {
        let raw =
            raw_measurement(r#"{"timestamp": "2024-05-01T12:05:00Z", "min": null, "max": 67}"#);
        assert_eq!(
            validate_measurement(&raw, "d1").unwrap_err(),
            SchemaError::MissingField("min")
        );
    }

    #[test]
    fn test_malformed_timestamp_is_rejected() {
        let raw = raw_measurement(r#"{"timestamp": "yesterday", "min": 40, "max": 67}"#);
        assert_eq!(validate_measurement(&raw, "d1").unwrap_err().field(), "timestamp");
    }

    #[test]
    fn test_valid_location_with_numeric_id() {
        let raw = raw_location(
            r#"{"id": 42, "label": "Washington Sq", "latitude": 40.73, "longitude": -73.99, "radius": 30, "active": true}"#,
        );
        let location = validate_location(&raw).unwrap();
        assert_eq!(location.id, "42");
        assert!(location.active);
        assert_eq!(location.radius, 30);
    }

    #[test]
    fn test_radius_outside_i32_is_rejected() {
        let raw = raw_location(
            r#"{"id": "42", "label": "Washington Sq", "latitude": 40.73, "longitude": -73.99, "radius": 5000000000, "active": true}"#,
        );
        let err = validate_location(&raw).unwrap_err();
        assert_eq!(err.field(), "radius");
        assert!(matches!(err, SchemaError::InvalidValue { .. }));
    }

    #[test]
    fn test_location_missing_coordinates() {
        let raw = raw_location(
            r#"{"id": "42", "label": "Washington Sq", "longitude": -73.99, "radius": 30, "active": true}"#,
        );
        assert_eq!(
            validate_location(&raw).unwrap_err(),
            SchemaError::MissingField("latitude")
        );
    }
}
