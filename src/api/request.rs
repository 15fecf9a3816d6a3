//! Validation of `/weather` request bodies

use chrono::NaiveDate;
use serde_json::{Map, Value};

use crate::TrailcastError;
use crate::models::Coordinate;

/// A request that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherQuery {
    pub coordinate: Coordinate,
    pub date: NaiveDate,
    /// The date exactly as the client sent it, echoed back in the report
    pub date_string: String,
}

impl WeatherQuery {
    /// Parse and validate a raw request body.
    ///
    /// Any body that is not a JSON object, and any absent or falsy field,
    /// is a [`TrailcastError::MissingInput`]. A coordinate of exactly `0`
    /// counts as falsy.
    pub fn from_body(body: &[u8]) -> Result<Self, TrailcastError> {
        let value: Value =
            serde_json::from_slice(body).map_err(|_| TrailcastError::MissingInput)?;
        let fields = value.as_object().ok_or(TrailcastError::MissingInput)?;
        Self::from_fields(fields)
    }

    pub fn from_fields(fields: &Map<String, Value>) -> Result<Self, TrailcastError> {
        let lat = fields.get("lat").filter(|v| is_truthy(v));
        let lon = fields.get("lon").filter(|v| is_truthy(v));
        let date = fields.get("date").filter(|v| is_truthy(v));

        let (Some(lat), Some(lon), Some(date)) = (lat, lon, date) else {
            return Err(TrailcastError::MissingInput);
        };

        let latitude = coordinate_value(lat).ok_or(TrailcastError::MissingInput)?;
        let longitude = coordinate_value(lon).ok_or(TrailcastError::MissingInput)?;

        let Some(date_string) = date.as_str() else {
            return Err(TrailcastError::invalid_date(date.to_string()));
        };
        let date = NaiveDate::parse_from_str(date_string, "%Y-%m-%d")
            .map_err(|_| TrailcastError::invalid_date(date_string))?;

        Ok(Self {
            coordinate: Coordinate::new(latitude, longitude),
            date,
            date_string: date_string.to_string(),
        })
    }
}

/// JSON truthiness: `null`, `false`, zero, and empty strings, arrays and
/// objects are all falsy.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

fn coordinate_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}
