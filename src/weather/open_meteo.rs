//! `OpenMeteo` API response structures and conversion utilities

use serde::Deserialize;

use crate::models::HourlySeries;

/// Hourly variables requested from `OpenMeteo`, in request order
pub const HOURLY_FIELDS: [&str; 4] = [
    "temperature_2m",
    "windspeed_10m",
    "precipitation",
    "relativehumidity_2m",
];

/// Forecast and archive response from `OpenMeteo`.
///
/// `latitude`/`longitude` are the model grid cell actually used, which may
/// differ slightly from the requested coordinate.
#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub timezone: Option<String>,
    pub hourly: Option<HourlyData>,
}

/// Hourly weather data from `OpenMeteo`.
///
/// Values are `null` for hours the model does not cover.
#[derive(Debug, Default, Deserialize)]
pub struct HourlyData {
    #[serde(default)]
    pub time: Vec<String>,
    #[serde(rename = "temperature_2m")]
    pub temperature: Option<Vec<Option<f64>>>,
    #[serde(rename = "windspeed_10m")]
    pub wind_speed: Option<Vec<Option<f64>>>,
    pub precipitation: Option<Vec<Option<f64>>>,
    #[serde(rename = "relativehumidity_2m")]
    pub relative_humidity: Option<Vec<Option<f64>>>,
}

/// Error body `OpenMeteo` sends with 4xx responses
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub reason: Option<String>,
}

fn present_values(series: Option<Vec<Option<f64>>>) -> Vec<f64> {
    series.unwrap_or_default().into_iter().flatten().collect()
}

impl From<HourlyData> for HourlySeries {
    fn from(hourly: HourlyData) -> Self {
        Self {
            temperature: present_values(hourly.temperature),
            wind_speed: present_values(hourly.wind_speed),
            precipitation: present_values(hourly.precipitation),
            relative_humidity: present_values(hourly.relative_humidity),
        }
    }
}
