//! Hourly weather series and the daily metrics derived from them

/// Hourly observations for a single day, one value per hour.
///
/// A series the provider did not return is simply empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HourlySeries {
    /// Air temperature at 2 m in °C
    pub temperature: Vec<f64>,
    /// Wind speed at 10 m in km/h
    pub wind_speed: Vec<f64>,
    /// Precipitation in mm
    pub precipitation: Vec<f64>,
    /// Relative humidity at 2 m in %
    pub relative_humidity: Vec<f64>,
}

/// Four scalars summarizing one day of hourly observations
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DailyMetrics {
    /// Mean temperature in °C
    pub mean_temperature: f64,
    /// Highest hourly wind speed in km/h
    pub max_wind_speed: f64,
    /// Total precipitation in mm
    pub total_precipitation: f64,
    /// Mean relative humidity in %
    pub mean_humidity: f64,
}

impl DailyMetrics {
    /// Reduce hourly series to daily metrics. Empty series yield 0.
    #[must_use]
    pub fn from_series(series: &HourlySeries) -> Self {
        Self {
            mean_temperature: mean(&series.temperature),
            max_wind_speed: max(&series.wind_speed),
            total_precipitation: series.precipitation.iter().sum(),
            mean_humidity: mean(&series.relative_humidity),
        }
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn max(values: &[f64]) -> f64 {
    values.iter().copied().reduce(f64::max).unwrap_or(0.0)
}
