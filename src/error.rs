//! Error types and handling for the `Trailcast` service

use axum::http::StatusCode;
use thiserror::Error;

/// Main error type for the `Trailcast` service
#[derive(Error, Debug)]
pub enum TrailcastError {
    /// A required request field was absent or falsy
    #[error("Missing lat, lon, or date")]
    MissingInput,

    /// The requested date is not a `YYYY-MM-DD` string
    #[error("Invalid date format, use YYYY-MM-DD")]
    InvalidDate { value: String },

    /// The weather provider could not deliver usable data
    #[error("Weather data unavailable: {detail}")]
    WeatherUnavailable { detail: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl TrailcastError {
    /// Create a new invalid date error
    pub fn invalid_date<S: Into<String>>(value: S) -> Self {
        Self::InvalidDate {
            value: value.into(),
        }
    }

    /// Create a new weather provider error
    pub fn weather_unavailable<S: Into<String>>(detail: S) -> Self {
        Self::WeatherUnavailable {
            detail: detail.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// HTTP status this error maps to when it reaches a client
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            TrailcastError::MissingInput | TrailcastError::InvalidDate { .. } => {
                StatusCode::BAD_REQUEST
            }
            TrailcastError::WeatherUnavailable { .. } => StatusCode::BAD_GATEWAY,
            TrailcastError::Config { .. } | TrailcastError::Io { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Whether the caller sent something wrong, as opposed to a failure on our side
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let date_err = TrailcastError::invalid_date("13/25/2024");
        assert!(matches!(date_err, TrailcastError::InvalidDate { .. }));

        let weather_err = TrailcastError::weather_unavailable("connection refused");
        assert!(matches!(weather_err, TrailcastError::WeatherUnavailable { .. }));

        let config_err = TrailcastError::config("bad port");
        assert!(matches!(config_err, TrailcastError::Config { .. }));
    }

    #[test]
    fn test_client_facing_messages() {
        assert_eq!(
            TrailcastError::MissingInput.to_string(),
            "Missing lat, lon, or date"
        );
        assert_eq!(
            TrailcastError::invalid_date("2024/01/01").to_string(),
            "Invalid date format, use YYYY-MM-DD"
        );
        assert_eq!(
            TrailcastError::weather_unavailable("provider returned HTTP 500").to_string(),
            "Weather data unavailable: provider returned HTTP 500"
        );
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            TrailcastError::MissingInput.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            TrailcastError::invalid_date("x").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            TrailcastError::weather_unavailable("x").status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert!(TrailcastError::MissingInput.is_client_error());
        assert!(!TrailcastError::weather_unavailable("x").is_client_error());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::AddrInUse, "port taken");
        let err: TrailcastError = io_err.into();
        assert!(matches!(err, TrailcastError::Io { .. }));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
