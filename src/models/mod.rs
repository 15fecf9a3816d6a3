//! Data models for the Trailcast service
//!
//! This module contains the core domain models organized by concern:
//! - Location: the requested coordinate and its display fallback
//! - Weather: hourly series and the daily metrics reduced from them
//! - Report: the response returned to clients

pub mod location;
pub mod report;
pub mod weather;

// Re-export all public types for convenient access
pub use location::Coordinate;
pub use report::WeatherReport;
pub use weather::{DailyMetrics, HourlySeries};
