//! `Trailcast` - weather suitability verdicts for outdoor planning
//!
//! This library fetches a day of weather for a coordinate, flags adverse
//! conditions against fixed thresholds and turns them into a one-line
//! recommendation, served over a small HTTP API.

pub mod api;
pub mod conditions;
pub mod config;
pub mod error;
pub mod location_resolver;
pub mod logging;
pub mod models;
pub mod recommendation;
pub mod service;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use api::WeatherQuery;
pub use conditions::{ConditionKind, ConditionMatch, classify};
pub use config::TrailcastConfig;
pub use error::TrailcastError;
pub use location_resolver::LocationResolver;
pub use models::{Coordinate, DailyMetrics, HourlySeries, WeatherReport};
pub use recommendation::{Recommendation, summarize};
pub use service::WeatherService;
pub use weather::{WeatherClient, WeatherEndpoint};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, TrailcastError>;
