//! Coordinate model for the requested location

use serde::{Deserialize, Serialize};

/// A point on the globe, in decimal degrees
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Coordinate {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

impl Coordinate {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Format as `"lat, lon"` rounded to two decimals.
    ///
    /// Used as the display name whenever reverse geocoding cannot produce one.
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.2}, {:.2}", self.latitude, self.longitude)
    }
}
