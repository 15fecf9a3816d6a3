//! Response returned to clients of the `/weather` endpoint

use serde::Serialize;

use crate::conditions::ConditionMatch;

/// Weather suitability verdict for one location and date
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherReport {
    /// Reverse-geocoded place name, or formatted coordinates
    pub location_name: String,
    /// The date exactly as the client sent it
    pub date: String,
    /// One-sentence recommendation
    pub summary: String,
    /// Adverse conditions in rule order
    pub conditions: Vec<ConditionMatch>,
}
