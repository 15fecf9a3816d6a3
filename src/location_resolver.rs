//! Location Resolution Module
//!
//! Turns a coordinate into a display name through Nominatim reverse
//! geocoding. Resolution cannot fail from the caller's point of view: any
//! problem with the provider yields the coordinates formatted to two decimals.

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::config::GeocodingConfig;
use crate::models::Coordinate;

#[derive(Debug, Deserialize)]
struct NominatimResponse {
    display_name: Option<String>,
}

/// Reverse geocoding client with a coordinate fallback
#[derive(Debug, Clone)]
pub struct LocationResolver {
    client: Client,
    base_url: String,
}

impl LocationResolver {
    /// Create a new resolver. Nominatim requires an identifying `user_agent`.
    pub fn new(
        base_url: impl Into<String>,
        user_agent: &str,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .with_context(|| "Failed to create geocoding HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn from_config(config: &GeocodingConfig) -> Result<Self> {
        Self::new(&config.base_url, &config.user_agent, config.timeout())
    }

    /// Resolve `coordinate` to a display name.
    ///
    /// Never fails: a provider error, timeout, bad status or missing
    /// `display_name` all produce [`Coordinate::format_coordinates`].
    #[instrument(skip(self), fields(lat = coordinate.latitude, lon = coordinate.longitude))]
    pub async fn resolve_name(&self, coordinate: Coordinate) -> String {
        match self.try_resolve(coordinate).await {
            Ok(Some(name)) => {
                debug!("Resolved location name: {}", name);
                name
            }
            Ok(None) => {
                debug!("No display name in geocoding response, using coordinates as name");
                coordinate.format_coordinates()
            }
            Err(e) => {
                debug!("Reverse geocoding failed: {:#}, using coordinates as name", e);
                coordinate.format_coordinates()
            }
        }
    }

    /// Single reverse geocoding attempt, surfacing every failure
    pub async fn try_resolve(&self, coordinate: Coordinate) -> Result<Option<String>> {
        let url = format!(
            "{}?lat={}&lon={}&format=json",
            self.base_url, coordinate.latitude, coordinate.longitude
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| "Geocoding request failed")?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!("Geocoding provider returned HTTP {status}"));
        }

        let body: NominatimResponse = response
            .json()
            .await
            .with_context(|| "Failed to parse geocoding response")?;

        Ok(body.display_name.filter(|name| !name.is_empty()))
    }
}
