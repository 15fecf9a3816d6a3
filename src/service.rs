//! Request flow: fetch, classify, summarize.

use tracing::{info, instrument};

use crate::TrailcastError;
use crate::api::WeatherQuery;
use crate::conditions::classify;
use crate::config::TrailcastConfig;
use crate::location_resolver::LocationResolver;
use crate::models::WeatherReport;
use crate::recommendation::summarize;
use crate::weather::WeatherClient;

/// Everything a request needs to produce a [`WeatherReport`]
#[derive(Debug, Clone)]
pub struct WeatherService {
    weather: WeatherClient,
    resolver: LocationResolver,
}

impl WeatherService {
    #[must_use]
    pub fn new(weather: WeatherClient, resolver: LocationResolver) -> Self {
        Self { weather, resolver }
    }

    pub fn from_config(config: &TrailcastConfig) -> anyhow::Result<Self> {
        Ok(Self::new(
            WeatherClient::from_config(&config.weather)?,
            LocationResolver::from_config(&config.geocoding)?,
        ))
    }

    /// Build the report for a validated query.
    ///
    /// Weather fetch and reverse geocoding run concurrently. A weather failure
    /// fails the whole report; a geocoding failure only changes the name.
    #[instrument(skip_all, fields(lat = query.coordinate.latitude, lon = query.coordinate.longitude, date = %query.date_string))]
    pub async fn report(&self, query: &WeatherQuery) -> Result<WeatherReport, TrailcastError> {
        let (metrics, location_name) = tokio::join!(
            self.weather
                .fetch_daily_metrics(query.coordinate, query.date, &query.date_string),
            self.resolver.resolve_name(query.coordinate),
        );
        let metrics = metrics?;

        let conditions = classify(&metrics);
        let summary = summarize(&conditions);

        info!(
            conditions = conditions.len(),
            summary = summary.as_str(),
            "Built weather report for {}",
            location_name
        );

        Ok(WeatherReport {
            location_name,
            date: query.date_string.clone(),
            summary: summary.to_string(),
            conditions,
        })
    }
}
