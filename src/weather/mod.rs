//! Weather client for `OpenMeteo`
//!
//! Picks the archive or forecast endpoint depending on whether the requested
//! day is already over, fetches that day's hourly series and reduces them to
//! [`DailyMetrics`]. Every provider failure becomes
//! [`TrailcastError::WeatherUnavailable`].

use std::time::{Duration, Instant};

use anyhow::Context;
use chrono::{NaiveDate, Utc};
use reqwest::Client;
use tracing::{debug, info, instrument, warn};

use crate::TrailcastError;
use crate::config::WeatherConfig;
use crate::models::{Coordinate, DailyMetrics, HourlySeries};

pub mod open_meteo;

pub use open_meteo::HOURLY_FIELDS;

/// Which `OpenMeteo` API serves a given date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherEndpoint {
    /// Historical reanalysis, for dates strictly before today
    Archive,
    /// Forecast model, for today and later
    Forecast,
}

impl WeatherEndpoint {
    /// Route `date` relative to `today` (UTC). Today itself is not past.
    #[must_use]
    pub fn for_date(date: NaiveDate, today: NaiveDate) -> Self {
        if date < today {
            WeatherEndpoint::Archive
        } else {
            WeatherEndpoint::Forecast
        }
    }
}

/// HTTP client for the `OpenMeteo` forecast and archive APIs
#[derive(Debug, Clone)]
pub struct WeatherClient {
    client: Client,
    forecast_url: String,
    archive_url: String,
}

impl WeatherClient {
    /// Create a new weather client. `timeout` bounds each request end to end.
    pub fn new(
        forecast_url: impl Into<String>,
        archive_url: impl Into<String>,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .with_context(|| "Failed to create weather HTTP client")?;

        Ok(Self {
            client,
            forecast_url: forecast_url.into(),
            archive_url: archive_url.into(),
        })
    }

    pub fn from_config(config: &WeatherConfig) -> anyhow::Result<Self> {
        Self::new(&config.forecast_url, &config.archive_url, config.timeout())
    }

    #[must_use]
    pub fn endpoint_url(&self, endpoint: WeatherEndpoint) -> &str {
        match endpoint {
            WeatherEndpoint::Archive => &self.archive_url,
            WeatherEndpoint::Forecast => &self.forecast_url,
        }
    }

    /// Full request URL for one day of hourly data at `coordinate`.
    ///
    /// `day` is the date exactly as the client sent it.
    #[must_use]
    pub fn request_url(
        &self,
        endpoint: WeatherEndpoint,
        coordinate: Coordinate,
        day: &str,
    ) -> String {
        let day = urlencoding::encode(day);
        format!(
            "{}?latitude={}&longitude={}&start_date={}&end_date={}&hourly={}&timezone=auto",
            self.endpoint_url(endpoint),
            coordinate.latitude,
            coordinate.longitude,
            day,
            day,
            HOURLY_FIELDS.join(",")
        )
    }

    /// Fetch the day's observations and reduce them to daily metrics
    pub async fn fetch_daily_metrics(
        &self,
        coordinate: Coordinate,
        date: NaiveDate,
        day: &str,
    ) -> Result<DailyMetrics, TrailcastError> {
        let series = self.fetch_hourly_series(coordinate, date, day).await?;
        let metrics = DailyMetrics::from_series(&series);
        debug!(?metrics, "Reduced hourly series to daily metrics");
        Ok(metrics)
    }

    /// Fetch the day's hourly series from whichever endpoint covers `date`.
    ///
    /// `date` only picks the endpoint; the provider receives `day` unchanged.
    #[instrument(skip_all, fields(lat = coordinate.latitude, lon = coordinate.longitude, date = day))]
    pub async fn fetch_hourly_series(
        &self,
        coordinate: Coordinate,
        date: NaiveDate,
        day: &str,
    ) -> Result<HourlySeries, TrailcastError> {
        let endpoint = WeatherEndpoint::for_date(date, Utc::now().date_naive());
        let url = self.request_url(endpoint, coordinate, day);
        debug!(?endpoint, "OpenMeteo request URL: {}", url);

        let start_time = Instant::now();

        let response = self.client.get(&url).send().await.map_err(|e| {
            warn!("Weather request failed: {}", e);
            TrailcastError::weather_unavailable(e.to_string())
        })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| {
            warn!("Failed to read weather response body: {}", e);
            TrailcastError::weather_unavailable(e.to_string())
        })?;

        if !status.is_success() {
            let reason = serde_json::from_slice::<open_meteo::ErrorResponse>(&body)
                .ok()
                .and_then(|error| error.reason);
            let detail = match reason {
                Some(reason) => format!("provider returned HTTP {status}: {reason}"),
                None => format!("provider returned HTTP {status}"),
            };
            warn!("OpenMeteo {:?} error: {}", endpoint, detail);
            return Err(TrailcastError::weather_unavailable(detail));
        }

        let forecast: open_meteo::ForecastResponse =
            serde_json::from_slice(&body).map_err(|e| {
                warn!("Failed to parse OpenMeteo response: {}", e);
                TrailcastError::weather_unavailable(format!("invalid provider response: {e}"))
            })?;

        let hourly = forecast.hourly.ok_or_else(|| {
            TrailcastError::weather_unavailable("provider response did not include hourly data")
        })?;

        let total_duration = start_time.elapsed();
        info!(
            grid_lat = forecast.latitude,
            grid_lon = forecast.longitude,
            timezone = forecast.timezone.as_deref(),
            "Retrieved {} hourly points from {:?} endpoint in {:.3}s",
            hourly.time.len(),
            endpoint,
            total_duration.as_secs_f64()
        );

        if total_duration.as_secs() > 5 {
            warn!(
                "Slow OpenMeteo response: {:.3}s",
                total_duration.as_secs_f64()
            );
        }

        Ok(HourlySeries::from(hourly))
    }
}
