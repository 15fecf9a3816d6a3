use std::sync::Arc;

use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use serde::Serialize;
use serde_json::json;

use crate::{TrailcastError, VERSION, models::WeatherReport, service::WeatherService};

mod request;

pub use request::WeatherQuery;

pub type AppState = Arc<WeatherService>;

#[derive(Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub version: &'static str,
}

pub fn router(service: AppState) -> Router {
    Router::new()
        .route("/weather", post(get_weather))
        .route("/health", get(health))
        .with_state(service)
}

impl IntoResponse for TrailcastError {
    fn into_response(self) -> Response {
        match &self {
            TrailcastError::InvalidDate { value } => {
                tracing::debug!(date = %value, "Rejected request: {}", self);
            }
            _ if self.is_client_error() => tracing::debug!("Rejected request: {}", self),
            _ => tracing::warn!("Request failed: {}", self),
        }
        let body = Json(json!({ "error": self.to_string() }));
        (self.status_code(), body).into_response()
    }
}

// The body is read raw so requests without a JSON content type are still accepted.
async fn get_weather(
    State(service): State<AppState>,
    body: Bytes,
) -> Result<Json<WeatherReport>, TrailcastError> {
    let query = WeatherQuery::from_body(&body)?;
    let report = service.report(&query).await?;
    Ok(Json(report))
}

async fn health() -> (StatusCode, Json<HealthStatus>) {
    (
        StatusCode::OK,
        Json(HealthStatus {
            status: "ok",
            version: VERSION,
        }),
    )
}
