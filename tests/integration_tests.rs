//! Integration tests for the `/weather` endpoint using wiremock providers.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;
use trailcast::config::ServerConfig;
use trailcast::{LocationResolver, WeatherClient, WeatherService, web};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const FORECAST_PATH: &str = "/v1/forecast";
const ARCHIVE_PATH: &str = "/v1/archive";
const REVERSE_PATH: &str = "/reverse";

/// Hourly payload where every hour carries the same values
fn hourly_body(temperature: f64, wind: f64, precipitation: f64, humidity: f64) -> Value {
    let hours = 24;
    json!({
        "latitude": 46.82,
        "longitude": 8.23,
        "timezone": "Europe/Zurich",
        "hourly": {
            "time": (0..hours).map(|h| format!("2024-06-01T{h:02}:00")).collect::<Vec<_>>(),
            "temperature_2m": vec![temperature; hours],
            "windspeed_10m": vec![wind; hours],
            "precipitation": vec![precipitation / hours as f64; hours],
            "relativehumidity_2m": vec![humidity; hours],
        }
    })
}

fn app_for(server: &MockServer) -> axum::Router {
    let weather = WeatherClient::new(
        format!("{}{FORECAST_PATH}", server.uri()),
        format!("{}{ARCHIVE_PATH}", server.uri()),
        Duration::from_secs(2),
    )
    .unwrap();
    let resolver = LocationResolver::new(
        format!("{}{REVERSE_PATH}", server.uri()),
        "weather-app",
        Duration::from_secs(1),
    )
    .unwrap();

    web::app(
        Arc::new(WeatherService::new(weather, resolver)),
        &ServerConfig::default(),
    )
}

async fn mount_geocoder(server: &MockServer, display_name: &str) {
    Mock::given(method("GET"))
        .and(path(REVERSE_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "display_name": display_name })),
        )
        .mount(server)
        .await;
}

async fn mount_weather(server: &MockServer, endpoint_path: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(endpoint_path))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

async fn post_weather(app: axum::Router, body: impl Into<Body>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/weather")
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap();
    (status, value)
}

#[tokio::test]
async fn test_hot_day_report() {
    let server = MockServer::start().await;
    mount_geocoder(&server, "Interlaken, Bern, Switzerland").await;
    mount_weather(&server, FORECAST_PATH, hourly_body(40.0, 10.0, 0.0, 40.0)).await;

    let (status, body) = post_weather(
        app_for(&server),
        json!({"lat": 46.8182, "lon": 8.2275, "date": "2099-01-01"}).to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["location_name"], "Interlaken, Bern, Switzerland");
    assert_eq!(body["date"], "2099-01-01");
    assert_eq!(
        body["summary"],
        "This day looks uncomfortable for hiking. Best to plan indoors."
    );

    let conditions = body["conditions"].as_array().unwrap();
    assert_eq!(conditions.len(), 1);
    assert_eq!(
        conditions[0],
        json!({
            "label": "Very Hot",
            "icon": "☀️",
            "risk": "⚠️ Very Hot",
            "advice": "Pack extra water and sunscreen.",
            "color": "red"
        })
    );
}

#[tokio::test]
async fn test_pleasant_day_report() {
    let server = MockServer::start().await;
    mount_geocoder(&server, "Lucerne, Switzerland").await;
    mount_weather(&server, FORECAST_PATH, hourly_body(21.0, 12.0, 1.0, 55.0)).await;

    let (status, body) = post_weather(
        app_for(&server),
        json!({"lat": 47.05, "lon": 8.31, "date": "2099-07-01"}).to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["summary"], "Great day for outdoor activities!");
    assert_eq!(body["conditions"], json!([]));
}

#[tokio::test]
async fn test_future_date_uses_forecast_endpoint() {
    let server = MockServer::start().await;
    mount_geocoder(&server, "Somewhere").await;
    Mock::given(method("GET"))
        .and(path(FORECAST_PATH))
        .and(query_param("latitude", "46.8182"))
        .and(query_param("longitude", "8.2275"))
        .and(query_param("start_date", "2099-01-01"))
        .and(query_param("end_date", "2099-01-01"))
        .and(query_param(
            "hourly",
            "temperature_2m,windspeed_10m,precipitation,relativehumidity_2m",
        ))
        .and(query_param("timezone", "auto"))
        .respond_with(ResponseTemplate::new(200).set_body_json(hourly_body(20.0, 5.0, 0.0, 50.0)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(ARCHIVE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(hourly_body(20.0, 5.0, 0.0, 50.0)))
        .expect(0)
        .mount(&server)
        .await;

    let (status, _) = post_weather(
        app_for(&server),
        json!({"lat": 46.8182, "lon": 8.2275, "date": "2099-01-01"}).to_string(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_unpadded_date_is_forwarded_as_sent() {
    let server = MockServer::start().await;
    mount_geocoder(&server, "Somewhere").await;
    Mock::given(method("GET"))
        .and(path(FORECAST_PATH))
        .and(query_param("start_date", "2099-1-5"))
        .and(query_param("end_date", "2099-1-5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(hourly_body(20.0, 5.0, 0.0, 50.0)))
        .expect(1)
        .mount(&server)
        .await;

    let (status, body) = post_weather(
        app_for(&server),
        json!({"lat": 46.8182, "lon": 8.2275, "date": "2099-1-5"}).to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["date"], "2099-1-5");
}

#[tokio::test]
async fn test_past_date_uses_archive_endpoint() {
    let server = MockServer::start().await;
    mount_geocoder(&server, "Somewhere").await;
    Mock::given(method("GET"))
        .and(path(ARCHIVE_PATH))
        .and(query_param("start_date", "2000-01-01"))
        .and(query_param("end_date", "2000-01-01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(hourly_body(-2.0, 5.0, 0.0, 50.0)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(FORECAST_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(hourly_body(20.0, 5.0, 0.0, 50.0)))
        .expect(0)
        .mount(&server)
        .await;

    let (status, body) = post_weather(
        app_for(&server),
        json!({"lat": 46.8182, "lon": 8.2275, "date": "2000-01-01"}).to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["summary"], "Dress warmly for outdoor activities.");
    assert_eq!(body["conditions"][0]["label"], "Very Cold");
}

#[tokio::test]
async fn test_absent_series_yield_zero_metrics() {
    let server = MockServer::start().await;
    mount_geocoder(&server, "Somewhere").await;
    mount_weather(&server, FORECAST_PATH, json!({"hourly": {"time": []}})).await;

    let (status, body) = post_weather(
        app_for(&server),
        json!({"lat": 46.8, "lon": 8.2, "date": "2099-01-01"}).to_string(),
    )
    .await;

    // A zero mean temperature is below the cold threshold
    assert_eq!(status, StatusCode::OK);
    let labels: Vec<&str> = body["conditions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["label"].as_str().unwrap())
        .collect();
    assert_eq!(labels, vec!["Very Cold"]);
    assert_eq!(body["summary"], "Dress warmly for outdoor activities.");
}

#[tokio::test]
async fn test_stormy_day_lists_conditions_in_rule_order() {
    let server = MockServer::start().await;
    mount_geocoder(&server, "Coast").await;
    mount_weather(&server, FORECAST_PATH, hourly_body(36.0, 60.0, 30.0, 90.0)).await;

    let (status, body) = post_weather(
        app_for(&server),
        json!({"lat": 10.0, "lon": 20.0, "date": "2099-01-01"}).to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let labels: Vec<&str> = body["conditions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["label"].as_str().unwrap())
        .collect();
    assert_eq!(
        labels,
        vec!["Very Hot", "Very Windy", "Very Wet", "Very Uncomfortable"]
    );
}

#[tokio::test]
async fn test_missing_lat_is_rejected() {
    let server = MockServer::start().await;

    let (status, body) = post_weather(
        app_for(&server),
        json!({"lon": 8.2, "date": "2099-01-01"}).to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Missing lat, lon, or date"}));
}

#[tokio::test]
async fn test_zero_lat_is_treated_as_missing() {
    let server = MockServer::start().await;

    let (status, body) = post_weather(
        app_for(&server),
        json!({"lat": 0, "lon": 8.2, "date": "2099-01-01"}).to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Missing lat, lon, or date"}));
}

#[tokio::test]
async fn test_invalid_date_is_rejected() {
    let server = MockServer::start().await;

    let (status, body) = post_weather(
        app_for(&server),
        json!({"lat": 46.8, "lon": 8.2, "date": "13/25/2024"}).to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Invalid date format, use YYYY-MM-DD"}));
}

#[tokio::test]
async fn test_body_without_content_type_is_accepted() {
    let server = MockServer::start().await;
    mount_geocoder(&server, "Somewhere").await;
    mount_weather(&server, FORECAST_PATH, hourly_body(20.0, 5.0, 0.0, 50.0)).await;

    let request = Request::builder()
        .method("POST")
        .uri("/weather")
        .body(Body::from(
            json!({"lat": 46.8, "lon": 8.2, "date": "2099-01-01"}).to_string(),
        ))
        .unwrap();
    let response = app_for(&server).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_geocoder_failure_falls_back_to_coordinates() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(REVERSE_PATH))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    mount_weather(&server, FORECAST_PATH, hourly_body(20.0, 5.0, 0.0, 50.0)).await;

    let (status, body) = post_weather(
        app_for(&server),
        json!({"lat": 46.8182, "lon": 8.2275, "date": "2099-01-01"}).to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["location_name"], "46.82, 8.23");
}

#[tokio::test]
async fn test_weather_provider_failure_is_bad_gateway() {
    let server = MockServer::start().await;
    mount_geocoder(&server, "Somewhere").await;
    Mock::given(method("GET"))
        .and(path(FORECAST_PATH))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let (status, body) = post_weather(
        app_for(&server),
        json!({"lat": 46.8, "lon": 8.2, "date": "2099-01-01"}).to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    let error = body["error"].as_str().unwrap();
    assert!(error.starts_with("Weather data unavailable: "), "{error}");
    assert!(error.contains("500"), "{error}");
}

#[tokio::test]
async fn test_weather_provider_reason_is_reported() {
    let server = MockServer::start().await;
    mount_geocoder(&server, "Somewhere").await;
    Mock::given(method("GET"))
        .and(path(FORECAST_PATH))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": true,
            "reason": "Parameter 'start_date' is out of allowed range"
        })))
        .mount(&server)
        .await;

    let (status, body) = post_weather(
        app_for(&server),
        json!({"lat": 46.8, "lon": 8.2, "date": "2099-01-01"}).to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    let error = body["error"].as_str().unwrap();
    assert!(error.contains("400"), "{error}");
    assert!(error.contains("out of allowed range"), "{error}");
}

#[tokio::test]
async fn test_malformed_weather_body_is_bad_gateway() {
    let server = MockServer::start().await;
    mount_geocoder(&server, "Somewhere").await;
    Mock::given(method("GET"))
        .and(path(FORECAST_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let (status, body) = post_weather(
        app_for(&server),
        json!({"lat": 46.8, "lon": 8.2, "date": "2099-01-01"}).to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(
        body["error"]
            .as_str()
            .unwrap()
            .starts_with("Weather data unavailable: invalid provider response")
    );
}

#[tokio::test]
async fn test_missing_hourly_object_is_bad_gateway() {
    let server = MockServer::start().await;
    mount_geocoder(&server, "Somewhere").await;
    mount_weather(&server, FORECAST_PATH, json!({"latitude": 46.8})).await;

    let (status, body) = post_weather(
        app_for(&server),
        json!({"lat": 46.8, "lon": 8.2, "date": "2099-01-01"}).to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(
        body["error"],
        "Weather data unavailable: provider response did not include hourly data"
    );
}

#[tokio::test]
async fn test_weather_timeout_is_bad_gateway() {
    let server = MockServer::start().await;
    mount_geocoder(&server, "Somewhere").await;
    Mock::given(method("GET"))
        .and(path(FORECAST_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(hourly_body(20.0, 5.0, 0.0, 50.0))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let (status, body) = post_weather(
        app_for(&server),
        json!({"lat": 46.8, "lon": 8.2, "date": "2099-01-01"}).to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(
        body["error"]
            .as_str()
            .unwrap()
            .starts_with("Weather data unavailable: ")
    );
}

#[tokio::test]
async fn test_identical_requests_yield_identical_reports() {
    let server = MockServer::start().await;
    mount_geocoder(&server, "Chamonix, France").await;
    mount_weather(&server, FORECAST_PATH, hourly_body(3.0, 45.0, 12.0, 85.0)).await;

    let request = json!({"lat": 45.92, "lon": 6.87, "date": "2099-02-01"}).to_string();
    let (_, first) = post_weather(app_for(&server), request.clone()).await;
    let (_, second) = post_weather(app_for(&server), request).await;

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_health_endpoint() {
    let server = MockServer::start().await;

    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = app_for(&server).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], trailcast::VERSION);
}
