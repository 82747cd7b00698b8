//! End-to-end tests: real HTTP clients against mock places and weather APIs

use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use chrono::Utc;
use favorite_weather::{AppConfig, FavoriteAggregator, FavoritesError, web};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CHICAGO_LAT: f64 = 41.8781;
const CHICAGO_LNG: f64 = -87.6298;

fn config_for(places: &MockServer, weather: &MockServer) -> AppConfig {
    let mut config = AppConfig::default();
    config.places.api_key = Some("places-key".to_string());
    config.places.base_url = places.uri();
    config.places.timeout_seconds = 2;
    config.weather.api_key = Some("weather-key".to_string());
    config.weather.base_url = weather.uri();
    config.weather.timeout_seconds = 2;
    config
}

fn forecast(lat: f64, lng: f64) -> Value {
    let now = Utc::now().timestamp();
    let daily: Vec<Value> = (0..8)
        .map(|d| json!({ "time": now + d * 86_400, "temperatureMin": 30.0, "temperatureMax": 45.0 }))
        .collect();
    json!({
        "latitude": lat,
        "longitude": lng,
        "timezone": "America/Chicago",
        "currently": { "time": now, "summary": "Clear", "icon": "clear-day", "temperature": 41.2 },
        "daily": { "data": daily }
    })
}

async fn mount_chicago(places: &MockServer, weather: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/place/details/json"))
        .and(query_param("placeid", "chicago1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "result": {
                "place_id": "chicago1",
                "formatted_address": "Chicago, IL, USA",
                "geometry": { "location": { "lat": CHICAGO_LAT, "lng": CHICAGO_LNG } }
            }
        })))
        .mount(places)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/forecast/weather-key/{CHICAGO_LAT},{CHICAGO_LNG}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast(CHICAGO_LAT, CHICAGO_LNG)))
        .mount(weather)
        .await;
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_detail_for_saved_favorite() {
    let places = MockServer::start().await;
    let weather = MockServer::start().await;
    mount_chicago(&places, &weather).await;

    let aggregator = FavoriteAggregator::from_config(&config_for(&places, &weather)).unwrap();
    let id = aggregator.create_favorite("Chicago, IL", "chicago1").unwrap();

    let detail = aggregator.get_detail(id).await.unwrap();

    assert_eq!(detail.favorite.id, Some(id));
    assert!((detail.weather.latitude - CHICAGO_LAT).abs() < 1e-7);
    assert!((detail.weather.longitude - CHICAGO_LNG).abs() < 1e-7);
    assert_eq!(detail.weather.daily.data.len(), 8);
    let drift = (Utc::now() - detail.weather.currently.time).num_milliseconds().abs();
    assert!(drift <= 5000);
}

#[tokio::test]
async fn test_unknown_favorite_makes_no_upstream_calls() {
    let places = MockServer::start().await;
    let weather = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&places)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&weather)
        .await;

    let aggregator = FavoriteAggregator::from_config(&config_for(&places, &weather)).unwrap();
    let err = aggregator.get_detail(999).await.unwrap_err();

    assert!(matches!(err, FavoritesError::NotFound { id: 999 }));
}

#[tokio::test]
async fn test_unresolvable_place_never_reaches_weather() {
    let places = MockServer::start().await;
    let weather = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/place/details/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "NOT_FOUND" })))
        .mount(&places)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&weather)
        .await;

    let aggregator = FavoriteAggregator::from_config(&config_for(&places, &weather)).unwrap();
    let id = aggregator.create_favorite("Nowhere", "bad-id").unwrap();

    let err = aggregator.get_detail(id).await.unwrap_err();
    assert!(matches!(err, FavoritesError::Resolution { .. }));
}

#[tokio::test]
async fn test_slow_weather_api_fails_instead_of_hanging() {
    let places = MockServer::start().await;
    let weather = MockServer::start().await;
    mount_chicago(&places, &weather).await;
    weather.reset().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(forecast(CHICAGO_LAT, CHICAGO_LNG))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&weather)
        .await;

    let mut config = config_for(&places, &weather);
    config.weather.timeout_seconds = 1;
    let aggregator = FavoriteAggregator::from_config(&config).unwrap();
    let id = aggregator.create_favorite("Chicago", "chicago1").unwrap();

    let err = aggregator.get_detail(id).await.unwrap_err();
    assert!(matches!(err, FavoritesError::WeatherUnavailable { .. }));
}

#[tokio::test]
async fn test_http_flow_create_then_view() {
    let places = MockServer::start().await;
    let weather = MockServer::start().await;
    mount_chicago(&places, &weather).await;

    let aggregator = FavoriteAggregator::from_config(&config_for(&places, &weather)).unwrap();
    let app = web::app(aggregator, Duration::from_secs(10));

    let create = Request::builder()
        .method("POST")
        .uri("/api/favorites")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from("formattedAddress=Chicago%2C+IL&placeId=chicago1"))
        .unwrap();
    let response = app.clone().oneshot(create).await.unwrap();
    assert_eq!(response.status(), StatusCode::FOUND);
    let location = response.headers()[header::LOCATION]
        .to_str()
        .unwrap()
        .to_string();

    let detail = Request::builder().uri(&location).body(Body::empty()).unwrap();
    let response = app.oneshot(detail).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["favorite"]["address"], "Chicago, IL");
    assert_eq!(body["weather"]["daily"]["data"].as_array().unwrap().len(), 8);
}

#[tokio::test]
async fn test_concurrent_creates_get_distinct_ids() {
    let places = MockServer::start().await;
    let weather = MockServer::start().await;
    let aggregator = FavoriteAggregator::from_config(&config_for(&places, &weather)).unwrap();

    let tasks = (0..32).map(|i| {
        let aggregator = aggregator.clone();
        tokio::spawn(async move {
            aggregator
                .create_favorite(&format!("Place {i}"), &format!("place{i}"))
                .unwrap()
        })
    });
    let mut ids: Vec<u64> = futures::future::join_all(tasks)
        .await
        .into_iter()
        .map(|r| r.unwrap())
        .collect();
    ids.sort_unstable();
    ids.dedup();

    assert_eq!(ids.len(), 32);
    assert_eq!(aggregator.list_favorites().len(), 32);
}
