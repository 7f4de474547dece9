//! Integration tests for the AgriBot API endpoints.
//!
//! Tests drive the `Router` directly via `tower::ServiceExt` without
//! starting a TCP server. State uses the in-memory store and the mock
//! weather client. The advisor is offline, except in the chat tests that
//! point it at a loopback Gemini echoing the reading it was prompted with.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects,
    clippy::panic,
    clippy::float_cmp
)]

use std::sync::Arc;

use agribot_advisor::{Advisor, AdvisorConfig, WeatherClient, WeatherConfig};
use agribot_db::Store;
use agribot_server::config::{AppConfig, AuthConfig, SimulationConfig};
use agribot_server::router::build_router;
use agribot_server::state::AppState;
use agribot_sim::ReadingStore;
use agribot_types::UserId;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{Value, json};
use tower::ServiceExt;

fn test_config() -> AppConfig {
    AppConfig {
        auth: AuthConfig {
            bcrypt_cost: 4,
            ..AuthConfig::default()
        },
        simulation: SimulationConfig { seed: Some(42) },
        ..AppConfig::default()
    }
}

fn make_state(advisor: Advisor, seed: Option<u64>) -> Arc<AppState> {
    let config = AppConfig {
        simulation: SimulationConfig { seed },
        ..test_config()
    };
    let weather = WeatherClient::new(&WeatherConfig::default()).unwrap();
    Arc::new(AppState::new(Store::memory(), advisor, weather, &config))
}

fn router_for(state: &Arc<AppState>) -> Router {
    build_router(Arc::clone(state), &test_config().server.cors_origins)
}

fn make_app() -> Router {
    router_for(&make_state(Advisor::offline().unwrap(), Some(42)))
}

/// Fake Gemini endpoint that answers with the reading line of the prompt.
async fn echo_reading(Json(body): Json<Value>) -> Json<Value> {
    let prompt = body["contents"][0]["parts"][0]["text"]
        .as_str()
        .unwrap_or_default();
    let line = prompt
        .lines()
        .find(|l| l.starts_with("N: "))
        .unwrap_or("no reading");
    Json(json!({
        "candidates": [{"content": {"role": "model", "parts": [{"text": line}]}}]
    }))
}

/// A state whose advisor talks to a loopback Gemini that echoes the reading.
async fn make_echo_state() -> Arc<AppState> {
    let app = Router::new().route("/models/{call}", post(echo_reading));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    let advisor = Advisor::from_config(&AdvisorConfig {
        api_url: format!("http://{addr}/models"),
        api_key: Some("test-key".to_owned()),
        timeout_secs: 5,
        ..AdvisorConfig::default()
    })
    .unwrap();
    make_state(advisor, Some(7))
}

/// The `N` value the echoed prompt line carries.
fn echoed_n(response: &Value) -> f64 {
    let text = response["response"].as_str().unwrap();
    let rest = text.strip_prefix("N: ").unwrap_or_else(|| panic!("unexpected: {text}"));
    rest.split(',').next().unwrap().trim().parse().unwrap()
}

fn request_reading() -> Value {
    json!({
        "N": 12.34, "P": 56.78, "K": 90.12,
        "temperature": 21.5, "humidity": 61.25, "ph": 6.45, "rainfall": 123.45
    })
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    (status, body_to_json(response.into_body()).await)
}

fn post_json(uri: &str, body: &Value, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

async fn signup(app: &Router, email: &str) -> String {
    signup_with_id(app, email).await.0
}

async fn signup_with_id(app: &Router, email: &str) -> (String, UserId) {
    let body = json!({"name": "Asha Rao", "email": email, "password": "secret1"});
    let (status, json) = send(app, post_json("/api/auth/signup", &body, None)).await;
    assert_eq!(status, StatusCode::OK, "signup failed: {json}");
    let id = serde_json::from_value(json["user"]["id"].clone()).unwrap();
    (json["access_token"].as_str().unwrap().to_owned(), id)
}

fn assert_reading_in_bounds(reading: &Value) {
    let bounds = [
        ("N", 0.0, 140.0),
        ("P", 5.0, 145.0),
        ("K", 5.0, 205.0),
        ("temperature", 10.0, 40.0),
        ("humidity", 30.0, 98.0),
        ("ph", 4.0, 9.0),
        ("rainfall", 20.0, 300.0),
    ];
    for (field, min, max) in bounds {
        let value = reading[field].as_f64().unwrap();
        assert!((min..=max).contains(&value), "{field}={value} outside [{min}, {max}]");
    }
}

// ---------------------------------------------------------------------------
// Service endpoints
// ---------------------------------------------------------------------------

#[tokio::test]
async fn root_says_hello() {
    let app = make_app();
    let (status, json) = send(&app, get("/api/", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({"message": "Hello World"}));
}

#[tokio::test]
async fn greeting_answers_with_and_without_trailing_slash() {
    let app = make_app();
    for uri in ["/api/", "/api"] {
        let (status, json) = send(&app, get(uri, None)).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert_eq!(json["message"], "Hello World");
    }
}

#[tokio::test]
async fn status_checks_are_recorded_and_listed() {
    let app = make_app();
    for name in ["web", "mobile"] {
        let (status, json) =
            send(&app, post_json("/api/status", &json!({"client_name": name}), None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["client_name"], name);
        assert!(json["id"].is_string());
        assert!(json["timestamp"].is_string());
    }

    let (status, json) = send(&app, get("/api/status", None)).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["client_name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["web", "mobile"]);
}

#[tokio::test]
async fn status_check_accepts_empty_name() {
    let app = make_app();
    let (status, json) =
        send(&app, post_json("/api/status", &json!({"client_name": ""}), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["client_name"], "");
}

#[tokio::test]
async fn status_check_without_name_is_unprocessable() {
    let app = make_app();
    let (status, json) = send(&app, post_json("/api/status", &json!({}), None)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["status"], 422);
}

// ---------------------------------------------------------------------------
// Accounts
// ---------------------------------------------------------------------------

#[tokio::test]
async fn signup_issues_token_for_me() {
    let app = make_app();
    let token = signup(&app, "Asha@Example.com").await;
    assert_eq!(token.len(), 32);

    let (status, json) = send(&app, get("/api/auth/me", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["name"], "Asha Rao");
    assert_eq!(json["email"], "asha@example.com");
    assert_eq!(json["is_active"], true);
    assert!(json.get("password_hash").is_none());
}

#[tokio::test]
async fn duplicate_email_is_rejected() {
    let app = make_app();
    signup(&app, "ravi@example.com").await;

    let body = json!({"name": "Ravi", "email": "RAVI@example.com", "password": "another1"});
    let (status, json) = send(&app, post_json("/api/auth/signup", &body, None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Email already registered");
}

#[tokio::test]
async fn invalid_signup_is_unprocessable() {
    let app = make_app();
    let body = json!({"name": "A", "email": "not-an-email", "password": "123"});
    let (status, _) = send(&app, post_json("/api/auth/signup", &body, None)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = send(&app, post_json("/api/auth/signup", &json!({"name": "Asha"}), None)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn login_checks_password() {
    let app = make_app();
    signup(&app, "meera@example.com").await;

    let good = json!({"email": "meera@example.com", "password": "secret1"});
    let (status, json) = send(&app, post_json("/api/auth/login", &good, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["token_type"], "bearer");
    assert_eq!(json["user"]["email"], "meera@example.com");

    let bad = json!({"email": "meera@example.com", "password": "wrong-one"});
    let (status, json) = send(&app, post_json("/api/auth/login", &bad, None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["error"], "Incorrect email or password");

    let unknown = json!({"email": "nobody@example.com", "password": "secret1"});
    let (status, _) = send(&app, post_json("/api/auth/login", &unknown, None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn protected_routes_need_a_valid_token() {
    let app = make_app();

    let response = app
        .clone()
        .oneshot(get("/api/agribot/sensor-data", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
        "Bearer"
    );

    let (status, json) = send(&app, get("/api/auth/me", Some("deadbeef"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["error"], "Could not validate credentials");
}

// ---------------------------------------------------------------------------
// Advisory endpoints
// ---------------------------------------------------------------------------

#[tokio::test]
async fn sensor_readings_drift_per_user() {
    let app = make_app();
    let token = signup(&app, "farmer@example.com").await;

    let (status, first) = send(&app, get("/api/agribot/sensor-data", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_reading_in_bounds(&first["sensor_data"]);
    assert!(first["recommended_crop"].is_string());
    assert!(first["timestamp"].is_string());

    let (status, second) = send(
        &app,
        post_json("/api/agribot/refresh-data", &json!({}), Some(&token)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_reading_in_bounds(&second["sensor_data"]);

    // One drift step moves each field by at most its delta, plus rounding.
    let deltas = [
        ("N", 3.0),
        ("P", 3.0),
        ("K", 4.0),
        ("temperature", 0.5),
        ("humidity", 2.0),
        ("ph", 0.1),
        ("rainfall", 5.0),
    ];
    for (field, delta) in deltas {
        let a = first["sensor_data"][field].as_f64().unwrap();
        let b = second["sensor_data"][field].as_f64().unwrap();
        assert!((a - b).abs() <= delta + 0.011, "{field} jumped from {a} to {b}");
    }
}

#[tokio::test]
async fn chat_falls_back_to_canned_answer() {
    let app = make_app();
    let token = signup(&app, "chat@example.com").await;

    let body = json!({"question": "Which fertilizer should I use?", "crop": "maize"});
    let (status, json) = send(&app, post_json("/api/agribot/chat", &body, Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    let answer = json["response"].as_str().unwrap();
    assert!(answer.starts_with("For maize, consider applying balanced NPK fertilizer"));
}

#[tokio::test]
async fn chat_accepts_partial_body() {
    let app = make_app();
    let token = signup(&app, "partial@example.com").await;

    let body = json!({"question": "hello", "sensor_data": {"N": "oops"}});
    let (status, json) = send(&app, post_json("/api/agribot/chat", &body, Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["response"].as_str().unwrap().contains("rice"));
}

#[tokio::test]
async fn chat_without_question_is_unprocessable() {
    let app = make_app();
    let token = signup(&app, "quiet@example.com").await;

    let (status, json) = send(
        &app,
        post_json("/api/agribot/chat", &json!({"crop": "rice"}), Some(&token)),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["status"], 422);
}

#[tokio::test]
async fn chat_uses_request_reading_when_nothing_is_cached() {
    let state = make_echo_state().await;
    let app = router_for(&state);
    let (token, user) = signup_with_id(&app, "fresh@example.com").await;

    let body = json!({"question": "Sow now?", "sensor_data": request_reading()});
    let (status, json) = send(&app, post_json("/api/agribot/chat", &body, Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert!((echoed_n(&json) - 12.34).abs() < 1e-9);
    assert!(state.readings.get(user).is_none());
}

#[tokio::test]
async fn chat_prefers_cached_reading_over_request() {
    let state = make_echo_state().await;
    let app = router_for(&state);
    let token = signup(&app, "cached@example.com").await;

    let (_, sensor) = send(&app, get("/api/agribot/sensor-data", Some(&token))).await;
    let cached_n = sensor["sensor_data"]["N"].as_f64().unwrap();

    let body = json!({"question": "Sow now?", "sensor_data": request_reading()});
    let (status, json) = send(&app, post_json("/api/agribot/chat", &body, Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert!((echoed_n(&json) - cached_n).abs() < 1e-9);
}

#[tokio::test]
async fn chat_fallback_sample_is_not_cached() {
    let state = make_echo_state().await;
    let app = router_for(&state);
    let (token, user) = signup_with_id(&app, "nodata@example.com").await;

    let body = json!({"question": "Sow now?", "sensor_data": {"N": "oops"}});
    let (status, json) = send(&app, post_json("/api/agribot/chat", &body, Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert!((0.0..=140.0).contains(&echoed_n(&json)));
    assert!(state.readings.get(user).is_none());
    assert!(state.readings.is_empty());
}

#[tokio::test]
async fn seeded_state_repeats_its_draws() {
    let a = make_state(Advisor::offline().unwrap(), Some(99));
    let b = make_state(Advisor::offline().unwrap(), Some(99));
    assert!(a.is_seeded());
    let draw = |s: &AppState| s.with_rng(|rng| agribot_sim::simulate_reading(None, rng));
    assert_eq!(draw(&a), draw(&b));
}

#[tokio::test]
async fn unseeded_state_still_serves_readings() {
    let state = make_state(Advisor::offline().unwrap(), None);
    assert!(!state.is_seeded());
    let app = router_for(&state);
    let token = signup(&app, "random@example.com").await;

    let (status, json) = send(&app, get("/api/agribot/sensor-data", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_reading_in_bounds(&json["sensor_data"]);
}

#[tokio::test]
async fn weather_uses_mock_forecast_without_key() {
    let app = make_app();
    let token = signup(&app, "sky@example.com").await;

    let (status, json) = send(&app, get("/api/agribot/weather?city=Pune", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["city"], "Pune");
    let days = json["forecast"].as_array().unwrap();
    assert_eq!(days.len(), 5);
    assert!(days.iter().all(|d| d["temp"].is_number() && d["date"].is_string()));

    let (status, json) = send(&app, get("/api/agribot/weather", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["city"], WeatherConfig::default().default_city);
}

#[tokio::test]
async fn weather_recommendations_fall_back_to_canned_advice() {
    let app = make_app();
    let token = signup(&app, "advice@example.com").await;

    let (_, weather) = send(&app, get("/api/agribot/weather", Some(&token))).await;
    let body = json!({"forecast": weather["forecast"], "crop": "cotton"});
    let (status, json) = send(
        &app,
        post_json("/api/agribot/weather-recommendations", &body, Some(&token)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let advice = json["recommendations"].as_str().unwrap();
    assert!(advice.starts_with("Based on the weather forecast for cotton:"));
    assert_eq!(advice.matches('•').count(), 6);
}

#[tokio::test]
async fn yield_prediction_returns_farm_and_estimate() {
    let app = make_app();
    let token = signup(&app, "yield@example.com").await;

    let (status, json) = send(&app, get("/api/agribot/yield-prediction", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    let area = json["farm_data"]["Farm_Area(acres)"].as_f64().unwrap();
    assert!((10.0..=500.0).contains(&area));
    assert!(json["predicted_yield"].as_f64().unwrap() > 0.0);
}

#[tokio::test]
async fn market_quotes_are_sorted_by_price() {
    let app = make_app();
    let token = signup(&app, "market@example.com").await;

    let (status, json) = send(&app, get("/api/agribot/market-recommendations", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["crop"], "rice");

    let prices: Vec<f64> = json["markets"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["AvgPrice"].as_f64().unwrap())
        .collect();
    assert_eq!(prices.len(), 5);
    assert!(prices.windows(2).all(|w| w[0] >= w[1]));

    let (_, json) = send(
        &app,
        get("/api/agribot/market-recommendations?crop=cotton", Some(&token)),
    )
    .await;
    assert_eq!(json["crop"], "cotton");
}
