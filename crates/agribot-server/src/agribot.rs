//! Advisory endpoints. All require a bearer token.
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/api/agribot/sensor-data` | Advance the caller's reading, recommend a crop |
//! | `POST` | `/api/agribot/refresh-data` | Same as `sensor-data` |
//! | `GET` | `/api/agribot/weather` | Five-day forecast for `?city=` |
//! | `POST` | `/api/agribot/weather-recommendations` | Advice for a crop over a forecast |
//! | `POST` | `/api/agribot/chat` | Answer a question about a crop |
//! | `GET` | `/api/agribot/yield-prediction` | Simulated farm and its yield estimate |
//! | `GET` | `/api/agribot/market-recommendations` | Best market quotes for `?crop=` |

use std::sync::Arc;

use agribot_sim::{
    ReadingStore, advance_reading, estimate_yield, market_quotes, recommend_crop, simulate_farm,
    simulate_reading,
};
use agribot_types::{Crop, FarmProfile, ForecastDay, MarketQuote, SensorReading};
use axum::Json;
use axum::extract::{Query, State};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::extract::{CurrentUser, ValidatedJson};
use crate::state::AppState;

/// Crop assumed when a request names none.
pub const DEFAULT_CROP: &str = "rice";

/// Response of the sensor endpoints.
#[derive(Debug, Serialize)]
pub struct SensorDataResponse {
    /// The caller's new reading.
    pub sensor_data: SensorReading,
    /// Crop suited to that reading.
    pub recommended_crop: Crop,
    /// When the reading was taken.
    pub timestamp: DateTime<Utc>,
}

/// `GET /api/agribot/sensor-data`
pub async fn sensor_data(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
) -> Json<SensorDataResponse> {
    let (reading, crop) = state.with_rng(|rng| {
        let reading = advance_reading(&state.readings, user.id, rng);
        (reading, recommend_crop(&reading, rng))
    });
    tracing::debug!(user_id = %user.id, crop = %crop, "sensor reading served");
    Json(SensorDataResponse {
        sensor_data: reading,
        recommended_crop: crop,
        timestamp: Utc::now(),
    })
}

/// `POST /api/agribot/refresh-data`
pub async fn refresh_data(
    state: State<Arc<AppState>>,
    user: CurrentUser,
) -> Json<SensorDataResponse> {
    sensor_data(state, user).await
}

/// Query of `GET /api/agribot/weather`.
#[derive(Debug, Deserialize)]
pub struct WeatherQuery {
    /// City name; the configured default when absent.
    pub city: Option<String>,
}

/// Response of `GET /api/agribot/weather`.
#[derive(Debug, Serialize)]
pub struct WeatherResponse {
    /// Daily summaries, live or mock.
    pub forecast: Vec<ForecastDay>,
    /// The city that was looked up.
    pub city: String,
}

/// `GET /api/agribot/weather`
pub async fn weather(
    State(state): State<Arc<AppState>>,
    _user: CurrentUser,
    Query(query): Query<WeatherQuery>,
) -> Json<WeatherResponse> {
    let city = non_blank(query.city).unwrap_or_else(|| state.default_city.clone());
    let forecast = state.weather.forecast(&city).await;
    Json(WeatherResponse { forecast, city })
}

/// Body of `POST /api/agribot/weather-recommendations`.
#[derive(Debug, Deserialize, Validate)]
pub struct WeatherAdviceRequest {
    /// Forecast to advise on; empty selects the generic advice.
    #[serde(default)]
    pub forecast: Vec<ForecastDay>,
    /// Crop being grown.
    #[serde(default)]
    pub crop: Option<String>,
}

/// Response of `POST /api/agribot/weather-recommendations`.
#[derive(Debug, Serialize)]
pub struct WeatherAdviceResponse {
    /// Advisory text.
    pub recommendations: String,
}

/// `POST /api/agribot/weather-recommendations`
pub async fn weather_recommendations(
    State(state): State<Arc<AppState>>,
    _user: CurrentUser,
    ValidatedJson(body): ValidatedJson<WeatherAdviceRequest>,
) -> Json<WeatherAdviceResponse> {
    let crop = non_blank(body.crop).unwrap_or_else(|| DEFAULT_CROP.to_owned());
    let recommendations = state
        .advisor
        .weather_recommendations(&body.forecast, &crop)
        .await;
    Json(WeatherAdviceResponse { recommendations })
}

/// Body of `POST /api/agribot/chat`.
#[derive(Debug, Deserialize, Validate)]
pub struct ChatRequest {
    /// The farmer's question.
    pub question: String,
    /// Crop the question is about.
    #[serde(default)]
    pub crop: Option<String>,
    /// Reading to ground the answer in when the caller has none cached.
    /// Ignored unless it is a complete reading.
    #[serde(default)]
    pub sensor_data: Option<serde_json::Value>,
}

/// Response of `POST /api/agribot/chat`.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    /// Advisory text.
    pub response: String,
}

/// `POST /api/agribot/chat`
///
/// The answer is grounded in the caller's cached reading, else a complete
/// reading from the request, else a fresh sample that is not cached.
pub async fn chat(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    ValidatedJson(body): ValidatedJson<ChatRequest>,
) -> Json<ChatResponse> {
    let crop = non_blank(body.crop).unwrap_or_else(|| DEFAULT_CROP.to_owned());
    let reading = state
        .readings
        .get(user.id)
        .or_else(|| {
            body.sensor_data
                .and_then(|value| serde_json::from_value::<SensorReading>(value).ok())
        })
        .unwrap_or_else(|| state.with_rng(|rng| simulate_reading(None, rng)));

    let response = state.advisor.ask(&body.question, &crop, &reading).await;
    Json(ChatResponse { response })
}

/// Response of `GET /api/agribot/yield-prediction`.
#[derive(Debug, Serialize)]
pub struct YieldResponse {
    /// The simulated farm.
    pub farm_data: FarmProfile,
    /// Estimated harvest in tons.
    pub predicted_yield: f64,
    /// When the estimate was made.
    pub timestamp: DateTime<Utc>,
}

/// `GET /api/agribot/yield-prediction`
pub async fn yield_prediction(
    State(state): State<Arc<AppState>>,
    _user: CurrentUser,
) -> Json<YieldResponse> {
    let (farm_data, predicted_yield) = state.with_rng(|rng| {
        let farm = simulate_farm(rng);
        let estimate = estimate_yield(&farm, rng);
        (farm, estimate)
    });
    Json(YieldResponse {
        farm_data,
        predicted_yield,
        timestamp: Utc::now(),
    })
}

/// Query of `GET /api/agribot/market-recommendations`.
#[derive(Debug, Deserialize)]
pub struct MarketQuery {
    /// Crop to quote; `rice` when absent.
    pub crop: Option<String>,
}

/// Response of `GET /api/agribot/market-recommendations`.
#[derive(Debug, Serialize)]
pub struct MarketResponse {
    /// The crop that was quoted.
    pub crop: String,
    /// Best quotes, most expensive first.
    pub markets: Vec<MarketQuote>,
    /// When the quotes were generated.
    pub timestamp: DateTime<Utc>,
}

/// `GET /api/agribot/market-recommendations`
pub async fn market_recommendations(
    State(state): State<Arc<AppState>>,
    _user: CurrentUser,
    Query(query): Query<MarketQuery>,
) -> Json<MarketResponse> {
    let crop = non_blank(query.crop).unwrap_or_else(|| DEFAULT_CROP.to_owned());
    let markets = state.with_rng(|rng| market_quotes(&crop, rng));
    Json(MarketResponse {
        crop,
        markets,
        timestamp: Utc::now(),
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}
