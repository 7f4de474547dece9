//! Axum router construction.
//!
//! Every route lives under `/api`. CORS follows `server.cors_origins`: a
//! `*` entry allows any origin without credentials, while an explicit
//! list allows exactly those origins with credentials.

use std::sync::Arc;

use axum::Router;
use axum::http::{HeaderValue, Method, header};
use axum::routing::{get, post};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;
use crate::{agribot, auth, handlers};

/// Build the complete router.
///
/// The greeting answers on both `/api` and `/api/`.
pub fn build_router(state: Arc<AppState>, cors_origins: &[String]) -> Router {
    Router::new()
        // Service
        .route("/api", get(handlers::root))
        .route("/api/", get(handlers::root))
        .route(
            "/api/status",
            get(handlers::list_status_checks).post(handlers::create_status_check),
        )
        // Accounts
        .route("/api/auth/signup", post(auth::signup))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/me", get(auth::me))
        // Advisory
        .route("/api/agribot/sensor-data", get(agribot::sensor_data))
        .route("/api/agribot/refresh-data", post(agribot::refresh_data))
        .route("/api/agribot/weather", get(agribot::weather))
        .route(
            "/api/agribot/weather-recommendations",
            post(agribot::weather_recommendations),
        )
        .route("/api/agribot/chat", post(agribot::chat))
        .route("/api/agribot/yield-prediction", get(agribot::yield_prediction))
        .route(
            "/api/agribot/market-recommendations",
            get(agribot::market_recommendations),
        )
        .layer(cors_layer(cors_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// CORS policy for the configured origins.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(origin, error = %e, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true)
}
