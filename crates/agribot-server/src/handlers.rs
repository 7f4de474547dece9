//! Service-level endpoints.
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/api/` | Greeting |
//! | `POST` | `/api/status` | Record a client status check |
//! | `GET` | `/api/status` | List recorded status checks |

use std::sync::Arc;

use agribot_types::{StatusCheck, StatusCheckId};
use axum::Json;
use axum::extract::State;
use chrono::Utc;
use serde::Deserialize;
use validator::Validate;

use crate::error::ApiError;
use crate::extract::ValidatedJson;
use crate::state::AppState;

/// Maximum number of status checks returned by the list endpoint.
pub const STATUS_LIST_LIMIT: usize = 1000;

/// Body of `POST /api/status`.
#[derive(Debug, Deserialize, Validate)]
pub struct StatusCheckCreate {
    /// Name the client reports for itself. May be empty.
    pub client_name: String,
}

/// `GET /api/`
pub async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({"message": "Hello World"}))
}

/// `POST /api/status`
pub async fn create_status_check(
    State(state): State<Arc<AppState>>,
    ValidatedJson(body): ValidatedJson<StatusCheckCreate>,
) -> Result<Json<StatusCheck>, ApiError> {
    let check = StatusCheck {
        id: StatusCheckId::new(),
        client_name: body.client_name,
        timestamp: Utc::now(),
    };
    state.store.insert_status_check(check.clone()).await?;
    Ok(Json(check))
}

/// `GET /api/status`
pub async fn list_status_checks(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<StatusCheck>>, ApiError> {
    let checks = state.store.list_status_checks(STATUS_LIST_LIMIT).await?;
    Ok(Json(checks))
}
