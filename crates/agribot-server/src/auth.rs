//! Account endpoints and password hashing.
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `POST` | `/api/auth/signup` | Register and receive a token |
//! | `POST` | `/api/auth/login` | Exchange credentials for a token |
//! | `GET` | `/api/auth/me` | The authenticated user |
//!
//! `bcrypt` is CPU-bound, so hashing and verification run on the blocking
//! thread pool.

use std::sync::Arc;

use agribot_db::UserRecord;
use agribot_types::User;
use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::ApiError;
use crate::extract::{CurrentUser, ValidatedJson};
use crate::state::AppState;

/// Body of `POST /api/auth/signup`.
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    /// Display name, 2 to 100 characters.
    #[validate(length(min = 2, max = 100))]
    pub name: String,
    /// Login email.
    #[validate(email)]
    pub email: String,
    /// Password, at least 6 characters.
    #[validate(length(min = 6))]
    pub password: String,
}

/// Body of `POST /api/auth/login`.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Login email.
    #[validate(email)]
    pub email: String,
    /// Password.
    pub password: String,
}

/// Token issued on signup and login.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    /// Opaque bearer token.
    pub access_token: String,
    /// Always `bearer`.
    pub token_type: &'static str,
    /// The account the token belongs to.
    pub user: User,
}

/// Register a new account.
pub async fn signup(
    State(state): State<Arc<AppState>>,
    ValidatedJson(body): ValidatedJson<SignupRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    if state.store.find_user_by_email(&body.email).await?.is_some() {
        return Err(ApiError::BadRequest("Email already registered".to_owned()));
    }

    let password_hash = hash_password(body.password, state.bcrypt_cost).await?;
    let record = UserRecord::new(&body.name, &body.email, password_hash);
    let user = record.to_user();
    state.store.insert_user(record).await?;

    let access_token = state.sessions.issue(&user.email).await;
    tracing::info!(user_id = %user.id, "user registered");

    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer",
        user,
    }))
}

/// Exchange email and password for a token.
pub async fn login(
    State(state): State<Arc<AppState>>,
    ValidatedJson(body): ValidatedJson<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let bad_credentials = || ApiError::Unauthorized("Incorrect email or password".to_owned());

    let record = state
        .store
        .find_user_by_email(&body.email)
        .await?
        .ok_or_else(bad_credentials)?;
    if !verify_password(body.password, record.password_hash.clone()).await? {
        tracing::info!(user_id = %record.id, "login rejected");
        return Err(bad_credentials());
    }
    if !record.is_active {
        return Err(ApiError::Unauthorized("Inactive user".to_owned()));
    }

    let user = record.to_user();
    let access_token = state.sessions.issue(&user.email).await;
    tracing::info!(user_id = %user.id, "user logged in");

    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer",
        user,
    }))
}

/// The authenticated user.
pub async fn me(CurrentUser(user): CurrentUser) -> Json<User> {
    Json(user)
}

/// Hash a password on the blocking pool.
///
/// # Errors
///
/// Returns [`ApiError::Internal`] if the cost is out of range or the task
/// fails.
pub async fn hash_password(password: String, cost: u32) -> Result<String, ApiError> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| ApiError::Internal(format!("hashing task failed: {e}")))?
        .map_err(|e| ApiError::Internal(format!("password hashing failed: {e}")))
}

/// Check a password against a stored hash on the blocking pool. A malformed
/// hash counts as a mismatch.
///
/// # Errors
///
/// Returns [`ApiError::Internal`] if the task fails.
pub async fn verify_password(password: String, hash: String) -> Result<bool, ApiError> {
    let result = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| ApiError::Internal(format!("verification task failed: {e}")))?;
    Ok(result.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "stored password hash is malformed");
        false
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn hash_then_verify() {
        let hash = hash_password("s3cret!".to_owned(), 4).await;
        assert!(hash.is_ok());
        let hash = hash.unwrap_or_default();
        assert!(hash.starts_with("$2"));
        assert!(matches!(verify_password("s3cret!".to_owned(), hash.clone()).await, Ok(true)));
        assert!(matches!(verify_password("wrong".to_owned(), hash).await, Ok(false)));
    }

    #[tokio::test]
    async fn malformed_hash_is_a_mismatch() {
        let result = verify_password("pw".to_owned(), "not-a-hash".to_owned()).await;
        assert!(matches!(result, Ok(false)));
    }

    #[tokio::test]
    async fn out_of_range_cost_is_internal_error() {
        let result = hash_password("pw".to_owned(), 2).await;
        assert!(matches!(result, Err(ApiError::Internal(_))));
    }

    #[test]
    fn signup_rules() {
        let valid = SignupRequest {
            name: "Asha".to_owned(),
            email: "asha@example.com".to_owned(),
            password: "secret".to_owned(),
        };
        assert!(valid.validate().is_ok());

        let short_name = SignupRequest {
            name: "A".to_owned(),
            ..valid
        };
        assert!(short_name.validate().is_err());

        let bad = SignupRequest {
            name: "Asha".to_owned(),
            email: "not-an-email".to_owned(),
            password: "12345".to_owned(),
        };
        let errors = bad.validate().err().map(|e| e.field_errors().len());
        assert_eq!(errors, Some(2));
    }
}
