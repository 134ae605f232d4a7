use axum::{extract::State, Json};
use axum_extra::extract::SignedCookieJar;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::{AppError, AppResult};

use super::session;
use super::AppState;

#[derive(Debug, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Create an account
pub async fn register(
    State(state): State<AppState>,
    Json(credentials): Json<Credentials>,
) -> AppResult<Json<Value>> {
    if credentials.username.is_empty() || credentials.password.is_empty() {
        return Err(AppError::InvalidInput(
            "Username and password required".to_string(),
        ));
    }

    let user_id = state
        .users
        .create(&credentials.username, &credentials.password)
        .await?;

    tracing::info!(username = %credentials.username, "User registered");
    Ok(Json(json!({ "success": true, "user_id": user_id })))
}

/// Start a session for valid credentials
pub async fn login(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Json(credentials): Json<Credentials>,
) -> AppResult<(SignedCookieJar, Json<Value>)> {
    let user_id = state
        .users
        .verify(&credentials.username, &credentials.password)
        .await?;

    let Some(user_id) = user_id else {
        return Err(AppError::InvalidInput(
            "Invalid username or password".to_string(),
        ));
    };

    let jar = session::start_session(&state, jar, user_id).await;
    tracing::info!(username = %credentials.username, "User logged in");
    Ok((jar, Json(json!({ "success": true }))))
}

/// End the current session; harmless without one
pub async fn logout(
    State(state): State<AppState>,
    jar: SignedCookieJar,
) -> (SignedCookieJar, Json<Value>) {
    let jar = session::end_session(&state, jar).await;
    (jar, Json(json!({ "success": true })))
}
