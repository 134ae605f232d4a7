/// Watchlist endpoints
///
/// All of these are session-scoped. A missing session degrades to an empty
/// list, a `false` check, or a "Login required" payload; it never produces an
/// auth-error status.
use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};

use crate::error::AppResult;
use crate::models::{WatchlistEntry, WatchlistSnapshot};

use super::{AppState, CurrentUser};

fn login_required() -> Json<Value> {
    Json(json!({ "success": false, "error": "Login required" }))
}

/// The current user's watchlist, newest first
pub async fn list(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
) -> AppResult<Json<Vec<WatchlistEntry>>> {
    let Some(user_id) = user_id else {
        return Ok(Json(vec![]));
    };

    Ok(Json(state.watchlist.list(user_id).await?))
}

/// Add a movie with its catalog snapshot; duplicates report success
pub async fn add(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Json(snapshot): Json<WatchlistSnapshot>,
) -> AppResult<Json<Value>> {
    let Some(user_id) = user_id else {
        return Ok(login_required());
    };

    state.watchlist.add(user_id, &snapshot).await?;
    Ok(Json(json!({ "success": true })))
}

/// Remove a movie; removing an absent entry succeeds
pub async fn remove(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Path(movie_id): Path<i64>,
) -> AppResult<Json<Value>> {
    let Some(user_id) = user_id else {
        return Ok(login_required());
    };

    state.watchlist.remove(user_id, movie_id).await?;
    Ok(Json(json!({ "success": true })))
}

/// Whether the movie is on the current user's watchlist
pub async fn check(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Path(movie_id): Path<i64>,
) -> AppResult<Json<Value>> {
    let Some(user_id) = user_id else {
        return Ok(Json(json!({ "in_watchlist": false })));
    };

    let in_watchlist = state.watchlist.contains(user_id, movie_id).await?;
    Ok(Json(json!({ "in_watchlist": in_watchlist })))
}
