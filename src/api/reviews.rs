use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::db::reviews::ReviewFilters;
use crate::error::{AppError, AppResult};
use crate::models::Review;
use crate::services::sentiment;

use super::AppState;

#[derive(Debug, Deserialize)]
pub struct ReviewQuery {
    #[serde(default)]
    pub sentiment: String,
    #[serde(default)]
    pub date_order: String,
    #[serde(default)]
    pub min_wordcount: String,
}

fn default_movie_title() -> String {
    "Unknown".to_string()
}

#[derive(Debug, Deserialize)]
pub struct AddReviewRequest {
    #[serde(default = "default_movie_title")]
    pub movie_title: String,
    #[serde(default)]
    pub review_text: String,
}

/// Review history with optional sentiment and word-count filters
pub async fn filter_reviews(
    State(state): State<AppState>,
    Query(params): Query<ReviewQuery>,
) -> AppResult<Json<Vec<Review>>> {
    let min_word_count = if params.min_wordcount.is_empty() {
        None
    } else {
        let parsed = params
            .min_wordcount
            .parse::<i64>()
            .map_err(|_| AppError::InvalidInput("Invalid min_wordcount".to_string()))?;
        Some(parsed)
    };

    let filters = ReviewFilters {
        sentiment: (!params.sentiment.is_empty()).then(|| params.sentiment.clone()),
        min_word_count,
    };

    let reviews = state.reviews.list(&filters, &params.date_order).await?;
    Ok(Json(reviews))
}

/// Analyze and persist a review
pub async fn add_review(
    State(state): State<AppState>,
    Json(request): Json<AddReviewRequest>,
) -> AppResult<Json<Review>> {
    if request.review_text.is_empty() {
        return Err(AppError::InvalidInput("No review text".to_string()));
    }

    let analysis = sentiment::analyze(&request.review_text);
    let review = state
        .reviews
        .insert(&request.movie_title, &request.review_text, &analysis)
        .await?;

    tracing::info!(
        movie_title = %review.movie_title,
        label = %review.sentiment_label,
        "Review stored"
    );

    Ok(Json(review))
}

/// Delete a review; absent ids succeed as well
pub async fn delete_review(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Value>> {
    state.reviews.delete(id).await?;
    Ok(Json(json!({ "success": true })))
}
