use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::db::reviews::SentimentCounts;
use crate::error::{AppError, AppResult};
use crate::services::wordcloud;

use super::AppState;

#[derive(Debug, Deserialize)]
pub struct TitleParams {
    #[serde(default)]
    pub movie_title: String,
}

impl TitleParams {
    fn title_filter(&self) -> Option<&str> {
        (!self.movie_title.is_empty()).then_some(self.movie_title.as_str())
    }
}

/// Per-label review counts, optionally scoped to one title
pub async fn stats(
    State(state): State<AppState>,
    Query(params): Query<TitleParams>,
) -> AppResult<Json<SentimentCounts>> {
    let counts = state.reviews.sentiment_counts(params.title_filter()).await?;
    Ok(Json(counts))
}

/// Word-frequency cloud over review texts, rendered as SVG
pub async fn word_cloud(
    State(state): State<AppState>,
    Query(params): Query<TitleParams>,
) -> AppResult<impl IntoResponse> {
    let reviews = match params.title_filter() {
        Some(title) => state.reviews.list_by_title(title).await?,
        None => state.reviews.export_all().await?,
    };

    let texts: Vec<String> = reviews.into_iter().map(|r| r.review_text).collect();
    let svg = wordcloud::render_svg(&texts);

    Ok(([(header::CONTENT_TYPE, "image/svg+xml")], svg))
}

/// All reviews as a CSV attachment
pub async fn export_csv(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let reviews = state.reviews.export_all().await?;

    let mut writer = csv::Writer::from_writer(Vec::new());
    for review in &reviews {
        writer
            .serialize(review)
            .map_err(|e| AppError::Internal(format!("CSV serialization failed: {e}")))?;
    }
    let data = writer
        .into_inner()
        .map_err(|e| AppError::Internal(format!("CSV write failed: {e}")))?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"reviews.csv\"",
            ),
        ],
        data,
    ))
}
