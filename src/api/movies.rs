use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::models::{Genre, Movie, PersonDetails};
use crate::services::movie_detail::{self, MovieDetailView};
use crate::services::pipeline::{self, MovieFilters};

use super::AppState;

fn default_page() -> u32 {
    1
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
    #[serde(default = "default_page")]
    pub page: u32,
}

#[derive(Debug, Deserialize)]
pub struct FilterParams {
    #[serde(default)]
    pub q: String,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub year: Option<String>,
    #[serde(default)]
    pub rating: Option<String>,
}

/// Person biography with the movies they are credited in
#[derive(Debug, Serialize)]
pub struct PersonView {
    #[serde(flatten)]
    pub details: PersonDetails,
    pub movie_credits: Vec<Movie>,
}

/// Search the catalog; empty query falls back to the popular listing
pub async fn search_tmdb(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Json<Vec<Movie>> {
    let mut movies = state.catalog.search(&params.q, params.page).await;
    pipeline::attach_trailers(&mut movies, state.catalog.clone(), state.trailers.clone()).await;
    Json(movies)
}

/// Search or popular listing narrowed by genre/year/rating predicates
pub async fn filter_movies(
    State(state): State<AppState>,
    Query(params): Query<FilterParams>,
) -> Json<Vec<Movie>> {
    let candidates = state.catalog.search(&params.q, params.page).await;

    let filters = MovieFilters {
        genre: params.genre,
        year: params.year,
        rating: params.rating,
    };
    let mut movies = pipeline::filter_movies(candidates, &filters);
    pipeline::attach_trailers(&mut movies, state.catalog.clone(), state.trailers.clone()).await;
    Json(movies)
}

/// Catalog recommendations for a movie
pub async fn recommendations(
    State(state): State<AppState>,
    Path(movie_id): Path<i64>,
) -> Json<Vec<Movie>> {
    Json(state.catalog.recommendations(movie_id).await)
}

/// Assembled movie detail view
pub async fn movie_detail(
    State(state): State<AppState>,
    Path(movie_id): Path<i64>,
) -> AppResult<Json<MovieDetailView>> {
    let view = movie_detail::assemble(
        state.catalog.clone(),
        state.trailers.clone(),
        &state.reviews,
        movie_id,
    )
    .await?;

    view.map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Movie {} not found", movie_id)))
}

/// Genre list for the filter dropdown
pub async fn genres(State(state): State<AppState>) -> Json<Vec<Genre>> {
    Json(state.catalog.genres().await)
}

/// Person biography and movie credits
pub async fn person(
    State(state): State<AppState>,
    Path(person_id): Path<i64>,
) -> AppResult<Json<PersonView>> {
    let Some(details) = state.catalog.person(person_id).await else {
        return Err(AppError::NotFound(format!("Person {} not found", person_id)));
    };

    let movie_credits = state
        .catalog
        .person_movie_credits(person_id)
        .await
        .map(|credits| credits.cast)
        .unwrap_or_default();

    Ok(Json(PersonView {
        details,
        movie_credits,
    }))
}
