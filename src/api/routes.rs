use axum::{
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::{auth, movies, reviews, stats, watchlist, AppState};

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        // Catalog
        .route("/search_tmdb", get(movies::search_tmdb))
        .route("/filter_movies", get(movies::filter_movies))
        .route("/genres", get(movies::genres))
        .route("/recommendations/:movie_id", get(movies::recommendations))
        .route("/movie/:movie_id", get(movies::movie_detail))
        .route("/person/:person_id", get(movies::person))
        // Reviews
        .route("/filter_reviews", get(reviews::filter_reviews))
        .route("/add_review", post(reviews::add_review))
        .route("/delete_review/:id", delete(reviews::delete_review))
        .route("/api/stats", get(stats::stats))
        .route("/api/wordcloud", get(stats::word_cloud))
        .route("/api/export_csv", get(stats::export_csv))
        // Watchlist
        .route("/api/watchlist", get(watchlist::list))
        .route("/api/watchlist/add", post(watchlist::add))
        .route("/api/watchlist/remove/:movie_id", post(watchlist::remove))
        .route("/api/watchlist/check/:movie_id", get(watchlist::check))
        // Sessions
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", get(auth::logout))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
