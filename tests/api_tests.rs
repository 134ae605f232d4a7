use std::sync::Arc;

use axum_test::TestServer;
use serde_json::json;
use sqlx::sqlite::SqlitePoolOptions;

use cinelog_api::api::{create_router, AppState};
use cinelog_api::db;
use cinelog_api::models::{
    Genre, Movie, MovieDetails, PersonCredits, PersonDetails, RegionProviders, TmdbReview,
    TmdbReviewList, Video, VideoList, WatchProviders,
};
use cinelog_api::services::providers::{CatalogProvider, TrailerProvider};

/// Canned catalog responses; every call returns a clone of the configured data.
#[derive(Clone, Default)]
struct StubCatalog {
    movies: Vec<Movie>,
    details: Option<MovieDetails>,
    genres: Vec<Genre>,
    recommendations: Vec<Movie>,
    trailer: Option<String>,
    person: Option<PersonDetails>,
    credits: Option<PersonCredits>,
}

#[async_trait::async_trait]
impl CatalogProvider for StubCatalog {
    async fn genres(&self) -> Vec<Genre> {
        self.genres.clone()
    }

    async fn popular(&self, _page: u32) -> Vec<Movie> {
        self.movies.clone()
    }

    async fn search(&self, _query: &str, _page: u32) -> Vec<Movie> {
        self.movies.clone()
    }

    async fn details(&self, _movie_id: i64) -> Option<MovieDetails> {
        self.details.clone()
    }

    async fn recommendations(&self, _movie_id: i64) -> Vec<Movie> {
        self.recommendations.clone()
    }

    async fn movie_trailer(&self, _movie_id: i64) -> Option<String> {
        self.trailer.clone()
    }

    async fn person(&self, _person_id: i64) -> Option<PersonDetails> {
        self.person.clone()
    }

    async fn person_movie_credits(&self, _person_id: i64) -> Option<PersonCredits> {
        self.credits.clone()
    }
}

#[derive(Clone, Default)]
struct StubTrailer {
    key: Option<String>,
}

#[async_trait::async_trait]
impl TrailerProvider for StubTrailer {
    async fn find_trailer(&self, _query: &str) -> Option<String> {
        self.key.clone()
    }
}

async fn create_test_server_with(catalog: StubCatalog, trailers: StubTrailer) -> TestServer {
    // One connection only: every pooled connection to `sqlite::memory:` would
    // otherwise open its own empty database.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    db::init_schema(&pool).await.unwrap();

    let state = AppState::with_providers(Arc::new(catalog), Arc::new(trailers), pool, "test-secret");
    let mut server = TestServer::new(create_router(state)).unwrap();
    server.do_save_cookies();
    server
}

async fn create_test_server() -> TestServer {
    create_test_server_with(StubCatalog::default(), StubTrailer::default()).await
}

fn movie(id: i64, title: &str) -> Movie {
    Movie {
        id: Some(id),
        title: Some(title.to_string()),
        ..Movie::default()
    }
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server().await;
    let response = server.get("/health").await;
    response.assert_status_ok();
    response.assert_json(&json!({ "status": "healthy" }));
}

#[tokio::test]
async fn test_add_review_classifies_and_persists() {
    let server = create_test_server().await;

    let response = server
        .post("/add_review")
        .json(&json!({
            "movie_title": "Inception",
            "review_text": "An amazing masterpiece, absolutely loved it"
        }))
        .await;

    response.assert_status_ok();
    let review: serde_json::Value = response.json();
    assert_eq!(review["movie_title"], "Inception");
    assert_eq!(review["sentiment_label"], "positive");
    assert_eq!(review["word_count"], 6);
    assert!(review["id"].as_i64().is_some());
}

#[tokio::test]
async fn test_add_review_rejects_empty_text() {
    let server = create_test_server().await;

    let response = server
        .post("/add_review")
        .json(&json!({ "movie_title": "Inception", "review_text": "" }))
        .await;

    response.assert_status(axum::http::StatusCode::BAD_REQUEST);
    response.assert_json(&json!({ "error": "No review text" }));
}

#[tokio::test]
async fn test_add_review_defaults_missing_title() {
    let server = create_test_server().await;

    let response = server
        .post("/add_review")
        .json(&json!({ "review_text": "terrible and boring" }))
        .await;

    response.assert_status_ok();
    let review: serde_json::Value = response.json();
    assert_eq!(review["movie_title"], "Unknown");
    assert_eq!(review["sentiment_label"], "negative");
}

#[tokio::test]
async fn test_filter_reviews_by_sentiment_and_wordcount() {
    let server = create_test_server().await;

    server
        .post("/add_review")
        .json(&json!({ "movie_title": "A", "review_text": "amazing wonderful fantastic" }))
        .await
        .assert_status_ok();
    server
        .post("/add_review")
        .json(&json!({ "movie_title": "B", "review_text": "terrible awful boring dull and bad" }))
        .await
        .assert_status_ok();

    let response = server.get("/filter_reviews?sentiment=negative").await;
    response.assert_status_ok();
    let reviews: Vec<serde_json::Value> = response.json();
    assert_eq!(reviews.len(), 1);
    assert_eq!(reviews[0]["movie_title"], "B");

    let response = server.get("/filter_reviews?min_wordcount=4").await;
    response.assert_status_ok();
    let reviews: Vec<serde_json::Value> = response.json();
    assert_eq!(reviews.len(), 1);
    assert_eq!(reviews[0]["movie_title"], "B");

    let response = server
        .get("/filter_reviews?sentiment=positive&min_wordcount=4")
        .await;
    response.assert_status_ok();
    let reviews: Vec<serde_json::Value> = response.json();
    assert!(reviews.is_empty());
}

#[tokio::test]
async fn test_filter_reviews_rejects_bad_wordcount() {
    let server = create_test_server().await;

    let response = server.get("/filter_reviews?min_wordcount=abc").await;
    response.assert_status(axum::http::StatusCode::BAD_REQUEST);
    response.assert_json(&json!({ "error": "Invalid min_wordcount" }));
}

#[tokio::test]
async fn test_delete_review_is_idempotent() {
    let server = create_test_server().await;

    let response = server
        .post("/add_review")
        .json(&json!({ "movie_title": "A", "review_text": "good fun" }))
        .await;
    let review: serde_json::Value = response.json();
    let id = review["id"].as_i64().unwrap();

    let response = server.delete(&format!("/delete_review/{id}")).await;
    response.assert_status_ok();
    response.assert_json(&json!({ "success": true }));

    // Deleting again still succeeds
    let response = server.delete(&format!("/delete_review/{id}")).await;
    response.assert_status_ok();
    response.assert_json(&json!({ "success": true }));

    let reviews: Vec<serde_json::Value> = server.get("/filter_reviews").await.json();
    assert!(reviews.is_empty());
}

#[tokio::test]
async fn test_stats_counts_per_label() {
    let server = create_test_server().await;

    let response = server.get("/api/stats").await;
    response.assert_status_ok();
    response.assert_json(&json!({ "positive": 0, "neutral": 0, "negative": 0 }));

    server
        .post("/add_review")
        .json(&json!({ "movie_title": "A", "review_text": "amazing wonderful" }))
        .await
        .assert_status_ok();
    server
        .post("/add_review")
        .json(&json!({ "movie_title": "B", "review_text": "terrible awful" }))
        .await
        .assert_status_ok();

    let response = server.get("/api/stats").await;
    response.assert_status_ok();
    response.assert_json(&json!({ "positive": 1, "neutral": 0, "negative": 1 }));

    let response = server.get("/api/stats?movie_title=A").await;
    response.assert_status_ok();
    response.assert_json(&json!({ "positive": 1, "neutral": 0, "negative": 0 }));
}

#[tokio::test]
async fn test_wordcloud_renders_svg() {
    let server = create_test_server().await;

    server
        .post("/add_review")
        .json(&json!({ "movie_title": "A", "review_text": "gripping heist thriller" }))
        .await
        .assert_status_ok();

    let response = server.get("/api/wordcloud").await;
    response.assert_status_ok();
    assert_eq!(response.header("content-type"), "image/svg+xml");
    let body = response.text();
    assert!(body.starts_with("<svg"));
    assert!(body.contains(">heist<"));
}

#[tokio::test]
async fn test_export_csv_attachment() {
    let server = create_test_server().await;

    server
        .post("/add_review")
        .json(&json!({ "movie_title": "Inception", "review_text": "good fun" }))
        .await
        .assert_status_ok();

    let response = server.get("/api/export_csv").await;
    response.assert_status_ok();
    assert_eq!(response.header("content-type"), "text/csv");
    assert_eq!(
        response.header("content-disposition"),
        "attachment; filename=\"reviews.csv\""
    );
    let body = response.text();
    assert!(body.starts_with(
        "id,movie_title,review_text,sentiment_label,sentiment_score,word_count,date_created"
    ));
    assert!(body.contains("Inception"));
}

#[tokio::test]
async fn test_search_attaches_trailers() {
    let catalog = StubCatalog {
        movies: vec![movie(1, "Inception")],
        trailer: Some("cat123".to_string()),
        ..StubCatalog::default()
    };
    let server = create_test_server_with(catalog, StubTrailer::default()).await;

    let response = server.get("/search_tmdb?q=inception").await;
    response.assert_status_ok();
    let movies: Vec<serde_json::Value> = response.json();
    assert_eq!(movies.len(), 1);
    assert_eq!(movies[0]["youtube_id"], "cat123");
}

#[tokio::test]
async fn test_search_falls_back_to_video_search_for_trailers() {
    let catalog = StubCatalog {
        movies: vec![movie(1, "Inception")],
        ..StubCatalog::default()
    };
    let trailers = StubTrailer {
        key: Some("yt456".to_string()),
    };
    let server = create_test_server_with(catalog, trailers).await;

    let response = server.get("/search_tmdb?q=inception").await;
    let movies: Vec<serde_json::Value> = response.json();
    assert_eq!(movies[0]["youtube_id"], "yt456");
}

#[tokio::test]
async fn test_filter_movies_by_genre() {
    let mut action = movie(1, "Action Movie");
    action.genre_ids = vec![28];
    let mut drama = movie(2, "Drama Movie");
    drama.genre_ids = vec![18];

    let catalog = StubCatalog {
        movies: vec![action, drama],
        ..StubCatalog::default()
    };
    let server = create_test_server_with(catalog, StubTrailer::default()).await;

    let response = server.get("/filter_movies?genre=28").await;
    response.assert_status_ok();
    let movies: Vec<serde_json::Value> = response.json();
    assert_eq!(movies.len(), 1);
    assert_eq!(movies[0]["title"], "Action Movie");
}

#[tokio::test]
async fn test_filter_movies_non_numeric_rating_drops_everything() {
    let catalog = StubCatalog {
        movies: vec![movie(1, "Inception")],
        ..StubCatalog::default()
    };
    let server = create_test_server_with(catalog, StubTrailer::default()).await;

    let response = server.get("/filter_movies?rating=high").await;
    response.assert_status_ok();
    let movies: Vec<serde_json::Value> = response.json();
    assert!(movies.is_empty());
}

#[tokio::test]
async fn test_movie_detail_not_found() {
    let server = create_test_server().await;

    let response = server.get("/movie/999").await;
    response.assert_status(axum::http::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_movie_detail_assembles_view_and_imports_reviews() {
    let details = MovieDetails {
        id: Some(27205),
        title: Some("Inception".to_string()),
        videos: Some(VideoList {
            results: vec![Video {
                key: "emb789".to_string(),
                site: "YouTube".to_string(),
                video_type: "Trailer".to_string(),
                name: None,
            }],
        }),
        watch_providers: Some(WatchProviders {
            results: [(
                "US".to_string(),
                RegionProviders {
                    link: Some("https://example.com/us".to_string()),
                },
            )]
            .into_iter()
            .collect(),
        }),
        reviews: Some(TmdbReviewList {
            results: vec![TmdbReview {
                author: Some("someone".to_string()),
                content: "A brilliant and gripping film".to_string(),
            }],
        }),
        ..MovieDetails::default()
    };
    let catalog = StubCatalog {
        details: Some(details),
        ..StubCatalog::default()
    };
    let server = create_test_server_with(catalog, StubTrailer::default()).await;

    let response = server.get("/movie/27205").await;
    response.assert_status_ok();
    let view: serde_json::Value = response.json();
    assert_eq!(view["title"], "Inception");
    assert_eq!(view["youtube_id"], "emb789");
    assert_eq!(view["watch_link"], "https://example.com/us");

    let local = view["local_reviews"].as_array().unwrap();
    assert_eq!(local.len(), 1);
    assert_eq!(local[0]["movie_title"], "Inception");
    assert_eq!(local[0]["sentiment_label"], "positive");
}

#[tokio::test]
async fn test_movie_detail_watch_link_search_fallback() {
    let details = MovieDetails {
        id: Some(1),
        title: Some("Inception".to_string()),
        ..MovieDetails::default()
    };
    let catalog = StubCatalog {
        details: Some(details),
        ..StubCatalog::default()
    };
    let server = create_test_server_with(catalog, StubTrailer::default()).await;

    let view: serde_json::Value = server.get("/movie/1").await.json();
    assert_eq!(
        view["watch_link"],
        "https://www.google.com/search?q=watch+Inception"
    );
}

#[tokio::test]
async fn test_recommendations_passthrough() {
    let catalog = StubCatalog {
        recommendations: vec![movie(2, "Interstellar")],
        ..StubCatalog::default()
    };
    let server = create_test_server_with(catalog, StubTrailer::default()).await;

    let response = server.get("/recommendations/1").await;
    response.assert_status_ok();
    let movies: Vec<serde_json::Value> = response.json();
    assert_eq!(movies.len(), 1);
    assert_eq!(movies[0]["title"], "Interstellar");
}

#[tokio::test]
async fn test_genres_passthrough() {
    let catalog = StubCatalog {
        genres: vec![Genre {
            id: 28,
            name: "Action".to_string(),
        }],
        ..StubCatalog::default()
    };
    let server = create_test_server_with(catalog, StubTrailer::default()).await;

    let response = server.get("/genres").await;
    response.assert_status_ok();
    let genres: Vec<serde_json::Value> = response.json();
    assert_eq!(genres[0]["name"], "Action");
}

#[tokio::test]
async fn test_person_detail_with_credits() {
    let catalog = StubCatalog {
        person: Some(PersonDetails {
            id: Some(525),
            name: Some("Christopher Nolan".to_string()),
            ..PersonDetails::default()
        }),
        credits: Some(PersonCredits {
            cast: vec![movie(27205, "Inception")],
        }),
        ..StubCatalog::default()
    };
    let server = create_test_server_with(catalog, StubTrailer::default()).await;

    let response = server.get("/person/525").await;
    response.assert_status_ok();
    let person: serde_json::Value = response.json();
    assert_eq!(person["name"], "Christopher Nolan");
    assert_eq!(person["movie_credits"][0]["title"], "Inception");
}

#[tokio::test]
async fn test_person_not_found() {
    let server = create_test_server().await;

    let response = server.get("/person/999").await;
    response.assert_status(axum::http::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_register_rejects_missing_fields() {
    let server = create_test_server().await;

    let response = server
        .post("/register")
        .json(&json!({ "username": "", "password": "secret" }))
        .await;
    response.assert_status(axum::http::StatusCode::BAD_REQUEST);
    response.assert_json(&json!({ "error": "Username and password required" }));
}

#[tokio::test]
async fn test_register_rejects_duplicate_username() {
    let server = create_test_server().await;

    server
        .post("/register")
        .json(&json!({ "username": "alice", "password": "secret" }))
        .await
        .assert_status_ok();

    let response = server
        .post("/register")
        .json(&json!({ "username": "alice", "password": "other" }))
        .await;
    response.assert_status(axum::http::StatusCode::CONFLICT);
    response.assert_json(&json!({ "error": "Username already exists" }));
}

#[tokio::test]
async fn test_login_rejects_bad_credentials() {
    let server = create_test_server().await;

    server
        .post("/register")
        .json(&json!({ "username": "alice", "password": "secret" }))
        .await
        .assert_status_ok();

    let response = server
        .post("/login")
        .json(&json!({ "username": "alice", "password": "wrong" }))
        .await;
    response.assert_status(axum::http::StatusCode::BAD_REQUEST);
    response.assert_json(&json!({ "error": "Invalid username or password" }));
}

#[tokio::test]
async fn test_watchlist_requires_session_without_erroring() {
    let server = create_test_server().await;

    let response = server.get("/api/watchlist").await;
    response.assert_status_ok();
    response.assert_json(&json!([]));

    let response = server.get("/api/watchlist/check/1").await;
    response.assert_status_ok();
    response.assert_json(&json!({ "in_watchlist": false }));

    let response = server
        .post("/api/watchlist/add")
        .json(&json!({ "movie_id": 1 }))
        .await;
    response.assert_status_ok();
    response.assert_json(&json!({ "success": false, "error": "Login required" }));
}

#[tokio::test]
async fn test_watchlist_flow_with_session() {
    let server = create_test_server().await;

    server
        .post("/register")
        .json(&json!({ "username": "alice", "password": "secret" }))
        .await
        .assert_status_ok();
    server
        .post("/login")
        .json(&json!({ "username": "alice", "password": "secret" }))
        .await
        .assert_status_ok();

    let response = server
        .post("/api/watchlist/add")
        .json(&json!({
            "movie_id": 27205,
            "title": "Inception",
            "poster_path": "/inception.jpg",
            "release_date": "2010-07-15",
            "vote_average": 8.4
        }))
        .await;
    response.assert_status_ok();
    response.assert_json(&json!({ "success": true }));

    // Duplicate add reports success too
    let response = server
        .post("/api/watchlist/add")
        .json(&json!({ "movie_id": 27205, "title": "Inception" }))
        .await;
    response.assert_status_ok();
    response.assert_json(&json!({ "success": true }));

    let response = server.get("/api/watchlist/check/27205").await;
    response.assert_json(&json!({ "in_watchlist": true }));

    let entries: Vec<serde_json::Value> = server.get("/api/watchlist").await.json();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["title"], "Inception");

    let response = server.post("/api/watchlist/remove/27205").await;
    response.assert_status_ok();
    response.assert_json(&json!({ "success": true }));

    let response = server.get("/api/watchlist/check/27205").await;
    response.assert_json(&json!({ "in_watchlist": false }));
}

#[tokio::test]
async fn test_logout_ends_session() {
    let server = create_test_server().await;

    server
        .post("/register")
        .json(&json!({ "username": "alice", "password": "secret" }))
        .await
        .assert_status_ok();
    server
        .post("/login")
        .json(&json!({ "username": "alice", "password": "secret" }))
        .await
        .assert_status_ok();

    let response = server.get("/logout").await;
    response.assert_status_ok();
    response.assert_json(&json!({ "success": true }));

    let response = server
        .post("/api/watchlist/add")
        .json(&json!({ "movie_id": 1 }))
        .await;
    response.assert_json(&json!({ "success": false, "error": "Login required" }));
}
