use serde::{Deserialize, Serialize};

/// A registered user; the password hash never leaves the storage layer
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
}

/// A saved watchlist row with its denormalized catalog snapshot
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, sqlx::FromRow)]
pub struct WatchlistEntry {
    pub id: i64,
    pub user_id: i64,
    pub movie_id: i64,
    pub title: Option<String>,
    pub poster_path: Option<String>,
    pub release_date: Option<String>,
    pub vote_average: Option<f64>,
}

/// Catalog fields captured at add time; not refreshed if the catalog changes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchlistSnapshot {
    pub movie_id: i64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
}
