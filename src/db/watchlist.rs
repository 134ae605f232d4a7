/// Per-user watchlist persistence
///
/// Each row carries a denormalized catalog snapshot taken at add time. The
/// (user_id, movie_id) pair is unique; re-adding an existing pair is a
/// silent success.
use sqlx::SqlitePool;

use crate::error::AppResult;
use crate::models::{WatchlistEntry, WatchlistSnapshot};

#[derive(Clone)]
pub struct WatchlistStore {
    pool: SqlitePool,
}

impl WatchlistStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Adds a movie to the user's watchlist; a duplicate pair is ignored.
    pub async fn add(&self, user_id: i64, snapshot: &WatchlistSnapshot) -> AppResult<()> {
        sqlx::query(
            "INSERT OR IGNORE INTO watchlist \
             (user_id, movie_id, title, poster_path, release_date, vote_average) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(user_id)
        .bind(snapshot.movie_id)
        .bind(&snapshot.title)
        .bind(&snapshot.poster_path)
        .bind(&snapshot.release_date)
        .bind(snapshot.vote_average)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Removes a movie from the user's watchlist; absence is not an error.
    pub async fn remove(&self, user_id: i64, movie_id: i64) -> AppResult<()> {
        sqlx::query("DELETE FROM watchlist WHERE user_id = ? AND movie_id = ?")
            .bind(user_id)
            .bind(movie_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// The user's watchlist, newest first
    pub async fn list(&self, user_id: i64) -> AppResult<Vec<WatchlistEntry>> {
        let entries = sqlx::query_as::<_, WatchlistEntry>(
            "SELECT id, user_id, movie_id, title, poster_path, release_date, vote_average \
             FROM watchlist WHERE user_id = ? ORDER BY id DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    /// Whether the user has the movie on their watchlist
    pub async fn contains(&self, user_id: i64, movie_id: i64) -> AppResult<bool> {
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM watchlist WHERE user_id = ? AND movie_id = ?)",
        )
        .bind(user_id)
        .bind(movie_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }
}
