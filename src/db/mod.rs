/// Storage layer backed by SQLite
///
/// One pool shared across the app. The schema is created on startup so a
/// fresh database file works without a separate migration step.
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};

pub mod reviews;
pub mod users;
pub mod watchlist;

pub use reviews::ReviewStore;
pub use users::UserStore;
pub use watchlist::WatchlistStore;

/// Creates a SQLite connection pool
///
/// Establishes a pool of database connections for efficient reuse.
/// The pool automatically manages connection lifecycle and limits.
pub async fn create_pool(database_url: &str) -> anyhow::Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;

    init_schema(&pool).await?;

    Ok(pool)
}

/// Creates all tables if they do not exist yet
pub async fn init_schema(pool: &SqlitePool) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS reviews (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            movie_title TEXT NOT NULL,
            review_text TEXT NOT NULL,
            sentiment_label TEXT,
            sentiment_score REAL,
            word_count INTEGER DEFAULT 0,
            date_created TIMESTAMP DEFAULT CURRENT_TIMESTAMP
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS watchlist (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL,
            movie_id INTEGER NOT NULL,
            title TEXT,
            poster_path TEXT,
            release_date TEXT,
            vote_average REAL,
            UNIQUE(user_id, movie_id)
        );
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

#[cfg(test)]
pub async fn test_pool() -> SqlitePool {
    // One connection only: every pooled connection to `sqlite::memory:` would
    // otherwise open its own empty database.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory database");
    init_schema(&pool).await.expect("schema");
    pool
}
