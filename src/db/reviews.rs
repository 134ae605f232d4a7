/// Review persistence
///
/// Stores user-submitted and auto-imported reviews with their sentiment
/// verdicts. Retrieval supports conjunctive filters, aggregate counts, and a
/// full export in insertion order.
use sqlx::SqlitePool;

use crate::error::AppResult;
use crate::models::Review;
use crate::services::sentiment::SentimentAnalysis;

/// Optional conjunctive filters for review listing
#[derive(Debug, Default, Clone)]
pub struct ReviewFilters {
    pub sentiment: Option<String>,
    pub min_word_count: Option<i64>,
}

/// Per-label review counts, zero-filled for absent labels
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct SentimentCounts {
    pub positive: i64,
    pub neutral: i64,
    pub negative: i64,
}

const REVIEW_COLUMNS: &str =
    "id, movie_title, review_text, sentiment_label, sentiment_score, word_count, date_created";

#[derive(Clone)]
pub struct ReviewStore {
    pool: SqlitePool,
}

impl ReviewStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Inserts one review; `date_created` is defaulted by the database.
    pub async fn insert(
        &self,
        movie_title: &str,
        review_text: &str,
        analysis: &SentimentAnalysis,
    ) -> AppResult<Review> {
        let result = sqlx::query(
            "INSERT INTO reviews (movie_title, review_text, sentiment_label, sentiment_score, word_count) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(movie_title)
        .bind(review_text)
        .bind(analysis.label.as_str())
        .bind(analysis.score)
        .bind(analysis.word_count as i64)
        .execute(&self.pool)
        .await?;

        let review = sqlx::query_as::<_, Review>(&format!(
            "SELECT {REVIEW_COLUMNS} FROM reviews WHERE id = ?"
        ))
        .bind(result.last_insert_rowid())
        .fetch_one(&self.pool)
        .await?;

        Ok(review)
    }

    /// Lists reviews matching the filters, ordered by creation date.
    ///
    /// Any `order` value other than `asc`/`desc` (case-insensitive) is
    /// coerced to `desc`.
    pub async fn list(&self, filters: &ReviewFilters, order: &str) -> AppResult<Vec<Review>> {
        let direction = match order.to_lowercase().as_str() {
            "asc" => "ASC",
            _ => "DESC",
        };

        let mut sql = format!("SELECT {REVIEW_COLUMNS} FROM reviews");
        let mut where_clauses: Vec<&str> = Vec::new();
        if filters.sentiment.is_some() {
            where_clauses.push("sentiment_label = ?");
        }
        if filters.min_word_count.is_some() {
            where_clauses.push("word_count >= ?");
        }
        if !where_clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&where_clauses.join(" AND "));
        }
        // id tiebreaker keeps same-second inserts in a stable order
        sql.push_str(&format!(" ORDER BY date_created {direction}, id {direction}"));

        let mut query = sqlx::query_as::<_, Review>(&sql);
        if let Some(sentiment) = &filters.sentiment {
            query = query.bind(sentiment);
        }
        if let Some(min_word_count) = filters.min_word_count {
            query = query.bind(min_word_count);
        }

        Ok(query.fetch_all(&self.pool).await?)
    }

    /// Reviews for one exact title, newest first
    pub async fn list_by_title(&self, movie_title: &str) -> AppResult<Vec<Review>> {
        let reviews = sqlx::query_as::<_, Review>(&format!(
            "SELECT {REVIEW_COLUMNS} FROM reviews WHERE movie_title = ? \
             ORDER BY date_created DESC, id DESC"
        ))
        .bind(movie_title)
        .fetch_all(&self.pool)
        .await?;

        Ok(reviews)
    }

    /// Deletes a review; deleting an absent id is not an error.
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        sqlx::query("DELETE FROM reviews WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Per-label counts, optionally restricted to one exact title
    pub async fn sentiment_counts(&self, title_filter: Option<&str>) -> AppResult<SentimentCounts> {
        let sql = match title_filter {
            Some(_) => {
                "SELECT sentiment_label, COUNT(*) FROM reviews WHERE movie_title = ? \
                 GROUP BY sentiment_label"
            }
            None => "SELECT sentiment_label, COUNT(*) FROM reviews GROUP BY sentiment_label",
        };

        let mut query = sqlx::query_as::<_, (String, i64)>(sql);
        if let Some(title) = title_filter {
            query = query.bind(title);
        }
        let rows = query.fetch_all(&self.pool).await?;

        let mut counts = SentimentCounts::default();
        for (label, count) in rows {
            match label.as_str() {
                "positive" => counts.positive = count,
                "neutral" => counts.neutral = count,
                "negative" => counts.negative = count,
                _ => {}
            }
        }

        Ok(counts)
    }

    /// All reviews in insertion order
    pub async fn export_all(&self) -> AppResult<Vec<Review>> {
        let reviews = sqlx::query_as::<_, Review>(&format!(
            "SELECT {REVIEW_COLUMNS} FROM reviews ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(reviews)
    }
}
