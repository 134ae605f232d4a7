/// External data provider abstractions
///
/// This module provides a pluggable architecture for the external movie
/// catalog and the video-search fallback. Every provider call is fail-closed:
/// network errors, non-success statuses, and malformed bodies degrade to an
/// empty or null result at this boundary, so callers never see an error path.
use crate::models::{Genre, Movie, MovieDetails, PersonCredits, PersonDetails};

pub mod tmdb;
pub mod youtube;

pub use tmdb::TmdbProvider;
pub use youtube::YoutubeProvider;

/// Trait for the external movie catalog
///
/// Each operation issues one HTTP call bounded by a 10s timeout. A failed call
/// returns `vec![]`/`None` rather than propagating an error.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogProvider: Send + Sync {
    /// List all movie genres
    async fn genres(&self) -> Vec<Genre>;

    /// List popular movies for a page
    async fn popular(&self, page: u32) -> Vec<Movie>;

    /// Search movies by text query; delegates to `popular` when the query is empty
    async fn search(&self, query: &str, page: u32) -> Vec<Movie>;

    /// Fetch full details for one movie with embedded credits, videos,
    /// watch-provider links, and external reviews
    async fn details(&self, movie_id: i64) -> Option<MovieDetails>;

    /// Catalog-provided recommendations for a movie
    async fn recommendations(&self, movie_id: i64) -> Vec<Movie>;

    /// First embedded YouTube trailer key for a movie, if any
    async fn movie_trailer(&self, movie_id: i64) -> Option<String>;

    /// Person biography and metadata
    async fn person(&self, person_id: i64) -> Option<PersonDetails>;

    /// Movies a person is credited in
    async fn person_movie_credits(&self, person_id: i64) -> Option<PersonCredits>;
}

/// Trait for the video-search trailer fallback
///
/// Used only when the catalog yields no trailer for a movie.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait TrailerProvider: Send + Sync {
    /// First video id matching the query, or `None` when no key is configured,
    /// no results are returned, or the call fails
    async fn find_trailer(&self, query: &str) -> Option<String>;
}
