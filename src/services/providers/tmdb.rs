/// TMDB catalog gateway
///
/// Wraps the external movie catalog API. Every call carries the configured API
/// key and `language=en-US`, is bounded by a 10s timeout, and fails closed:
/// a missing key, network failure, non-2xx status, or malformed body yields an
/// empty result rather than an error.
use std::time::Duration;

use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;

use crate::models::movie::VideoList;
use crate::models::{
    Genre, GenreListResponse, Movie, MovieDetails, MovieListResponse, PersonCredits,
    PersonDetails,
};
use crate::services::providers::CatalogProvider;

/// Upper bound on a single catalog call
const CATALOG_TIMEOUT: Duration = Duration::from_secs(10);

/// Sub-resources embedded into a single detail call
const DETAIL_APPENDS: &str = "credits,videos,watch/providers,reviews";

#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    api_key: Option<String>,
    api_url: String,
}

impl TmdbProvider {
    pub fn new(api_key: Option<String>, api_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url,
        }
    }

    /// Issues one GET against the catalog and deserializes the JSON body.
    ///
    /// Returns `None` on any failure; the failure is logged and absorbed here
    /// so callers see only the empty sentinel.
    async fn get_json<T: DeserializeOwned>(&self, path: &str, params: &[(&str, &str)]) -> Option<T> {
        let Some(api_key) = self.api_key.as_deref() else {
            tracing::warn!(path = %path, "Catalog API key not configured, failing closed");
            return None;
        };

        let url = format!("{}{}", self.api_url, path);
        let mut query: Vec<(&str, &str)> = vec![("api_key", api_key), ("language", "en-US")];
        query.extend_from_slice(params);

        let response = match self
            .http_client
            .get(&url)
            .query(&query)
            .timeout(CATALOG_TIMEOUT)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(path = %path, error = %e, "Catalog request failed");
                return None;
            }
        };

        if !response.status().is_success() {
            tracing::warn!(
                path = %path,
                status = %response.status(),
                "Catalog returned non-success status"
            );
            return None;
        }

        match response.json::<T>().await {
            Ok(body) => Some(body),
            Err(e) => {
                tracing::warn!(path = %path, error = %e, "Failed to parse catalog response");
                None
            }
        }
    }
}

#[async_trait::async_trait]
impl CatalogProvider for TmdbProvider {
    async fn genres(&self) -> Vec<Genre> {
        self.get_json::<GenreListResponse>("/genre/movie/list", &[])
            .await
            .map(|r| r.genres)
            .unwrap_or_default()
    }

    async fn popular(&self, page: u32) -> Vec<Movie> {
        let page = page.to_string();
        let movies = self
            .get_json::<MovieListResponse>("/movie/popular", &[("page", page.as_str())])
            .await
            .map(|r| r.results)
            .unwrap_or_default();

        tracing::info!(results = movies.len(), page = %page, "Popular listing fetched");
        movies
    }

    async fn search(&self, query: &str, page: u32) -> Vec<Movie> {
        if query.is_empty() {
            return self.popular(page).await;
        }

        let page = page.to_string();
        let movies = self
            .get_json::<MovieListResponse>(
                "/search/movie",
                &[
                    ("query", query),
                    ("page", page.as_str()),
                    ("include_adult", "false"),
                ],
            )
            .await
            .map(|r| r.results)
            .unwrap_or_default();

        tracing::info!(query = %query, results = movies.len(), "Movie search completed");
        movies
    }

    async fn details(&self, movie_id: i64) -> Option<MovieDetails> {
        self.get_json::<MovieDetails>(
            &format!("/movie/{}", movie_id),
            &[("append_to_response", DETAIL_APPENDS)],
        )
        .await
    }

    async fn recommendations(&self, movie_id: i64) -> Vec<Movie> {
        self.get_json::<MovieListResponse>(&format!("/movie/{}/recommendations", movie_id), &[])
            .await
            .map(|r| r.results)
            .unwrap_or_default()
    }

    async fn movie_trailer(&self, movie_id: i64) -> Option<String> {
        let videos = self
            .get_json::<VideoList>(&format!("/movie/{}/videos", movie_id), &[])
            .await?;

        videos
            .results
            .into_iter()
            .find(|v| v.video_type == "Trailer" && v.site == "YouTube")
            .map(|v| v.key)
    }

    async fn person(&self, person_id: i64) -> Option<PersonDetails> {
        self.get_json::<PersonDetails>(&format!("/person/{}", person_id), &[])
            .await
    }

    async fn person_movie_credits(&self, person_id: i64) -> Option<PersonCredits> {
        self.get_json::<PersonCredits>(&format!("/person/{}/movie_credits", person_id), &[])
            .await
    }
}
