use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A movie record as returned by catalog list-style endpoints.
///
/// The catalog is loosely typed: every field may be absent, and list responses
/// for TV-style content use `name`/`first_air_date` in place of
/// `title`/`release_date`. Fields default rather than fail deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub genre_ids: Vec<i64>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub first_air_date: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    /// Attached downstream by the trailer lookup; never present in catalog responses
    #[serde(default)]
    pub youtube_id: Option<String>,
}

impl Movie {
    /// Display title, preferring `title` over `name`
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or("")
    }

    /// Release date, falling back to `first_air_date`
    pub fn date(&self) -> Option<&str> {
        self.release_date
            .as_deref()
            .filter(|d| !d.is_empty())
            .or_else(|| self.first_air_date.as_deref().filter(|d| !d.is_empty()))
    }
}

/// Wrapper for catalog list responses (`{"results": [...]}`)
#[derive(Debug, Deserialize)]
pub struct MovieListResponse {
    #[serde(default)]
    pub results: Vec<Movie>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Genre {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct GenreListResponse {
    #[serde(default)]
    pub genres: Vec<Genre>,
}

/// Full movie details with embedded sub-resources, fetched in one call via
/// `append_to_response=credits,videos,watch/providers,reviews`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MovieDetails {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub runtime: Option<i64>,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub credits: Option<Credits>,
    #[serde(default)]
    pub videos: Option<VideoList>,
    #[serde(default, rename = "watch/providers")]
    pub watch_providers: Option<WatchProviders>,
    #[serde(default)]
    pub reviews: Option<TmdbReviewList>,
}

impl MovieDetails {
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or("")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Credits {
    #[serde(default)]
    pub cast: Vec<CastMember>,
    #[serde(default)]
    pub crew: Vec<CrewMember>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CastMember {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub character: Option<String>,
    #[serde(default)]
    pub profile_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrewMember {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub job: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VideoList {
    #[serde(default)]
    pub results: Vec<Video>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Video {
    pub key: String,
    #[serde(default)]
    pub site: String,
    #[serde(rename = "type", default)]
    pub video_type: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// Watch-provider links keyed by region code (e.g. "US").
///
/// Ordered map so "first available region" is deterministic.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WatchProviders {
    #[serde(default)]
    pub results: BTreeMap<String, RegionProviders>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegionProviders {
    #[serde(default)]
    pub link: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TmdbReviewList {
    #[serde(default)]
    pub results: Vec<TmdbReview>,
}

/// An externally sourced review embedded in a detail response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TmdbReview {
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersonDetails {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub biography: Option<String>,
    #[serde(default)]
    pub birthday: Option<String>,
    #[serde(default)]
    pub place_of_birth: Option<String>,
    #[serde(default)]
    pub profile_path: Option<String>,
    #[serde(default)]
    pub known_for_department: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersonCredits {
    #[serde(default)]
    pub cast: Vec<Movie>,
}
