/// Movie-detail assembly
///
/// Combines one catalog detail payload with local reviews, a resolved trailer
/// id, and a watch link that is never null. On the first view of a title with
/// no local reviews, embedded external reviews are imported into the store.
use std::sync::Arc;

use serde::Serialize;

use crate::db::ReviewStore;
use crate::error::AppResult;
use crate::models::{MovieDetails, Review};
use crate::services::providers::{CatalogProvider, TrailerProvider};
use crate::services::sentiment;

/// How many embedded external reviews are considered for import
const AUTO_IMPORT_LIMIT: usize = 5;

/// Fully assembled detail payload for one movie
#[derive(Debug, Serialize)]
pub struct MovieDetailView {
    #[serde(flatten)]
    pub details: MovieDetails,
    pub youtube_id: Option<String>,
    pub watch_link: String,
    pub local_reviews: Vec<Review>,
}

/// Assembles the detail view for a movie id.
///
/// Returns `Ok(None)` when the catalog has no details for the id; storage
/// failures propagate.
pub async fn assemble(
    catalog: Arc<dyn CatalogProvider>,
    resolver: Arc<dyn TrailerProvider>,
    reviews: &ReviewStore,
    movie_id: i64,
) -> AppResult<Option<MovieDetailView>> {
    let Some(details) = catalog.details(movie_id).await else {
        return Ok(None);
    };
    let title = details.display_title().to_string();

    let mut local_reviews = reviews.list_by_title(&title).await?;

    let youtube_id = match embedded_trailer(&details) {
        Some(key) => Some(key),
        None => resolver.find_trailer(&format!("{title} trailer")).await,
    };

    let watch_link = watch_link(&details, &title);

    if local_reviews.is_empty() {
        if import_embedded_reviews(&details, &title, reviews).await? {
            local_reviews = reviews.list_by_title(&title).await?;
        }
    }

    Ok(Some(MovieDetailView {
        details,
        youtube_id,
        watch_link,
        local_reviews,
    }))
}

/// First embedded YouTube trailer key, if the detail payload carries one
fn embedded_trailer(details: &MovieDetails) -> Option<String> {
    details
        .videos
        .as_ref()?
        .results
        .iter()
        .find(|v| v.video_type == "Trailer" && v.site == "YouTube")
        .map(|v| v.key.clone())
}

/// Watch link with a universal fallback: US region, then the first region
/// carrying a link, then a search-engine query on the title.
fn watch_link(details: &MovieDetails, title: &str) -> String {
    if let Some(providers) = &details.watch_providers {
        if let Some(link) = providers.results.get("US").and_then(|r| r.link.clone()) {
            return link;
        }
        if let Some(link) = providers.results.values().find_map(|r| r.link.clone()) {
            return link;
        }
    }

    format!(
        "https://www.google.com/search?q=watch+{}",
        urlencoding::encode(title)
    )
}

/// Imports up to `AUTO_IMPORT_LIMIT` embedded reviews with non-empty content.
///
/// Returns whether anything was inserted.
async fn import_embedded_reviews(
    details: &MovieDetails,
    title: &str,
    reviews: &ReviewStore,
) -> AppResult<bool> {
    let Some(embedded) = &details.reviews else {
        return Ok(false);
    };

    let mut imported = false;
    for external in embedded.results.iter().take(AUTO_IMPORT_LIMIT) {
        if external.content.is_empty() {
            continue;
        }
        let analysis = sentiment::analyze(&external.content);
        reviews.insert(title, &external.content, &analysis).await?;
        imported = true;
    }

    if imported {
        tracing::info!(title = %title, "Imported embedded reviews for first view");
    }

    Ok(imported)
}
