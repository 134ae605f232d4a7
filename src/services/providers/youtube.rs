/// YouTube trailer resolver
///
/// Fallback for movies whose catalog payload carries no trailer. One search
/// call per lookup, bounded by an 8s timeout. Absence of the API key silently
/// disables the fallback; failures never reach the caller.
use std::time::Duration;

use reqwest::Client as HttpClient;
use serde::Deserialize;

use crate::services::providers::TrailerProvider;

/// Upper bound on a single video search call
const SEARCH_TIMEOUT: Duration = Duration::from_secs(8);

#[derive(Clone)]
pub struct YoutubeProvider {
    http_client: HttpClient,
    api_key: Option<String>,
    api_url: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: SearchItemId,
}

#[derive(Debug, Deserialize)]
struct SearchItemId {
    #[serde(rename = "videoId", default)]
    video_id: Option<String>,
}

impl YoutubeProvider {
    pub fn new(api_key: Option<String>, api_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url,
        }
    }
}

#[async_trait::async_trait]
impl TrailerProvider for YoutubeProvider {
    async fn find_trailer(&self, query: &str) -> Option<String> {
        let api_key = self.api_key.as_deref()?;

        let response = match self
            .http_client
            .get(&self.api_url)
            .query(&[
                ("part", "snippet"),
                ("q", query),
                ("key", api_key),
                ("maxResults", "1"),
                ("type", "video"),
            ])
            .timeout(SEARCH_TIMEOUT)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(query = %query, error = %e, "Trailer search request failed");
                return None;
            }
        };

        if !response.status().is_success() {
            tracing::warn!(
                query = %query,
                status = %response.status(),
                "Trailer search returned non-success status"
            );
            return None;
        }

        let body = match response.json::<SearchResponse>().await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(query = %query, error = %e, "Failed to parse trailer search response");
                return None;
            }
        };

        body.items.into_iter().next().and_then(|item| item.id.video_id)
    }
}
