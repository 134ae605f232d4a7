use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use sha2::{Digest, Sha512};
use sqlx::SqlitePool;
use tokio::sync::RwLock;

use crate::config::Config;
use crate::db::{ReviewStore, UserStore, WatchlistStore};
use crate::services::providers::{CatalogProvider, TmdbProvider, TrailerProvider, YoutubeProvider};

/// Shared application state
///
/// Providers are held behind trait objects so tests can substitute stubs.
/// Session tokens live in memory; restarting the process logs everyone out.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn CatalogProvider>,
    pub trailers: Arc<dyn TrailerProvider>,
    pub reviews: ReviewStore,
    pub watchlist: WatchlistStore,
    pub users: UserStore,
    pub sessions: Arc<RwLock<HashMap<String, i64>>>,
    cookie_key: Key,
}

impl AppState {
    /// Creates application state with the real external providers
    pub fn new(config: &Config, pool: SqlitePool) -> Self {
        let catalog = Arc::new(TmdbProvider::new(
            config.tmdb_api_key.clone(),
            config.tmdb_api_url.clone(),
        ));
        let trailers = Arc::new(YoutubeProvider::new(
            config.youtube_api_key.clone(),
            config.youtube_api_url.clone(),
        ));

        Self::with_providers(catalog, trailers, pool, &config.session_secret)
    }

    /// Creates application state around explicit provider implementations
    pub fn with_providers(
        catalog: Arc<dyn CatalogProvider>,
        trailers: Arc<dyn TrailerProvider>,
        pool: SqlitePool,
        session_secret: &str,
    ) -> Self {
        Self {
            catalog,
            trailers,
            reviews: ReviewStore::new(pool.clone()),
            watchlist: WatchlistStore::new(pool.clone()),
            users: UserStore::new(pool),
            sessions: Arc::new(RwLock::new(HashMap::new())),
            cookie_key: derive_cookie_key(session_secret),
        }
    }
}

/// Stretches the configured secret into the 64 bytes the signing key requires
fn derive_cookie_key(secret: &str) -> Key {
    let digest = Sha512::digest(secret.as_bytes());
    Key::from(&digest)
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}
