use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// SQLite database connection URL
    #[serde(default = "default_database_url")]
    pub database_url: String,

    /// TMDB API key; when absent, every catalog call fails closed to empty
    #[serde(default)]
    pub tmdb_api_key: Option<String>,

    /// TMDB API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// YouTube Data API key; when absent, trailer fallback search is disabled
    #[serde(default)]
    pub youtube_api_key: Option<String>,

    /// YouTube search endpoint URL
    #[serde(default = "default_youtube_api_url")]
    pub youtube_api_url: String,

    /// Secret used to derive the session cookie signing key
    #[serde(default = "default_session_secret")]
    pub session_secret: String,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_database_url() -> String {
    "sqlite://reviews.db?mode=rwc".to_string()
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_youtube_api_url() -> String {
    "https://www.googleapis.com/youtube/v3/search".to_string()
}

fn default_session_secret() -> String {
    "cinelog-dev-secret-change-me".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }
}
