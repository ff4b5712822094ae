//! Application configuration management

use std::env;

use anyhow::{Context, Result, bail};
use url::Url;

const DEFAULT_BACKEND_URL: &str = "http://localhost:3001";
const DEFAULT_YOUTUBE_API_URL: &str = "https://www.googleapis.com/youtube/v3/search";
const DEFAULT_FRONTEND_URL: &str = "http://localhost:8081";

/// Application configuration loaded from environment variables.
///
/// Built once at startup and handed to the components that need it; nothing
/// downstream reads the environment directly.
#[derive(Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// MongoDB connection string
    pub mongo_uri: String,

    /// Database name. Falls back to the one named in the URI, then `kidstube`.
    pub mongo_database: Option<String>,

    /// Shared HS256 secret used to verify bearer tokens
    pub jwt_secret: String,

    /// Base URL of the sibling REST backend (countries endpoint)
    pub backend_url: Url,

    /// YouTube Data API key
    pub youtube_api_key: Option<String>,

    /// YouTube search endpoint
    pub youtube_api_url: Url,

    /// Origins permitted for cross-origin calls
    pub allowed_origins: Vec<String>,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("port", &self.port)
            .field("mongo_uri", &"...")
            .field("mongo_database", &self.mongo_database)
            .field("jwt_secret", &"...")
            .field("backend_url", &self.backend_url.as_str())
            .field("youtube_api_key", &self.youtube_api_key.as_ref().map(|_| "..."))
            .field("youtube_api_url", &self.youtube_api_url.as_str())
            .field("allowed_origins", &self.allowed_origins)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable lookup.
    ///
    /// Blank values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let Some(mongo_uri) = var("MONGO_URI") else {
            bail!("MONGO_URI is required");
        };
        let Some(jwt_secret) = var("JWT_SECRET") else {
            bail!("JWT_SECRET is required");
        };

        let port = match var("PORT") {
            Some(port) => port.parse().context("Invalid PORT")?,
            None => 4000,
        };

        let backend_url = Url::parse(&var("BACKEND_URL").unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string()))
            .context("Invalid BACKEND_URL")?;

        let youtube_api_url = Url::parse(
            &var("YOUTUBE_API_URL").unwrap_or_else(|| DEFAULT_YOUTUBE_API_URL.to_string()),
        )
        .context("Invalid YOUTUBE_API_URL")?;

        let allowed_origins = var("ALLOWED_ORIGINS")
            .or_else(|| var("FRONTEND_URL"))
            .unwrap_or_else(|| DEFAULT_FRONTEND_URL.to_string())
            .split(',')
            .map(|origin| origin.trim().trim_end_matches('/').to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        Ok(Self {
            port,
            mongo_uri,
            mongo_database: var("MONGO_DATABASE"),
            jwt_secret,
            backend_url,
            youtube_api_key: var("YOUTUBE_API_KEY"),
            youtube_api_url,
            allowed_origins,
        })
    }
}
