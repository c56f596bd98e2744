//! Client configuration model.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SeatflixError};

pub const DEFAULT_TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_TMDB_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";
pub const DEFAULT_PLAYER_BASE_URL: &str = "https://player.vidsrc.co/embed";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_TRENDING_LIMIT: usize = 5;
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Settings for the client, persisted as `config.toml`.
///
/// Every field has a default so a partial file still loads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// SeatFlix backend base URL, e.g. `http://localhost:8080`.
    pub api_base_url: Option<String>,
    /// TMDB v4 read-access token.
    pub tmdb_api_key: Option<String>,
    pub tmdb_base_url: String,
    pub tmdb_image_base_url: String,
    pub player_base_url: String,
    pub request_timeout_secs: u64,
    pub trending_limit: usize,
    pub log_level: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: None,
            tmdb_api_key: None,
            tmdb_base_url: DEFAULT_TMDB_BASE_URL.to_string(),
            tmdb_image_base_url: DEFAULT_TMDB_IMAGE_BASE_URL.to_string(),
            player_base_url: DEFAULT_PLAYER_BASE_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            trending_limit: DEFAULT_TRENDING_LIMIT,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl ClientConfig {
    /// The backend base URL without a trailing slash.
    pub fn api_base_url(&self) -> Result<&str> {
        self.api_base_url
            .as_deref()
            .map(|url| url.trim_end_matches('/'))
            .filter(|url| !url.is_empty())
            .ok_or_else(|| {
                SeatflixError::config(
                    "api_base_url is not set (config.toml or SEATFLIX_API_URL)",
                )
            })
    }

    pub fn tmdb_api_key(&self) -> Result<&str> {
        self.tmdb_api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                SeatflixError::config(
                    "tmdb_api_key is not set (config.toml or SEATFLIX_TMDB_API_KEY)",
                )
            })
    }
}
