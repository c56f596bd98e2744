//! Catalog queries against the TMDB API.
//!
//! Requests bypass `ApiClient`: a rejected TMDB key must never end the
//! SeatFlix session.

use std::sync::Arc;

use seatflix_core::catalog::MediaPage;
use seatflix_core::config::ClientConfig;
use seatflix_core::http::{AUTHORIZATION_HEADER, ApiRequest, HttpTransport, bearer};
use seatflix_core::{Result, SeatflixError};

#[derive(Clone)]
pub struct TmdbClient {
    transport: Arc<dyn HttpTransport>,
    base_url: String,
    api_key: Option<String>,
}

impl TmdbClient {
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        base_url: impl Into<String>,
        api_key: Option<String>,
    ) -> Self {
        Self {
            transport,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.filter(|key| !key.trim().is_empty()),
        }
    }

    pub fn from_config(transport: Arc<dyn HttpTransport>, config: &ClientConfig) -> Self {
        Self::new(transport, config.tmdb_base_url.clone(), config.tmdb_api_key.clone())
    }

    /// Full-text movie search.
    pub async fn search_movies(&self, query: &str) -> Result<MediaPage> {
        self.get_page(&format!("search/movie?query={}", urlencoding::encode(query)))
            .await
    }

    /// Popular movies, used when there is no query.
    pub async fn discover_movies(&self) -> Result<MediaPage> {
        self.get_page("discover/movie?sort_by=popularity.desc").await
    }

    async fn get_page(&self, path_and_query: &str) -> Result<MediaPage> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            SeatflixError::config("tmdb_api_key is not set (config.toml or SEATFLIX_TMDB_API_KEY)")
        })?;

        let request = ApiRequest::get(format!("{}/{}", self.base_url, path_and_query))
            .with_header("accept", "application/json")
            .with_header(AUTHORIZATION_HEADER, bearer(api_key));

        let response = self.transport.send(request).await?;
        if !response.is_success() {
            tracing::warn!(status = response.status, "[Tmdb] request failed");
            return Err(SeatflixError::Http {
                status: response.status,
                body: response.text(),
            });
        }

        let page: MediaPage = response.json()?;
        tracing::debug!(results = page.results.len(), "[Tmdb] page received");
        Ok(page)
    }
}
