//! Catalog browsing and trending searches.

use std::sync::Arc;

use seatflix_core::Result;
use seatflix_core::catalog::{Media, TrendingEntry, TrendingRepository};
use seatflix_core::config::ClientConfig;
use seatflix_interaction::TmdbClient;

/// One search as the view renders it.
#[derive(Debug, Clone)]
pub struct SearchResults {
    pub query: String,
    pub results: Vec<Media>,
}

impl SearchResults {
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

#[derive(Clone)]
pub struct CatalogUseCase {
    tmdb: TmdbClient,
    trending: Arc<dyn TrendingRepository>,
    image_base_url: String,
    trending_limit: usize,
}

impl CatalogUseCase {
    pub fn new(
        tmdb: TmdbClient,
        trending: Arc<dyn TrendingRepository>,
        image_base_url: impl Into<String>,
        trending_limit: usize,
    ) -> Self {
        Self {
            tmdb,
            trending,
            image_base_url: image_base_url.into(),
            trending_limit,
        }
    }

    pub fn from_config(
        tmdb: TmdbClient,
        trending: Arc<dyn TrendingRepository>,
        config: &ClientConfig,
    ) -> Self {
        Self::new(
            tmdb,
            trending,
            config.tmdb_image_base_url.clone(),
            config.trending_limit,
        )
    }

    /// Searches by title, or lists popular movies for a blank query.
    pub async fn search(&self, query: &str) -> Result<SearchResults> {
        let query = query.trim();
        let page = if query.is_empty() {
            self.tmdb.discover_movies().await?
        } else {
            self.tmdb.search_movies(query).await?
        };

        if let Some(first) = page.results.first().filter(|_| !query.is_empty()) {
            let poster_url = first.poster_url(&self.image_base_url);
            if let Err(err) = self.trending.record_search(query, first, &poster_url).await {
                tracing::warn!(query, error = %err, "[Catalog] failed to record search");
            }
        }

        Ok(SearchResults {
            query: query.to_string(),
            results: page.results,
        })
    }

    /// Most searched terms, highest count first.
    pub async fn trending(&self) -> Result<Vec<TrendingEntry>> {
        self.trending.top(self.trending_limit).await
    }

    pub fn poster_url(&self, media: &Media) -> String {
        media.poster_url(&self.image_base_url)
    }
}
