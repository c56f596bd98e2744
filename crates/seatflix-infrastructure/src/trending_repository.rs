//! File-backed trending search counts.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use seatflix_core::Result;
use seatflix_core::catalog::{Media, TrendingEntry, TrendingRepository};
use serde::{Deserialize, Serialize};

use crate::paths::{SeatflixPaths, ServiceType};
use crate::storage::AtomicTomlFile;

#[derive(Debug, Default, Serialize, Deserialize)]
struct TrendingFile {
    #[serde(default)]
    entries: Vec<TrendingEntry>,
}

/// Trending repository persisted as `trending.toml`.
pub struct FileTrendingRepository {
    file: AtomicTomlFile<TrendingFile>,
}

impl FileTrendingRepository {
    pub fn new(base_path: Option<&Path>) -> Result<Self> {
        let path = SeatflixPaths::new(base_path)
            .get_path(ServiceType::Trending)?
            .into_path_buf();
        Ok(Self::with_path(path))
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self {
            file: AtomicTomlFile::new(path),
        }
    }
}

#[async_trait]
impl TrendingRepository for FileTrendingRepository {
    async fn record_search(&self, term: &str, media: &Media, poster_url: &str) -> Result<()> {
        let count = self.file.update(TrendingFile::default(), |data| {
            match data
                .entries
                .iter_mut()
                .find(|entry| entry.search_term == term)
            {
                Some(entry) => {
                    entry.count += 1;
                    entry.count
                }
                None => {
                    data.entries.push(TrendingEntry {
                        search_term: term.to_string(),
                        count: 1,
                        movie_id: media.id,
                        poster_url: poster_url.to_string(),
                        title: media.title.clone(),
                    });
                    1
                }
            }
        })?;
        tracing::debug!(term, count, "[Trending] search recorded");
        Ok(())
    }

    async fn top(&self, limit: usize) -> Result<Vec<TrendingEntry>> {
        let mut entries = self.file.load()?.unwrap_or_default().entries;
        // Stable sort keeps first-seen order among equal counts.
        entries.sort_by(|a, b| b.count.cmp(&a.count));
        entries.truncate(limit);
        Ok(entries)
    }
}
