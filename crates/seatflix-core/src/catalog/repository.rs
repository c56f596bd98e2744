//! Trending repository trait.

use async_trait::async_trait;

use super::model::{Media, TrendingEntry};
use crate::error::Result;

/// Records search terms and ranks them by use.
#[async_trait]
pub trait TrendingRepository: Send + Sync {
    /// Counts one more search for `term`.
    ///
    /// The first search for a term also stores the title it surfaced and that
    /// title's poster URL; later searches only bump the count.
    async fn record_search(&self, term: &str, media: &Media, poster_url: &str) -> Result<()>;

    /// The `limit` most searched entries, most searched first.
    async fn top(&self, limit: usize) -> Result<Vec<TrendingEntry>>;
}
