//! Catalog domain module.
//!
//! # Module Structure
//!
//! - `model`: TMDB media entries and trending entries
//! - `repository`: trending search-count repository trait

mod model;
mod repository;

// Re-export public API
pub use model::{Media, MediaPage, MediaType, TrendingEntry, NO_POSTER_PATH};
pub use repository::TrendingRepository;
