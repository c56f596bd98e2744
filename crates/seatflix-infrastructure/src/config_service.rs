//! Configuration service implementation.
//!
//! This module provides a ConfigService that loads the client configuration
//! from `config.toml` and layers environment overrides on top.

use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use seatflix_core::Result;
use seatflix_core::config::ClientConfig;

use crate::paths::{SeatflixPaths, ServiceType};
use crate::storage::AtomicTomlFile;

pub const ENV_API_URL: &str = "SEATFLIX_API_URL";
pub const ENV_TMDB_API_KEY: &str = "SEATFLIX_TMDB_API_KEY";
pub const ENV_TMDB_API_KEY_FALLBACK: &str = "TMDB_API_KEY";
pub const ENV_LOG: &str = "SEATFLIX_LOG";

/// Configuration service that loads and caches the client configuration.
///
/// Priority: environment variables > config.toml > defaults.
#[derive(Clone)]
pub struct ConfigService {
    path: PathBuf,
    /// Cached configuration loaded from file.
    /// Uses RwLock for thread-safe lazy loading.
    config: Arc<RwLock<Option<ClientConfig>>>,
}

impl ConfigService {
    /// Creates a ConfigService for `<config_dir>/config.toml`.
    ///
    /// The configuration is loaded lazily on first access.
    pub fn new(base_path: Option<&Path>) -> Result<Self> {
        let path = SeatflixPaths::new(base_path)
            .get_path(ServiceType::Config)?
            .into_path_buf();
        Ok(Self::with_path(path))
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self {
            path,
            config: Arc::new(RwLock::new(None)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Gets the effective configuration, loading from file if not cached.
    ///
    /// A missing file is created with defaults. An unreadable file is logged
    /// and replaced by defaults for this run; it is never overwritten.
    pub fn get_config(&self) -> ClientConfig {
        {
            let read_lock = self.config.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(ref cached) = *read_lock {
                return cached.clone();
            }
        }

        let from_file = self.load_or_create().unwrap_or_else(|err| {
            tracing::warn!(path = %self.path.display(), error = %err, "[Config] falling back to defaults");
            ClientConfig::default()
        });
        let loaded = apply_env_overrides(from_file, |key| std::env::var(key).ok());

        {
            let mut write_lock = self.config.write().unwrap_or_else(PoisonError::into_inner);
            *write_lock = Some(loaded.clone());
        }

        loaded
    }

    /// Persists `config` and refreshes the cache.
    pub fn save_config(&self, config: &ClientConfig) -> Result<()> {
        AtomicTomlFile::new(self.path.clone()).save(config)?;
        self.invalidate_cache();
        Ok(())
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        let mut write_lock = self.config.write().unwrap_or_else(PoisonError::into_inner);
        *write_lock = None;
    }

    fn load_or_create(&self) -> Result<ClientConfig> {
        let file = AtomicTomlFile::<ClientConfig>::new(self.path.clone());
        match file.load()? {
            Some(config) => Ok(config),
            None => {
                let default_config = ClientConfig::default();
                file.save(&default_config)?;
                tracing::info!(path = %self.path.display(), "[Config] created default config");
                Ok(default_config)
            }
        }
    }
}

/// Layers environment values over a file-loaded config.
///
/// Blank values are ignored so an exported-but-empty variable does not wipe
/// a configured value.
pub fn apply_env_overrides<F>(mut config: ClientConfig, lookup: F) -> ClientConfig
where
    F: Fn(&str) -> Option<String>,
{
    let non_blank = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

    if let Some(url) = non_blank(ENV_API_URL) {
        config.api_base_url = Some(url);
    }
    if let Some(key) = non_blank(ENV_TMDB_API_KEY).or_else(|| non_blank(ENV_TMDB_API_KEY_FALLBACK)) {
        config.tmdb_api_key = Some(key);
    }
    if let Some(level) = non_blank(ENV_LOG) {
        config.log_level = level;
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_missing_file_is_created_with_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let service = ConfigService::new(Some(temp_dir.path())).unwrap();

        let config = service.load_or_create().unwrap();
        assert_eq!(config, ClientConfig::default());
        assert!(temp_dir.path().join("config.toml").exists());
    }

    #[test]
    fn test_saved_config_is_reloaded() {
        let temp_dir = TempDir::new().unwrap();
        let service = ConfigService::with_path(temp_dir.path().join("config.toml"));

        let config = ClientConfig {
            api_base_url: Some("http://localhost:8080".to_string()),
            trending_limit: 10,
            ..ClientConfig::default()
        };
        service.save_config(&config).unwrap();

        let loaded = service.load_or_create().unwrap();
        assert_eq!(loaded.api_base_url.as_deref(), Some("http://localhost:8080"));
        assert_eq!(loaded.trending_limit, 10);
    }

    #[test]
    fn test_env_overrides_file_values() {
        let config = ClientConfig {
            api_base_url: Some("http://file".to_string()),
            ..ClientConfig::default()
        };
        let config = apply_env_overrides(
            config,
            lookup_from(&[(ENV_API_URL, "http://env"), (ENV_TMDB_API_KEY_FALLBACK, "k2")]),
        );

        assert_eq!(config.api_base_url.as_deref(), Some("http://env"));
        assert_eq!(config.tmdb_api_key.as_deref(), Some("k2"));
    }

    #[test]
    fn test_blank_env_is_ignored() {
        let config = ClientConfig {
            api_base_url: Some("http://file".to_string()),
            ..ClientConfig::default()
        };
        let config = apply_env_overrides(config, lookup_from(&[(ENV_API_URL, "  ")]));
        assert_eq!(config.api_base_url.as_deref(), Some("http://file"));
    }

    #[test]
    fn test_primary_tmdb_key_wins() {
        let config = apply_env_overrides(
            ClientConfig::default(),
            lookup_from(&[(ENV_TMDB_API_KEY, "k1"), (ENV_TMDB_API_KEY_FALLBACK, "k2")]),
        );
        assert_eq!(config.tmdb_api_key.as_deref(), Some("k1"));
    }
}
