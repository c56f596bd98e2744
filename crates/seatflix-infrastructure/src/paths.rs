//! Unified path management for SeatFlix files.
//!
//! All client state lives under one config directory and one data directory,
//! resolved per platform via the `dirs` crate.

use std::path::{Path, PathBuf};

const APP_DIR_NAME: &str = "seatflix";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home/config directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for seatflix_core::SeatflixError {
    fn from(err: PathError) -> Self {
        seatflix_core::SeatflixError::config(err.to_string())
    }
}

/// What a resolved path points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathType {
    File(PathBuf),
    Dir(PathBuf),
}

impl PathType {
    pub fn into_path_buf(self) -> PathBuf {
        match self {
            PathType::File(path) | PathType::Dir(path) => path,
        }
    }
}

/// Files and directories owned by a service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceType {
    /// `config.toml`
    Config,
    /// `storage.toml`, the durable session storage
    Storage,
    /// `trending.toml`, in the data directory
    Trending,
    /// `logs/`
    Logs,
}

/// Unified path management for SeatFlix.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/seatflix/          # Config directory
/// ├── config.toml              # Client configuration
/// ├── storage.toml             # Durable storage (authToken, user, userId)
/// └── logs/                    # Application logs
///     └── seatflix.log
///
/// ~/.local/share/seatflix/     # Data directory
/// └── trending.toml            # Search counts
/// ```
///
/// With a base path both directories collapse into that path, which keeps
/// tests and portable installs self-contained.
#[derive(Debug, Clone)]
pub struct SeatflixPaths {
    base_path: Option<PathBuf>,
}

impl SeatflixPaths {
    pub fn new(base_path: Option<&Path>) -> Self {
        Self {
            base_path: base_path.map(Path::to_path_buf),
        }
    }

    /// Returns the SeatFlix configuration directory.
    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        match &self.base_path {
            Some(base) => Ok(base.clone()),
            None => dirs::config_dir()
                .map(|dir| dir.join(APP_DIR_NAME))
                .ok_or(PathError::HomeDirNotFound),
        }
    }

    /// Returns the SeatFlix data directory.
    pub fn data_dir(&self) -> Result<PathBuf, PathError> {
        match &self.base_path {
            Some(base) => Ok(base.clone()),
            None => dirs::data_dir()
                .map(|dir| dir.join(APP_DIR_NAME))
                .ok_or(PathError::HomeDirNotFound),
        }
    }

    /// Resolves the path owned by a service.
    pub fn get_path(&self, service: ServiceType) -> Result<PathType, PathError> {
        Ok(match service {
            ServiceType::Config => PathType::File(self.config_dir()?.join("config.toml")),
            ServiceType::Storage => PathType::File(self.config_dir()?.join("storage.toml")),
            ServiceType::Trending => PathType::File(self.data_dir()?.join("trending.toml")),
            ServiceType::Logs => PathType::Dir(self.config_dir()?.join("logs")),
        })
    }
}

impl Default for SeatflixPaths {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_dirs_end_with_app_name() {
        let paths = SeatflixPaths::default();
        if let Ok(config_dir) = paths.config_dir() {
            assert!(config_dir.ends_with("seatflix"));
        }
    }

    #[test]
    fn test_base_path_collapses_dirs() {
        let base = PathBuf::from("/tmp/seatflix-test");
        let paths = SeatflixPaths::new(Some(&base));

        assert_eq!(
            paths.get_path(ServiceType::Storage).unwrap(),
            PathType::File(base.join("storage.toml"))
        );
        assert_eq!(
            paths.get_path(ServiceType::Trending).unwrap(),
            PathType::File(base.join("trending.toml"))
        );
        assert_eq!(
            paths.get_path(ServiceType::Logs).unwrap().into_path_buf(),
            base.join("logs")
        );
    }
}
