//! File-backed durable storage.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use seatflix_core::Result;
use seatflix_core::storage::{DurableStorage, StorageWrite};

use super::atomic_toml::AtomicTomlFile;
use crate::paths::{SeatflixPaths, ServiceType};

/// Durable storage kept as a flat TOML table on disk.
///
/// Reads always go to the file, so a new instance (or another process)
/// immediately observes the last committed write.
pub struct FileDurableStorage {
    file: AtomicTomlFile<BTreeMap<String, String>>,
}

impl FileDurableStorage {
    /// Storage at `<config_dir>/storage.toml`.
    pub fn new(base_path: Option<&Path>) -> Result<Self> {
        let path = SeatflixPaths::new(base_path)
            .get_path(ServiceType::Storage)?
            .into_path_buf();
        Ok(Self::with_path(path))
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self {
            file: AtomicTomlFile::new(path),
        }
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    fn load_all(&self) -> Result<BTreeMap<String, String>> {
        Ok(self.file.load()?.unwrap_or_default())
    }
}

impl DurableStorage for FileDurableStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.load_all()?.remove(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.apply(&[StorageWrite::set(key, value)])
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.apply(&[StorageWrite::remove(key)])
    }

    /// Commits the whole batch in one locked rewrite.
    ///
    /// A file that no longer parses is replaced, so sign-in and sign-out keep
    /// working after corruption.
    fn apply(&self, writes: &[StorageWrite]) -> Result<()> {
        self.file.update_resetting_corrupt(BTreeMap::new(), |items| {
            for write in writes {
                match write {
                    StorageWrite::Set { key, value } => {
                        items.insert(key.clone(), value.clone());
                    }
                    StorageWrite::Remove { key } => {
                        items.remove(key);
                    }
                }
            }
        })?;
        tracing::trace!(path = %self.path().display(), writes = writes.len(), "storage batch committed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seatflix_core::storage::{AUTH_TOKEN_KEY, USER_KEY};
    use tempfile::TempDir;

    #[test]
    fn test_set_get_remove() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileDurableStorage::new(Some(temp_dir.path())).unwrap();

        assert_eq!(storage.get_item(AUTH_TOKEN_KEY).unwrap(), None);
        storage.set_item(AUTH_TOKEN_KEY, "tok").unwrap();
        assert_eq!(storage.get_item(AUTH_TOKEN_KEY).unwrap().as_deref(), Some("tok"));
        storage.remove_item(AUTH_TOKEN_KEY).unwrap();
        assert_eq!(storage.get_item(AUTH_TOKEN_KEY).unwrap(), None);
    }

    #[test]
    fn test_json_values_survive_toml_quoting() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileDurableStorage::with_path(temp_dir.path().join("storage.toml"));

        let json = r#"{"userId":"u1","username":"al \"ice\"","email":"a@x.com"}"#;
        storage.set_item(USER_KEY, json).unwrap();

        assert_eq!(storage.get_item(USER_KEY).unwrap().as_deref(), Some(json));
    }

    #[test]
    fn test_corrupt_file_reports_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("storage.toml");
        std::fs::write(&path, "authToken = [unterminated").unwrap();

        let storage = FileDurableStorage::with_path(path);
        let err = storage.get_item(AUTH_TOKEN_KEY).unwrap_err();
        assert!(err.is_serialization());
    }

    #[test]
    fn test_write_replaces_corrupt_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("storage.toml");
        std::fs::write(&path, "authToken = [unterminated").unwrap();
        let storage = FileDurableStorage::with_path(path);

        storage.set_item(AUTH_TOKEN_KEY, "tok").unwrap();

        assert_eq!(storage.get_item(AUTH_TOKEN_KEY).unwrap().as_deref(), Some("tok"));
        assert_eq!(storage.get_item(USER_KEY).unwrap(), None);
    }
}
