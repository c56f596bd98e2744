//! Whole-file TOML persistence.
//!
//! Writers replace a file by writing a sibling `.tmp`, syncing it and
//! renaming it over the target, so readers see either the old or the new
//! contents. Read-modify-write cycles hold an exclusive lock on a sibling
//! file with the `.lock` extension.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use seatflix_core::SeatflixError;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AtomicTomlError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("cannot encode TOML: {0}")]
    Encode(#[from] toml::ser::Error),
    #[error("cannot lock {path}: {source}")]
    Lock {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl AtomicTomlError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

impl From<AtomicTomlError> for SeatflixError {
    fn from(err: AtomicTomlError) -> Self {
        match err {
            AtomicTomlError::Parse { .. } | AtomicTomlError::Encode(_) => {
                SeatflixError::serialization("TOML", err.to_string())
            }
            AtomicTomlError::Io { .. } | AtomicTomlError::Lock { .. } => {
                SeatflixError::storage(err.to_string())
            }
        }
    }
}

/// Typed handle on one TOML file.
pub struct AtomicTomlFile<T> {
    path: PathBuf,
    _marker: PhantomData<fn() -> T>,
}

impl<T> AtomicTomlFile<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _marker: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the file. A missing or blank file is `Ok(None)`.
    pub fn load(&self) -> Result<Option<T>, AtomicTomlError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(AtomicTomlError::io(&self.path, err)),
        };
        if text.trim().is_empty() {
            return Ok(None);
        }
        toml::from_str(&text)
            .map(Some)
            .map_err(|source| AtomicTomlError::Parse {
                path: self.path.clone(),
                source,
            })
    }

    /// Replaces the file with `value`.
    pub fn save(&self, value: &T) -> Result<(), AtomicTomlError> {
        let text = toml::to_string_pretty(value)?;
        replace_file(&self.path, text.as_bytes())
    }

    /// Locked read-modify-write.
    ///
    /// `mutate` sees the stored value, or `initial` when there is none. The
    /// result is written back before the lock is released and `mutate`'s
    /// return value is handed to the caller.
    pub fn update<F, R>(&self, initial: T, mutate: F) -> Result<R, AtomicTomlError>
    where
        F: FnOnce(&mut T) -> R,
    {
        self.locked_update(initial, mutate, false)
    }

    /// Like [`update`](Self::update), but a file that no longer parses is
    /// treated as holding `initial` and gets rewritten.
    pub fn update_resetting_corrupt<F, R>(&self, initial: T, mutate: F) -> Result<R, AtomicTomlError>
    where
        F: FnOnce(&mut T) -> R,
    {
        self.locked_update(initial, mutate, true)
    }

    fn locked_update<F, R>(
        &self,
        initial: T,
        mutate: F,
        reset_corrupt: bool,
    ) -> Result<R, AtomicTomlError>
    where
        F: FnOnce(&mut T) -> R,
    {
        let _guard = LockGuard::exclusive(&self.path)?;
        let stored = match self.load() {
            Ok(stored) => stored,
            Err(err @ AtomicTomlError::Parse { .. }) if reset_corrupt => {
                tracing::warn!(error = %err, "[Storage] replacing unparseable file");
                None
            }
            Err(err) => return Err(err),
        };
        let mut value = stored.unwrap_or(initial);
        let output = mutate(&mut value);
        self.save(&value)?;
        Ok(output)
    }
}

fn replace_file(path: &Path, bytes: &[u8]) -> Result<(), AtomicTomlError> {
    let dir = ensure_parent(path)?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let staging = dir.join(format!(".{}.tmp", file_name));

    let write_staged = || -> std::io::Result<()> {
        let mut file = File::create(&staging)?;
        file.write_all(bytes)?;
        file.sync_all()
    };
    write_staged().map_err(|err| AtomicTomlError::io(&staging, err))?;
    fs::rename(&staging, path).map_err(|err| AtomicTomlError::io(path, err))
}

fn ensure_parent(path: &Path) -> Result<PathBuf, AtomicTomlError> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&dir).map_err(|err| AtomicTomlError::io(&dir, err))?;
    Ok(dir)
}

/// Holds the sibling lock file exclusively until dropped. The lock file stays on disk.
struct LockGuard {
    _file: File,
}

impl LockGuard {
    fn exclusive(target: &Path) -> Result<Self, AtomicTomlError> {
        ensure_parent(target)?;
        let lock_path = target.with_extension("lock");
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&lock_path)
            .map_err(|err| AtomicTomlError::io(&lock_path, err))?;

        fs2::FileExt::lock_exclusive(&file).map_err(|source| AtomicTomlError::Lock {
            path: lock_path,
            source,
        })?;

        Ok(Self { _file: file })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    type Items = BTreeMap<String, String>;

    fn items_file(dir: &TempDir, name: &str) -> AtomicTomlFile<Items> {
        AtomicTomlFile::new(dir.path().join(name))
    }

    #[test]
    fn test_missing_and_blank_files_load_as_none() {
        let temp_dir = TempDir::new().unwrap();
        let file = items_file(&temp_dir, "storage.toml");
        assert!(file.load().unwrap().is_none());

        fs::write(file.path(), "  \n").unwrap();
        assert!(file.load().unwrap().is_none());
    }

    #[test]
    fn test_save_creates_parent_and_leaves_no_staging_file() {
        let temp_dir = TempDir::new().unwrap();
        let file: AtomicTomlFile<Items> =
            AtomicTomlFile::new(temp_dir.path().join("profile").join("storage.toml"));

        let mut items = Items::new();
        items.insert("authToken".to_string(), "tok".to_string());
        file.save(&items).unwrap();

        assert_eq!(file.load().unwrap(), Some(items));
        assert!(!temp_dir.path().join("profile").join(".storage.toml.tmp").exists());
    }

    #[test]
    fn test_update_passes_closure_output_through() {
        let temp_dir = TempDir::new().unwrap();
        let file = items_file(&temp_dir, "storage.toml");

        let before = file
            .update(Items::new(), |items| items.insert("userId".into(), "1".into()))
            .unwrap();
        assert!(before.is_none());

        let before = file
            .update(Items::new(), |items| items.insert("userId".into(), "2".into()))
            .unwrap();
        assert_eq!(before.as_deref(), Some("1"));
        assert!(temp_dir.path().join("storage.lock").exists());
    }

    #[test]
    fn test_garbage_is_a_parse_error() {
        let temp_dir = TempDir::new().unwrap();
        let file = items_file(&temp_dir, "storage.toml");
        fs::write(file.path(), "authToken = = nope").unwrap();

        let err = file.load().unwrap_err();
        assert!(matches!(err, AtomicTomlError::Parse { .. }));
        assert!(SeatflixError::from(err).is_serialization());
    }

    #[test]
    fn test_resetting_update_rewrites_garbage() {
        let temp_dir = TempDir::new().unwrap();
        let file = items_file(&temp_dir, "storage.toml");
        fs::write(file.path(), "authToken = = nope").unwrap();

        assert!(matches!(
            file.update(Items::new(), |_| ()),
            Err(AtomicTomlError::Parse { .. })
        ));

        file.update_resetting_corrupt(Items::new(), |items| {
            items.insert("userId".into(), "7".into());
        })
        .unwrap();

        let stored = file.load().unwrap().unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored["userId"], "7");
    }
}
