//! Durable client-side storage.
//!
//! A string-keyed store that survives process restarts, shared by the
//! session store (read/write) and the HTTP adapter (read, plus teardown on 401).
//!
//! # Module Structure
//!
//! - `memory`: in-process implementation used by tests and ephemeral clients
//!
//! The file-backed implementation lives in `seatflix-infrastructure`.

mod memory;

pub use memory::MemoryStorage;

use crate::error::Result;

/// Key holding the opaque bearer token.
pub const AUTH_TOKEN_KEY: &str = "authToken";
/// Key holding the serialized identity snapshot (JSON).
pub const USER_KEY: &str = "user";
/// Key holding the bare user id, used by pages that look up the full profile.
pub const USER_ID_KEY: &str = "userId";

/// Every key that makes up a persisted session.
///
/// Logout, 401 teardown and corruption purge all clear this exact set.
pub const SESSION_KEYS: [&str; 3] = [AUTH_TOKEN_KEY, USER_KEY, USER_ID_KEY];

/// A single whole-key write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageWrite {
    Set { key: String, value: String },
    Remove { key: String },
}

impl StorageWrite {
    pub fn set(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Set {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn remove(key: impl Into<String>) -> Self {
        Self::Remove { key: key.into() }
    }

    /// Builds the batch that erases a persisted session.
    pub fn clear_session() -> Vec<Self> {
        SESSION_KEYS.iter().map(|key| Self::remove(*key)).collect()
    }
}

/// Durable, string-keyed client storage.
///
/// All operations are synchronous; implementations must make a completed
/// write visible to any later reader, including a fresh instance pointed at
/// the same backing store.
pub trait DurableStorage: Send + Sync {
    /// Returns the value stored under `key`, if any.
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Replaces the value stored under `key`.
    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Removes `key`. Removing a missing key is not an error.
    fn remove_item(&self, key: &str) -> Result<()>;

    /// Applies a batch of writes.
    ///
    /// The default applies them in order and stops at the first failure.
    /// Implementations that can commit the batch atomically should override it.
    fn apply(&self, writes: &[StorageWrite]) -> Result<()> {
        for write in writes {
            match write {
                StorageWrite::Set { key, value } => self.set_item(key, value)?,
                StorageWrite::Remove { key } => self.remove_item(key)?,
            }
        }
        Ok(())
    }
}
