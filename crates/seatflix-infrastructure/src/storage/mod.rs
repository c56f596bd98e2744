//! Storage layer for atomic file operations.

mod atomic_toml;
mod file_storage;

pub use atomic_toml::{AtomicTomlError, AtomicTomlFile};
pub use file_storage::FileDurableStorage;
