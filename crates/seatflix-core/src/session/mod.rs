//! Session domain module.
//!
//! # Module Structure
//!
//! - `model`: `Session`, `Identity`, `UserId` and the published `SessionSnapshot`
//! - `store`: `SessionStore`, which owns the session and persists it
//!
//! # Usage
//!
//! ```
//! use std::sync::Arc;
//! use seatflix_core::session::{Identity, SessionStore};
//! use seatflix_core::storage::MemoryStorage;
//!
//! let store = SessionStore::new(Arc::new(MemoryStorage::new()));
//! assert!(!store.restore().loading);
//! store.login("tok123", Identity::new("u1", "alice", "a@x.com")).unwrap();
//! assert!(store.is_authenticated());
//! ```

mod model;
mod store;

// Re-export public API
pub use model::{Identity, Session, SessionSnapshot, UserId};
pub use store::SessionStore;
