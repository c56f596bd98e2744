pub mod catalog;
pub mod config;
pub mod error;
pub mod guard;
pub mod http;
pub mod session;
pub mod storage;
pub mod user;

// Re-export common error type
pub use error::{Result, SeatflixError};
pub use guard::{ENTRY_ROUTE, GuardDecision, NavigationGuard, Protected};
pub use session::{Identity, SessionSnapshot, SessionStore, UserId};
pub use storage::{DurableStorage, MemoryStorage};
