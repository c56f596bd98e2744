//! User domain module.
//!
//! # Module Structure
//!
//! - `model`: backend user profile and auth request/response payloads

mod model;

// Re-export public API
pub use model::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, UserProfile};
