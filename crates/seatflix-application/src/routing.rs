//! Route table and the simulated browser location.

use std::fmt;
use std::sync::{Mutex, PoisonError};

use seatflix_core::ENTRY_ROUTE;
use seatflix_core::http::HardNavigator;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    Home,
    Search,
    Watch { media_type: String, id: String },
    Profile,
    NotFound(String),
}

impl Route {
    /// Matches a path against the route table.
    ///
    /// Static segments are case-insensitive. Query strings and fragments are
    /// ignored.
    pub fn parse(path: &str) -> Self {
        let trimmed = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .trim();
        let segments: Vec<&str> = trimmed.split('/').filter(|s| !s.is_empty()).collect();
        let head = segments.first().map(|s| s.to_ascii_lowercase());

        match (head.as_deref(), segments.len()) {
            (None, _) => Route::Login,
            (Some("login"), 1) => Route::Login,
            (Some("register"), 1) => Route::Register,
            (Some("home"), 1) => Route::Home,
            (Some("search"), 1) => Route::Search,
            (Some("profile"), 1) => Route::Profile,
            (Some("watch"), 3) => Route::Watch {
                media_type: segments[1].to_string(),
                id: segments[2].to_string(),
            },
            _ => Route::NotFound(path.to_string()),
        }
    }

    /// Canonical path for this route.
    pub fn path(&self) -> String {
        match self {
            Route::Login => ENTRY_ROUTE.to_string(),
            Route::Register => "/register".to_string(),
            Route::Home => "/home".to_string(),
            Route::Search => "/search".to_string(),
            Route::Watch { media_type, id } => format!("/watch/{}/{}", media_type, id),
            Route::Profile => "/profile".to_string(),
            Route::NotFound(path) => path.clone(),
        }
    }

    /// Whether the route renders behind the navigation guard.
    pub fn is_protected(&self) -> bool {
        matches!(
            self,
            Route::Home | Route::Search | Route::Watch { .. } | Route::Profile
        )
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[derive(Debug)]
struct LocationState {
    current: String,
    pending: Option<String>,
}

/// The address bar of the client.
///
/// Soft navigation updates `current` directly. A hard navigation is only
/// recorded; it takes effect when the app reloads, which also discards all
/// in-memory state.
#[derive(Debug)]
pub struct BrowserLocation {
    state: Mutex<LocationState>,
}

impl BrowserLocation {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            state: Mutex::new(LocationState {
                current: initial.into(),
                pending: None,
            }),
        }
    }

    pub fn current(&self) -> String {
        self.lock().current.clone()
    }

    pub fn set_current(&self, path: impl Into<String>) {
        self.lock().current = path.into();
    }

    pub fn pending_navigation(&self) -> Option<String> {
        self.lock().pending.clone()
    }

    pub fn take_pending(&self) -> Option<String> {
        self.lock().pending.take()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, LocationState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for BrowserLocation {
    fn default() -> Self {
        Self::new(ENTRY_ROUTE)
    }
}

impl HardNavigator for BrowserLocation {
    fn hard_navigate(&self, route: &str) {
        tracing::info!(route, "[Location] hard navigation requested");
        self.lock().pending = Some(route.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_static_routes() {
        assert_eq!(Route::parse("/"), Route::Login);
        assert_eq!(Route::parse(""), Route::Login);
        assert_eq!(Route::parse("/login"), Route::Login);
        assert_eq!(Route::parse("/register"), Route::Register);
        assert_eq!(Route::parse("/home/"), Route::Home);
        assert_eq!(Route::parse("/Search"), Route::Search);
        assert_eq!(Route::parse("/profile?tab=avatar"), Route::Profile);
    }

    #[test]
    fn test_parse_watch_route() {
        assert_eq!(
            Route::parse("/Watch/movie/603"),
            Route::Watch {
                media_type: "movie".to_string(),
                id: "603".to_string()
            }
        );
        assert_eq!(
            Route::parse("/watch/movie"),
            Route::NotFound("/watch/movie".to_string())
        );
    }

    #[test]
    fn test_protection() {
        assert!(!Route::Login.is_protected());
        assert!(!Route::Register.is_protected());
        assert!(Route::Home.is_protected());
        assert!(Route::parse("/watch/tv/1").is_protected());
        assert!(!Route::parse("/nope").is_protected());
    }

    #[test]
    fn test_path_round_trips_through_parse() {
        for route in [Route::Login, Route::Home, Route::Search, Route::Profile] {
            assert_eq!(Route::parse(&route.path()), route);
        }
    }

    #[test]
    fn test_hard_navigation_is_pending_until_taken() {
        let location = BrowserLocation::new("/profile");
        location.hard_navigate("/");

        assert_eq!(location.current(), "/profile");
        assert_eq!(location.pending_navigation().as_deref(), Some("/"));
        assert_eq!(location.take_pending().as_deref(), Some("/"));
        assert_eq!(location.take_pending(), None);
    }
}
