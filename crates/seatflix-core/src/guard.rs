//! Navigation guard for protected views.
//!
//! The guard holds no state of its own. Each call reads a `SessionSnapshot`
//! and returns one of three decisions; the routing layer acts on it.

use crate::session::SessionSnapshot;

/// The unauthenticated landing route.
pub const ENTRY_ROUTE: &str = "/";

/// Outcome of guarding one render of a protected view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision<V> {
    /// Session is authenticated: show the requested view.
    Render(V),
    /// Restore has not finished: show a placeholder and decide nothing yet.
    Loading,
    /// Session is settled and signed out: go to the entry route.
    Redirect(String),
}

impl<V> GuardDecision<V> {
    pub fn is_render(&self) -> bool {
        matches!(self, Self::Render(_))
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn is_redirect(&self) -> bool {
        matches!(self, Self::Redirect(_))
    }

    /// Maps the rendered view, keeping the other decisions as they are.
    pub fn map<U>(self, f: impl FnOnce(V) -> U) -> GuardDecision<U> {
        match self {
            Self::Render(view) => GuardDecision::Render(f(view)),
            Self::Loading => GuardDecision::Loading,
            Self::Redirect(route) => GuardDecision::Redirect(route),
        }
    }
}

/// Decides whether a protected view may render.
#[derive(Debug, Clone)]
pub struct NavigationGuard {
    entry_route: String,
}

impl NavigationGuard {
    pub fn new() -> Self {
        Self::with_entry_route(ENTRY_ROUTE)
    }

    pub fn with_entry_route(entry_route: impl Into<String>) -> Self {
        Self {
            entry_route: entry_route.into(),
        }
    }

    pub fn entry_route(&self) -> &str {
        &self.entry_route
    }

    /// Loading takes precedence over the authentication flag, which is
    /// still false while restore is in flight.
    pub fn decide<V>(&self, snapshot: &SessionSnapshot, view: V) -> GuardDecision<V> {
        if snapshot.loading {
            GuardDecision::Loading
        } else if snapshot.is_authenticated {
            GuardDecision::Render(view)
        } else {
            GuardDecision::Redirect(self.entry_route.clone())
        }
    }
}

impl Default for NavigationGuard {
    fn default() -> Self {
        Self::new()
    }
}

/// Wraps a view that requires a signed-in session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Protected<V> {
    view: V,
}

impl<V> Protected<V> {
    pub fn new(view: V) -> Self {
        Self { view }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn resolve(self, guard: &NavigationGuard, snapshot: &SessionSnapshot) -> GuardDecision<V> {
        guard.decide(snapshot, self.view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Identity;

    fn alice() -> Identity {
        Identity::new("u1", "alice", "a@x.com")
    }

    #[test]
    fn test_loading_never_redirects() {
        let guard = NavigationGuard::new();
        let signed_out_loading = SessionSnapshot::loading();
        let signed_in_loading = SessionSnapshot {
            loading: true,
            is_authenticated: true,
            identity: Some(alice()),
        };

        assert_eq!(guard.decide(&signed_out_loading, "home"), GuardDecision::Loading);
        assert_eq!(guard.decide(&signed_in_loading, "home"), GuardDecision::Loading);
    }

    #[test]
    fn test_authenticated_renders() {
        let guard = NavigationGuard::new();
        let decision = guard.decide(&SessionSnapshot::signed_in(alice()), "home");
        assert_eq!(decision, GuardDecision::Render("home"));
    }

    #[test]
    fn test_signed_out_redirects_to_entry() {
        let guard = NavigationGuard::new();
        let decision = guard.decide(&SessionSnapshot::signed_out(), "home");
        assert_eq!(decision, GuardDecision::Redirect("/".to_string()));
    }

    #[test]
    fn test_custom_entry_route() {
        let guard = NavigationGuard::with_entry_route("/login");
        let decision = Protected::new(3).resolve(&guard, &SessionSnapshot::signed_out());
        assert_eq!(decision, GuardDecision::Redirect("/login".to_string()));
    }

    #[test]
    fn test_map_keeps_non_render_decisions() {
        let loading: GuardDecision<u8> = GuardDecision::Loading;
        assert!(loading.map(|v| v + 1).is_loading());

        let render = GuardDecision::Render(1u8);
        assert_eq!(render.map(|v| v + 1), GuardDecision::Render(2));
    }
}
