//! Composition root for the client.

use std::sync::Arc;

use seatflix_core::catalog::TrendingRepository;
use seatflix_core::config::ClientConfig;
use seatflix_core::http::HttpTransport;
use seatflix_core::{
    DurableStorage, GuardDecision, NavigationGuard, Protected, SessionSnapshot, SessionStore,
};
use seatflix_interaction::{ApiClient, PlayerEmbed, TmdbClient, UserApi};

use crate::routing::{BrowserLocation, Route};
use crate::usecase::{AuthUseCase, CatalogUseCase, ProfileUseCase, WatchUseCase};

/// Result of resolving a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub route: Route,
    pub decision: GuardDecision<Route>,
}

impl Navigation {
    pub fn is_allowed(&self) -> bool {
        self.decision.is_render()
    }
}

/// Owns the session and every service that reads it.
///
/// The session is restored exactly once per construction or reload, before
/// any route is resolved. A missing backend URL only fails the calls that
/// need the backend.
pub struct ClientApp {
    storage: Arc<dyn DurableStorage>,
    location: Arc<BrowserLocation>,
    guard: NavigationGuard,
    user_api: UserApi,
    session: Arc<SessionStore>,
    auth: AuthUseCase,
    profile: ProfileUseCase,
    catalog: CatalogUseCase,
    watch: WatchUseCase,
}

impl ClientApp {
    pub fn new(
        config: &ClientConfig,
        storage: Arc<dyn DurableStorage>,
        transport: Arc<dyn HttpTransport>,
        trending: Arc<dyn TrendingRepository>,
    ) -> Self {
        let location = Arc::new(BrowserLocation::default());
        let api = ApiClient::from_config(config, transport.clone(), storage.clone(), location.clone());
        let user_api = UserApi::new(api);

        let session = restored_session(storage.clone());
        let auth = AuthUseCase::new(user_api.clone(), session.clone());
        let profile = ProfileUseCase::new(user_api.clone(), storage.clone(), session.clone());
        let catalog = CatalogUseCase::from_config(
            TmdbClient::from_config(transport, config),
            trending,
            config,
        );
        let watch = WatchUseCase::new(PlayerEmbed::from_config(config));

        Self {
            storage,
            location,
            guard: NavigationGuard::new(),
            user_api,
            session,
            auth,
            profile,
            catalog,
            watch,
        }
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.session.snapshot()
    }

    pub fn location(&self) -> &Arc<BrowserLocation> {
        &self.location
    }

    pub fn auth(&self) -> &AuthUseCase {
        &self.auth
    }

    pub fn profile(&self) -> &ProfileUseCase {
        &self.profile
    }

    pub fn catalog(&self) -> &CatalogUseCase {
        &self.catalog
    }

    pub fn watch(&self) -> &WatchUseCase {
        &self.watch
    }

    /// Resolves `path` and applies the guard to protected routes.
    ///
    /// While a hard navigation is pending, protected routes redirect to its
    /// target whatever the in-memory session says. Allowed routes and
    /// redirects move the location; a loading decision leaves it where it is.
    pub fn navigate(&self, path: &str) -> Navigation {
        let route = Route::parse(path);
        let decision = if !route.is_protected() {
            GuardDecision::Render(route.clone())
        } else if let Some(target) = self.location.pending_navigation() {
            tracing::debug!(route = %route, to = %target, "[Router] hard navigation pending");
            GuardDecision::Redirect(target)
        } else {
            Protected::new(route.clone()).resolve(&self.guard, &self.session.snapshot())
        };

        match &decision {
            GuardDecision::Render(route) => self.location.set_current(route.path()),
            GuardDecision::Redirect(target) => {
                tracing::debug!(from = %route, to = %target, "[Router] redirected by guard");
                self.location.set_current(target.clone());
            }
            GuardDecision::Loading => {}
        }

        Navigation { route, decision }
    }

    /// Full page load: drops in-memory state and restores from storage.
    ///
    /// Goes to the pending hard-navigation target if there is one, else
    /// reloads the current path.
    pub fn reload(&mut self) -> Navigation {
        let target = self
            .location
            .take_pending()
            .unwrap_or_else(|| self.location.current());

        let session = restored_session(self.storage.clone());
        self.auth = AuthUseCase::new(self.user_api.clone(), session.clone());
        self.profile = ProfileUseCase::new(self.user_api.clone(), self.storage.clone(), session.clone());
        self.session = session;
        tracing::info!(target = %target, "[App] reloaded");

        self.navigate(&target)
    }
}

fn restored_session(storage: Arc<dyn DurableStorage>) -> Arc<SessionStore> {
    let session = Arc::new(SessionStore::new(storage));
    session.restore();
    session
}
