mod auth;
mod catalog;
mod profile;
mod watch;

pub use auth::{AuthUseCase, LOGIN_REJECTED, LOGIN_UNAVAILABLE, LOGIN_WITHOUT_TOKEN};
pub use catalog::{CatalogUseCase, SearchResults};
pub use profile::ProfileUseCase;
pub use watch::WatchUseCase;
