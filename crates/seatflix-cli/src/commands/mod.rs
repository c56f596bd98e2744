pub mod auth;
pub mod catalog;
pub mod open;
pub mod profile;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Result, anyhow, bail};
use seatflix_application::{ClientApp, Route};
use seatflix_core::config::ClientConfig;
use seatflix_core::{DurableStorage, GuardDecision, SeatflixError};
use seatflix_infrastructure::{FileDurableStorage, FileTrendingRepository};
use seatflix_interaction::ReqwestTransport;

pub const SIGN_IN_HINT: &str = "Run `seatflix login --username <name>` to sign in.";

pub fn build_app(config: &ClientConfig, storage_path: Option<&Path>) -> Result<ClientApp> {
    let storage: Arc<dyn DurableStorage> = match storage_path {
        Some(path) => Arc::new(FileDurableStorage::with_path(path.to_path_buf())),
        None => Arc::new(FileDurableStorage::new(None)?),
    };
    let transport = Arc::new(ReqwestTransport::new(Duration::from_secs(
        config.request_timeout_secs,
    ))?);
    let trending = Arc::new(FileTrendingRepository::new(None)?);

    Ok(ClientApp::new(config, storage, transport, trending))
}

/// Enters a route through the guard. Fails with a sign-in hint on redirect.
pub fn enter(app: &ClientApp, path: &str) -> Result<Route> {
    match app.navigate(path).decision {
        GuardDecision::Render(route) => Ok(route),
        GuardDecision::Redirect(target) => {
            bail!("You are not signed in (redirected to {}). {}", target, SIGN_IN_HINT)
        }
        GuardDecision::Loading => bail!("Session is still loading, try again."),
    }
}

/// Converts a use-case error into the text shown to the user.
pub fn describe(err: SeatflixError) -> anyhow::Error {
    match err {
        SeatflixError::Unauthorized => {
            anyhow!("Your session has expired. {}", SIGN_IN_HINT)
        }
        SeatflixError::Network(message) => {
            anyhow!("Could not reach the server: {}", message)
        }
        other => anyhow!(other),
    }
}

/// Completes a hard navigation left behind by the command, if any.
pub fn finish(app: &mut ClientApp) {
    if app.location().pending_navigation().is_some() {
        let navigation = app.reload();
        tracing::info!(route = %navigation.route, "[Cli] session reset after forced navigation");
    }
}
