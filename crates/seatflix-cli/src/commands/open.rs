use anyhow::{Result, bail};
use seatflix_application::{ClientApp, Route};
use seatflix_core::GuardDecision;

use super::SIGN_IN_HINT;

pub fn open(app: &ClientApp, path: &str) -> Result<()> {
    let navigation = app.navigate(path);

    match navigation.decision {
        GuardDecision::Render(Route::NotFound(path)) => bail!("Page not found: {}", path),
        GuardDecision::Render(Route::Home) => {
            let name = app.snapshot().username().unwrap_or_default().to_string();
            println!("{} - welcome back, {}!", Route::Home, name);
        }
        GuardDecision::Render(route) => println!("{}", route),
        GuardDecision::Redirect(target) => {
            bail!("{} requires sign-in, redirected to {}. {}", navigation.route, target, SIGN_IN_HINT)
        }
        GuardDecision::Loading => println!("Loading..."),
    }
    Ok(())
}
