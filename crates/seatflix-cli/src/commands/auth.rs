use anyhow::{Result, bail};
use seatflix_application::{AuthUseCase, ClientApp};

use super::{describe, enter};

pub async fn register(app: &ClientApp, username: &str, email: &str, password: &str) -> Result<()> {
    match app.auth().register(username, email, password).await {
        Ok(message) => {
            println!("{}", message);
            println!("Account created successfully! Please login.");
            app.navigate("/login");
            Ok(())
        }
        Err(err) => bail!(AuthUseCase::register_error_message(&err)),
    }
}

pub async fn login(app: &ClientApp, username: &str, password: &str) -> Result<()> {
    match app.auth().login(username, password).await {
        Ok(identity) => {
            app.navigate("/home");
            println!("Signed in as {} <{}>", identity.username, identity.email);
            Ok(())
        }
        Err(err) => {
            tracing::debug!(error = %err, "[Cli] login failed");
            bail!(AuthUseCase::login_error_message(&err))
        }
    }
}

pub fn logout(app: &ClientApp) -> Result<()> {
    let result = app.auth().logout();
    app.navigate("/");
    result?;
    println!("Signed out.");
    Ok(())
}

pub async fn whoami(app: &ClientApp, remote: bool) -> Result<()> {
    if remote {
        enter(app, "/profile")?;
        let profile = app.profile().current_profile().await.map_err(describe)?;
        println!("{} <{}> (id {})", profile.username, profile.email, profile.id);
        return Ok(());
    }

    match app.session().identity() {
        Some(identity) if app.snapshot().is_authenticated => {
            println!("{} <{}> (id {})", identity.username, identity.email, identity.user_id);
        }
        _ => println!("Not signed in."),
    }
    Ok(())
}
