use std::path::Path;

use anyhow::Result;
use seatflix_application::ClientApp;

use super::{describe, enter};

pub async fn show(app: &ClientApp) -> Result<()> {
    enter(app, "/profile")?;
    let profile = app.profile().load_profile().await.map_err(describe)?;

    println!("Username: {}", profile.username);
    println!("Email:    {}", profile.email);
    println!("Joined:   {}", profile.date_joined_label());
    match app.profile().avatar_url(&profile) {
        Some(url) => println!("Avatar:   {}", url),
        None => println!("Avatar:   (none)"),
    }
    Ok(())
}

pub async fn upload_avatar(app: &ClientApp, file: &Path) -> Result<()> {
    enter(app, "/profile")?;
    let profile = app.profile().upload_avatar(file).await.map_err(describe)?;

    if let Some(url) = app.profile().avatar_url(&profile) {
        println!("Avatar updated: {}", url);
    } else {
        println!("Avatar updated.");
    }
    Ok(())
}
