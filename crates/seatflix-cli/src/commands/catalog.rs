use anyhow::Result;
use seatflix_application::ClientApp;

use super::{describe, enter};

pub async fn search(app: &ClientApp, query: &str) -> Result<()> {
    enter(app, "/search")?;
    let results = app.catalog().search(query).await.map_err(describe)?;

    if results.is_empty() {
        println!("No results found.");
        return Ok(());
    }
    for media in &results.results {
        println!(
            "{:<40} {:>4}  {:>4}  {}",
            media.title,
            media.release_year(),
            media.rating_label(),
            media.watch_path()
        );
    }
    Ok(())
}

pub async fn trending(app: &ClientApp) -> Result<()> {
    enter(app, "/search")?;
    let entries = app.catalog().trending().await.map_err(describe)?;

    if entries.is_empty() {
        println!("Nothing trending yet.");
    }
    for (rank, entry) in entries.iter().enumerate() {
        println!(
            "{:>2}. {} ({} searches) - {}",
            rank + 1,
            entry.search_term,
            entry.count,
            entry.title
        );
    }
    Ok(())
}

pub fn watch(app: &ClientApp, media_type: &str, id: &str) -> Result<()> {
    enter(app, &format!("/watch/{}/{}", media_type, id))?;
    let url = app.watch().embed_url(media_type, id).map_err(describe)?;

    println!("{}", url);
    println!("Movie not loading? Disable your ad blocker and try again.");
    Ok(())
}
