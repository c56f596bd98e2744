use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use seatflix_infrastructure::ConfigService;
use seatflix_infrastructure::paths::{SeatflixPaths, ServiceType};

mod commands;
mod logging;

#[derive(Parser)]
#[command(name = "seatflix")]
#[command(about = "SeatFlix - browse the catalog and manage your account from the terminal", long_about = None)]
struct Cli {
    /// SeatFlix backend base URL (overrides config.toml and SEATFLIX_API_URL)
    #[arg(long, global = true, value_name = "URL")]
    api_url: Option<String>,

    /// Session storage file (defaults to storage.toml in the config directory)
    #[arg(long, global = true, value_name = "FILE")]
    storage: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `seatflix_interaction=trace`
    #[arg(long, global = true, value_name = "LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "SEATFLIX_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Sign in and keep the session for later commands
    Login {
        #[arg(long)]
        username: String,
        #[arg(long, env = "SEATFLIX_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Sign out and forget the stored session
    Logout,
    /// Show who is signed in
    Whoami {
        /// Ask the server instead of reading the local session
        #[arg(long)]
        remote: bool,
    },
    /// Show the signed-in user's profile
    Profile,
    /// Upload an image as the profile avatar
    Avatar { file: PathBuf },
    /// Search movies by title; without a query, list popular movies
    Search { query: Vec<String> },
    /// Show the most searched titles
    Trending,
    /// Print the player URL for a movie or TV show
    Watch { media_type: String, id: String },
    /// Resolve an in-app path the way the router would
    Open { path: String },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_service = ConfigService::new(None)?;
    let mut config = tracing::subscriber::with_default(
        logging::bootstrap(cli.log_level.as_deref()),
        || config_service.get_config(),
    );
    if let Some(url) = &cli.api_url {
        config.api_base_url = Some(url.clone());
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }

    let logs_dir = SeatflixPaths::new(None)
        .get_path(ServiceType::Logs)
        .ok()
        .map(|path| path.into_path_buf());
    logging::init(&config.log_level, logs_dir.as_deref())?;
    tracing::debug!(path = %config_service.path().display(), "[Config] loaded");

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async move {
        let mut app = commands::build_app(&config, cli.storage.as_deref())?;

        let outcome = match cli.command {
            Commands::Register {
                username,
                email,
                password,
            } => commands::auth::register(&app, &username, &email, &password).await,
            Commands::Login { username, password } => {
                commands::auth::login(&app, &username, &password).await
            }
            Commands::Logout => commands::auth::logout(&app),
            Commands::Whoami { remote } => commands::auth::whoami(&app, remote).await,
            Commands::Profile => commands::profile::show(&app).await,
            Commands::Avatar { file } => commands::profile::upload_avatar(&app, &file).await,
            Commands::Search { query } => commands::catalog::search(&app, &query.join(" ")).await,
            Commands::Trending => commands::catalog::trending(&app).await,
            Commands::Watch { media_type, id } => {
                commands::catalog::watch(&app, &media_type, &id)
            }
            Commands::Open { path } => commands::open::open(&app, &path),
        };

        commands::finish(&mut app);
        outcome
    })
}
