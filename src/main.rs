//! PhotoEase CLI application entry point
//!
//! Browses the remote photo listing page by page, keeps favorites in a local
//! database and filters loaded photos by title.
//!
//! # Usage
//!
//! ```bash
//! # First page of the listing
//! photoease browse
//!
//! # Three pages, only titles containing "porro"
//! photoease browse --pages 3 --search porro
//!
//! # Manage favorites
//! photoease favorite 42
//! photoease favorites
//! photoease unfavorite 42
//!
//! # Point at another listing for one run
//! photoease --base-url http://localhost:3000 browse
//! ```
//!
//! # Configuration
//!
//! Configuration is stored in the user's config directory
//! (`~/.config/photoease/config.toml` on Linux) and created with defaults on
//! first run. Set `RUST_LOG` (or pass `--verbose`) for diagnostics on stderr.

use std::sync::Arc;

use photoease::{
    PhotoEaseError,
    cli::{Cli, Commands},
    commands::{self, Session},
    config::PhotoEaseConfig,
    favorites::FavoritesDb,
    remote::HttpFetcher,
};
use tracing_subscriber::EnvFilter;

type Result<T> = std::result::Result<T, PhotoEaseError>;

/// Install the stderr log subscriber; `RUST_LOG` wins over `--verbose`
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Fold command-line overrides into the loaded configuration
fn apply_overrides(mut config: PhotoEaseConfig, cli: &Cli) -> PhotoEaseConfig {
    if let Some(base_url) = &cli.base_url {
        config.base_url.clone_from(base_url);
    }
    if let Some(db) = &cli.db {
        config.database_path = Some(db.clone());
    }
    config.quiet |= cli.quiet;
    config
}

/// Build the shared collaborators; an unusable endpoint aborts here
///
/// # Errors
///
/// Returns `PhotoEaseError` if the base URL is invalid or the favorites
/// database cannot be opened.
fn open_session(config: &PhotoEaseConfig) -> Result<Session<HttpFetcher>> {
    let fetcher = HttpFetcher::new(&config.base_url, config.timeout())?;
    let db_path = config.resolve_database_path()?;
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let store = FavoritesDb::open(&db_path)?;
    tracing::info!(endpoint = %fetcher.endpoint(), db = %db_path.display(), "session ready");
    Ok(Session::new(fetcher, Arc::new(store), config.page_size, config.quiet))
}

async fn run(cli: Cli) -> Result<()> {
    let config = apply_overrides(PhotoEaseConfig::load()?, &cli);

    match &cli.command {
        Commands::Browse { pages, search } => {
            let session = open_session(&config)?;
            commands::browse(&session, *pages, search.as_deref()).await?;
        }
        Commands::Favorites { search } => {
            let session = open_session(&config)?;
            commands::favorites::list(&session, search.as_deref()).await?;
        }
        Commands::Favorite { id } => {
            let session = open_session(&config)?;
            let photo = session.fetcher.fetch_photo(*id).await?;
            commands::favorites::add(&session, &photo)?;
        }
        Commands::Unfavorite { id } => {
            let session = open_session(&config)?;
            commands::favorites::remove(&session, *id)?;
        }
        Commands::Config { command } => commands::config(&config, *command)?,
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> std::process::ExitCode {
    let cli = Cli::parse_args();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("Error: {error}");
            std::process::ExitCode::FAILURE
        }
    }
}
