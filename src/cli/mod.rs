//! CLI command handlers
//!
//! Each subcommand has its own module with handler functions.

pub mod config;
pub mod distance;
pub mod find;
pub mod locate;
pub mod places;
pub mod prefs;
pub mod serve;
pub mod translate;
pub mod videos;

use crate::client::ApiClient;
use crate::config::Config;
use crate::error::Result;
use crate::geo::Coordinates;
use crate::http::build_client;
use crate::preferences::{LocalStore, PreferenceStore, UserPreferences};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

/// Location-aware video discovery
#[derive(Parser)]
#[command(name = "geotube")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the proxy server (foreground)
    Serve(serve::ServeArgs),

    /// Manage configuration
    Config(config::ConfigArgs),

    /// Show the address for coordinates
    Locate(locate::LocateArgs),

    /// Search locations by name
    Find(find::FindArgs),

    /// Popular places around a point
    Places(places::PlacesArgs),

    /// Search videos by location or text
    Videos(videos::VideosArgs),

    /// Translate text or look up interface strings
    Translate(translate::TranslateArgs),

    /// View and change user preferences
    Prefs(prefs::PrefsArgs),

    /// Great-circle distance between two points
    Distance(distance::DistanceArgs),
}

/// A point given on the command line
#[derive(Args, Debug, Clone, Copy)]
pub struct PointArgs {
    /// Latitude
    #[arg(long, allow_negative_numbers = true)]
    pub lat: f64,

    /// Longitude
    #[arg(long, allow_negative_numbers = true)]
    pub lng: f64,
}

impl PointArgs {
    pub fn coords(&self) -> Coordinates {
        Coordinates::new(self.lat, self.lng)
    }
}

/// Which server the client commands talk to
#[derive(Args, Debug, Clone, Default)]
pub struct ServerArgs {
    /// Server base URL (defaults to the configured host and port)
    #[arg(long)]
    pub server: Option<String>,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

impl ServerArgs {
    /// Client for the selected server
    pub fn client(&self, config: &Config) -> Result<ApiClient> {
        match &self.server {
            Some(url) => Ok(ApiClient::new(build_client(config.request_timeout())?, url)),
            None => ApiClient::from_config(config),
        }
    }
}

/// Install the global tracing subscriber
///
/// `RUST_LOG` wins over `default_filter`.
pub fn init_logging(default_filter: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

/// Preferences store at the default data path
pub fn preference_store() -> Result<PreferenceStore> {
    Ok(PreferenceStore::new(LocalStore::open_default()?))
}

/// Saved preferences, or the defaults
pub fn load_preferences() -> UserPreferences {
    match preference_store() {
        Ok(store) => store.load(),
        Err(e) => {
            tracing::warn!("No preference store, using defaults: {}", e);
            UserPreferences::default()
        }
    }
}

/// Print `value` as pretty JSON
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Run the CLI
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = match cli.command {
        Commands::Serve(_) => "info",
        _ => "warn",
    };
    init_logging(default_filter);

    match cli.command {
        Commands::Serve(args) => serve::run(args).await,
        Commands::Config(args) => config::run(args),
        Commands::Locate(args) => locate::run(args).await,
        Commands::Find(args) => find::run(args).await,
        Commands::Places(args) => places::run(args).await,
        Commands::Videos(args) => videos::run(args).await,
        Commands::Translate(args) => translate::run(args).await,
        Commands::Prefs(args) => prefs::run(args),
        Commands::Distance(args) => distance::run(args),
    }
}
