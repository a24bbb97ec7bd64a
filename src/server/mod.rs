//! HTTP server for geotube
//!
//! Proxies geocoding, places, video search and translation so provider
//! credentials stay on the server.

pub mod routes;
pub mod state;

use crate::config::Config;
use crate::error::{Error, Result};
use routes::create_router;
use state::AppState;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

/// Start the HTTP server on the configured address
///
/// Never returns unless the server shuts down
pub async fn run(config: Config) -> Result<()> {
    let addr = config.server_addr();
    run_on(&addr, config).await
}

/// Start the HTTP server with a specific address
///
/// Useful for tests or when you want to override config
pub async fn run_on(addr: &str, config: Config) -> Result<()> {
    let addr: SocketAddr = addr
        .parse()
        .map_err(|e| Error::Server(format!("Invalid server address: {}", e)))?;

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| Error::Server(format!("Failed to bind to {}: {}", addr, e)))?;

    serve(listener, config).await
}

/// Serve on an already bound listener
pub async fn serve(listener: TcpListener, config: Config) -> Result<()> {
    warn_missing_keys(&config);

    let state = Arc::new(AppState::new(config)?);
    let app = create_router(state);

    if let Ok(addr) = listener.local_addr() {
        info!("Starting server on {}", addr);
    }

    axum::serve(listener, app)
        .await
        .map_err(|e| Error::Server(format!("Server error: {}", e)))?;

    Ok(())
}

fn warn_missing_keys(config: &Config) {
    let keys = &config.api_keys;
    if keys.google_maps().is_none() {
        if config.geocoding.provider == "google" {
            warn!("No Google Maps key: geocoding and places requests will fail");
        } else {
            warn!("No Google Maps key: places requests will fail");
        }
    }
    if keys.youtube().is_none() {
        warn!("No YouTube key: video searches will fail");
    }
    if keys.google_translate().is_none() {
        warn!("No Google Translate key: translation requests will fail");
    }
}
