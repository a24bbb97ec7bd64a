//! Server shared state
//!
//! Built once at startup from configuration and shared read-only by every
//! handler. Provider credentials live here and never leave the server.

use crate::config::Config;
use crate::error::Result;
use crate::geo::Geocoder;
use crate::i18n::Catalog;
use crate::places::google::GooglePlaces;
use crate::translate::Translator;
use crate::video::youtube::YouTubeClient;

/// Shared state for the HTTP server
#[derive(Debug)]
pub struct AppState {
    pub config: Config,
    pub geocoder: Geocoder,
    pub places: GooglePlaces,
    pub youtube: YouTubeClient,
    pub translator: Translator,
    pub catalog: Catalog,
}

impl AppState {
    /// Create application state, building every provider client
    pub fn new(config: Config) -> Result<Self> {
        Ok(Self {
            geocoder: Geocoder::from_config(&config)?,
            places: GooglePlaces::from_config(&config)?,
            youtube: YouTubeClient::from_config(&config)?,
            translator: Translator::from_config(&config)?,
            catalog: Catalog::embedded()?,
            config,
        })
    }
}
