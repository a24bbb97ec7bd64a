//! Geographic types and geocoding
//!
//! Provides coordinate/location types, great-circle distance, and the
//! forward/reverse geocoding backends (Google, Nominatim).

pub mod distance;
pub mod google;
pub mod nominatim;

use crate::config::Config;
use crate::constants::geo::COORDINATE_DISPLAY_PRECISION;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

pub use distance::distance;

/// A geographic coordinate (latitude, longitude)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    /// Create new coordinates
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Validate that coordinates are within valid ranges
    ///
    /// Latitude: -90 to 90
    /// Longitude: -180 to 180
    pub fn validate(&self) -> Result<()> {
        if !self.lat.is_finite() || self.lat < -90.0 || self.lat > 90.0 {
            return Err(Error::InvalidCoordinates(format!(
                "Latitude {} is out of range [-90, 90]",
                self.lat
            )));
        }
        if !self.lng.is_finite() || self.lng < -180.0 || self.lng > 180.0 {
            return Err(Error::InvalidCoordinates(format!(
                "Longitude {} is out of range [-180, 180]",
                self.lng
            )));
        }
        Ok(())
    }
}

/// Formats as `"lat, lng"` with four decimals, e.g. `"19.4326, -99.1332"`
impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.prec$}, {:.prec$}",
            self.lat,
            self.lng,
            prec = COORDINATE_DISPLAY_PRECISION
        )
    }
}

/// A coordinate with an optional human-readable address
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl Location {
    /// Location without an address
    pub fn new(coords: Coordinates) -> Self {
        Self {
            lat: coords.lat,
            lng: coords.lng,
            address: None,
        }
    }

    /// Attach an address; blank addresses are dropped
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        let address = address.into();
        self.address = if address.trim().is_empty() {
            None
        } else {
            Some(address)
        };
        self
    }

    pub fn coords(&self) -> Coordinates {
        Coordinates::new(self.lat, self.lng)
    }

    /// Text to show for this location: the address, or the raw coordinates
    pub fn label(&self) -> String {
        match &self.address {
            Some(address) => address.clone(),
            None => self.coords().to_string(),
        }
    }

    /// First comma-separated segment of the address, trimmed
    ///
    /// `"Zócalo, Centro, CDMX"` gives `"Zócalo"`.
    pub fn primary_place(&self) -> Option<&str> {
        self.address
            .as_deref()
            .and_then(|a| a.split(',').next())
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// Trait for geocoding backends
pub trait GeoBackend: Send + Sync {
    /// Forward geocode free text to candidate locations (best first)
    ///
    /// No match is an empty list, not an error.
    fn search(
        &self,
        query: &str,
    ) -> impl std::future::Future<Output = Result<Vec<Location>>> + Send;

    /// Reverse geocode coordinates to an address
    fn reverse_geocode(
        &self,
        coords: Coordinates,
    ) -> impl std::future::Future<Output = Result<Option<String>>> + Send;
}

/// The geocoding backend selected by configuration
#[derive(Debug, Clone)]
pub enum Geocoder {
    Google(google::GoogleGeocoder),
    Nominatim(nominatim::NominatimBackend),
}

impl Geocoder {
    /// Build the backend named by `geocoding.provider`
    pub fn from_config(config: &Config) -> Result<Self> {
        match config.geocoding.provider.as_str() {
            "google" => Ok(Self::Google(google::GoogleGeocoder::from_config(config)?)),
            "nominatim" => Ok(Self::Nominatim(nominatim::NominatimBackend::from_config(
                config,
            )?)),
            other => Err(Error::Config(format!("Unknown geocoding provider: {}", other))),
        }
    }

    /// Provider name, as written in config
    pub fn name(&self) -> &'static str {
        match self {
            Self::Google(_) => "google",
            Self::Nominatim(_) => "nominatim",
        }
    }
}

impl GeoBackend for Geocoder {
    async fn search(&self, query: &str) -> Result<Vec<Location>> {
        match self {
            Self::Google(backend) => backend.search(query).await,
            Self::Nominatim(backend) => backend.search(query).await,
        }
    }

    async fn reverse_geocode(&self, coords: Coordinates) -> Result<Option<String>> {
        match self {
            Self::Google(backend) => backend.reverse_geocode(coords).await,
            Self::Nominatim(backend) => backend.reverse_geocode(coords).await,
        }
    }
}
