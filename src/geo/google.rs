//! Google Geocoding API backend
//!
//! Requires `api_keys.google_maps`. Forward searches keep the first
//! [`MAX_LOCATION_RESULTS`] matches.

use crate::config::Config;
use crate::constants::limits::MAX_LOCATION_RESULTS;
use crate::error::{Error, Result};
use crate::geo::{Coordinates, GeoBackend, Location};
use crate::http::{build_client, read_json};
use serde::Deserialize;
use tracing::{debug, warn};

/// Message returned when the Maps key is absent
pub const MISSING_MAPS_KEY: &str = "Google Maps API key not configured";

/// Google geocoding backend
#[derive(Debug, Clone)]
pub struct GoogleGeocoder {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

/// Geocoding API response envelope
#[derive(Debug, Deserialize)]
pub(crate) struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    formatted_address: String,
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Geometry {
    pub(crate) location: LatLng,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LatLng {
    pub(crate) lat: f64,
    pub(crate) lng: f64,
}

impl GoogleGeocoder {
    /// Create a backend from explicit parts
    pub fn new(client: reqwest::Client, base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key,
        }
    }

    /// Create a backend from server configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(
            build_client(config.request_timeout())?,
            config.providers.geocode_url.clone(),
            config.api_keys.google_maps().map(str::to_string),
        ))
    }

    fn key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .ok_or_else(|| Error::MissingCredential(MISSING_MAPS_KEY.to_string()))
    }

    async fn fetch(&self, params: &str) -> Result<GeocodeResponse> {
        let url = format!("{}?{}&key={}", self.base_url, params, self.key()?);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Provider(format!("Geocoding request failed: {}", e)))?;

        read_json("Geocoding API", response).await
    }

    /// Convert a forward-geocoding response into locations
    pub(crate) fn locations(response: GeocodeResponse) -> Vec<Location> {
        if response.status != "OK" {
            log_status(&response.status);
            return Vec::new();
        }

        response
            .results
            .into_iter()
            .take(MAX_LOCATION_RESULTS)
            .map(|r| {
                Location::new(Coordinates::new(r.geometry.location.lat, r.geometry.location.lng))
                    .with_address(r.formatted_address)
            })
            .collect()
    }

    /// Extract the best address from a reverse-geocoding response
    pub(crate) fn first_address(response: GeocodeResponse) -> Option<String> {
        if response.status != "OK" {
            log_status(&response.status);
            return None;
        }

        response
            .results
            .into_iter()
            .next()
            .map(|r| r.formatted_address)
    }
}

fn log_status(status: &str) {
    if status == "ZERO_RESULTS" {
        debug!("Geocoding API returned no results");
    } else {
        warn!("Geocoding API returned status {}", status);
    }
}

impl GeoBackend for GoogleGeocoder {
    async fn search(&self, query: &str) -> Result<Vec<Location>> {
        let params = format!("address={}", urlencoding::encode(query));
        let response = self.fetch(&params).await?;
        Ok(Self::locations(response))
    }

    async fn reverse_geocode(&self, coords: Coordinates) -> Result<Option<String>> {
        let params = format!("latlng={},{}", coords.lat, coords.lng);
        let response = self.fetch(&params).await?;
        Ok(Self::first_address(response))
    }
}
