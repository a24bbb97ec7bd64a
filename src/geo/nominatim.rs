//! Nominatim geocoding backend (OpenStreetMap)
//!
//! Keyless alternative to Google. Usage policy: 1 request per second and an
//! identifying User-Agent (set by [`build_client`]).

use crate::config::Config;
use crate::constants::limits::MAX_LOCATION_RESULTS;
use crate::error::{Error, Result};
use crate::geo::{Coordinates, GeoBackend, Location};
use crate::http::{build_client, read_json};
use serde::Deserialize;
use tracing::warn;

/// Nominatim geocoding backend
#[derive(Debug, Clone)]
pub struct NominatimBackend {
    client: reqwest::Client,
    base_url: String,
}

/// Nominatim place record
///
/// Reverse lookups over open water come back as `{"error": "..."}` with a
/// 200 status, so every field is optional.
#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: Option<String>,
    lon: Option<String>,
    display_name: Option<String>,
}

impl NominatimBackend {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(
            build_client(config.request_timeout())?,
            config.providers.nominatim_url.clone(),
        ))
    }

    /// Parse lat/lng strings to coordinates
    fn parse_coords(lat: &str, lng: &str) -> Result<Coordinates> {
        let lat: f64 = lat
            .parse()
            .map_err(|_| Error::Provider(format!("Invalid latitude: {}", lat)))?;
        let lng: f64 = lng
            .parse()
            .map_err(|_| Error::Provider(format!("Invalid longitude: {}", lng)))?;
        Ok(Coordinates::new(lat, lng))
    }

    /// Convert search records to locations, skipping incomplete ones
    fn locations(places: Vec<NominatimPlace>) -> Vec<Location> {
        let mut locations = Vec::new();

        for place in places.into_iter().take(MAX_LOCATION_RESULTS) {
            let (Some(lat), Some(lon)) = (place.lat, place.lon) else {
                continue;
            };
            let coords = match Self::parse_coords(&lat, &lon) {
                Ok(coords) => coords,
                Err(e) => {
                    warn!("Skipping Nominatim record: {}", e);
                    continue;
                }
            };
            let mut location = Location::new(coords);
            if let Some(name) = place.display_name {
                location = location.with_address(name);
            }
            locations.push(location);
        }

        locations
    }
}

impl GeoBackend for NominatimBackend {
    async fn search(&self, query: &str) -> Result<Vec<Location>> {
        let url = format!(
            "{}/search?q={}&format=json&limit={}",
            self.base_url,
            urlencoding::encode(query),
            MAX_LOCATION_RESULTS
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Provider(format!("Nominatim request failed: {}", e)))?;

        let places: Vec<NominatimPlace> = read_json("Nominatim", response).await?;
        Ok(Self::locations(places))
    }

    async fn reverse_geocode(&self, coords: Coordinates) -> Result<Option<String>> {
        let url = format!(
            "{}/reverse?lat={}&lon={}&format=json",
            self.base_url, coords.lat, coords.lng
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Provider(format!("Nominatim request failed: {}", e)))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let place: NominatimPlace = read_json("Nominatim", response).await?;
        Ok(place.display_name)
    }
}
