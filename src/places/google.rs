//! Google Places nearby search
//!
//! Returns raw [`Candidate`]s in provider order; filtering happens in
//! [`build_suggestions`](super::build_suggestions).

use crate::config::Config;
use crate::error::{Error, Result};
use crate::geo::google::{Geometry, MISSING_MAPS_KEY};
use crate::geo::{Coordinates, Location};
use crate::http::{build_client, read_json};
use crate::places::Candidate;
use serde::Deserialize;
use tracing::{debug, warn};

/// Google Places backend (shares the Maps key)
#[derive(Debug, Clone)]
pub struct GooglePlaces {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NearbyResponse {
    status: String,
    #[serde(default)]
    results: Vec<NearbyPlace>,
}

#[derive(Debug, Deserialize)]
struct NearbyPlace {
    place_id: String,
    name: String,
    geometry: Geometry,
    vicinity: Option<String>,
    #[serde(default)]
    types: Vec<String>,
    rating: Option<f64>,
}

impl GooglePlaces {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(
            build_client(config.request_timeout())?,
            config.providers.places_url.clone(),
            config.api_keys.google_maps().map(str::to_string),
        ))
    }

    /// Points of interest around `center`, unfiltered
    pub async fn nearby(
        &self,
        center: Coordinates,
        radius_meters: f64,
        language: &str,
    ) -> Result<Vec<Candidate>> {
        let key = self
            .api_key
            .as_deref()
            .ok_or_else(|| Error::MissingCredential(MISSING_MAPS_KEY.to_string()))?;

        let url = format!(
            "{}?location={},{}&radius={}&type=point_of_interest&language={}&key={}",
            self.base_url,
            center.lat,
            center.lng,
            radius_meters,
            urlencoding::encode(language),
            key
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Provider(format!("Places request failed: {}", e)))?;

        let body: NearbyResponse = read_json("Places API", response).await?;
        Ok(Self::candidates(body))
    }

    fn candidates(response: NearbyResponse) -> Vec<Candidate> {
        match response.status.as_str() {
            "OK" => {}
            "ZERO_RESULTS" => {
                debug!("Places API returned no results");
                return Vec::new();
            }
            other => {
                warn!("Places API returned status {}", other);
                return Vec::new();
            }
        }

        response
            .results
            .into_iter()
            .map(|place| {
                let coords =
                    Coordinates::new(place.geometry.location.lat, place.geometry.location.lng);
                let mut location = Location::new(coords);
                if let Some(vicinity) = place.vicinity {
                    location = location.with_address(vicinity);
                }

                Candidate {
                    id: place.place_id,
                    name: place.name,
                    location,
                    types: place.types,
                    rating: place.rating,
                }
            })
            .collect()
    }
}
