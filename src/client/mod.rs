//! Client for the geotube server
//!
//! Every public call degrades instead of failing: a reverse geocode that
//! cannot reach a provider yields a location labelled with its raw
//! coordinates, searches yield empty lists, and translation hands back the
//! original text. Failures are logged. Only invalid input is reported, and
//! it is rejected before any request is sent.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::geo::{Coordinates, Location};
use crate::http::build_client;
use crate::places::PlaceSuggestion;
use crate::search::{LocationSearch, VideoSource};
use crate::server::routes::{
    AddressResponse, ApiError, LocationsResponse, PlacesResponse, VideosResponse,
};
use crate::translate::TranslationResult;
use crate::video::{CustomSearch, VideoResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use tracing::{debug, warn};

/// HTTP client for the proxy endpoints
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Client for the server described by `config`
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(
            build_client(config.request_timeout())?,
            config.server_url(),
        ))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!("POST {}", url);

        let response = self.client.post(&url).json(body).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(match serde_json::from_str::<ApiError>(&body) {
                Ok(api) if api.code == "CONFIGURATION_ERROR" => Error::MissingCredential(api.error),
                Ok(api) if api.code.starts_with("INVALID_") => Error::InvalidInput(api.error),
                Ok(api) => Error::Provider(api.error),
                Err(_) => Error::Server(format!("{} returned HTTP {}", path, status)),
            });
        }

        Ok(response.json().await?)
    }

    /// Location for coordinates, with an address when one can be found
    ///
    /// Errors only for out-of-range coordinates. Any other failure yields
    /// a location without address, whose label is the formatted
    /// coordinates.
    pub async fn locate(&self, coords: Coordinates) -> Result<Location> {
        coords.validate()?;

        match self.fetch_address(coords).await {
            Ok(address) => Ok(Location::new(coords).with_address(address)),
            Err(e) => {
                warn!("Reverse geocoding failed, showing coordinates: {}", e);
                Ok(Location::new(coords))
            }
        }
    }

    /// Candidate locations for free text; empty on any failure
    pub async fn find_locations(&self, query: &str) -> Vec<Location> {
        self.fetch_locations(query).await.unwrap_or_else(|e| {
            warn!("Location search failed: {}", e);
            Vec::new()
        })
    }

    /// Videos around a location; empty on any failure
    pub async fn nearby_videos(&self, location: &Location, language: &str) -> Vec<VideoResult> {
        self.fetch_location_videos(location, language)
            .await
            .unwrap_or_else(|e| {
                warn!("Video search failed: {}", e);
                Vec::new()
            })
    }

    /// Custom video search; invalid searches are rejected locally
    pub async fn search_videos(&self, search: &CustomSearch) -> Result<Vec<VideoResult>> {
        search.validate()?;

        Ok(self.fetch_custom_videos(search).await.unwrap_or_else(|e| {
            warn!("Custom video search failed: {}", e);
            Vec::new()
        }))
    }

    /// Popular places within `radius_meters`; empty on any failure
    pub async fn popular_places(
        &self,
        location: &Location,
        radius_meters: f64,
        language: &str,
    ) -> Result<Vec<PlaceSuggestion>> {
        location.coords().validate()?;
        if !radius_meters.is_finite() || radius_meters <= 0.0 {
            return Err(Error::InvalidRadius(format!(
                "Radius must be positive, got {}",
                radius_meters
            )));
        }

        let body = json!({"location": location, "radius": radius_meters, "language": language});
        match self.post::<_, PlacesResponse>("/api/places/popular", &body).await {
            Ok(response) => Ok(response.places),
            Err(e) => {
                warn!("Popular places lookup failed: {}", e);
                Ok(Vec::new())
            }
        }
    }

    /// Translate text; the original text with `success: false` on failure
    pub async fn translate(&self, text: &str, to: &str, from: Option<&str>) -> TranslationResult {
        let body = json!({"text": text, "to": to, "from": from});
        self.post("/api/translate", &body).await.unwrap_or_else(|e| {
            warn!("Translation failed: {}", e);
            TranslationResult::untranslated(text)
        })
    }

    async fn fetch_address(&self, coords: Coordinates) -> Result<String> {
        let response: AddressResponse = self.post("/api/geocode", &coords).await?;
        Ok(response.address)
    }

    async fn fetch_locations(&self, query: &str) -> Result<Vec<Location>> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }
        let response: LocationsResponse = self
            .post("/api/geocode/search", &json!({"query": query}))
            .await?;
        Ok(response.results)
    }

    async fn fetch_location_videos(
        &self,
        location: &Location,
        language: &str,
    ) -> Result<Vec<VideoResult>> {
        let body = json!({"location": location, "language": language});
        let response: VideosResponse = self.post("/api/youtube/search", &body).await?;
        Ok(response.videos)
    }

    async fn fetch_custom_videos(&self, search: &CustomSearch) -> Result<Vec<VideoResult>> {
        let response: VideosResponse = self.post("/api/youtube/custom-search", search).await?;
        Ok(response.videos)
    }
}

impl LocationSearch for ApiClient {
    async fn search_locations(&self, query: &str) -> Result<Vec<Location>> {
        self.fetch_locations(query).await
    }
}

impl VideoSource for ApiClient {
    async fn videos_for_location(
        &self,
        location: &Location,
        language: &str,
    ) -> Result<Vec<VideoResult>> {
        self.fetch_location_videos(location, language).await
    }

    async fn custom_videos(&self, search: &CustomSearch) -> Result<Vec<VideoResult>> {
        search.validate()?;
        self.fetch_custom_videos(search).await
    }
}
