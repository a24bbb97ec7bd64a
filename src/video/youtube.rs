//! YouTube Data API v3 search backend
//!
//! Requires `api_keys.youtube`.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::geo::{Coordinates, Location};
use crate::http::{build_client, read_json};
use crate::video::VideoResult;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::debug;

/// Message returned when the YouTube key is absent
pub const MISSING_YOUTUBE_KEY: &str = "YouTube API key not configured";

/// YouTube search client
#[derive(Debug, Clone)]
pub struct YouTubeClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

/// Parameters of one search call
#[derive(Debug, Clone, PartialEq)]
pub struct VideoQuery {
    pub q: String,
    pub max_results: usize,
    /// ISO 639-1 code used as a relevance hint
    pub language: Option<String>,
    /// Restrict to videos recorded within `radius_km` of a point
    pub area: Option<(Coordinates, f64)>,
    /// Attached to every result as its source location
    pub source_location: Option<Location>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: ItemId,
    snippet: Snippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItemId {
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Snippet {
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    channel_title: String,
    published_at: String,
    #[serde(default)]
    thumbnails: Thumbnails,
}

#[derive(Debug, Default, Deserialize)]
struct Thumbnails {
    default: Option<Thumbnail>,
    medium: Option<Thumbnail>,
    high: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    url: String,
}

impl Thumbnails {
    /// Medium first, it fits the result grid
    fn best_url(self) -> String {
        self.medium
            .or(self.high)
            .or(self.default)
            .map(|t| t.url)
            .unwrap_or_default()
    }
}

impl VideoQuery {
    /// Encoded query string (without the key)
    fn to_params(&self) -> String {
        let mut params = format!(
            "part=snippet&type=video&q={}&maxResults={}",
            urlencoding::encode(&self.q),
            self.max_results
        );

        if let Some(language) = &self.language {
            params.push_str(&format!("&relevanceLanguage={}", urlencoding::encode(language)));
        }

        if let Some((center, radius_km)) = self.area {
            params.push_str(&format!(
                "&location={},{}&locationRadius={}km",
                center.lat, center.lng, radius_km
            ));
        }

        params
    }
}

impl YouTubeClient {
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
            config.providers.youtube_url.clone(),
            config.api_keys.youtube().map(str::to_string),
        ))
    }

    /// Whether a key is configured
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Run one search; a response without items is an empty list
    pub async fn search(&self, query: &VideoQuery) -> Result<Vec<VideoResult>> {
        let key = self
            .api_key
            .as_deref()
            .ok_or_else(|| Error::MissingCredential(MISSING_YOUTUBE_KEY.to_string()))?;

        let url = format!("{}/search?{}&key={}", self.base_url, query.to_params(), key);
        debug!("YouTube search for {:?}", query.q);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Provider(format!("YouTube request failed: {}", e)))?;

        let body: SearchResponse = read_json("YouTube API", response).await?;
        Ok(Self::videos(body, query.source_location.as_ref()))
    }

    fn videos(response: SearchResponse, source: Option<&Location>) -> Vec<VideoResult> {
        response
            .items
            .into_iter()
            .filter_map(|item| {
                let id = item.id.video_id?;
                let published_at = match DateTime::parse_from_rfc3339(&item.snippet.published_at) {
                    Ok(t) => t.with_timezone(&Utc),
                    Err(e) => {
                        debug!("Skipping video {} with bad timestamp: {}", id, e);
                        return None;
                    }
                };

                Some(VideoResult {
                    id,
                    title: item.snippet.title,
                    description: item.snippet.description,
                    thumbnail_url: item.snippet.thumbnails.best_url(),
                    channel_title: item.snippet.channel_title,
                    published_at,
                    source_location: source.cloned(),
                })
            })
            .collect()
    }
}
