//! Video search by location and keyword
//!
//! Turns a location (and optional free text and category) into a video
//! platform query. The provider call itself lives in [`youtube`].

pub mod youtube;

use crate::config::defaults::DEFAULT_VIDEO_RADIUS_KM;
use crate::constants::limits::FALLBACK_VIDEO_QUERY;
use crate::error::{Error, Result};
use crate::geo::Location;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single video search hit
///
/// Lives only until the next search replaces it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoResult {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "thumbnail")]
    pub thumbnail_url: String,
    pub channel_title: String,
    pub published_at: DateTime<Utc>,
    /// Location the search was made for
    #[serde(rename = "location", default, skip_serializing_if = "Option::is_none")]
    pub source_location: Option<Location>,
}

impl VideoResult {
    /// Watch page on the video platform
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.id)
    }
}

/// Topic used to refine a custom search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoCategory {
    #[default]
    All,
    Travel,
    Food,
    Events,
    Culture,
    Nature,
}

impl VideoCategory {
    /// Term appended to the query, if any
    pub fn keyword(&self) -> Option<&'static str> {
        match self {
            Self::All => None,
            Self::Travel => Some("travel"),
            Self::Food => Some("food"),
            Self::Events => Some("events"),
            Self::Culture => Some("culture"),
            Self::Nature => Some("nature"),
        }
    }

    pub fn all() -> [VideoCategory; 6] {
        [
            Self::All,
            Self::Travel,
            Self::Food,
            Self::Events,
            Self::Culture,
            Self::Nature,
        ]
    }
}

impl fmt::Display for VideoCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword().unwrap_or("all"))
    }
}

impl std::str::FromStr for VideoCategory {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::all()
            .into_iter()
            .find(|c| c.to_string() == s.to_lowercase())
            .ok_or_else(|| format!("Unknown video category: {}", s))
    }
}

/// Search term for "videos around this location"
///
/// The first segment of the address (e.g. the neighbourhood or landmark),
/// or a generic term when the location has no address.
pub fn location_query(location: &Location) -> String {
    location
        .primary_place()
        .unwrap_or(FALLBACK_VIDEO_QUERY)
        .to_string()
}

/// A free-text search optionally refined by location and category
///
/// Text alone is enough; the location only narrows the results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomSearch {
    pub query: String,
    #[serde(default)]
    pub location: Option<Location>,
    /// Geographic restriction in kilometers, used with `location`
    #[serde(default = "default_radius_km")]
    pub radius: f64,
    #[serde(default)]
    pub category: VideoCategory,
    #[serde(default)]
    pub language: Option<String>,
}

fn default_radius_km() -> f64 {
    DEFAULT_VIDEO_RADIUS_KM
}

impl CustomSearch {
    /// Reject blank text, invalid coordinates and non-positive radii
    pub fn validate(&self) -> Result<()> {
        if self.query.trim().is_empty() {
            return Err(Error::InvalidInput("Search text must not be empty".to_string()));
        }
        if let Some(location) = &self.location {
            location.coords().validate()?;
            if !self.radius.is_finite() || self.radius <= 0.0 {
                return Err(Error::InvalidRadius(format!(
                    "Radius must be positive, got {}",
                    self.radius
                )));
            }
        }
        Ok(())
    }

    /// Query text with the location's primary place and category appended
    pub fn enhanced_query(&self) -> String {
        let mut parts = vec![self.query.trim()];

        if let Some(place) = self.location.as_ref().and_then(Location::primary_place) {
            parts.push(place);
        }
        if let Some(keyword) = self.category.keyword() {
            parts.push(keyword);
        }

        parts.join(" ")
    }
}
