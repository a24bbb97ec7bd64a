//! Popular nearby places
//!
//! Builds radius-filtered suggestions from raw provider candidates. The
//! distance of every suggestion is recomputed locally with the haversine
//! function; whatever distance a provider reports is ignored.

pub mod google;

use crate::constants::places::{MAX_SUGGESTIONS, MIN_DISTANCE_METERS, NEUTRAL_POPULARITY};
use crate::error::{Error, Result};
use crate::geo::{distance, Location};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Broad place category shown next to a suggestion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceCategory {
    Restaurant,
    Attraction,
    Park,
    Shopping,
    Entertainment,
    Other,
}

impl PlaceCategory {
    /// Classify a single provider type tag
    fn from_tag(tag: &str) -> Option<Self> {
        let category = match tag {
            "restaurant" | "cafe" | "bar" | "bakery" | "food" | "meal_takeaway"
            | "meal_delivery" => Self::Restaurant,
            "tourist_attraction" | "museum" | "art_gallery" | "church" | "place_of_worship"
            | "city_hall" | "library" | "landmark" => Self::Attraction,
            "park" | "natural_feature" | "campground" | "rv_park" => Self::Park,
            "shopping_mall" | "store" | "clothing_store" | "department_store"
            | "supermarket" | "book_store" | "jewelry_store" | "shoe_store" => Self::Shopping,
            "movie_theater" | "night_club" | "amusement_park" | "casino" | "bowling_alley"
            | "stadium" | "zoo" | "aquarium" => Self::Entertainment,
            _ => return None,
        };
        Some(category)
    }

    /// Category of the first recognised tag, in provider order
    pub fn from_types<I, S>(types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        types
            .into_iter()
            .find_map(|t| Self::from_tag(t.as_ref()))
            .unwrap_or(Self::Other)
    }
}

impl fmt::Display for PlaceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Restaurant => "restaurant",
            Self::Attraction => "attraction",
            Self::Park => "park",
            Self::Shopping => "shopping",
            Self::Entertainment => "entertainment",
            Self::Other => "other",
        };
        f.write_str(name)
    }
}

/// A search center plus a strictly positive radius in meters
#[derive(Debug, Clone, PartialEq)]
pub struct RadiusQuery {
    center: Location,
    radius_meters: f64,
}

impl RadiusQuery {
    pub fn new(center: Location, radius_meters: f64) -> Result<Self> {
        center.coords().validate()?;
        if !radius_meters.is_finite() || radius_meters <= 0.0 {
            return Err(Error::InvalidRadius(format!(
                "Radius must be positive, got {}",
                radius_meters
            )));
        }
        Ok(Self {
            center,
            radius_meters,
        })
    }

    pub fn center(&self) -> &Location {
        &self.center
    }

    pub fn radius_meters(&self) -> f64 {
        self.radius_meters
    }
}

/// A place as reported by a provider, before filtering
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub id: String,
    pub name: String,
    pub location: Location,
    /// Provider type tags, most specific first
    pub types: Vec<String>,
    /// Provider rating on a 0-5 scale
    pub rating: Option<f64>,
}

impl Candidate {
    fn into_suggestion(self, distance_meters: f64) -> PlaceSuggestion {
        let description = match self.types.first() {
            Some(tag) => format!("Popular {} in the area", tag.replace('_', " ")),
            None => "Popular place in the area".to_string(),
        };

        PlaceSuggestion {
            category: PlaceCategory::from_types(&self.types),
            popularity: self
                .rating
                .map(|r| (r * 20.0).round())
                .unwrap_or(NEUTRAL_POPULARITY),
            id: self.id,
            name: self.name,
            location: self.location,
            distance_meters,
            description,
        }
    }
}

/// A nearby place offered as a search destination
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceSuggestion {
    pub id: String,
    pub name: String,
    pub location: Location,
    /// Great-circle distance from the query center
    #[serde(rename = "distance")]
    pub distance_meters: f64,
    #[serde(rename = "type")]
    pub category: PlaceCategory,
    /// Placeholder ranking signal (0-100), not meaningful for ordering
    pub popularity: f64,
    pub description: String,
}

/// Whether a distance falls in the accepted band `[100m, radius]`
pub fn accepts_distance(distance_meters: f64, radius_meters: f64) -> bool {
    distance_meters >= MIN_DISTANCE_METERS && distance_meters <= radius_meters
}

/// Filter candidates to the query's distance band
///
/// Keeps upstream order and returns at most [`MAX_SUGGESTIONS`] entries.
/// Candidates with out-of-range coordinates are skipped.
pub fn build_suggestions<I>(query: &RadiusQuery, candidates: I) -> Vec<PlaceSuggestion>
where
    I: IntoIterator<Item = Candidate>,
{
    let center = query.center.coords();

    candidates
        .into_iter()
        .filter_map(|candidate| {
            let coords = candidate.location.coords();
            if coords.validate().is_err() {
                debug!("Skipping place {} with invalid coordinates", candidate.id);
                return None;
            }

            let d = distance(center, coords);
            accepts_distance(d, query.radius_meters)
                .then(|| candidate.into_suggestion(d))
        })
        .take(MAX_SUGGESTIONS)
        .collect()
}

/// Human-readable distance: `"450m"` below a kilometer, `"1.2km"` above
pub fn format_distance(distance_meters: f64) -> String {
    if distance_meters < 1000.0 {
        format!("{}m", distance_meters.round())
    } else {
        format!("{:.1}km", distance_meters / 1000.0)
    }
}
