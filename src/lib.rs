//! geotube: location-aware video discovery
//!
//! A library, proxy server and CLI for finding videos recorded around a
//! place: geolocate, reverse geocode to an address, search a video platform
//! by that address (or free text), and suggest popular places nearby.
//!
//! ## Features
//!
//! - Haversine distance and radius-filtered place suggestions
//! - Debounced location autocomplete that never shows stale results
//! - Proxy endpoints that keep provider credentials on the server
//! - Interface strings with language, English, then key fallback
//! - Saved user preferences
//!
//! ## Quick Start
//!
//! ```rust
//! use geotube::geo::{distance, Coordinates, Location};
//! use geotube::places::{build_suggestions, Candidate, RadiusQuery};
//!
//! let zocalo = Coordinates::new(19.4326, -99.1332);
//! let bellas_artes = Coordinates::new(19.4352, -99.1412);
//! assert!(distance(zocalo, bellas_artes) < 1000.0);
//!
//! let query = RadiusQuery::new(Location::new(zocalo), 1500.0).unwrap();
//! let candidates = vec![Candidate {
//!     id: "bellas-artes".to_string(),
//!     name: "Palacio de Bellas Artes".to_string(),
//!     location: Location::new(bellas_artes),
//!     types: vec!["museum".to_string()],
//!     rating: Some(4.8),
//! }];
//!
//! let suggestions = build_suggestions(&query, candidates);
//! assert_eq!(suggestions.len(), 1);
//! ```

pub mod cli;
pub mod client;
pub mod config;
pub mod constants;
pub mod error;
pub mod geo;
pub mod http;
pub mod i18n;
pub mod places;
pub mod preferences;
pub mod search;
pub mod server;
pub mod translate;
pub mod video;

// Re-export commonly used types
pub use client::ApiClient;
pub use config::Config;
pub use error::{Error, Result};
pub use geo::{Coordinates, Location};
pub use places::PlaceSuggestion;
pub use preferences::UserPreferences;
pub use video::VideoResult;
