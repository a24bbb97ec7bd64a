//! Centralized constants for the geotube crate
//!
//! Values shared by the server, the client library and the CLI.

/// Geographic constants
pub mod geo {
    /// Mean Earth radius in meters
    pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

    /// Decimal places used when a location has no address to display
    pub const COORDINATE_DISPLAY_PRECISION: usize = 4;
}

/// Popular places filtering
pub mod places {
    /// Places closer than this add no navigational value
    pub const MIN_DISTANCE_METERS: f64 = 100.0;

    /// Upper bound on suggestions returned for one query
    pub const MAX_SUGGESTIONS: usize = 10;

    /// Popularity used when the provider has no rating for a place
    pub const NEUTRAL_POPULARITY: f64 = 50.0;
}

/// Provider request limits
pub mod limits {
    /// Forward geocoding results kept per query
    pub const MAX_LOCATION_RESULTS: usize = 5;

    /// Videos requested for a plain location search
    pub const LOCATION_VIDEO_RESULTS: usize = 20;

    /// Videos requested for a custom search
    pub const CUSTOM_VIDEO_RESULTS: usize = 25;

    /// Query term used when a location has no usable address
    pub const FALLBACK_VIDEO_QUERY: &str = "local videos";
}

/// External API endpoints
pub mod api {
    /// Google Geocoding API
    pub const GOOGLE_GEOCODE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";

    /// Google Places nearby search
    pub const GOOGLE_PLACES_URL: &str =
        "https://maps.googleapis.com/maps/api/place/nearbysearch/json";

    /// YouTube Data API v3
    pub const YOUTUBE_API_URL: &str = "https://www.googleapis.com/youtube/v3";

    /// Google Translate v2
    pub const GOOGLE_TRANSLATE_URL: &str =
        "https://translation.googleapis.com/language/translate/v2";

    /// OpenStreetMap Nominatim geocoding API
    pub const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";
}

/// Local client-side storage
pub mod storage {
    /// File holding the key/value store
    pub const STORE_FILE_NAME: &str = "storage.json";

    /// Key under which user preferences are stored
    pub const PREFERENCES_KEY: &str = "geoTubePreferences";
}
