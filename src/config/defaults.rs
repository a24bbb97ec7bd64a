//! Default configuration values
//!
//! Named constants for all tunable parameters

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 7878;

/// Default popular places radius in meters
pub const DEFAULT_PLACES_RADIUS: f64 = 500.0;

/// Default custom search radius in kilometers
pub const DEFAULT_VIDEO_RADIUS_KM: f64 = 10.0;

/// Default autocomplete quiet window in milliseconds
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Default geocoding provider
pub const DEFAULT_GEOCODER: &str = "google";

/// Outbound HTTP request timeout in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Environment variable overriding `api_keys.google_maps`
pub const ENV_GOOGLE_MAPS_KEY: &str = "GOOGLE_MAPS_API_KEY";

/// Environment variable overriding `api_keys.youtube`
pub const ENV_YOUTUBE_KEY: &str = "YOUTUBE_API_KEY";

/// Environment variable overriding `api_keys.google_translate`
pub const ENV_TRANSLATE_KEY: &str = "GOOGLE_TRANSLATE_API_KEY";

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Application directory name (for XDG paths)
pub const APP_DIR_NAME: &str = "geotube";
