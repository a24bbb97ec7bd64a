//! Configuration management
//!
//! Loads and saves configuration from XDG-compliant paths.
//! Config location: ~/.config/geotube/config.toml
//!
//! Provider credentials live only here (or in the environment) and are only
//! ever read by the server.

pub mod defaults;

use crate::constants::api;
use crate::error::{Error, Result};
use defaults::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Search defaults
    #[serde(default)]
    pub search: SearchConfig,

    /// Location autocomplete settings
    #[serde(default)]
    pub autocomplete: AutocompleteConfig,

    /// Geocoding provider selection
    #[serde(default)]
    pub geocoding: GeocodingConfig,

    /// Provider base URLs
    #[serde(default)]
    pub providers: ProvidersConfig,

    /// API keys for external services
    #[serde(default)]
    pub api_keys: ApiKeysConfig,
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Search defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Popular places radius in meters
    #[serde(default = "default_places_radius")]
    pub places_radius: f64,

    /// Custom video search radius in kilometers
    #[serde(default = "default_video_radius_km")]
    pub video_radius_km: f64,
}

/// Location autocomplete settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutocompleteConfig {
    /// Quiet window before a search fires, in milliseconds
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

/// Geocoding provider selection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodingConfig {
    /// "google" or "nominatim"
    #[serde(default = "default_geocoder")]
    pub provider: String,
}

/// Provider base URLs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvidersConfig {
    #[serde(default = "default_geocode_url")]
    pub geocode_url: String,

    #[serde(default = "default_places_url")]
    pub places_url: String,

    #[serde(default = "default_youtube_url")]
    pub youtube_url: String,

    #[serde(default = "default_translate_url")]
    pub translate_url: String,

    #[serde(default = "default_nominatim_url")]
    pub nominatim_url: String,

    /// Outbound request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub timeout_secs: u64,
}

/// API keys for external services
///
/// An empty string means "not configured".
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ApiKeysConfig {
    /// Google Maps (geocoding + places)
    #[serde(default)]
    pub google_maps: String,

    /// YouTube Data API
    #[serde(default)]
    pub youtube: String,

    /// Google Translate
    #[serde(default)]
    pub google_translate: String,
}

// Default value functions for serde
fn default_host() -> String {
    DEFAULT_HOST.to_string()
}
fn default_port() -> u16 {
    DEFAULT_PORT
}
fn default_places_radius() -> f64 {
    DEFAULT_PLACES_RADIUS
}
fn default_video_radius_km() -> f64 {
    DEFAULT_VIDEO_RADIUS_KM
}
fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE_MS
}
fn default_geocoder() -> String {
    DEFAULT_GEOCODER.to_string()
}
fn default_geocode_url() -> String {
    api::GOOGLE_GEOCODE_URL.to_string()
}
fn default_places_url() -> String {
    api::GOOGLE_PLACES_URL.to_string()
}
fn default_youtube_url() -> String {
    api::YOUTUBE_API_URL.to_string()
}
fn default_translate_url() -> String {
    api::GOOGLE_TRANSLATE_URL.to_string()
}
fn default_nominatim_url() -> String {
    api::NOMINATIM_URL.to_string()
}
fn default_request_timeout() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            places_radius: default_places_radius(),
            video_radius_km: default_video_radius_km(),
        }
    }
}

impl Default for AutocompleteConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
        }
    }
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            provider: default_geocoder(),
        }
    }
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            geocode_url: default_geocode_url(),
            places_url: default_places_url(),
            youtube_url: default_youtube_url(),
            translate_url: default_translate_url(),
            nominatim_url: default_nominatim_url(),
            timeout_secs: default_request_timeout(),
        }
    }
}

impl ApiKeysConfig {
    /// Google Maps key, if configured
    pub fn google_maps(&self) -> Option<&str> {
        non_empty(&self.google_maps)
    }

    /// YouTube key, if configured
    pub fn youtube(&self) -> Option<&str> {
        non_empty(&self.youtube)
    }

    /// Google Translate key, if configured
    pub fn google_translate(&self) -> Option<&str> {
        non_empty(&self.google_translate)
    }
}

fn non_empty(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join(APP_DIR_NAME))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Load configuration from the default path
    ///
    /// Creates default config if file doesn't exist. API keys present in the
    /// environment override the file.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_file()?;
        config.apply_env_with(|name| std::env::var(name).ok());
        Ok(config)
    }

    /// Load the config file alone, without environment overrides
    ///
    /// Use this when the result may be written back with [`Config::save`].
    pub fn load_file() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from a specific file, creating it if missing
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            let config = Config::default();
            config.save_to(path)?;
            return Ok(config);
        }

        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read config file: {}", e))
        })?;

        toml::from_str(&content).map_err(|e| {
            Error::Config(format!("Failed to parse config file: {}", e))
        })
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to a specific file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            Error::Config(format!("Failed to serialize config: {}", e))
        })?;

        fs::write(path, content).map_err(|e| {
            Error::Config(format!("Failed to write config file: {}", e))
        })?;

        Ok(())
    }

    /// Override API keys from a variable lookup (normally the process env)
    pub fn apply_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let overrides = [
            (ENV_GOOGLE_MAPS_KEY, &mut self.api_keys.google_maps),
            (ENV_YOUTUBE_KEY, &mut self.api_keys.youtube),
            (ENV_TRANSLATE_KEY, &mut self.api_keys.google_translate),
        ];

        for (name, slot) in overrides {
            if let Some(value) = lookup(name).filter(|v| !v.trim().is_empty()) {
                *slot = value;
            }
        }
    }

    /// Get a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns the value as a string, or None if not found
    pub fn get(&self, key: &str) -> Option<String> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["server", "host"] => Some(self.server.host.clone()),
            ["server", "port"] => Some(self.server.port.to_string()),

            ["search", "places_radius"] => Some(self.search.places_radius.to_string()),
            ["search", "video_radius_km"] => Some(self.search.video_radius_km.to_string()),

            ["autocomplete", "debounce_ms"] => Some(self.autocomplete.debounce_ms.to_string()),

            ["geocoding", "provider"] => Some(self.geocoding.provider.clone()),

            ["providers", "geocode_url"] => Some(self.providers.geocode_url.clone()),
            ["providers", "places_url"] => Some(self.providers.places_url.clone()),
            ["providers", "youtube_url"] => Some(self.providers.youtube_url.clone()),
            ["providers", "translate_url"] => Some(self.providers.translate_url.clone()),
            ["providers", "nominatim_url"] => Some(self.providers.nominatim_url.clone()),
            ["providers", "timeout_secs"] => Some(self.providers.timeout_secs.to_string()),

            ["api_keys", "google_maps"] => Some(self.api_keys.google_maps.clone()),
            ["api_keys", "youtube"] => Some(self.api_keys.youtube.clone()),
            ["api_keys", "google_translate"] => Some(self.api_keys.google_translate.clone()),

            _ => None,
        }
    }

    /// Set a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns error if key is invalid or value type is wrong
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["server", "host"] => {
                self.server.host = value.to_string();
            }
            ["server", "port"] => {
                self.server.port = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid port value: {}", value))
                })?;
            }

            ["search", "places_radius"] => {
                self.search.places_radius = parse_positive(value)?;
            }
            ["search", "video_radius_km"] => {
                self.search.video_radius_km = parse_positive(value)?;
            }

            ["autocomplete", "debounce_ms"] => {
                self.autocomplete.debounce_ms = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid debounce value: {}", value))
                })?;
            }

            ["geocoding", "provider"] => match value {
                "google" | "nominatim" => self.geocoding.provider = value.to_string(),
                _ => {
                    return Err(Error::Config(format!(
                        "Unknown geocoding provider: {}",
                        value
                    )))
                }
            },

            ["providers", "geocode_url"] => self.providers.geocode_url = value.to_string(),
            ["providers", "places_url"] => self.providers.places_url = value.to_string(),
            ["providers", "youtube_url"] => self.providers.youtube_url = value.to_string(),
            ["providers", "translate_url"] => self.providers.translate_url = value.to_string(),
            ["providers", "nominatim_url"] => self.providers.nominatim_url = value.to_string(),
            ["providers", "timeout_secs"] => {
                self.providers.timeout_secs = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid timeout value: {}", value))
                })?;
            }

            ["api_keys", "google_maps"] => self.api_keys.google_maps = value.to_string(),
            ["api_keys", "youtube"] => self.api_keys.youtube = value.to_string(),
            ["api_keys", "google_translate"] => {
                self.api_keys.google_translate = value.to_string()
            }

            _ => {
                return Err(Error::Config(format!("Unknown config key: {}", key)));
            }
        }

        Ok(())
    }

    /// List all available config keys
    pub fn available_keys() -> Vec<&'static str> {
        vec![
            "server.host",
            "server.port",
            "search.places_radius",
            "search.video_radius_km",
            "autocomplete.debounce_ms",
            "geocoding.provider",
            "providers.geocode_url",
            "providers.places_url",
            "providers.youtube_url",
            "providers.translate_url",
            "providers.nominatim_url",
            "providers.timeout_secs",
            "api_keys.google_maps",
            "api_keys.youtube",
            "api_keys.google_translate",
        ]
    }

    /// Whether a key holds a credential that must not be echoed back
    pub fn is_secret(key: &str) -> bool {
        key.starts_with("api_keys.")
    }

    /// Get server address as "host:port"
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Base URL clients use to reach the server
    pub fn server_url(&self) -> String {
        format!("http://{}", self.server_addr())
    }

    /// Autocomplete quiet window
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.autocomplete.debounce_ms)
    }

    /// Outbound provider request timeout
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.providers.timeout_secs)
    }
}

fn parse_positive(value: &str) -> Result<f64> {
    match value.parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => Ok(v),
        _ => Err(Error::Config(format!("Invalid radius value: {}", value))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::env;
    use tempfile::TempDir;

    fn with_temp_config<F: FnOnce()>(f: F) {
        let temp_dir = TempDir::new().unwrap();
        env::set_var("XDG_CONFIG_HOME", temp_dir.path());
        f();
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.server.port, 7878);
        assert_eq!(config.search.places_radius, 500.0);
        assert_eq!(config.autocomplete.debounce_ms, 300);
        assert_eq!(config.geocoding.provider, "google");
        assert!(config.api_keys.google_maps().is_none());
    }

    #[test]
    fn test_get_set() {
        let mut config = Config::default();

        assert_eq!(config.get("geocoding.provider"), Some("google".to_string()));

        config.set("geocoding.provider", "nominatim").unwrap();
        assert_eq!(config.get("geocoding.provider"), Some("nominatim".to_string()));

        config.set("search.places_radius", "1000").unwrap();
        assert_eq!(config.search.places_radius, 1000.0);

        config.set("autocomplete.debounce_ms", "400").unwrap();
        assert_eq!(config.debounce(), Duration::from_millis(400));
    }

    #[test]
    fn test_get_invalid_key() {
        let config = Config::default();
        assert_eq!(config.get("invalid.key"), None);
    }

    #[test]
    fn test_set_invalid_key() {
        let mut config = Config::default();
        assert!(config.set("invalid.key", "value").is_err());
    }

    #[test]
    fn test_set_invalid_values() {
        let mut config = Config::default();
        assert!(config.set("search.places_radius", "not_a_number").is_err());
        assert!(config.set("search.places_radius", "-5").is_err());
        assert!(config.set("geocoding.provider", "bing").is_err());
        assert!(config.set("server.port", "99999").is_err());
    }

    #[test]
    fn test_blank_keys_are_unset() {
        let mut config = Config::default();
        config.api_keys.youtube = "   ".to_string();
        assert!(config.api_keys.youtube().is_none());

        config.api_keys.youtube = "abc".to_string();
        assert_eq!(config.api_keys.youtube(), Some("abc"));
    }

    #[test]
    fn test_env_overrides_keys() {
        let mut config = Config::default();
        config.api_keys.google_translate = "from-file".to_string();

        let vars: HashMap<&str, &str> = [
            ("GOOGLE_MAPS_API_KEY", "maps-key"),
            ("YOUTUBE_API_KEY", ""),
        ]
        .into_iter()
        .collect();
        config.apply_env_with(|name| vars.get(name).map(|v| v.to_string()));

        assert_eq!(config.api_keys.google_maps(), Some("maps-key"));
        assert!(config.api_keys.youtube().is_none());
        assert_eq!(config.api_keys.google_translate(), Some("from-file"));
    }

    #[test]
    fn test_save_and_load() {
        with_temp_config(|| {
            let mut config = Config::default();
            config.server.port = 9000;
            config.search.video_radius_km = 25.0;
            config.save().unwrap();

            let loaded = Config::load().unwrap();
            assert_eq!(loaded.server.port, 9000);
            assert_eq!(loaded.search.video_radius_km, 25.0);
        });
    }

    #[test]
    fn test_load_from_creates_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.server.port, 7878);
        assert!(path.exists());
    }

    #[test]
    fn test_env_keys_stay_out_of_saved_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        Config::default().save_to(&path).unwrap();

        let mut runtime = Config::load_from(&path).unwrap();
        runtime.apply_env_with(|name| {
            (name == "YOUTUBE_API_KEY").then(|| "env-only-secret".to_string())
        });
        assert_eq!(runtime.api_keys.youtube(), Some("env-only-secret"));

        let mut file = Config::load_from(&path).unwrap();
        file.set("server.port", "8080").unwrap();
        file.save_to(&path).unwrap();

        let saved = fs::read_to_string(&path).unwrap();
        assert!(saved.contains("port = 8080"));
        assert!(!saved.contains("env-only-secret"));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let loaded: Config = toml::from_str("[server]\nport = 8080\n").unwrap();
        assert_eq!(loaded.server.port, 8080);
        assert_eq!(loaded.server.host, "127.0.0.1");
        assert_eq!(loaded.providers.youtube_url, api::YOUTUBE_API_URL);
    }

    #[test]
    fn test_serialization_format() {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config).unwrap();

        assert!(toml.contains("[server]"));
        assert!(toml.contains("[autocomplete]"));
        assert!(toml.contains("[providers]"));
        assert!(toml.contains("[api_keys]"));
    }

    #[test]
    fn test_server_addr() {
        let config = Config::default();
        assert_eq!(config.server_addr(), "127.0.0.1:7878");
        assert_eq!(config.server_url(), "http://127.0.0.1:7878");
    }

    #[test]
    fn test_available_keys() {
        let keys = Config::available_keys();
        let config = Config::default();
        for key in &keys {
            assert!(config.get(key).is_some(), "key {} not readable", key);
        }
        assert!(Config::is_secret("api_keys.youtube"));
        assert!(!Config::is_secret("server.port"));
    }
}
