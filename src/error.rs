//! Error types for geotube

use thiserror::Error;

/// Main error type for geotube operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Invalid radius: {0}")]
    InvalidRadius(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A provider credential is absent from the server configuration
    #[error("{0}")]
    MissingCredential(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Server error: {0}")]
    Server(String),

    #[error("Provider error: {0}")]
    Provider(String),
}

/// Result type alias for geotube operations
pub type Result<T> = std::result::Result<T, Error>;
