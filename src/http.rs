//! Shared outbound HTTP client construction

use crate::error::{Error, Result};
use std::time::Duration;

/// User-Agent sent to every provider (Nominatim requires one)
pub const USER_AGENT: &str = concat!("geotube/", env!("CARGO_PKG_VERSION"));

/// Build a reqwest client with the crate's User-Agent and a request timeout
pub fn build_client(timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
        .map_err(|e| Error::Server(format!("Failed to build HTTP client: {}", e)))
}

/// Check the status of a provider response and decode its JSON body
pub async fn read_json<T: serde::de::DeserializeOwned>(
    provider: &str,
    response: reqwest::Response,
) -> Result<T> {
    if !response.status().is_success() {
        return Err(Error::Provider(format!(
            "{} returned status: {}",
            provider,
            response.status()
        )));
    }

    response
        .json()
        .await
        .map_err(|e| Error::Provider(format!("Failed to parse {} response: {}", provider, e)))
}
