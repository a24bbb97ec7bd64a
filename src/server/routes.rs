//! HTTP API routes
//!
//! Thin proxy endpoints over the geocoding, places, video and translation
//! providers, plus the interface string tables.

use crate::constants::limits::{CUSTOM_VIDEO_RESULTS, LOCATION_VIDEO_RESULTS};
use crate::error::Error;
use crate::geo::{Coordinates, GeoBackend, Location};
use crate::i18n::{find_language, Language, LANGUAGES};
use crate::places::{build_suggestions, PlaceSuggestion, RadiusQuery};
use crate::server::state::AppState;
use crate::translate::TranslationResult;
use crate::video::youtube::VideoQuery;
use crate::video::{location_query, CustomSearch, VideoResult};

use axum::{
    extract::{Path, State},
    http::{Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::debug;

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/api/geocode", post(reverse_geocode_handler))
        .route("/api/geocode/search", post(location_search_handler))
        .route("/api/youtube/search", post(video_search_handler))
        .route("/api/youtube/custom-search", post(custom_search_handler))
        .route("/api/places/popular", post(popular_places_handler))
        .route("/api/translate", post(translate_handler))
        .route("/api/languages", get(languages_handler))
        .route("/api/i18n/:code", get(strings_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// API error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self.code.as_str() {
            "CONFIGURATION_ERROR" | "INTERNAL_ERROR" => StatusCode::INTERNAL_SERVER_ERROR,
            "PROVIDER_ERROR" => StatusCode::BAD_GATEWAY,
            "NOT_FOUND" => StatusCode::NOT_FOUND,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status(), Json(self)).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let code = match &err {
            Error::InvalidCoordinates(_) => "INVALID_COORDINATES",
            Error::InvalidRadius(_) => "INVALID_RADIUS",
            Error::InvalidInput(_) => "INVALID_INPUT",
            Error::MissingCredential(_) => "CONFIGURATION_ERROR",
            Error::Provider(_) | Error::Http(_) | Error::Json(_) => "PROVIDER_ERROR",
            _ => "INTERNAL_ERROR",
        };
        ApiError {
            error: err.to_string(),
            code: code.to_string(),
        }
    }
}

/// Reverse geocode request body
#[derive(Debug, Deserialize)]
pub struct ReverseGeocodeRequest {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AddressResponse {
    pub address: String,
}

/// Reverse geocode coordinates
///
/// POST /api/geocode
async fn reverse_geocode_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ReverseGeocodeRequest>,
) -> Result<Json<AddressResponse>, ApiError> {
    let coords = Coordinates::new(req.lat, req.lng);
    coords.validate()?;

    let address = state
        .geocoder
        .reverse_geocode(coords)
        .await?
        .unwrap_or_else(|| coords.to_string());

    Ok(Json(AddressResponse { address }))
}

/// Location search request body
#[derive(Debug, Deserialize)]
pub struct LocationSearchRequest {
    #[serde(default)]
    pub query: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LocationsResponse {
    pub results: Vec<Location>,
}

/// Forward geocode free text
///
/// POST /api/geocode/search
async fn location_search_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LocationSearchRequest>,
) -> Result<Json<LocationsResponse>, ApiError> {
    let query = req.query.trim();
    if query.is_empty() {
        return Ok(Json(LocationsResponse { results: Vec::new() }));
    }

    let results = state.geocoder.search(query).await?;
    Ok(Json(LocationsResponse { results }))
}

/// Video search by location request body
#[derive(Debug, Deserialize)]
pub struct VideoSearchRequest {
    pub location: Location,
    #[serde(default)]
    pub language: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VideosResponse {
    pub videos: Vec<VideoResult>,
}

/// Videos around a location
///
/// POST /api/youtube/search
async fn video_search_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<VideoSearchRequest>,
) -> Result<Json<VideosResponse>, ApiError> {
    req.location.coords().validate()?;
    if !state.youtube.is_configured() {
        return Err(Error::MissingCredential(
            crate::video::youtube::MISSING_YOUTUBE_KEY.to_string(),
        )
        .into());
    }

    let mut named = req.location.clone();
    if named.address.is_none() {
        match state.geocoder.reverse_geocode(named.coords()).await {
            Ok(Some(address)) => named = named.with_address(address),
            Ok(None) => {}
            Err(e) => debug!("No address for video search: {}", e),
        }
    }

    let query = VideoQuery {
        q: location_query(&named),
        max_results: LOCATION_VIDEO_RESULTS,
        language: req.language,
        area: None,
        source_location: Some(req.location),
    };

    let videos = state.youtube.search(&query).await?;
    Ok(Json(VideosResponse { videos }))
}

/// Free-text video search
///
/// POST /api/youtube/custom-search
async fn custom_search_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CustomSearch>,
) -> Result<Json<VideosResponse>, ApiError> {
    req.validate()?;

    let query = VideoQuery {
        q: req.enhanced_query(),
        max_results: CUSTOM_VIDEO_RESULTS,
        language: req.language.clone(),
        area: req.location.as_ref().map(|l| (l.coords(), req.radius)),
        source_location: req.location.clone(),
    };

    let videos = state.youtube.search(&query).await?;
    Ok(Json(VideosResponse { videos }))
}

/// Nearby places request body
#[derive(Debug, Deserialize)]
pub struct PopularPlacesRequest {
    pub location: Location,
    /// Search radius in meters, the configured default when absent
    #[serde(default)]
    pub radius: Option<f64>,
    #[serde(default)]
    pub language: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PlacesResponse {
    pub places: Vec<PlaceSuggestion>,
}

/// Popular places around a location
///
/// POST /api/places/popular
async fn popular_places_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PopularPlacesRequest>,
) -> Result<Json<PlacesResponse>, ApiError> {
    let radius = req.radius.unwrap_or(state.config.search.places_radius);
    let query = RadiusQuery::new(req.location, radius)?;
    let language = req.language.as_deref().unwrap_or("en");

    let candidates = state
        .places
        .nearby(query.center().coords(), query.radius_meters(), language)
        .await?;

    Ok(Json(PlacesResponse {
        places: build_suggestions(&query, candidates),
    }))
}

/// Translation request body
#[derive(Debug, Deserialize)]
pub struct TranslateRequest {
    pub text: String,
    pub to: String,
    #[serde(default)]
    pub from: Option<String>,
}

/// Translate text
///
/// POST /api/translate
async fn translate_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TranslateRequest>,
) -> Result<Json<TranslationResult>, ApiError> {
    if req.to.trim().is_empty() {
        return Err(Error::InvalidInput("Target language must not be empty".to_string()).into());
    }

    let result = state
        .translator
        .translate(&req.text, &req.to, req.from.as_deref())
        .await?;

    Ok(Json(result))
}

#[derive(Debug, Serialize)]
pub struct LanguagesResponse {
    pub languages: Vec<Language>,
}

/// Supported interface languages
///
/// GET /api/languages
async fn languages_handler() -> Json<LanguagesResponse> {
    Json(LanguagesResponse {
        languages: LANGUAGES.to_vec(),
    })
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StringsResponse {
    pub language: String,
    pub strings: BTreeMap<String, String>,
}

/// Interface strings for a language, with fallbacks applied
///
/// GET /api/i18n/:code
async fn strings_handler(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> Result<Json<StringsResponse>, ApiError> {
    let language = find_language(&code).ok_or_else(|| ApiError {
        error: format!("Unsupported language: {}", code),
        code: "NOT_FOUND".to_string(),
    })?;

    Ok(Json(StringsResponse {
        language: language.code.to_string(),
        strings: state.catalog.resolve_table(language.code),
    }))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

/// Liveness check
///
/// GET /health
async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK".to_string(),
        timestamp: Utc::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tower::ServiceExt;

    const UNREACHABLE: &str = "http://127.0.0.1:9";

    fn test_config() -> Config {
        let mut config = Config::default();
        config.providers.geocode_url = UNREACHABLE.to_string();
        config.providers.places_url = UNREACHABLE.to_string();
        config.providers.youtube_url = UNREACHABLE.to_string();
        config.providers.translate_url = UNREACHABLE.to_string();
        config.providers.nominatim_url = UNREACHABLE.to_string();
        config.providers.timeout_secs = 2;
        config
    }

    fn create_test_state() -> Arc<AppState> {
        Arc::new(AppState::new(test_config()).unwrap())
    }

    fn with_all_keys() -> Arc<AppState> {
        let mut config = test_config();
        config.api_keys.google_maps = "maps-key".to_string();
        config.api_keys.youtube = "yt-key".to_string();
        config.api_keys.google_translate = "tr-key".to_string();
        Arc::new(AppState::new(config).unwrap())
    }

    async fn post_json(state: Arc<AppState>, uri: &str, body: Value) -> (StatusCode, Value) {
        let response = create_router(state)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("Content-Type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&body).unwrap())
    }

    async fn get_json(state: Arc<AppState>, uri: &str) -> (StatusCode, Value) {
        let response = create_router(state)
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&body).unwrap())
    }

    fn zocalo() -> Value {
        serde_json::json!({"lat": 19.4326, "lng": -99.1332})
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let (status, body) = get_json(create_test_state(), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "OK");
        assert!(body["timestamp"].as_str().unwrap().parse::<DateTime<Utc>>().is_ok());
    }

    #[tokio::test]
    async fn test_reverse_geocode_without_key() {
        let (status, body) = post_json(create_test_state(), "/api/geocode", zocalo()).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let err: ApiError = serde_json::from_value(body).unwrap();
        assert_eq!(err.code, "CONFIGURATION_ERROR");
        assert_eq!(err.error, "Google Maps API key not configured");
    }

    #[tokio::test]
    async fn test_reverse_geocode_invalid_coordinates() {
        let (status, body) = post_json(
            create_test_state(),
            "/api/geocode",
            serde_json::json!({"lat": 91.0, "lng": 0.0}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_COORDINATES");
    }

    #[tokio::test]
    async fn test_unreachable_provider_is_bad_gateway() {
        let (status, body) = post_json(with_all_keys(), "/api/geocode", zocalo()).await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["code"], "PROVIDER_ERROR");
    }

    #[tokio::test]
    async fn test_blank_location_search_is_empty() {
        let (status, body) = post_json(
            create_test_state(),
            "/api/geocode/search",
            serde_json::json!({"query": "   "}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!({"results": []}));
    }

    #[tokio::test]
    async fn test_location_search_without_key() {
        let (status, body) = post_json(
            create_test_state(),
            "/api/geocode/search",
            serde_json::json!({"query": "Zócalo"}),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["code"], "CONFIGURATION_ERROR");
    }

    #[tokio::test]
    async fn test_video_search_without_key() {
        let (status, body) = post_json(
            create_test_state(),
            "/api/youtube/search",
            serde_json::json!({"location": zocalo(), "language": "es"}),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "YouTube API key not configured");
    }

    #[tokio::test]
    async fn test_custom_search_rejects_blank_text() {
        let (status, body) = post_json(
            with_all_keys(),
            "/api/youtube/custom-search",
            serde_json::json!({"query": " ", "radius": 10, "category": "food"}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_INPUT");
    }

    #[tokio::test]
    async fn test_custom_search_text_only_reaches_provider() {
        // Valid without a location; fails only at the unreachable provider
        let (status, body) = post_json(
            with_all_keys(),
            "/api/youtube/custom-search",
            serde_json::json!({"query": "street food", "radius": 10, "category": "food"}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["code"], "PROVIDER_ERROR");
    }

    #[tokio::test]
    async fn test_custom_search_query_only_body() {
        let (status, body) = post_json(
            with_all_keys(),
            "/api/youtube/custom-search",
            serde_json::json!({"query": "tacos"}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["code"], "PROVIDER_ERROR");
    }

    #[tokio::test]
    async fn test_popular_places_invalid_radius() {
        let (status, body) = post_json(
            with_all_keys(),
            "/api/places/popular",
            serde_json::json!({"location": zocalo(), "radius": 0, "language": "en"}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_RADIUS");
    }

    #[tokio::test]
    async fn test_popular_places_without_key() {
        let (status, body) = post_json(
            create_test_state(),
            "/api/places/popular",
            serde_json::json!({"location": zocalo(), "radius": 500}),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["code"], "CONFIGURATION_ERROR");
    }

    #[tokio::test]
    async fn test_translate_without_key() {
        let (status, body) = post_json(
            create_test_state(),
            "/api/translate",
            serde_json::json!({"text": "Hello", "to": "es"}),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Google Translate API key not configured");
    }

    #[tokio::test]
    async fn test_translate_provider_failure_returns_original() {
        let (status, body) = post_json(
            with_all_keys(),
            "/api/translate",
            serde_json::json!({"text": "Hello", "to": "es", "from": "en"}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!({"translatedText": "Hello", "success": false}));
    }

    #[tokio::test]
    async fn test_languages_endpoint() {
        let (status, body) = get_json(create_test_state(), "/api/languages").await;

        assert_eq!(status, StatusCode::OK);
        let languages = body["languages"].as_array().unwrap();
        assert_eq!(languages.len(), 10);
        assert_eq!(languages[0], serde_json::json!({"code": "es", "name": "Español"}));
    }

    #[tokio::test]
    async fn test_strings_endpoint() {
        let (status, body) = get_json(create_test_state(), "/api/i18n/es").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["language"], "es");
        assert_eq!(body["strings"]["search"], "Buscar");

        // No table of its own: everything resolves through English
        let (status, body) = get_json(create_test_state(), "/api/i18n/ko").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["strings"]["search"], "Search");
    }

    #[tokio::test]
    async fn test_strings_unknown_language() {
        let (status, body) = get_json(create_test_state(), "/api/i18n/xx").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "NOT_FOUND");
    }
}
