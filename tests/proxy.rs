//! End-to-end tests: client -> geotube server -> mock providers

use axum::extract::Query;
use axum::routing::{get, post};
use axum::{Json, Router};
use geotube::client::ApiClient;
use geotube::config::Config;
use geotube::geo::{Coordinates, Location};
use geotube::search::{AutocompleteController, AutocompleteState, VideoFeed};
use geotube::video::{CustomSearch, VideoCategory};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

const ZOCALO: (f64, f64) = (19.4326, -99.1332);
const ZOCALO_ADDRESS: &str = "Zócalo, Centro Histórico, Ciudad de México";

async fn spawn_router(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

async fn spawn_geotube(config: Config) -> ApiClient {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(geotube::server::serve(listener, config));
    ApiClient::new(reqwest::Client::new(), format!("http://{}", addr))
}

fn zocalo() -> Coordinates {
    Coordinates::new(ZOCALO.0, ZOCALO.1)
}

/// Meters north of the Zócalo as coordinates
fn north_of_zocalo(meters: f64) -> (f64, f64) {
    (ZOCALO.0 + meters / 111_195.0, ZOCALO.1)
}

async fn geocode(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    if params.contains_key("latlng") {
        return Json(json!({
            "status": "OK",
            "results": [{
                "formatted_address": ZOCALO_ADDRESS,
                "geometry": {"location": {"lat": ZOCALO.0, "lng": ZOCALO.1}}
            }]
        }));
    }

    let query = params.get("address").cloned().unwrap_or_default();
    let results: Vec<Value> = (0..6)
        .map(|i| {
            json!({
                "formatted_address": format!("{} {}", query, i),
                "geometry": {"location": {"lat": 19.0 + i as f64 * 0.1, "lng": -99.0}}
            })
        })
        .collect();
    Json(json!({"status": "OK", "results": results}))
}

async fn nearby() -> Json<Value> {
    let place = |id: &str, (lat, lng): (f64, f64), types: Value| {
        json!({
            "place_id": id,
            "name": id,
            "geometry": {"location": {"lat": lat, "lng": lng}},
            "vicinity": "Centro",
            "types": types,
            "rating": 4.5
        })
    };

    Json(json!({
        "status": "OK",
        "results": [
            place("same-spot", ZOCALO, json!(["tourist_attraction"])),
            place("cafe", north_of_zocalo(500.0), json!(["cafe", "food"])),
            place("far-park", north_of_zocalo(5000.0), json!(["park"])),
        ]
    }))
}

async fn youtube_search(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    let echo = |name: &str| params.get(name).cloned().unwrap_or_else(|| "none".to_string());
    Json(json!({
        "items": [{
            "id": {"videoId": "vid1"},
            "snippet": {
                "title": echo("q"),
                "description": format!("lang={}", echo("relevanceLanguage")),
                "channelTitle": echo("locationRadius"),
                "publishedAt": "2024-05-02T18:30:00Z",
                "thumbnails": {"medium": {"url": "https://i.ytimg.com/vi/vid1/mqdefault.jpg"}}
            }
        }]
    }))
}

async fn translate(Json(body): Json<Value>) -> Json<Value> {
    let text = match (body["q"].as_str(), body["target"].as_str()) {
        (Some("Hello"), Some("es")) => "Hola",
        (Some(q), _) => q,
        _ => "",
    };
    Json(json!({"data": {"translations": [{"translatedText": text}]}}))
}

async fn mocked_config() -> Config {
    let app = Router::new()
        .route("/geocode", get(geocode))
        .route("/places", get(nearby))
        .route("/youtube/search", get(youtube_search))
        .route("/translate", post(translate));
    let upstream = format!("http://{}", spawn_router(app).await);

    let mut config = Config::default();
    config.providers.geocode_url = format!("{}/geocode", upstream);
    config.providers.places_url = format!("{}/places", upstream);
    config.providers.youtube_url = format!("{}/youtube", upstream);
    config.providers.translate_url = format!("{}/translate", upstream);
    config.api_keys.google_maps = "maps-key".to_string();
    config.api_keys.youtube = "yt-key".to_string();
    config.api_keys.google_translate = "tr-key".to_string();
    config
}

fn unconfigured() -> Config {
    let mut config = Config::default();
    config.providers.geocode_url = "http://127.0.0.1:9".to_string();
    config.providers.places_url = "http://127.0.0.1:9".to_string();
    config.providers.youtube_url = "http://127.0.0.1:9".to_string();
    config.providers.translate_url = "http://127.0.0.1:9".to_string();
    config
}

#[tokio::test]
async fn test_no_keys_shows_raw_coordinates() {
    let client = spawn_geotube(unconfigured()).await;

    let location = client.locate(zocalo()).await.unwrap();
    assert_eq!(location.label(), "19.4326, -99.1332");

    let here = Location::new(zocalo());
    assert!(client.nearby_videos(&here, "es").await.is_empty());
    assert!(client.find_locations("Zócalo").await.is_empty());
    assert!(!client.translate("Hello", "es", None).await.success);
}

#[tokio::test]
async fn test_reverse_geocode_through_proxy() {
    let client = spawn_geotube(mocked_config().await).await;

    let location = client.locate(zocalo()).await.unwrap();
    assert_eq!(location.address.as_deref(), Some(ZOCALO_ADDRESS));
}

#[tokio::test]
async fn test_location_search_is_capped() {
    let client = spawn_geotube(mocked_config().await).await;

    let results = client.find_locations("Mexico").await;
    assert_eq!(results.len(), 5);
    assert_eq!(results[0].label(), "Mexico 0");
}

#[tokio::test]
async fn test_location_videos_use_reverse_geocoded_place() {
    let client = spawn_geotube(mocked_config().await).await;
    let here = Location::new(zocalo());

    let videos = client.nearby_videos(&here, "es").await;
    assert_eq!(videos.len(), 1);
    assert_eq!(videos[0].title, "Zócalo");
    assert_eq!(videos[0].description, "lang=es");
    assert_eq!(videos[0].channel_title, "none");
    assert_eq!(videos[0].source_location.as_ref(), Some(&here));
}

#[tokio::test]
async fn test_custom_search_refines_query_and_area() {
    let client = spawn_geotube(mocked_config().await).await;

    let search = CustomSearch {
        query: "tacos".to_string(),
        location: Some(Location::new(zocalo()).with_address(ZOCALO_ADDRESS)),
        radius: 10.0,
        category: VideoCategory::Food,
        language: Some("es".to_string()),
    };
    let videos = client.search_videos(&search).await.unwrap();
    assert_eq!(videos[0].title, "tacos Zócalo food");
    assert_eq!(videos[0].channel_title, "10km");

    let text_only = CustomSearch {
        location: None,
        category: VideoCategory::All,
        ..search
    };
    let videos = client.search_videos(&text_only).await.unwrap();
    assert_eq!(videos[0].title, "tacos");
    assert_eq!(videos[0].channel_title, "none");
}

#[tokio::test]
async fn test_popular_places_are_filtered_locally() {
    let client = spawn_geotube(mocked_config().await).await;
    let center = Location::new(zocalo());

    let places = client.popular_places(&center, 1000.0, "en").await.unwrap();
    assert_eq!(places.len(), 1);
    assert_eq!(places[0].id, "cafe");
    assert!((places[0].distance_meters - 500.0).abs() < 1.0);
    assert_eq!(places[0].popularity, 90.0);
}

#[tokio::test]
async fn test_translation_through_proxy() {
    let client = spawn_geotube(mocked_config().await).await;

    let result = client.translate("Hello", "es", Some("en")).await;
    assert!(result.success);
    assert_eq!(result.translated_text, "Hola");
}

#[tokio::test]
async fn test_autocomplete_over_http() {
    let client = spawn_geotube(mocked_config().await).await;
    let controller = AutocompleteController::new(Arc::new(client), Duration::from_millis(50));

    controller.on_input("Pue");
    controller.on_input("Puebla");
    assert_eq!(controller.state(), AutocompleteState::PendingDebounce);

    let mut waited = Duration::ZERO;
    while controller.state() != AutocompleteState::Idle && waited < Duration::from_secs(5) {
        tokio::time::sleep(Duration::from_millis(20)).await;
        waited += Duration::from_millis(20);
    }

    let results = controller.results();
    assert_eq!(results.len(), 5);
    assert_eq!(results[0].label(), "Puebla 0");
}

#[tokio::test]
async fn test_video_feed_over_http() {
    let client = spawn_geotube(mocked_config().await).await;
    let feed = VideoFeed::new(client);

    let here = Location::new(zocalo()).with_address(ZOCALO_ADDRESS);
    assert!(feed.search_location(&here, "en").await);

    let videos = feed.videos();
    assert_eq!(videos.len(), 1);
    assert_eq!(videos[0].title, "Zócalo");
}
