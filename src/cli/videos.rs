//! Videos command handler
//!
//! Without text, searches videos around a point. With text, runs a custom
//! search that the point (when given) only refines.

use super::{load_preferences, print_json, ServerArgs};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::geo::{Coordinates, Location};
use crate::video::{CustomSearch, VideoCategory, VideoResult};
use clap::Args;

/// Videos command arguments
#[derive(Args)]
pub struct VideosArgs {
    /// Search text
    pub query: Vec<String>,

    /// Latitude
    #[arg(long, allow_negative_numbers = true, requires = "lng")]
    pub lat: Option<f64>,

    /// Longitude
    #[arg(long, allow_negative_numbers = true, requires = "lat")]
    pub lng: Option<f64>,

    /// Radius in kilometers for text searches near a point
    #[arg(long, short = 'r')]
    pub radius: Option<f64>,

    /// Category: all, travel, food, events, culture, nature
    #[arg(long, short = 'c', default_value = "all")]
    pub category: String,

    /// Relevance language (defaults to the saved preference)
    #[arg(long, short = 'l')]
    pub language: Option<String>,

    #[command(flatten)]
    pub server: ServerArgs,
}

/// Run the videos command
pub async fn run(args: VideosArgs) -> Result<()> {
    let config = Config::load()?;
    let client = args.server.client(&config)?;

    let language = args
        .language
        .unwrap_or_else(|| load_preferences().language_code);
    let category: VideoCategory = args.category.parse().map_err(Error::InvalidInput)?;

    let point = match (args.lat, args.lng) {
        (Some(lat), Some(lng)) => Some(client.locate(Coordinates::new(lat, lng)).await?),
        _ => None,
    };

    let videos = if args.query.is_empty() {
        let location = point.ok_or_else(|| {
            Error::InvalidInput("Give search text, or --lat and --lng".to_string())
        })?;
        eprintln!("Videos near {}", location.label());
        client.nearby_videos(&location, &language).await
    } else {
        let search = CustomSearch {
            query: args.query.join(" "),
            location: point,
            radius: args.radius.unwrap_or(config.search.video_radius_km),
            category,
            language: Some(language),
        };
        client.search_videos(&search).await?
    };

    if args.server.json {
        return print_json(&videos);
    }
    show(&videos);
    Ok(())
}

fn show(videos: &[VideoResult]) {
    if videos.is_empty() {
        println!("No videos found");
        return;
    }

    for video in videos {
        println!("{}", video.title);
        println!(
            "  {} | {} | {}",
            video.channel_title,
            video.published_at.format("%Y-%m-%d"),
            video.watch_url()
        );
        if let Some(place) = video.source_location.as_ref().and_then(Location::primary_place) {
            println!("  near {}", place);
        }
    }
}
