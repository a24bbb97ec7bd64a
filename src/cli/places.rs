//! Places command handler
//!
//! Lists popular places within a radius of a point.

use super::{load_preferences, print_json, PointArgs, ServerArgs};
use crate::config::Config;
use crate::error::Result;
use crate::geo::Location;
use crate::i18n::Catalog;
use crate::places::format_distance;
use clap::Args;

/// Places command arguments
#[derive(Args)]
pub struct PlacesArgs {
    #[command(flatten)]
    pub point: PointArgs,

    /// Search radius in meters
    #[arg(long, short = 'r')]
    pub radius: Option<f64>,

    /// Result language (defaults to the saved preference)
    #[arg(long, short = 'l')]
    pub language: Option<String>,

    #[command(flatten)]
    pub server: ServerArgs,
}

/// Run the places command
pub async fn run(args: PlacesArgs) -> Result<()> {
    let config = Config::load()?;
    let client = args.server.client(&config)?;

    let language = args
        .language
        .unwrap_or_else(|| load_preferences().language_code);
    let radius = args.radius.unwrap_or(config.search.places_radius);
    let center = Location::new(args.point.coords());

    let places = client.popular_places(&center, radius, &language).await?;

    if args.server.json {
        return print_json(&places);
    }

    let catalog = Catalog::embedded()?;
    if places.is_empty() {
        println!("{}", catalog.translate("no_places", &language));
        println!("{}", catalog.translate("widen_radius", &language));
        return Ok(());
    }

    println!("{}", catalog.translate("popular_places", &language));
    for place in &places {
        let category = catalog.translate(&format!("place_{}", place.category), &language);
        println!(
            "  {:<40} {:>8}  {}",
            place.name,
            format_distance(place.distance_meters),
            category
        );
    }
    Ok(())
}
