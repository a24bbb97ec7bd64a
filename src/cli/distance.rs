//! Distance command handler

use crate::error::Result;
use crate::geo::{distance, Coordinates};
use crate::places::format_distance;
use clap::Args;

/// Distance command arguments
#[derive(Args)]
pub struct DistanceArgs {
    /// Latitude of the first point
    #[arg(allow_negative_numbers = true)]
    pub lat1: f64,
    /// Longitude of the first point
    #[arg(allow_negative_numbers = true)]
    pub lng1: f64,
    /// Latitude of the second point
    #[arg(allow_negative_numbers = true)]
    pub lat2: f64,
    /// Longitude of the second point
    #[arg(allow_negative_numbers = true)]
    pub lng2: f64,

    /// Print meters only
    #[arg(long)]
    pub raw: bool,
}

/// Run the distance command
pub fn run(args: DistanceArgs) -> Result<()> {
    let a = Coordinates::new(args.lat1, args.lng1);
    let b = Coordinates::new(args.lat2, args.lng2);
    a.validate()?;
    b.validate()?;

    let meters = distance(a, b);
    if args.raw {
        println!("{:.3}", meters);
    } else {
        println!("{} ({:.1} m)", format_distance(meters), meters);
    }
    Ok(())
}
