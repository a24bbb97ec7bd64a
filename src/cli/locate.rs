//! Locate command handler
//!
//! Reverse geocodes a point through the server. Prints the raw coordinates
//! when no address can be found.

use super::{print_json, PointArgs, ServerArgs};
use crate::config::Config;
use crate::error::Result;
use clap::Args;

/// Locate command arguments
#[derive(Args)]
pub struct LocateArgs {
    #[command(flatten)]
    pub point: PointArgs,

    #[command(flatten)]
    pub server: ServerArgs,
}

/// Run the locate command
pub async fn run(args: LocateArgs) -> Result<()> {
    let config = Config::load()?;
    let client = args.server.client(&config)?;

    let location = client.locate(args.point.coords()).await?;

    if args.server.json {
        print_json(&location)
    } else {
        println!("{}", location.label());
        Ok(())
    }
}
