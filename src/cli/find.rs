//! Find command handler
//!
//! One-shot location search, or an interactive mode where every stdin line
//! is a new state of the search box and lookups are debounced.

use super::{print_json, ServerArgs};
use crate::config::Config;
use crate::error::Result;
use crate::geo::Location;
use crate::search::{AutocompleteController, AutocompleteState};
use clap::Args;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Find command arguments
#[derive(Args)]
pub struct FindArgs {
    /// Place name or address
    #[arg(required_unless_present = "interactive")]
    pub query: Vec<String>,

    /// Read search text line by line from stdin
    #[arg(long, short = 'i')]
    pub interactive: bool,

    #[command(flatten)]
    pub server: ServerArgs,
}

/// Run the find command
pub async fn run(args: FindArgs) -> Result<()> {
    let config = Config::load()?;
    let client = args.server.client(&config)?;

    if args.interactive {
        let controller = AutocompleteController::new(Arc::new(client), config.debounce());
        return interactive(&controller, args.server.json).await;
    }

    let results = client.find_locations(&args.query.join(" ")).await;
    show(&results, args.server.json)
}

fn show(results: &[Location], json: bool) -> Result<()> {
    if json {
        return print_json(&results);
    }

    if results.is_empty() {
        println!("No locations found");
    }
    for (i, location) in results.iter().enumerate() {
        println!("{}. {} ({})", i + 1, location.label(), location.coords());
    }
    Ok(())
}

async fn interactive(
    controller: &AutocompleteController<crate::client::ApiClient>,
    json: bool,
) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut ticker = tokio::time::interval(Duration::from_millis(50));
    let mut input_open = true;
    let mut unshown = false;

    loop {
        tokio::select! {
            line = lines.next_line(), if input_open => match line? {
                Some(text) => {
                    controller.on_input(&text);
                    unshown = true;
                }
                None => input_open = false,
            },
            _ = ticker.tick() => {
                if controller.state() != AutocompleteState::Idle {
                    continue;
                }
                if unshown {
                    show(&controller.results(), json)?;
                    unshown = false;
                }
                if !input_open {
                    return Ok(());
                }
            }
        }
    }
}
