//! geotube CLI entry point
//!
//! Location-aware video discovery - CLI + proxy server

use geotube::cli;

#[tokio::main]
async fn main() {
    if let Err(e) = cli::run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
