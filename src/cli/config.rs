//! Config command handler
//!
//! View and modify configuration settings.

use crate::config::Config;
use crate::error::{Error, Result};
use clap::Args;
use std::path::Path;

/// Config command arguments
#[derive(Args)]
pub struct ConfigArgs {
    /// Configuration key (e.g., "search.places_radius")
    pub key: Option<String>,

    /// Value to set (if not provided, shows current value)
    pub value: Option<String>,

    /// Show config file path
    #[arg(long)]
    pub path: bool,

    /// Reset config to defaults
    #[arg(long)]
    pub reset: bool,
}

/// Run the config command
pub fn run(args: ConfigArgs) -> Result<()> {
    if args.path {
        let path = Config::config_path()?;
        println!("{}", path.display());
        return Ok(());
    }

    if args.reset {
        let config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults");
        return Ok(());
    }

    // Environment overrides are runtime-only and never written back
    let path = Config::config_path()?;
    let config = Config::load_from(&path)?;

    match (&args.key, &args.value) {
        // No arguments: show all config
        (None, None) => {
            for line in render(&config) {
                println!("{}", line);
            }
        }

        // Key only: show that value
        (Some(key), None) => match config.get(key) {
            Some(value) => println!("{}", display_value(key, &value)),
            None => {
                eprintln!("Available keys:");
                for k in Config::available_keys() {
                    eprintln!("  {}", k);
                }
                return Err(Error::Config(format!("Unknown config key: {}", key)));
            }
        },

        // Key and value: set the value
        (Some(key), Some(value)) => {
            update(&path, key, value)?;
            println!("{} = {}", key, display_value(key, value));
        }

        (None, Some(_)) => {
            return Err(Error::Config(
                "Must specify a key to set a value".to_string(),
            ));
        }
    }

    Ok(())
}

/// Set one key in the config file at `path`
fn update(path: &Path, key: &str, value: &str) -> Result<()> {
    let mut config = Config::load_from(path)?;
    config.set(key, value)?;
    config.save_to(path)
}

/// Value as shown to the user, with credentials masked
fn display_value(key: &str, value: &str) -> String {
    if !Config::is_secret(key) {
        return value.to_string();
    }
    if value.trim().is_empty() {
        "(not configured)".to_string()
    } else {
        "***".to_string()
    }
}

/// All settings grouped by section, TOML-like
fn render(config: &Config) -> Vec<String> {
    let mut lines = Vec::new();
    let mut section = "";

    for key in Config::available_keys() {
        let Some((name, field)) = key.split_once('.') else {
            continue;
        };
        if name != section {
            if !section.is_empty() {
                lines.push(String::new());
            }
            lines.push(format!("[{}]", name));
            section = name;
        }

        let value = config.get(key).unwrap_or_default();
        lines.push(format!("{} = {}", field, display_value(key, &value)));
    }

    lines
}
