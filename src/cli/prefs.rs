//! Prefs command handler
//!
//! Shows or changes the saved interface language.

use super::preference_store;
use crate::error::Result;
use crate::i18n::{Catalog, LANGUAGES};
use clap::Args;

/// Prefs command arguments
#[derive(Args)]
pub struct PrefsArgs {
    /// Set the interface language by ISO 639-1 code
    #[arg(long, short = 'l')]
    pub language: Option<String>,

    /// List supported languages
    #[arg(long)]
    pub list: bool,

    /// Show the preferences file path
    #[arg(long)]
    pub path: bool,
}

/// Run the prefs command
pub fn run(args: PrefsArgs) -> Result<()> {
    let store = preference_store()?;
    let current = store.load();

    if args.list {
        for language in LANGUAGES {
            let marker = if language.code == current.language_code { "*" } else { " " };
            println!("{} {}  {}", marker, language.code, language.name);
        }
        return Ok(());
    }

    if args.path {
        println!("{}", store.path().display());
        return Ok(());
    }

    let catalog = Catalog::embedded()?;

    match args.language {
        Some(code) => {
            let updated = store.change_language(&current, &code)?;
            println!(
                "{}: {}",
                catalog.translate("language_saved", &updated.language_code),
                updated.display_language
            );
        }
        None => {
            let code = &current.language_code;
            println!(
                "{}: {} ({})",
                catalog.translate("interface_language", code),
                current.display_language,
                code
            );
        }
    }

    Ok(())
}
