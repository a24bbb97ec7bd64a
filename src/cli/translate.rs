//! Translate command handler

use super::{load_preferences, print_json, ServerArgs};
use crate::config::Config;
use crate::error::Result;
use crate::i18n::Catalog;
use clap::Args;

/// Translate command arguments
#[derive(Args)]
pub struct TranslateArgs {
    /// Text to translate, or a string key with --key
    #[arg(required = true)]
    pub text: Vec<String>,

    /// Target language (defaults to the saved preference)
    #[arg(long, short = 't')]
    pub to: Option<String>,

    /// Source language (auto-detected when absent)
    #[arg(long, short = 'f')]
    pub from: Option<String>,

    /// Look up an interface string key instead of calling the server
    #[arg(long, short = 'k')]
    pub key: bool,

    #[command(flatten)]
    pub server: ServerArgs,
}

/// Run the translate command
pub async fn run(args: TranslateArgs) -> Result<()> {
    let to = args.to.unwrap_or_else(|| load_preferences().language_code);
    let text = args.text.join(" ");

    if args.key {
        let catalog = Catalog::embedded()?;
        println!("{}", catalog.translate(&text, &to));
        return Ok(());
    }

    let config = Config::load()?;
    let client = args.server.client(&config)?;
    let result = client.translate(&text, &to, args.from.as_deref()).await;

    if args.server.json {
        return print_json(&result);
    }
    if !result.success {
        eprintln!("(untranslated)");
    }
    println!("{}", result.translated_text);
    Ok(())
}
