//! Interface string lookup
//!
//! String tables are TOML resources compiled into the binary, one per
//! language. Lookup falls back in three steps: the requested language, then
//! the English table, then the key itself, so a lookup never yields nothing.

use crate::error::{Error, Result};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Language whose table backs every other one
pub const FALLBACK_LANGUAGE: &str = "en";

/// An interface language users can pick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Language {
    pub code: &'static str,
    pub name: &'static str,
}

/// Languages offered in preferences, in display order
pub const LANGUAGES: [Language; 10] = [
    Language { code: "es", name: "Español" },
    Language { code: "en", name: "English" },
    Language { code: "fr", name: "Français" },
    Language { code: "de", name: "Deutsch" },
    Language { code: "it", name: "Italiano" },
    Language { code: "pt", name: "Português" },
    Language { code: "zh", name: "中文" },
    Language { code: "ja", name: "日本語" },
    Language { code: "ko", name: "한국어" },
    Language { code: "ar", name: "العربية" },
];

/// Look up a supported language by ISO 639-1 code (case-insensitive)
pub fn find_language(code: &str) -> Option<&'static Language> {
    let code = code.trim().to_lowercase();
    LANGUAGES.iter().find(|l| l.code == code)
}

const EMBEDDED_TABLES: [(&str, &str); 7] = [
    ("en", include_str!("../../locales/en.toml")),
    ("es", include_str!("../../locales/es.toml")),
    ("fr", include_str!("../../locales/fr.toml")),
    ("de", include_str!("../../locales/de.toml")),
    ("it", include_str!("../../locales/it.toml")),
    ("pt", include_str!("../../locales/pt.toml")),
    ("ja", include_str!("../../locales/ja.toml")),
];

type Table = HashMap<String, String>;

/// Translation tables keyed by language code
#[derive(Debug, Clone)]
pub struct Catalog {
    tables: HashMap<String, Table>,
    fallback: String,
}

impl Catalog {
    /// Catalog built from the tables shipped with the crate
    pub fn embedded() -> Result<Self> {
        let mut tables = HashMap::new();

        for (code, source) in EMBEDDED_TABLES {
            let table: Table = toml::from_str(source).map_err(|e| {
                Error::Config(format!("Invalid translation table {}: {}", code, e))
            })?;
            tables.insert(code.to_string(), table);
        }

        Ok(Self::from_tables(tables, FALLBACK_LANGUAGE))
    }

    /// Catalog from explicit tables
    pub fn from_tables(tables: HashMap<String, Table>, fallback: impl Into<String>) -> Self {
        Self {
            tables,
            fallback: fallback.into(),
        }
    }

    /// Table for a code, trying `es-MX` as `es` when needed
    fn table(&self, code: &str) -> Option<&Table> {
        let code = code.trim().to_lowercase();
        self.tables.get(&code).or_else(|| {
            let primary = code.split(['-', '_']).next()?;
            self.tables.get(primary)
        })
    }

    /// Whether a dedicated table exists for `code`
    pub fn has_table(&self, code: &str) -> bool {
        self.table(code).is_some()
    }

    /// Translate `key` for `language_code`
    ///
    /// Language table, then fallback table, then the key verbatim. Empty
    /// entries count as missing.
    pub fn translate(&self, key: &str, language_code: &str) -> String {
        let lookup = |table: Option<&Table>| {
            table
                .and_then(|t| t.get(key))
                .filter(|text| !text.is_empty())
                .cloned()
        };

        lookup(self.table(language_code))
            .or_else(|| lookup(self.tables.get(&self.fallback)))
            .unwrap_or_else(|| key.to_string())
    }

    /// Every known key resolved for `language_code`
    pub fn resolve_table(&self, language_code: &str) -> BTreeMap<String, String> {
        let mut keys: Vec<&String> = self.tables.values().flat_map(|t| t.keys()).collect();
        keys.sort();
        keys.dedup();

        keys.into_iter()
            .map(|key| (key.clone(), self.translate(key, language_code)))
            .collect()
    }
}
