//! Text translation through Google Translate v2
//!
//! Provider failures never surface as errors: the caller gets its own text
//! back with `success: false`. Only a missing key is reported, so the
//! server can answer with a configuration error.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::http::{build_client, read_json};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Message returned when the Translate key is absent
pub const MISSING_TRANSLATE_KEY: &str = "Google Translate API key not configured";

/// Outcome of a translation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationResult {
    pub translated_text: String,
    pub success: bool,
}

impl TranslationResult {
    /// The untranslated text, flagged as a failure
    pub fn untranslated(text: impl Into<String>) -> Self {
        Self {
            translated_text: text.into(),
            success: false,
        }
    }
}

/// Google Translate client
#[derive(Debug, Clone)]
pub struct Translator {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

#[derive(Debug, Serialize)]
struct TranslateBody<'a> {
    q: &'a str,
    target: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<&'a str>,
    format: &'static str,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    data: Option<TranslateData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TranslateData {
    #[serde(default)]
    translations: Vec<Translation>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Translation {
    translated_text: String,
}

impl Translator {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(
            build_client(config.request_timeout())?,
            config.providers.translate_url.clone(),
            config.api_keys.google_translate().map(str::to_string),
        ))
    }

    /// Translate `text` into `to`, auto-detecting the source when `from` is None
    ///
    /// Errors only with [`Error::MissingCredential`].
    pub async fn translate(
        &self,
        text: &str,
        to: &str,
        from: Option<&str>,
    ) -> Result<TranslationResult> {
        let key = self
            .api_key
            .as_deref()
            .ok_or_else(|| Error::MissingCredential(MISSING_TRANSLATE_KEY.to_string()))?;

        if text.trim().is_empty() || from == Some(to) {
            return Ok(TranslationResult {
                translated_text: text.to_string(),
                success: true,
            });
        }

        match self.request(text, to, from, key).await {
            Ok(Some(translated)) => Ok(TranslationResult {
                translated_text: translated,
                success: true,
            }),
            Ok(None) => Ok(TranslationResult::untranslated(text)),
            Err(e) => {
                warn!("Translation failed: {}", e);
                Ok(TranslationResult::untranslated(text))
            }
        }
    }

    async fn request(
        &self,
        text: &str,
        to: &str,
        from: Option<&str>,
        key: &str,
    ) -> Result<Option<String>> {
        let body = TranslateBody {
            q: text,
            target: to,
            source: from,
            format: "text",
        };

        let response = self
            .client
            .post(format!("{}?key={}", self.base_url, key))
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::Provider(format!("Translate request failed: {}", e)))?;

        let parsed: TranslateResponse = read_json("Translate API", response).await?;
        Ok(Self::first_translation(parsed))
    }

    fn first_translation(response: TranslateResponse) -> Option<String> {
        response
            .data?
            .translations
            .into_iter()
            .next()
            .map(|t| t.translated_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_translation() {
        let parsed: TranslateResponse = serde_json::from_str(
            r#"{"data": {"translations": [{"translatedText": "Hola", "detectedSourceLanguage": "en"}]}}"#,
        )
        .unwrap();
        assert_eq!(Translator::first_translation(parsed).as_deref(), Some("Hola"));

        let parsed: TranslateResponse =
            serde_json::from_str(r#"{"error": {"code": 403, "message": "denied"}}"#).unwrap();
        assert!(Translator::first_translation(parsed).is_none());
    }

    #[test]
    fn test_result_json_shape() {
        let json = serde_json::to_value(TranslationResult::untranslated("Hello")).unwrap();
        assert_eq!(json, serde_json::json!({"translatedText": "Hello", "success": false}));
    }

    #[test]
    fn test_body_omits_missing_source() {
        let body = TranslateBody {
            q: "Hello",
            target: "es",
            source: None,
            format: "text",
        };
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("source").is_none());
    }

    #[tokio::test]
    async fn test_missing_key() {
        let translator = Translator::new(reqwest::Client::new(), "http://127.0.0.1:9", None);
        let err = translator.translate("Hello", "es", None).await.unwrap_err();
        assert!(matches!(err, Error::MissingCredential(_)));
    }

    #[tokio::test]
    async fn test_unreachable_provider_returns_original_text() {
        let translator = Translator::new(
            reqwest::Client::new(),
            "http://127.0.0.1:9/translate",
            Some("key".to_string()),
        );

        let result = translator.translate("Hello", "es", Some("en")).await.unwrap();
        assert_eq!(result, TranslationResult::untranslated("Hello"));
    }

    #[tokio::test]
    async fn test_same_language_short_circuits() {
        let translator = Translator::new(
            reqwest::Client::new(),
            "http://127.0.0.1:9/translate",
            Some("key".to_string()),
        );

        let result = translator.translate("Hola", "es", Some("es")).await.unwrap();
        assert!(result.success);
        assert_eq!(result.translated_text, "Hola");
    }
}
