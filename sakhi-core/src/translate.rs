//! Translation client.
//!
//! Thin pass-through to the external translation collaborator. Any
//! failure degrades to the original text; the outcome flag records
//! whether a translation actually happened, so an outage is
//! distinguishable from a translation that was a no-op. Failures are
//! logged at warn and never surfaced to users.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::locale::Language;

/// Request timeout for translation calls.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Whether the text actually went through the translation service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranslationOutcome {
    Translated,
    Fallback,
}

/// A translation result. `text` is always usable: on fallback it is the
/// untouched input.
#[derive(Debug, Clone)]
pub struct Translation {
    pub text: String,
    pub outcome: TranslationOutcome,
}

impl Translation {
    pub fn translated(text: String) -> Self {
        Self {
            text,
            outcome: TranslationOutcome::Translated,
        }
    }

    pub fn fallback(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            outcome: TranslationOutcome::Fallback,
        }
    }
}

/// Abstraction over translation providers.
#[async_trait]
pub trait TranslationBackend: Send + Sync {
    /// Translate `text` into `target`. Never fails: on any error the
    /// original text comes back flagged as a fallback.
    async fn translate(&self, text: &str, target: Language) -> Translation;

    /// Backend name for logging.
    fn name(&self) -> &str;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TranslateRequest<'a> {
    text: &'a str,
    target_lang: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TranslateResponse {
    translated_text: Option<String>,
}

/// HTTP translation client for a `POST {endpoint}` collaborator speaking
/// `{ text, targetLang }` -> `{ translatedText }`.
#[derive(Debug, Clone)]
pub struct HttpTranslationClient {
    client: Client,
    endpoint: String,
}

impl HttpTranslationClient {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    async fn request(&self, text: &str, target: Language) -> Result<String, reqwest::Error> {
        let body = TranslateRequest {
            text,
            target_lang: target.code(),
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        let parsed: TranslateResponse = response.json().await?;
        Ok(parsed.translated_text.unwrap_or_default())
    }
}

#[async_trait]
impl TranslationBackend for HttpTranslationClient {
    async fn translate(&self, text: &str, target: Language) -> Translation {
        match self.request(text, target).await {
            Ok(translated) if !translated.trim().is_empty() => Translation::translated(translated),
            Ok(_) => {
                tracing::warn!(target_lang = target.code(), "Translation service returned empty text");
                Translation::fallback(text)
            }
            Err(e) => {
                tracing::warn!(target_lang = target.code(), error = %e, "Translation failed");
                Translation::fallback(text)
            }
        }
    }

    fn name(&self) -> &str {
        "http"
    }
}

/// Used when no translation endpoint is configured: every request is an
/// immediate fallback.
#[derive(Debug, Clone, Default)]
pub struct DisabledTranslation;

#[async_trait]
impl TranslationBackend for DisabledTranslation {
    async fn translate(&self, text: &str, _target: Language) -> Translation {
        Translation::fallback(text)
    }

    fn name(&self) -> &str {
        "disabled"
    }
}

// ============================================================================
// TESTS
// ============================================================================
