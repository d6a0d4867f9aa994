//! Language selection for localized content.
//!
//! Every remedy and scheme row carries an authoritative English text plus
//! optional Hindi and Marathi overrides. Resolution is pure and
//! deterministic: the preferred language wins when a non-empty override
//! exists, English otherwise. Records are localized through a single
//! `localize` method per model so a view is never half-translated.

use serde::{Deserialize, Serialize};

/// Supported interface languages. English is the authoritative default:
/// every localizable field is guaranteed present in English.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Hi,
    Mr,
}

impl Language {
    /// Parse a language code. Unknown codes fall back to English, matching
    /// the sign-up default.
    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "hi" => Language::Hi,
            "mr" => Language::Mr,
            _ => Language::En,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Hi => "hi",
            Language::Mr => "mr",
        }
    }

    /// Name used in the model instruction block ("reply only in Hindi").
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Hi => "Hindi",
            Language::Mr => "Marathi",
        }
    }
}

/// Resolve one localized text field.
///
/// Rule, in order: the default language returns the default text; a
/// present, non-empty override for the preferred language returns that
/// override; anything else falls back to the default text. Absence of a
/// translation is normal, not an error.
pub fn resolve<'a>(
    default_text: &'a str,
    hi: Option<&'a str>,
    mr: Option<&'a str>,
    preferred: Language,
) -> &'a str {
    let localized = match preferred {
        Language::En => None,
        Language::Hi => hi,
        Language::Mr => mr,
    };
    match localized {
        Some(text) if !text.trim().is_empty() => text,
        _ => default_text,
    }
}

/// Detect the language of a chat message from its script.
///
/// The browser client used trigram detection; server side we only need to
/// separate Devanagari input from Latin input, and attribute Devanagari to
/// the caller's preferred language when that is Hindi or Marathi.
pub fn detect_language(text: &str, preferred: Language) -> Language {
    let devanagari = text
        .chars()
        .any(|c| ('\u{0900}'..='\u{097F}').contains(&c));
    if !devanagari {
        return Language::En;
    }
    match preferred {
        Language::Hi | Language::Mr => preferred,
        Language::En => Language::Hi,
    }
}
