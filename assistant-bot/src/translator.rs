//! Localized bot strings loaded from a JSON table.
//!
//! Shape: `{ "<lang>": { "messages": { "start": "...", "help": "..." } } }`.

use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;
use tracing::info;

use crate::core::BotError;

#[derive(Error, Debug)]
pub enum TranslatorError {
    #[error("unknown language '{0}'")]
    UnknownLanguage(String),

    #[error("no message '{key}' for language '{lang}'")]
    UnknownMessage { lang: String, key: String },

    #[error("failed to read locales file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid locales JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

impl From<TranslatorError> for BotError {
    fn from(e: TranslatorError) -> Self {
        match e {
            TranslatorError::Io(e) => BotError::Io(e),
            TranslatorError::Parse(e) => BotError::Config(e.to_string()),
            lookup => BotError::Lookup(lookup.to_string()),
        }
    }
}

#[derive(Debug, Deserialize)]
struct LanguageEntry {
    messages: HashMap<String, String>,
}

/// Lookup table of localized messages by language code and key.
#[derive(Debug)]
pub struct Translator {
    languages: HashMap<String, LanguageEntry>,
}

impl Translator {
    pub fn from_json(json: &str) -> Result<Self, TranslatorError> {
        let languages: HashMap<String, LanguageEntry> = serde_json::from_str(json)?;
        Ok(Self { languages })
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, TranslatorError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let translator = Self::from_json(&json)?;
        info!(
            path = %path.display(),
            languages = translator.languages.len(),
            "Locales loaded"
        );
        Ok(translator)
    }

    /// Returns the message `key` in `lang`. Unknown languages and keys are errors; there is
    /// no fallback language.
    pub fn get_message(&self, lang: &str, key: &str) -> Result<&str, TranslatorError> {
        let entry = self
            .languages
            .get(lang)
            .ok_or_else(|| TranslatorError::UnknownLanguage(lang.to_string()))?;
        entry
            .messages
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| TranslatorError::UnknownMessage {
                lang: lang.to_string(),
                key: key.to_string(),
            })
    }

    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.languages.keys().map(String::as_str)
    }
}
