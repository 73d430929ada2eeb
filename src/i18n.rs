//! Localisation
//!
//! Flat key to string tables for English, Vietnamese and Hindi. Lookups fall back to English and
//! then to the key itself, so a missing translation never fails.

use std::{fmt, str::FromStr};

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const EN: &str = include_str!("../fixtures/i18n/en.yml");
const VI: &str = include_str!("../fixtures/i18n/vi.yml");
const HI: &str = include_str!("../fixtures/i18n/hi.yml");

/// Localisation errors
#[derive(Debug, Error)]
pub enum I18nError {
    /// A bundled table failed to parse
    #[error("Failed to parse {language} translations: {source}")]
    Yaml {
        /// Table being parsed
        language: Language,

        /// Parser error
        #[source]
        source: serde_norway::Error,
    },

    /// Language code not supported
    #[error("Unsupported language: {0}")]
    UnknownLanguage(String),
}

/// Interface language
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English
    #[default]
    En,

    /// Tiếng Việt
    Vi,

    /// हिन्दी
    Hi,
}

impl Language {
    /// Every supported language.
    pub const ALL: [Language; 3] = [Language::En, Language::Vi, Language::Hi];

    /// ISO 639-1 code
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Vi => "vi",
            Language::Hi => "hi",
        }
    }

    /// Name of the language in that language
    pub fn native_name(self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Vi => "Tiếng Việt",
            Language::Hi => "हिन्दी",
        }
    }

    fn source(self) -> &'static str {
        match self {
            Language::En => EN,
            Language::Vi => VI,
            Language::Hi => HI,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = I18nError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::ALL
            .into_iter()
            .find(|language| language.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| I18nError::UnknownLanguage(s.to_string()))
    }
}

/// Translation tables for every supported language.
#[derive(Debug, Clone, Default)]
pub struct Translations {
    tables: FxHashMap<Language, FxHashMap<String, String>>,
}

impl Translations {
    /// Parse the bundled tables.
    ///
    /// # Errors
    ///
    /// Returns [`I18nError::Yaml`] if a bundled table is not a flat string map.
    pub fn bundled() -> Result<Self, I18nError> {
        let mut translations = Self::default();

        for language in Language::ALL {
            translations.load(language, language.source())?;
        }

        Ok(translations)
    }

    /// Replace the table for `language` with the YAML in `source`.
    ///
    /// # Errors
    ///
    /// Returns [`I18nError::Yaml`] if `source` is not a flat string map.
    pub fn load(&mut self, language: Language, source: &str) -> Result<&mut Self, I18nError> {
        let table: FxHashMap<String, String> = serde_norway::from_str(source)
            .map_err(|source| I18nError::Yaml { language, source })?;

        self.tables.insert(language, table);

        Ok(self)
    }

    /// Look up a key without substitution or fallback.
    pub fn get(&self, language: Language, key: &str) -> Option<&str> {
        self.tables
            .get(&language)
            .and_then(|table| table.get(key))
            .map(String::as_str)
    }

    /// Translate `key`, replacing every `{name}` with its value from `params`.
    ///
    /// Falls back to English, then to the key itself.
    pub fn translate(&self, language: Language, key: &str, params: &[(&str, &str)]) -> String {
        let template = self
            .get(language, key)
            .or_else(|| self.get(Language::En, key))
            .unwrap_or(key);

        params
            .iter()
            .fold(template.to_string(), |text, (name, value)| {
                text.replace(&format!("{{{name}}}"), value)
            })
    }

    /// Translate a key that takes no parameters.
    pub fn text(&self, language: Language, key: &str) -> String {
        self.translate(language, key, &[])
    }
}
