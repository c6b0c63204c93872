use std::env;

use dictionary::{Credentials, Locale, UnknownLocale, DEFAULT_BASE_URL};

use crate::utilities::str_to_bool;
use crate::words::WordList;

pub const APP_ID: &str = "DAILY_DEFINE_APP_ID";
pub const APP_KEY: &str = "DAILY_DEFINE_APP_KEY";
pub const BASE_URL: &str = "DAILY_DEFINE_BASE_URL";
pub const LOCALES: &str = "DAILY_DEFINE_LOCALES";
pub const REQUIRE_DEFINITION: &str = "DAILY_DEFINE_REQUIRE_DEFINITION";
pub const WORDS: &str = "DAILY_DEFINE_WORDS";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} is not set, add it to the environment or to a .env file")]
    Missing(&'static str),
    #[error("DAILY_DEFINE_LOCALES: {0}")]
    Locale(#[from] UnknownLocale),
    #[error("{var} should be yes or no, got '{value}'")]
    NotABool { var: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub credentials: Credentials,
    pub base_url: String,
    /// Tried in order until one of them has the word
    pub locales: Vec<Locale>,
    /// Stop the round when no definition could be fetched
    pub require_definition: bool,
    /// Replaces the built-in word lists when set
    pub words: Option<WordList>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |key: &'static str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .ok_or(ConfigError::Missing(key))
        };
        let credentials = Credentials {
            app_id: required(APP_ID)?,
            app_key: required(APP_KEY)?,
        };

        let base_url = lookup(BASE_URL)
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let locales = match lookup(LOCALES) {
            Some(value) => parse_locales(&value)?,
            None => Vec::new(),
        };
        let locales = if locales.is_empty() {
            vec![Locale::EnGb, Locale::En]
        } else {
            locales
        };

        let require_definition = match lookup(REQUIRE_DEFINITION) {
            Some(value) => str_to_bool(value.clone()).ok_or(ConfigError::NotABool {
                var: REQUIRE_DEFINITION,
                value,
            })?,
            None => true,
        };

        let words = lookup(WORDS).and_then(|value| {
            WordList::new(
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|word| !word.is_empty())
                    .map(str::to_owned)
                    .collect(),
            )
        });

        Ok(Config {
            credentials,
            base_url,
            locales,
            require_definition,
            words,
        })
    }
}

/// Comma-separated, blanks ignored.
pub fn parse_locales(value: &str) -> Result<Vec<Locale>, UnknownLocale> {
    value
        .split(',')
        .filter(|part| !part.trim().is_empty())
        .map(str::parse)
        .collect()
}
