use std::fmt;
use std::str::FromStr;

use oxford_api::get_entry;

mod dictionary;
mod oxford_api;

pub use dictionary::{Entry, PartOfSpeech};

pub const DEFAULT_BASE_URL: &str = "https://od-api-sandbox.oxforddictionaries.com/api/v2";

#[derive(Debug, thiserror::Error)]
pub enum DictionaryError {
    #[error("request failed: {0}")]
    Fetch(#[source] reqwest::Error),
    #[error("no dictionary entry for '{word}'")]
    NotFound { word: String },
    #[error("API request failed with status code {0}")]
    Status(u16),
    #[error("response is not valid JSON: {0}")]
    Deserialize(#[source] serde_json::Error),
    #[error("error parsing API response: missing `{0}`")]
    MissingField(&'static str),
    #[error("no locales to look the word up in")]
    NoLocales,
}

impl DictionaryError {
    /// The HTTP status the API answered with, if it answered at all.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::NotFound { .. } => Some(404),
            Self::Status(code) => Some(*code),
            _ => None,
        }
    }
}

/// Region selector in the entries path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locale {
    EnGb,
    En,
}

impl Locale {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EnGb => "en-gb",
            Self::En => "en",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown locale '{0}', expected 'en-gb' or 'en'")]
pub struct UnknownLocale(String);

impl FromStr for Locale {
    type Err = UnknownLocale;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match &s.trim().to_ascii_lowercase()[..] {
            "en-gb" => Ok(Self::EnGb),
            "en" => Ok(Self::En),
            other => Err(UnknownLocale(other.to_owned())),
        }
    }
}

#[derive(Clone)]
pub struct Credentials {
    pub app_id: String,
    pub app_key: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("app_id", &self.app_id)
            .field("app_key", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct Dictionary {
    client: reqwest::Client,
    base_url: String,
    credentials: Credentials,
    locales: Vec<Locale>,
}

impl Dictionary {
    /// Looks words up in `en-gb` first and then in `en`.
    pub fn new(base_url: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            credentials,
            locales: vec![Locale::EnGb, Locale::En],
        }
    }

    pub fn with_locales(mut self, locales: Vec<Locale>) -> Self {
        self.locales = locales;
        self
    }

    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    pub fn locales(&self) -> &[Locale] {
        &self.locales
    }

    /// A single request against one locale.
    pub async fn lookup(&self, word: &str, locale: Locale) -> Result<Entry, DictionaryError> {
        get_entry(&self.client, &self.base_url, &self.credentials, locale, word).await
    }

    /// Tries every configured locale in order. The first entry found wins;
    /// when all of them fail the last error is returned.
    pub async fn get_definition(&self, word: &str) -> Result<Entry, DictionaryError> {
        let mut last_error = DictionaryError::NoLocales;
        for &locale in &self.locales {
            match self.lookup(word, locale).await {
                Ok(entry) => return Ok(entry),
                Err(error) => {
                    tracing::warn!(word, %locale, %error, "dictionary lookup failed");
                    last_error = error;
                }
            }
        }
        Err(last_error)
    }

    /// The definition alone, or `None` when it could not be obtained.
    pub async fn fetch_definition(&self, word: &str) -> Option<String> {
        self.get_definition(word)
            .await
            .ok()
            .map(|entry| entry.definition)
    }
}
