use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::dictionary::{Entry, PartOfSpeech};
use crate::{Credentials, DictionaryError, Locale};

// Only the first element at every level is ever read. A missing key, an empty
// array, `null` or a value of the wrong shape all read as `None`, so nothing
// outside the definition path can fail a lookup.

#[derive(Debug, Deserialize)]
pub(crate) struct RetrieveEntry {
    #[serde(default, deserialize_with = "first_of")]
    results: Option<HeadwordEntry>,
}

#[derive(Debug, Deserialize)]
struct HeadwordEntry {
    #[serde(default, rename = "lexicalEntries", deserialize_with = "first_of")]
    lexical_entry: Option<LexicalEntry>,
}

#[derive(Debug, Deserialize)]
struct LexicalEntry {
    #[serde(default, deserialize_with = "first_of")]
    entries: Option<WordEntry>,
    #[serde(default, rename = "lexicalCategory", deserialize_with = "lenient")]
    lexical_category: Option<LexicalCategory>,
}

#[derive(Debug, Deserialize)]
struct LexicalCategory {
    #[serde(default, deserialize_with = "lenient")]
    id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WordEntry {
    #[serde(default, deserialize_with = "first_of")]
    senses: Option<Sense>,
    #[serde(default, deserialize_with = "first_of")]
    etymologies: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Sense {
    #[serde(default, deserialize_with = "first_of")]
    definitions: Option<String>,
    #[serde(default, deserialize_with = "first_of")]
    examples: Option<Example>,
}

#[derive(Debug, Deserialize)]
struct Example {
    #[serde(default, deserialize_with = "lenient")]
    text: Option<String>,
}

/// `T` if the value has its shape, `None` otherwise.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).ok())
}

/// The first element of an array, read leniently. The rest are never looked at.
fn first_of<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let first = match Value::deserialize(deserializer)? {
        Value::Array(items) => items.into_iter().next(),
        _ => None,
    };
    Ok(first.and_then(|item| T::deserialize(item).ok()))
}

impl RetrieveEntry {
    /// Walks `results[0].lexicalEntries[0].entries[0].senses[0].definitions[0]`.
    /// Clue data next to that path is optional.
    pub(crate) fn into_entry(self, word: &str) -> Result<Entry, DictionaryError> {
        let result = present(self.results, "results")?;
        let lexical_entry = present(result.lexical_entry, "lexicalEntries")?;
        let part_of_speech = lexical_entry
            .lexical_category
            .and_then(|category| category.id)
            .filter(|id| !id.is_empty())
            .map(|id| PartOfSpeech::from_category(&id));
        let entry = present(lexical_entry.entries, "entries")?;
        let sense = present(entry.senses, "senses")?;
        let example = sense
            .examples
            .and_then(|example| example.text)
            .filter(|text| !text.is_empty());
        let definition = present(sense.definitions, "definitions")?;
        Ok(Entry {
            word: word.to_owned(),
            definition,
            part_of_speech,
            example,
            etymology: entry.etymologies,
        })
    }
}

fn present<T>(item: Option<T>, segment: &'static str) -> Result<T, DictionaryError> {
    item.ok_or(DictionaryError::MissingField(segment))
}

pub(crate) fn entry_url(base_url: &str, locale: Locale, word: &str) -> String {
    format!(
        "{}/entries/{}/{}",
        base_url.trim_end_matches('/'),
        locale,
        word.to_lowercase()
    )
}

pub(crate) async fn get_entry(
    client: &reqwest::Client,
    base_url: &str,
    credentials: &Credentials,
    locale: Locale,
    word: &str,
) -> Result<Entry, DictionaryError> {
    let url = entry_url(base_url, locale, word);
    tracing::debug!(%url, "requesting dictionary entry");
    let res = client
        .get(&url)
        .header("app_id", &credentials.app_id)
        .header("app_key", &credentials.app_key)
        .send()
        .await
        .map_err(DictionaryError::Fetch)?;
    let status = res.status();
    let body = res.text().await.map_err(DictionaryError::Fetch)?;
    tracing::debug!(status = status.as_u16(), %body, "dictionary responded");

    if status == reqwest::StatusCode::NOT_FOUND {
        return Err(DictionaryError::NotFound {
            word: word.to_lowercase(),
        });
    }
    if status != reqwest::StatusCode::OK {
        return Err(DictionaryError::Status(status.as_u16()));
    }
    let response: RetrieveEntry =
        serde_json::from_str(&body).map_err(DictionaryError::Deserialize)?;
    response.into_entry(&word.to_lowercase())
}
