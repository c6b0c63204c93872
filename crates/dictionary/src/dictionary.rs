use std::fmt;

/// The parts of a dictionary entry the game cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub word: String,
    pub definition: String,
    pub part_of_speech: Option<PartOfSpeech>,
    pub example: Option<String>,
    pub etymology: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartOfSpeech {
    Noun,
    Pronoun,
    Verb,
    Adjective,
    Adverb,
    Preposition,
    Conjunction,
    Interjection,
    Other(String),
}

impl PartOfSpeech {
    /// Maps a lexical category id such as `"noun"` onto a part of speech.
    /// Categories outside the common eight are kept verbatim.
    pub fn from_category(id: &str) -> Self {
        match &id.to_ascii_lowercase()[..] {
            "noun" => Self::Noun,
            "pronoun" => Self::Pronoun,
            "verb" => Self::Verb,
            "adjective" => Self::Adjective,
            "adverb" => Self::Adverb,
            "preposition" => Self::Preposition,
            "conjunction" => Self::Conjunction,
            "interjection" => Self::Interjection,
            other => Self::Other(other.to_owned()),
        }
    }
}

impl fmt::Display for PartOfSpeech {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Noun => "noun",
            Self::Pronoun => "pronoun",
            Self::Verb => "verb",
            Self::Adjective => "adjective",
            Self::Adverb => "adverb",
            Self::Preposition => "preposition",
            Self::Conjunction => "conjunction",
            Self::Interjection => "interjection",
            Self::Other(other) => other,
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_ids_are_case_insensitive() {
        assert_eq!(PartOfSpeech::from_category("Noun"), PartOfSpeech::Noun);
        assert_eq!(PartOfSpeech::from_category("verb"), PartOfSpeech::Verb);
    }

    #[test]
    fn unknown_categories_are_kept() {
        let category = PartOfSpeech::from_category("determiner");
        assert_eq!(category, PartOfSpeech::Other("determiner".to_owned()));
        assert_eq!(category.to_string(), "determiner");
    }
}
