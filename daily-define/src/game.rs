use std::fmt;

use async_trait::async_trait;
use chrono::NaiveDate;
use dictionary::{Dictionary, DictionaryError, Entry};

use crate::words::WordSelector;

/// Guesses at least this similar to the word (Jaro, lower-cased) are near misses.
const NEAR_MISS_SIMILARITY: f64 = 0.9;
const MASK: &str = "_____";

/// Where definitions come from.
#[async_trait]
pub trait DefinitionSource: Send + Sync {
    async fn entry(&self, word: &str) -> Result<Entry, DictionaryError>;
}

#[async_trait]
impl DefinitionSource for Dictionary {
    async fn entry(&self, word: &str) -> Result<Entry, DictionaryError> {
        self.get_definition(word).await
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Outcome {
    #[default]
    Unset,
    Correct,
    Incorrect,
}

impl Outcome {
    pub fn label(&self) -> Option<&'static str> {
        match self {
            Self::Unset => None,
            Self::Correct => Some("Correct"),
            Self::Incorrect => Some("Incorrect"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    AwaitingWord,
    AwaitingGuess,
    Resolved,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Clue {
    Length(usize),
    FirstLetter(char),
    PartOfSpeech(String),
    Example(String),
    Etymology(String),
}

impl fmt::Display for Clue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Length(length) => write!(f, "Number of letters: {length}"),
            Self::FirstLetter(letter) => write!(f, "First letter: {letter}"),
            Self::PartOfSpeech(part) => write!(f, "Part of speech: {part}"),
            Self::Example(example) => write!(f, "In a sentence: {example}"),
            Self::Etymology(etymology) => write!(f, "Etymology: {etymology}"),
        }
    }
}

/// Everything one player's round knows. Handlers take it and hand back the next one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// The day the word was drawn; shared results carry this date
    pub date: NaiveDate,
    pub daily_word: String,
    pub definition: Option<String>,
    pub outcome: Outcome,
    clues: Vec<Clue>,
    revealed: usize,
}

impl Session {
    pub fn revealed_clues(&self) -> &[Clue] {
        &self.clues[..self.revealed]
    }
}

/// What the presentation layer should tell the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Definition(String),
    /// `revealed_word` is set when the round stops because of it.
    DefinitionUnavailable {
        reason: String,
        status: Option<u16>,
        revealed_word: Option<String>,
    },
    Correct,
    Incorrect {
        word: String,
        near_miss: bool,
    },
    /// No definition, so no guesses.
    RoundStopped {
        word: String,
    },
    AlreadyResolved(Outcome),
    Clue(Clue),
    NoMoreClues,
    CluesUnavailable,
}

#[derive(Debug)]
pub struct Turn {
    pub session: Session,
    pub notices: Vec<Notice>,
}

pub struct Game<S> {
    source: S,
    selector: WordSelector,
    require_definition: bool,
}

impl<S: DefinitionSource> Game<S> {
    pub fn new(source: S, selector: WordSelector) -> Self {
        Self {
            source,
            selector,
            require_definition: true,
        }
    }

    /// When off, a round without a definition still accepts guesses.
    pub fn require_definition(mut self, require: bool) -> Self {
        self.require_definition = require;
        self
    }

    pub fn phase(&self, session: &Session) -> Phase {
        if session.outcome != Outcome::Unset {
            Phase::Resolved
        } else if session.definition.is_some() || !self.require_definition {
            Phase::AwaitingGuess
        } else {
            Phase::AwaitingWord
        }
    }

    pub async fn start(&self, today: NaiveDate) -> Turn {
        let word = self.selector.select(today).to_owned();
        tracing::info!(mode = ?self.selector.mode(), %today, "starting a round");
        self.open_round(word, today).await
    }

    /// Throws the current round away and draws again.
    pub async fn reload(&self, session: Session, today: NaiveDate) -> Turn {
        tracing::debug!(previous = %session.daily_word, outcome = ?session.outcome, "reloading");
        self.start(today).await
    }

    async fn open_round(&self, word: String, date: NaiveDate) -> Turn {
        match self.source.entry(&word).await {
            Ok(entry) => {
                let clues = clues_for(&word, Some(&entry));
                let definition = entry.definition;
                Turn {
                    notices: vec![Notice::Definition(definition.clone())],
                    session: Session {
                        date,
                        daily_word: word,
                        definition: Some(definition),
                        outcome: Outcome::Unset,
                        clues,
                        revealed: 0,
                    },
                }
            }
            Err(error) => {
                tracing::warn!(%error, "no definition for this round");
                let notice = Notice::DefinitionUnavailable {
                    reason: error.to_string(),
                    status: error.status_code(),
                    revealed_word: self.require_definition.then(|| word.clone()),
                };
                Turn {
                    notices: vec![notice],
                    session: Session {
                        date,
                        clues: clues_for(&word, None),
                        daily_word: word,
                        definition: None,
                        outcome: Outcome::Unset,
                        revealed: 0,
                    },
                }
            }
        }
    }

    pub fn submit(&self, mut session: Session, guess: &str) -> Turn {
        let notice = match self.phase(&session) {
            Phase::AwaitingWord => Notice::RoundStopped {
                word: session.daily_word.clone(),
            },
            Phase::Resolved => Notice::AlreadyResolved(session.outcome),
            Phase::AwaitingGuess => {
                if is_correct(guess, &session.daily_word) {
                    session.outcome = Outcome::Correct;
                    Notice::Correct
                } else {
                    session.outcome = Outcome::Incorrect;
                    Notice::Incorrect {
                        near_miss: is_near_miss(guess, &session.daily_word),
                        word: session.daily_word.clone(),
                    }
                }
            }
        };
        tracing::debug!(outcome = ?session.outcome, "guess handled");
        Turn {
            session,
            notices: vec![notice],
        }
    }

    pub fn reveal_clue(&self, mut session: Session) -> Turn {
        let notice = if self.phase(&session) != Phase::AwaitingGuess {
            Notice::CluesUnavailable
        } else if let Some(clue) = session.clues.get(session.revealed).cloned() {
            session.revealed += 1;
            Notice::Clue(clue)
        } else {
            Notice::NoMoreClues
        };
        Turn {
            session,
            notices: vec![notice],
        }
    }
}

pub fn is_correct(guess: &str, word: &str) -> bool {
    guess.to_lowercase() == word.to_lowercase()
}

fn is_near_miss(guess: &str, word: &str) -> bool {
    strsim::jaro(&guess.to_lowercase(), &word.to_lowercase()) >= NEAR_MISS_SIMILARITY
}

/// Clues in the order they are revealed; the ones the entry lacks are skipped.
fn clues_for(word: &str, entry: Option<&Entry>) -> Vec<Clue> {
    let mut clues = vec![Clue::Length(word.chars().count())];
    if let Some(letter) = word.chars().next() {
        clues.push(Clue::FirstLetter(letter));
    }
    if let Some(entry) = entry {
        if let Some(part) = &entry.part_of_speech {
            clues.push(Clue::PartOfSpeech(part.to_string()));
        }
        if let Some(example) = &entry.example {
            clues.push(Clue::Example(mask_word(example, word)));
        }
        if let Some(etymology) = &entry.etymology {
            clues.push(Clue::Etymology(etymology.clone()));
        }
    }
    clues
}

/// Blanks out every ASCII case-insensitive occurrence of `word`.
fn mask_word(text: &str, word: &str) -> String {
    if word.is_empty() {
        return text.to_owned();
    }
    // ASCII lowercasing keeps byte offsets aligned with `text`.
    let haystack = text.to_ascii_lowercase();
    let needle = word.to_ascii_lowercase();
    let mut masked = String::with_capacity(text.len());
    let mut last = 0;
    for (start, _) in haystack.match_indices(&needle) {
        masked.push_str(&text[last..start]);
        masked.push_str(MASK);
        last = start + needle.len();
    }
    masked.push_str(&text[last..]);
    masked
}
