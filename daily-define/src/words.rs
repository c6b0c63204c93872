use chrono::{Datelike, NaiveDate};
use clap::ValueEnum;
use rand::Rng;

const SINGLE: &[&str] = &["apple"];

const COMMON: &[&str] = &[
    "apple", "house", "river", "chair", "garden", "window", "bread", "mountain", "candle",
    "bottle",
];

const OBSCURE: &[&str] = &[
    "petrichor",
    "susurrus",
    "defenestration",
    "sesquipedalian",
    "ephemeral",
];

/// Which built-in list the daily word is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum WordListKind {
    Single,
    Common,
    Obscure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SelectionMode {
    /// Uniform draw on every round
    Random,
    /// Same word for everyone on the same calendar day
    Daily,
}

/// A fixed, non-empty sequence of candidate words.
#[derive(Debug, Clone)]
pub struct WordList {
    words: Vec<String>,
}

impl WordList {
    /// Returns `None` for an empty list.
    pub fn new(words: Vec<String>) -> Option<Self> {
        if words.is_empty() {
            None
        } else {
            Some(Self { words })
        }
    }

    pub fn builtin(kind: WordListKind) -> Self {
        let words = match kind {
            WordListKind::Single => SINGLE,
            WordListKind::Common => COMMON,
            WordListKind::Obscure => OBSCURE,
        };
        Self {
            words: words.iter().map(|word| word.to_string()).collect(),
        }
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }
}

#[derive(Debug, Clone)]
pub struct WordSelector {
    list: WordList,
    mode: SelectionMode,
}

impl WordSelector {
    pub fn new(list: WordList, mode: SelectionMode) -> Self {
        Self { list, mode }
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    pub fn select(&self, today: NaiveDate) -> &str {
        self.select_with(today, &mut rand::thread_rng())
    }

    pub fn select_with<R: Rng + ?Sized>(&self, today: NaiveDate, rng: &mut R) -> &str {
        let words = self.list.words();
        let index = match self.mode {
            SelectionMode::Random => rng.gen_range(0..words.len()),
            SelectionMode::Daily => daily_index(today, words.len()),
        };
        &words[index]
    }
}

/// Day of the month (1..=31) modulo the list length.
pub fn daily_index(today: NaiveDate, len: usize) -> usize {
    today.day() as usize % len
}
