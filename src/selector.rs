//! Word selection: resolving setup arguments and drawing the secret word.

use crate::corpus::{Difficulty, WordCorpus};
use crate::debug_log;
use crate::game_state::SecretWord;
use derive_more::{Display, Error};
use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::HashSet;
use std::fmt;

pub const DEFAULT_DIFFICULTY: Difficulty = Difficulty::Medium;
pub const HELP_TOKEN: &str = "help";
const MAX_NUMERIC_ARGS: usize = 4;

/// Everything that can go wrong before a game starts.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum SelectorError {
    /// Not a failure: the caller should show usage instead of starting a game.
    #[display("help")]
    Help,
    #[display("Invalid difficulty! Please choose from `easy`, `medium`, or `hard`.")]
    UnknownDifficulty { token: String },
    #[display("Invalid parameter `{token}`! Word length and unique letter parameters must be whole numbers.")]
    InvalidNumber { token: String },
    #[display("Too many parameters! Expected at most 4 numbers but got {count}.")]
    TooManyArguments { count: usize },
    #[display("Word length parameters cannot be negative.")]
    NegativeValue,
    #[display("Minimum word length cannot be greater than maximum word length.")]
    LengthRange,
    #[display("Minimum unique letters cannot be greater than maximum unique letters.")]
    UniqueLetterRange,
    #[display("Number of unique letters cannot be greater than word length.")]
    UniqueLettersExceedLength,
    #[display("No words match those parameters, try widening them.")]
    EmptyPool,
}

/// Numeric bounds on word length and distinct-letter count, both inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Constraints {
    pub min_length: usize,
    pub max_length: usize,
    pub min_unique_letters: usize,
    pub max_unique_letters: usize,
}

impl Default for Constraints {
    fn default() -> Self {
        Self {
            min_length: 0,
            max_length: 25,
            min_unique_letters: 0,
            max_unique_letters: 25,
        }
    }
}

impl Constraints {
    pub fn new(
        min_length: usize,
        max_length: usize,
        min_unique_letters: usize,
        max_unique_letters: usize,
    ) -> Result<Self, SelectorError> {
        let constraints = Self {
            min_length,
            max_length,
            min_unique_letters,
            max_unique_letters,
        };
        constraints.validate()?;
        Ok(constraints)
    }

    /// Fill fields positionally from `values`; missing trailing fields keep
    /// their defaults.
    fn from_signed(values: &[i64]) -> Result<Self, SelectorError> {
        if values.iter().any(|&v| v < 0) {
            return Err(SelectorError::NegativeValue);
        }

        let mut constraints = Self::default();
        let fields = [
            &mut constraints.min_length,
            &mut constraints.max_length,
            &mut constraints.min_unique_letters,
            &mut constraints.max_unique_letters,
        ];
        for (field, &value) in fields.into_iter().zip(values) {
            *field = usize::try_from(value).unwrap_or(usize::MAX);
        }

        constraints.validate()?;
        Ok(constraints)
    }

    fn validate(&self) -> Result<(), SelectorError> {
        if self.min_length > self.max_length {
            return Err(SelectorError::LengthRange);
        }
        if self.min_unique_letters > self.max_unique_letters {
            return Err(SelectorError::UniqueLetterRange);
        }
        if self.min_unique_letters > self.max_length {
            return Err(SelectorError::UniqueLettersExceedLength);
        }
        Ok(())
    }

    #[must_use]
    pub fn matches(&self, word: &str) -> bool {
        let length = word.chars().count();
        let unique = unique_letters(word);
        (self.min_length..=self.max_length).contains(&length)
            && (self.min_unique_letters..=self.max_unique_letters).contains(&unique)
    }
}

impl fmt::Display for Constraints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Custom ({}-{} letters, {}-{} unique)",
            self.min_length, self.max_length, self.min_unique_letters, self.max_unique_letters
        )
    }
}

#[must_use]
pub fn unique_letters(word: &str) -> usize {
    word.chars().collect::<HashSet<_>>().len()
}

/// What a game should be played with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Preset(Difficulty),
    Custom(Constraints),
}

impl Selection {
    /// Footer label: `Medium`, or a description of the custom bounds.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Preset(difficulty) => difficulty.label().to_string(),
            Self::Custom(constraints) => constraints.to_string(),
        }
    }
}

fn parse_number(token: &str) -> Result<i64, SelectorError> {
    token
        .trim()
        .parse::<i64>()
        .map_err(|_| SelectorError::InvalidNumber {
            token: token.to_string(),
        })
}

/// A token meant as a number: starts with a digit, or a sign then a digit.
fn looks_numeric(token: &str) -> bool {
    let digits = token.strip_prefix(['-', '+']).unwrap_or(token);
    digits.starts_with(|c: char| c.is_ascii_digit())
}

/// Turn already-tokenized setup arguments into a [`Selection`].
///
/// - no arguments: the default preset
/// - one token: `help`, a preset name (case-insensitive), or a single number
/// - up to four numbers: `min_length max_length min_unique max_unique`
pub fn resolve<S: AsRef<str>>(args: &[S]) -> Result<Selection, SelectorError> {
    match args {
        [] => Ok(Selection::Preset(DEFAULT_DIFFICULTY)),
        [single] => {
            let token = single.as_ref().trim();
            if token.eq_ignore_ascii_case(HELP_TOKEN) {
                return Err(SelectorError::Help);
            }
            if let Some(difficulty) = Difficulty::from_name(token) {
                return Ok(Selection::Preset(difficulty));
            }
            if looks_numeric(token) {
                let value = parse_number(token)?;
                return Constraints::from_signed(&[value]).map(Selection::Custom);
            }
            Err(SelectorError::UnknownDifficulty {
                token: token.to_string(),
            })
        }
        _ if args.len() > MAX_NUMERIC_ARGS => Err(SelectorError::TooManyArguments {
            count: args.len(),
        }),
        _ => {
            let values = args
                .iter()
                .map(|arg| parse_number(arg.as_ref()))
                .collect::<Result<Vec<_>, _>>()?;
            Constraints::from_signed(&values).map(Selection::Custom)
        }
    }
}

/// Draws secret words from a shared, read-only corpus.
#[derive(Debug, Clone, Copy)]
pub struct WordSelector<'a> {
    corpus: &'a WordCorpus,
}

impl<'a> WordSelector<'a> {
    #[must_use]
    pub fn new(corpus: &'a WordCorpus) -> Self {
        Self { corpus }
    }

    /// Every distinct corpus word, across all presets, that satisfies
    /// `constraints`. Keeps first-seen corpus order.
    #[must_use]
    pub fn candidates(&self, constraints: &Constraints) -> Vec<&'a str> {
        let mut seen = HashSet::new();
        self.corpus
            .all_words()
            .filter(|word| constraints.matches(word) && seen.insert(*word))
            .collect()
    }

    /// Uniformly pick one word for `selection`.
    pub fn draw<R: Rng + ?Sized>(
        &self,
        selection: &Selection,
        rng: &mut R,
    ) -> Result<SecretWord, SelectorError> {
        let word = match selection {
            Selection::Preset(difficulty) => self
                .corpus
                .words(*difficulty)
                .choose(rng)
                .map(String::as_str),
            Selection::Custom(constraints) => {
                let pool = self.candidates(constraints);
                debug_log!("Candidate pool for {}: {} words", constraints, pool.len());
                pool.choose(rng).copied()
            }
        };

        word.and_then(SecretWord::new)
            .ok_or(SelectorError::EmptyPool)
    }
}
