//! Word corpus: the preset word lists, keyed by difficulty.
//!
//! The corpus is loaded once at startup and then shared read-only by every
//! game. The on-disk layout is a JSON object:
//!
//! ```json
//! { "DIFFICULTY_PRESETS": { "easy": ["cat"], "medium": ["garden"], "hard": ["labyrinth"] } }
//! ```

use crate::debug_log;
use derive_more::{Display, Error, From};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const EMBEDDED_PRESETS: &str = include_str!("resources/hangman_presets.json");

const CONFIG_DIR_NAME: &str = "hangman";
const CONFIG_FILE_NAME: &str = "presets.json";

/// A named difficulty bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
pub enum Difficulty {
    #[display("easy")]
    Easy,
    #[display("medium")]
    Medium,
    #[display("hard")]
    Hard,
}

impl Difficulty {
    pub const ALL: [Self; 3] = [Self::Easy, Self::Medium, Self::Hard];

    /// Case-insensitive lookup by preset name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|difficulty| difficulty.name().eq_ignore_ascii_case(name))
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }

    /// Capitalized name for display, e.g. `Medium`.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }
}

#[derive(Debug, Display, Error, From)]
pub enum CorpusError {
    #[display("Failed to read word corpus: {_0}")]
    #[from]
    Io(io::Error),
    #[display("Word corpus is not valid JSON: {_0}")]
    #[from]
    Parse(serde_json::Error),
    #[display("Word corpus has no `{difficulty}` preset")]
    MissingDifficulty { difficulty: Difficulty },
}

#[derive(Debug, Deserialize)]
struct PresetsFile {
    #[serde(rename = "DIFFICULTY_PRESETS")]
    presets: BTreeMap<String, Vec<String>>,
}

/// Immutable mapping from difficulty to its lowercase word list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordCorpus {
    presets: HashMap<Difficulty, Vec<String>>,
}

fn is_valid_word(word: &str) -> bool {
    !word.is_empty() && word.chars().all(|c| c.is_ascii_alphabetic())
}

fn normalize_words<I, S>(words: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    words
        .into_iter()
        .map(|word| word.as_ref().trim().to_lowercase())
        .filter(|word| is_valid_word(word))
        .collect()
}

impl WordCorpus {
    /// Build a corpus from explicit lists. Words are normalized the same way
    /// as when loading from JSON.
    pub fn from_lists<S: AsRef<str>>(easy: &[S], medium: &[S], hard: &[S]) -> Self {
        let presets = HashMap::from([
            (Difficulty::Easy, normalize_words(easy)),
            (Difficulty::Medium, normalize_words(medium)),
            (Difficulty::Hard, normalize_words(hard)),
        ]);
        Self { presets }
    }

    /// Words for one preset, in corpus order.
    #[must_use]
    pub fn words(&self, difficulty: Difficulty) -> &[String] {
        self.presets.get(&difficulty).map(Vec::as_slice).unwrap_or_default()
    }

    /// Every word of every preset, easy first.
    pub fn all_words(&self) -> impl Iterator<Item = &str> {
        Difficulty::ALL
            .into_iter()
            .flat_map(move |difficulty| self.words(difficulty).iter().map(String::as_str))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.presets.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub fn load_corpus_from_str(data: &str) -> Result<WordCorpus, CorpusError> {
    let file: PresetsFile = serde_json::from_str(data)?;
    let mut lists = file.presets;

    let mut presets = HashMap::new();
    for difficulty in Difficulty::ALL {
        let words = lists
            .remove(difficulty.name())
            .ok_or(CorpusError::MissingDifficulty { difficulty })?;
        presets.insert(difficulty, normalize_words(&words));
    }

    for unknown in lists.keys() {
        debug_log!("Ignoring unknown preset `{}` in word corpus", unknown);
    }

    Ok(WordCorpus { presets })
}

pub fn load_corpus_from_file<P: AsRef<Path>>(path: P) -> Result<WordCorpus, CorpusError> {
    let data = fs::read_to_string(path)?;
    load_corpus_from_str(&data)
}

#[must_use]
pub fn embedded_corpus() -> Option<WordCorpus> {
    load_corpus_from_str(EMBEDDED_PRESETS).ok()
}

/// `<config_dir>/hangman/presets.json`.
#[must_use]
pub fn default_corpus_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Load the corpus the binary should play with: an explicit path wins, then
/// the per-user config file if one exists, then the embedded presets.
pub fn load_corpus(explicit: Option<&Path>) -> Result<WordCorpus, CorpusError> {
    if let Some(path) = explicit {
        debug_log!("Loading word corpus from {}", path.display());
        return load_corpus_from_file(path);
    }

    if let Some(path) = default_corpus_path()
        && path.is_file()
    {
        debug_log!("Loading word corpus from config dir: {}", path.display());
        return load_corpus_from_file(path);
    }

    load_corpus_from_str(EMBEDDED_PRESETS)
}
