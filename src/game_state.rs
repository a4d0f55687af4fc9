//! The guess engine: one hangman game from secret word to terminal outcome.
//!
//! The engine does no I/O and no timing. The caller feeds it one event per
//! round (a raw guess, or a timeout) and reads back a [`GuessOutcome`] plus a
//! [`BoardView`] for display.

use crate::{debug_log, info_log};
use derive_more::{Display, Error};
use std::collections::BTreeSet;
use std::fmt;

pub const MAX_ATTEMPTS: u8 = 6;
pub const PLACEHOLDER: char = '_';

/// The word being guessed. Always non-empty and lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SecretWord(String);

impl SecretWord {
    /// Returns `None` for an empty word.
    #[must_use]
    pub fn new(word: &str) -> Option<Self> {
        let word = word.trim().to_lowercase();
        if word.is_empty() { None } else { Some(Self(word)) }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SecretWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One board position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Hidden,
    Revealed(char),
}

impl Cell {
    #[must_use]
    pub fn display_char(self) -> char {
        match self {
            Self::Hidden => PLACEHOLDER,
            Self::Revealed(c) => c,
        }
    }

    #[must_use]
    pub fn is_revealed(self) -> bool {
        matches!(self, Self::Revealed(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum GameStatus {
    #[display("in progress")]
    InProgress,
    #[display("won")]
    Won,
    #[display("lost")]
    Lost,
    #[display("timed out")]
    TimedOut,
}

impl GameStatus {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::InProgress)
    }
}

/// Classification of a single round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    /// Nothing was sent.
    RejectedEmpty,
    /// More than one character; not counted as a guess.
    RejectedMultiChar,
    /// Letter already guessed; nothing changes.
    RejectedDuplicate,
    Correct,
    Incorrect,
    Won,
    Lost,
    TimedOut,
}

impl GuessOutcome {
    #[must_use]
    pub fn is_rejection(self) -> bool {
        matches!(
            self,
            Self::RejectedEmpty | Self::RejectedMultiChar | Self::RejectedDuplicate
        )
    }
}

/// Caller misuse: driving an engine that has already finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum EngineError {
    #[display("Game is already over ({status})")]
    GameOver { status: GameStatus },
}

/// Mutable per-game state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    remaining_attempts: u8,
    cells: Vec<Cell>,
    guessed_letters: BTreeSet<char>,
}

impl GameState {
    fn new(word_len: usize) -> Self {
        Self {
            remaining_attempts: MAX_ATTEMPTS,
            cells: vec![Cell::Hidden; word_len],
            guessed_letters: BTreeSet::new(),
        }
    }

    #[must_use]
    pub fn remaining_attempts(&self) -> u8 {
        self.remaining_attempts
    }

    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[must_use]
    pub fn guessed_letters(&self) -> &BTreeSet<char> {
        &self.guessed_letters
    }

    /// Reveal every position of `secret` holding `letter`. Returns how many
    /// cells changed.
    fn reveal(&mut self, secret: &[char], letter: char) -> usize {
        let mut revealed = 0;
        for (cell, &c) in self.cells.iter_mut().zip(secret) {
            if c == letter && !cell.is_revealed() {
                *cell = Cell::Revealed(c);
                revealed += 1;
            }
        }
        revealed
    }

    fn is_solved(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_revealed())
    }

    /// Cells rendered with a space between each, e.g. `_ a _`.
    #[must_use]
    pub fn revealed_display(&self) -> String {
        let mut out = String::with_capacity(self.cells.len() * 2);
        for (i, cell) in self.cells.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            out.push(cell.display_char());
        }
        out
    }
}

/// Snapshot handed to the front-end between rounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardView {
    pub remaining_attempts: u8,
    pub revealed: String,
    pub label: Option<String>,
    pub guessed_letters: Vec<char>,
}

#[derive(Debug, Clone)]
pub struct GuessEngine {
    secret: SecretWord,
    secret_chars: Vec<char>,
    state: GameState,
    status: GameStatus,
    label: Option<String>,
}

impl GuessEngine {
    #[must_use]
    pub fn new(secret: SecretWord, label: Option<String>) -> Self {
        let secret_chars: Vec<char> = secret.as_str().chars().collect();
        info_log!("New game: {} letters", secret_chars.len());
        Self {
            state: GameState::new(secret_chars.len()),
            secret_chars,
            secret,
            status: GameStatus::InProgress,
            label,
        }
    }

    fn ensure_in_progress(&self) -> Result<(), EngineError> {
        if self.status.is_terminal() {
            return Err(EngineError::GameOver {
                status: self.status,
            });
        }
        Ok(())
    }

    /// Evaluate one raw guess.
    ///
    /// Input is lowercased first. Empty, multi-character and repeated
    /// guesses are rejected without touching attempts or the board.
    pub fn evaluate_guess(&mut self, raw: &str) -> Result<GuessOutcome, EngineError> {
        self.ensure_in_progress()?;

        let normalized = raw.to_lowercase();
        let mut chars = normalized.chars();
        let Some(letter) = chars.next() else {
            return Ok(GuessOutcome::RejectedEmpty);
        };
        if chars.next().is_some() {
            debug_log!("Rejected multi-character guess: {:?}", normalized);
            return Ok(GuessOutcome::RejectedMultiChar);
        }
        if !self.state.guessed_letters.insert(letter) {
            debug_log!("Rejected duplicate guess: {:?}", letter);
            return Ok(GuessOutcome::RejectedDuplicate);
        }

        let revealed = self.state.reveal(&self.secret_chars, letter);
        let outcome = if revealed > 0 {
            if self.state.is_solved() {
                self.status = GameStatus::Won;
                GuessOutcome::Won
            } else {
                GuessOutcome::Correct
            }
        } else {
            self.state.remaining_attempts = self.state.remaining_attempts.saturating_sub(1);
            if self.state.remaining_attempts == 0 {
                self.status = GameStatus::Lost;
                GuessOutcome::Lost
            } else {
                GuessOutcome::Incorrect
            }
        };

        debug_log!(
            "Guess {:?}: {:?} ({} revealed, {} attempts left)",
            letter,
            outcome,
            revealed,
            self.state.remaining_attempts
        );
        Ok(outcome)
    }

    /// The front-end's wait for the next guess expired.
    pub fn timeout(&mut self) -> Result<GuessOutcome, EngineError> {
        self.ensure_in_progress()?;
        info_log!("Game timed out");
        self.status = GameStatus::TimedOut;
        Ok(GuessOutcome::TimedOut)
    }

    #[must_use]
    pub fn render_state(&self) -> BoardView {
        BoardView {
            remaining_attempts: self.state.remaining_attempts,
            revealed: self.state.revealed_display(),
            label: self.label.clone(),
            guessed_letters: self.state.guessed_letters.iter().copied().collect(),
        }
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// For the win/loss message; the board itself never shows hidden letters.
    #[must_use]
    pub fn secret_word(&self) -> &SecretWord {
        &self.secret
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn engine(word: &str) -> GuessEngine {
        GuessEngine::new(SecretWord::new(word).unwrap(), None)
    }

    #[test]
    fn test_new_engine_is_fresh() {
        let engine = engine("cat");
        let view = engine.render_state();
        assert_eq!(engine.status(), GameStatus::InProgress);
        assert_eq!(view.remaining_attempts, MAX_ATTEMPTS);
        assert_eq!(view.revealed, "_ _ _");
        assert!(view.guessed_letters.is_empty());
        assert_eq!(view.label, None);
    }

    #[test]
    fn test_scenario_win_cat() {
        let mut engine = engine("cat");
        assert_eq!(engine.evaluate_guess("a"), Ok(GuessOutcome::Correct));
        assert_eq!(engine.evaluate_guess("t"), Ok(GuessOutcome::Correct));
        assert_eq!(engine.evaluate_guess("c"), Ok(GuessOutcome::Won));
        assert_eq!(engine.status(), GameStatus::Won);
        assert_eq!(engine.render_state().revealed.replace(' ', ""), "cat");
        assert_eq!(engine.render_state().remaining_attempts, MAX_ATTEMPTS);
    }

    #[test]
    fn test_scenario_loss_dog() {
        let mut engine = engine("dog");
        for (i, guess) in ["x", "y", "z", "q", "w"].iter().enumerate() {
            assert_eq!(engine.evaluate_guess(guess), Ok(GuessOutcome::Incorrect));
            assert_eq!(
                engine.render_state().remaining_attempts,
                MAX_ATTEMPTS - 1 - i as u8
            );
            assert_eq!(engine.status(), GameStatus::InProgress);
        }
        assert_eq!(engine.evaluate_guess("v"), Ok(GuessOutcome::Lost));
        assert_eq!(engine.status(), GameStatus::Lost);
        assert_eq!(engine.render_state().remaining_attempts, 0);
        // The board is reported as-is, not filled in.
        assert_eq!(engine.render_state().revealed, "_ _ _");
    }

    #[test]
    fn test_uppercase_guess_is_normalized() {
        let mut engine = engine("cat");
        assert_eq!(engine.evaluate_guess("A"), Ok(GuessOutcome::Correct));
        assert_eq!(engine.render_state().revealed, "_ a _");
        assert_eq!(engine.evaluate_guess("a"), Ok(GuessOutcome::RejectedDuplicate));
    }

    #[test]
    fn test_reveals_every_occurrence() {
        let mut engine = engine("banana");
        let before = engine.state().cells().to_vec();
        assert_eq!(engine.evaluate_guess("a"), Ok(GuessOutcome::Correct));
        let after = engine.state().cells();

        let changed: Vec<usize> = before
            .iter()
            .zip(after)
            .enumerate()
            .filter(|(_, (b, a))| b != a)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(changed, [1, 3, 5]);
        assert!(changed.iter().all(|&i| after[i] == Cell::Revealed('a')));
        assert_eq!(engine.render_state().revealed, "_ a _ a _ a");
    }

    #[test]
    fn test_multi_char_rejected_without_cost() {
        let mut engine = engine("cat");
        assert_eq!(engine.evaluate_guess("ca"), Ok(GuessOutcome::RejectedMultiChar));
        assert_eq!(engine.evaluate_guess("hello"), Ok(GuessOutcome::RejectedMultiChar));
        let view = engine.render_state();
        assert_eq!(view.remaining_attempts, MAX_ATTEMPTS);
        assert!(view.guessed_letters.is_empty());
        assert_eq!(engine.status(), GameStatus::InProgress);
    }

    #[test]
    fn test_empty_rejected_without_cost() {
        let mut engine = engine("cat");
        assert_eq!(engine.evaluate_guess(""), Ok(GuessOutcome::RejectedEmpty));
        assert_eq!(engine.render_state().remaining_attempts, MAX_ATTEMPTS);
    }

    #[test]
    fn test_duplicate_wrong_guess_is_idempotent() {
        let mut engine = engine("cat");
        assert_eq!(engine.evaluate_guess("z"), Ok(GuessOutcome::Incorrect));
        let snapshot = engine.render_state();
        assert_eq!(engine.evaluate_guess("z"), Ok(GuessOutcome::RejectedDuplicate));
        assert_eq!(engine.evaluate_guess("Z"), Ok(GuessOutcome::RejectedDuplicate));
        assert_eq!(engine.render_state(), snapshot);
    }

    #[test]
    fn test_non_letter_counts_as_wrong_guess() {
        let mut engine = engine("cat");
        assert_eq!(engine.evaluate_guess("1"), Ok(GuessOutcome::Incorrect));
        assert_eq!(engine.render_state().remaining_attempts, MAX_ATTEMPTS - 1);
    }

    #[test]
    fn test_guessed_letters_are_sorted_in_view() {
        let mut engine = engine("cat");
        engine.evaluate_guess("t").unwrap();
        engine.evaluate_guess("b").unwrap();
        engine.evaluate_guess("a").unwrap();
        assert_eq!(engine.render_state().guessed_letters, ['a', 'b', 't']);
    }

    #[test]
    fn test_timeout_is_terminal() {
        let mut engine = engine("cat");
        engine.evaluate_guess("a").unwrap();
        let before = engine.render_state();
        assert_eq!(engine.timeout(), Ok(GuessOutcome::TimedOut));
        assert_eq!(engine.status(), GameStatus::TimedOut);
        assert_eq!(engine.render_state(), before);
    }

    #[test]
    fn test_terminal_engine_rejects_further_events() {
        let mut engine = engine("a");
        assert_eq!(engine.evaluate_guess("a"), Ok(GuessOutcome::Won));
        assert_eq!(
            engine.evaluate_guess("b"),
            Err(EngineError::GameOver {
                status: GameStatus::Won
            })
        );
        assert!(engine.timeout().is_err());

        let mut timed_out = self::engine("cat");
        timed_out.timeout().unwrap();
        assert_eq!(
            timed_out.evaluate_guess("c"),
            Err(EngineError::GameOver {
                status: GameStatus::TimedOut
            })
        );
    }

    #[test]
    fn test_render_state_carries_label() {
        let engine = GuessEngine::new(SecretWord::new("cat").unwrap(), Some("Easy".to_string()));
        assert_eq!(engine.render_state().label.as_deref(), Some("Easy"));
    }

    #[test]
    fn test_attempts_stay_in_bounds_for_random_play() {
        let mut rng = StdRng::seed_from_u64(2024);
        for _ in 0..200 {
            let mut engine = engine("hangman");
            while !engine.status().is_terminal() {
                let guess = match rng.gen_range(0..10) {
                    0 => "ab".to_string(),
                    1 => String::new(),
                    _ => char::from(b'a' + rng.gen_range(0..26u8)).to_string(),
                };
                let attempts_before = engine.render_state().remaining_attempts;
                let outcome = engine.evaluate_guess(&guess).unwrap();
                let attempts_after = engine.render_state().remaining_attempts;

                assert!(attempts_after <= MAX_ATTEMPTS);
                match outcome {
                    GuessOutcome::Incorrect | GuessOutcome::Lost => {
                        assert_eq!(attempts_after, attempts_before - 1);
                    }
                    _ => assert_eq!(attempts_after, attempts_before),
                }
            }
            assert!(engine.evaluate_guess("a").is_err());
        }
    }

    #[test]
    fn test_secret_word_normalized() {
        assert_eq!(SecretWord::new(" Cat ").unwrap().as_str(), "cat");
        assert!(SecretWord::new("   ").is_none());
    }

    #[test]
    fn test_outcome_is_rejection() {
        assert!(GuessOutcome::RejectedDuplicate.is_rejection());
        assert!(!GuessOutcome::Incorrect.is_rejection());
    }
}
