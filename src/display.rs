//! User-facing text shared by the CLI and TUI front-ends.

use crate::game_state::{BoardView, GameStatus, GuessOutcome, MAX_ATTEMPTS};

const GALLOWS_HEIGHT: usize = 7;

/// Gallows drawing for the number of attempts left; one more body part per
/// wrong guess.
#[must_use]
pub fn gallows(remaining_attempts: u8) -> [String; GALLOWS_HEIGHT] {
    let wrong = MAX_ATTEMPTS.saturating_sub(remaining_attempts);
    let part = |n: u8, drawn: &'static str| if wrong >= n { drawn } else { " " };

    [
        "  +---+".to_string(),
        "  |   |".to_string(),
        format!("  {}   |", part(1, "O")),
        format!(" {}{}{}  |", part(3, "/"), part(2, "|"), part(4, "\\")),
        format!(" {} {}  |", part(5, "/"), part(6, "\\")),
        "      |".to_string(),
        "=========".to_string(),
    ]
}

/// Footer line, e.g. `Tries remaining: 4 | Difficulty: Medium`.
#[must_use]
pub fn footer(view: &BoardView) -> String {
    let mut text = format!("Tries remaining: {}", view.remaining_attempts);
    if let Some(label) = &view.label {
        text.push_str(&format!(" | Difficulty: {label}"));
    }
    text
}

#[must_use]
pub fn guessed_letters_line(view: &BoardView) -> String {
    if view.guessed_letters.is_empty() {
        return "Guessed letters: none yet".to_string();
    }
    let letters: Vec<String> = view.guessed_letters.iter().map(char::to_string).collect();
    format!("Guessed letters: {}", letters.join(", "))
}

/// Per-round feedback. Terminal outcomes get their message from
/// [`result_message`] instead.
#[must_use]
pub fn outcome_message(outcome: GuessOutcome, guess: &str) -> Option<String> {
    let guess = guess.to_lowercase();
    match outcome {
        GuessOutcome::RejectedEmpty => Some("Send a letter to make a guess!".to_string()),
        GuessOutcome::RejectedMultiChar => {
            Some("You can only send one letter at a time, try again!".to_string())
        }
        GuessOutcome::RejectedDuplicate => {
            Some(format!("You have already guessed `{guess}`, try again!"))
        }
        GuessOutcome::Correct => Some(format!("Nice! `{guess}` is in the word.")),
        GuessOutcome::Incorrect => Some(format!("Sorry, `{guess}` is not in the word.")),
        GuessOutcome::Won | GuessOutcome::Lost | GuessOutcome::TimedOut => None,
    }
}

/// Final message; discloses the secret word for every terminal status.
#[must_use]
pub fn result_message(status: GameStatus, secret_word: &str) -> String {
    match status {
        GameStatus::Won => format!("You won! The word was `{secret_word}`."),
        GameStatus::Lost => format!("You lost. The word was `{secret_word}`."),
        GameStatus::TimedOut => format!("Time's up! The correct word was `{secret_word}`."),
        GameStatus::InProgress => "Game in progress.".to_string(),
    }
}

pub const USAGE: &str = "\
Play hangman: guess the secret word one letter at a time. You have 6 wrong guesses.

Usage:
  hangman [easy|medium|hard]
  hangman [MIN_LENGTH [MAX_LENGTH [MIN_UNIQUE [MAX_UNIQUE]]]]
  hangman help

Difficulty presets:
  easy    Shorter words with fewer unique letters
  medium  Medium length words with moderate unique letters (default)
  hard    Longer words with more unique letters

Custom games draw from every preset, keeping words whose length and number of
unique letters fall inside the given bounds (defaults: 0 25 0 25).";

#[cfg(test)]
mod tests {
    use super::*;

    fn view(remaining_attempts: u8, label: Option<&str>, guessed: &[char]) -> BoardView {
        BoardView {
            remaining_attempts,
            revealed: "_ a _".to_string(),
            label: label.map(str::to_string),
            guessed_letters: guessed.to_vec(),
        }
    }

    #[test]
    fn test_gallows_empty_at_full_attempts() {
        let art = gallows(MAX_ATTEMPTS);
        assert!(!art.iter().any(|line| line.contains('O')));
    }

    #[test]
    fn test_gallows_full_at_zero_attempts() {
        let art = gallows(0).join("\n");
        assert!(art.contains('O'));
        assert!(art.contains("/|\\"));
        assert!(art.contains("/ \\"));
    }

    #[test]
    fn test_gallows_lines_have_consistent_height() {
        for remaining in 0..=MAX_ATTEMPTS {
            assert_eq!(gallows(remaining).len(), GALLOWS_HEIGHT);
        }
    }

    #[test]
    fn test_footer_with_and_without_label() {
        assert_eq!(footer(&view(4, None, &[])), "Tries remaining: 4");
        assert_eq!(
            footer(&view(6, Some("Medium"), &[])),
            "Tries remaining: 6 | Difficulty: Medium"
        );
    }

    #[test]
    fn test_guessed_letters_line() {
        assert_eq!(guessed_letters_line(&view(6, None, &[])), "Guessed letters: none yet");
        assert_eq!(
            guessed_letters_line(&view(6, None, &['a', 'z'])),
            "Guessed letters: a, z"
        );
    }

    #[test]
    fn test_outcome_messages() {
        assert_eq!(
            outcome_message(GuessOutcome::RejectedDuplicate, "A").as_deref(),
            Some("You have already guessed `a`, try again!")
        );
        assert!(outcome_message(GuessOutcome::Won, "a").is_none());
        assert!(outcome_message(GuessOutcome::Lost, "a").is_none());
    }

    #[test]
    fn test_result_messages_disclose_word() {
        for status in [GameStatus::Won, GameStatus::Lost, GameStatus::TimedOut] {
            assert!(result_message(status, "dog").contains("`dog`"));
        }
    }
}
