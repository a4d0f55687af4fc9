use crate::display::{footer, gallows, guessed_letters_line, outcome_message, result_message};
use crate::game_state::{BoardView, GuessOutcome};
use crate::session::{GameInterface, GameSummary, UserAction};
use crate::{debug_log, info_log};
use clap::Parser;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::Duration;

const EXIT_COMMAND: &str = "exit";

/// Hangman: guess the secret word one letter at a time
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Difficulty preset (easy, medium, hard), `help`, or up to four numbers:
    /// min length, max length, min unique letters, max unique letters
    #[arg(allow_negative_numbers = true)]
    pub game_args: Vec<String>,

    /// Path to a presets JSON file with easy/medium/hard word lists
    #[arg(short = 'i', long = "input")]
    pub corpus_path: Option<PathBuf>,

    /// Play in the full-screen terminal UI
    #[arg(long)]
    pub tui: bool,

    /// Seconds to wait for each guess before the game is lost
    #[arg(short = 't', long = "timeout", default_value_t = 60)]
    pub timeout_secs: u64,

    /// Seed for word selection, for reproducible games
    #[arg(long)]
    pub seed: Option<u64>,
}

impl Cli {
    #[must_use]
    pub fn guess_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

pub fn display_usage() {
    println!("{}", crate::display::USAGE);
}

pub fn display_board(view: &BoardView) {
    println!();
    for line in gallows(view.remaining_attempts) {
        println!("{line}");
    }
    println!();
    println!("You've guessed `{}` so far.", view.revealed);
    println!("{}", guessed_letters_line(view));
    println!("{}", footer(view));
}

/// Line-oriented front-end over any reader.
///
/// Lines are pulled on a background thread so each prompt can time out
/// without blocking on the reader.
pub struct CliInterface {
    lines: Receiver<String>,
}

impl CliInterface {
    pub fn new<R: BufRead + Send + 'static>(reader: R) -> Self {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            for line in reader.lines() {
                match line {
                    Ok(line) => {
                        if tx.send(line).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        debug_log!("CliInterface reader stopped: {}", e);
                        break;
                    }
                }
            }
        });
        Self { lines: rx }
    }
}

fn parse_line(line: &str) -> UserAction {
    let input = line.trim();
    if input.eq_ignore_ascii_case(EXIT_COMMAND) {
        UserAction::Exit
    } else {
        UserAction::Guess(input.to_string())
    }
}

impl GameInterface for CliInterface {
    fn display_board(&mut self, view: &BoardView) {
        display_board(view);
    }

    fn read_guess(&mut self, wait: Duration) -> UserAction {
        print!(
            "\nGuess a letter ({}s to answer, or 'exit' to quit): ",
            wait.as_secs()
        );
        let _ = std::io::stdout().flush();

        match self.lines.recv_timeout(wait) {
            Ok(line) => {
                info_log!("CliInterface::read_guess() - Received: {:?}", line);
                parse_line(&line)
            }
            Err(RecvTimeoutError::Timeout) => UserAction::TimedOut,
            Err(RecvTimeoutError::Disconnected) => UserAction::Exit,
        }
    }

    fn display_outcome(&mut self, outcome: GuessOutcome, guess: &str) {
        if let Some(message) = outcome_message(outcome, guess) {
            println!("{message}");
        }
    }

    fn display_result(&mut self, summary: &GameSummary) {
        println!("\n{}", result_message(summary.status, &summary.secret_word));
    }

    fn display_exit_message(&mut self) {
        println!("Exiting.");
    }
}
