use crate::game_state::{BoardView, GameStatus, GuessEngine, GuessOutcome};
use crate::{debug_log, info_log};
use std::time::Duration;

/// How long the player gets to answer each prompt.
pub const DEFAULT_GUESS_TIMEOUT: Duration = Duration::from_secs(60);

/// What the front-end got back from waiting on the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    Guess(String),
    /// No input within the wait window.
    TimedOut,
    /// The player quit, or input ended. The game is discarded.
    Exit,
}

/// Everything the front-end needs to announce the end of a game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSummary {
    pub status: GameStatus,
    pub secret_word: String,
    pub board: BoardView,
}

/// Front-end abstraction: anything that can show the board and collect
/// guesses with a deadline.
pub trait GameInterface {
    fn display_board(&mut self, view: &BoardView);
    /// Block for at most `wait` for the next guess.
    fn read_guess(&mut self, wait: Duration) -> UserAction;
    fn display_outcome(&mut self, outcome: GuessOutcome, guess: &str);
    fn display_result(&mut self, summary: &GameSummary);
    fn display_exit_message(&mut self);
}

/// Drive `engine` to completion through `interface`.
///
/// Returns the terminal status, or `None` if the player left first.
pub fn game_loop<I: GameInterface + ?Sized>(
    engine: &mut GuessEngine,
    interface: &mut I,
    wait: Duration,
) -> Option<GameStatus> {
    while !engine.status().is_terminal() {
        interface.display_board(&engine.render_state());

        let result = match interface.read_guess(wait) {
            UserAction::Guess(guess) => engine
                .evaluate_guess(&guess)
                .map(|outcome| (outcome, guess)),
            UserAction::TimedOut => engine
                .timeout()
                .map(|outcome| (outcome, String::new())),
            UserAction::Exit => {
                info_log!("Player left the game");
                interface.display_exit_message();
                return None;
            }
        };

        match result {
            Ok((outcome, guess)) => interface.display_outcome(outcome, &guess),
            Err(e) => {
                debug_log!("Engine refused event: {}", e);
                break;
            }
        }
    }

    let summary = GameSummary {
        status: engine.status(),
        secret_word: engine.secret_word().to_string(),
        board: engine.render_state(),
    };
    interface.display_board(&summary.board);
    interface.display_result(&summary);
    info_log!("Game finished: {}", summary.status);
    Some(summary.status)
}
