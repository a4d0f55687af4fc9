// Library interface for hangman
// This allows integration tests to access internal modules

pub mod cli;
pub mod corpus;
pub mod display;
pub mod game_state;
pub mod logging;
pub mod selector;
pub mod session;
pub mod tui;

// Re-export commonly used items for easier testing
pub use corpus::{
    CorpusError, Difficulty, WordCorpus, load_corpus, load_corpus_from_file, load_corpus_from_str,
};
pub use game_state::{
    BoardView, EngineError, GameStatus, GuessEngine, GuessOutcome, MAX_ATTEMPTS, SecretWord,
};
pub use selector::{Constraints, Selection, SelectorError, WordSelector, resolve};
pub use session::{DEFAULT_GUESS_TIMEOUT, GameInterface, GameSummary, UserAction, game_loop};
