use hangman::cli::{CliInterface, display_usage, parse_cli};
use hangman::logging::{LogDestination, default_log_path, init_logger};
use hangman::tui::TuiInterface;
use hangman::{GuessEngine, SelectorError, WordSelector, game_loop, info_log, load_corpus, resolve};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io::{self, BufReader};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = parse_cli();

    let destination = match default_log_path() {
        Some(path) if cli.tui => LogDestination::File(path),
        _ => LogDestination::Stderr,
    };
    if let Err(e) = init_logger(&destination) {
        eprintln!("Failed to set up logging: {e}");
    }

    let corpus = match load_corpus(cli.corpus_path.as_deref()) {
        Ok(corpus) => corpus,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };
    info_log!("Loaded {} words.", corpus.len());

    let selection = match resolve(cli.game_args.as_slice()) {
        Ok(selection) => selection,
        Err(SelectorError::Help) => {
            display_usage();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let secret = match WordSelector::new(&corpus).draw(&selection, &mut rng) {
        Ok(secret) => secret,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let mut engine = GuessEngine::new(secret, Some(selection.label()));
    let wait = cli.guess_timeout();

    if cli.tui {
        let mut tui = match TuiInterface::new() {
            Ok(tui) => tui,
            Err(e) => {
                eprintln!("Failed to start terminal UI: {e}");
                return ExitCode::FAILURE;
            }
        };
        game_loop(&mut engine, &mut tui, wait);
    } else {
        let mut interface = CliInterface::new(BufReader::new(io::stdin()));
        game_loop(&mut engine, &mut interface, wait);
    }

    ExitCode::SUCCESS
}
