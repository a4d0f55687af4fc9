// Conditional logging macros - only active in debug builds

use chrono::Local;
use env_logger::{Env, Target};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        log::debug!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {{}};
}

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        log::info!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {{}};
}

const DEFAULT_FILTER: &str = "warn";
const LOG_FILE_NAME: &str = "hangman.log";

/// Where log records end up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogDestination {
    Stderr,
    /// Append to a file; used while the TUI owns the terminal.
    File(PathBuf),
}

/// `<cache_dir>/hangman/hangman.log`, if the platform has a cache directory.
#[must_use]
pub fn default_log_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join("hangman").join(LOG_FILE_NAME))
}

fn open_log_file(path: &Path) -> io::Result<fs::File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Install the global `env_logger` backend.
///
/// The filter defaults to `warn` and can be overridden with `RUST_LOG`.
/// Calling this twice is harmless; the second call is ignored.
pub fn init_logger(destination: &LogDestination) -> io::Result<()> {
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or(DEFAULT_FILTER));
    builder.format(|buf, record| {
        writeln!(
            buf,
            "{} [{:<5}] {}: {}",
            Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
            record.level(),
            record.target(),
            record.args()
        )
    });

    if let LogDestination::File(path) = destination {
        let file = open_log_file(path)?;
        builder.target(Target::Pipe(Box::new(file)));
    }

    // Already initialised (e.g. by a test harness).
    let _ = builder.try_init();
    Ok(())
}
