//! Utilities: logging setup.
//!
//! Logs always go to stderr; stdout is reserved for the JSON result record.

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Map `-v` / `-q` flags to a level (quiet wins over verbose).
pub fn derive_level(verbose: u8, quiet: bool) -> Level {
    if quiet {
        return Level::ERROR;
    }
    match verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Install the global subscriber. `RUST_LOG`, when set and valid, overrides `level`.
pub fn init_logging(level: Level) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_ascii_lowercase()));

    // A second init (tests) is harmless; ignore the error.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_beats_verbose() {
        assert_eq!(derive_level(2, true), Level::ERROR);
    }

    #[test]
    fn verbosity_ladder() {
        assert_eq!(derive_level(0, false), Level::INFO);
        assert_eq!(derive_level(1, false), Level::DEBUG);
        assert_eq!(derive_level(5, false), Level::TRACE);
    }
}
