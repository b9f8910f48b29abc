//! Logging setup for the `dockdb` binary.
//!
//! Progress and diagnostics go to stderr so stdout only carries command
//! output (profile listings, dry-run plans).

use anyhow::{Result, anyhow};
use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

/// Maps `-v`/`-q` to a level. `quiet` wins.
pub fn level_for(verbose: u8, quiet: bool) -> Level {
    match (quiet, verbose) {
        (true, _) => Level::ERROR,
        (false, 0) => Level::INFO,
        (false, 1) => Level::DEBUG,
        (false, _) => Level::TRACE,
    }
}

/// Initializes the global subscriber. `RUST_LOG` takes precedence over the flags.
pub fn init_logging(verbose: u8, quiet: bool) -> Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level_for(verbose, quiet)).into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init()
        .map_err(|e| anyhow!("failed to initialize logging: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_levels() {
        let cases = [
            ((true, 0), Level::ERROR),
            ((true, 3), Level::ERROR),
            ((false, 0), Level::INFO),
            ((false, 1), Level::DEBUG),
            ((false, 2), Level::TRACE),
            ((false, 9), Level::TRACE),
        ];

        for ((quiet, verbose), expected) in cases {
            assert_eq!(
                level_for(verbose, quiet),
                expected,
                "quiet={quiet}, verbose={verbose}"
            );
        }
    }
}
