//! Logging initialization.
//!
//! Only the report goes to stdout, so the subscriber always writes to stderr.
//! Without `--logging` only errors are shown.

use anyhow::Result;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use crate::cli::Cli;

/// Maps the `--logging` flag to a maximum level.
pub const fn level_for(cli: &Cli) -> Level {
    if cli.logging { Level::INFO } else { Level::ERROR }
}

/// Install the global tracing subscriber.
///
/// # Errors
///
/// Returns an error if the global tracing subscriber cannot be set.
pub fn initialize_logging(cli: &Cli) -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level_for(cli))
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_logging_flag_selects_level() {
        let quiet = Cli::try_parse_from(["yumscout", "http://a.test/"]).unwrap();
        assert_eq!(level_for(&quiet), Level::ERROR);

        let loud = Cli::try_parse_from(["yumscout", "--logging", "http://a.test/"]).unwrap();
        assert_eq!(level_for(&loud), Level::INFO);
    }
}
