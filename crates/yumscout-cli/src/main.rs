//! yumscout CLI - list every domain a yum repository walk touches
//!
//! Parses arguments, layers configuration, runs one walk and prints the
//! report. Any fatal walk error exits non-zero without printing a report.

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, Write};
use yumscout_core::{ProbePolicy, WalkConfig, discover_domains};

mod cli;
mod output;
mod utils;

use cli::Cli;
use utils::logging::initialize_logging;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    initialize_logging(&cli)?;

    let config = resolve_config(&cli)?;

    let report = match discover_domains(&cli.url, &config).await {
        Ok(report) => report,
        Err(e) => {
            let category = e.category();
            return Err(e)
                .with_context(|| format!("Failed to walk repository {} ({category} error)", cli.url));
        },
    };

    let mut stdout = io::stdout().lock();
    output::render(&report, cli.format, cli.urls, &mut stdout)?;
    stdout.flush()?;

    for failed in &report.failed_probes {
        eprintln!("warning: probe failed for {}: {}", failed.href, failed.error);
    }

    Ok(())
}

/// Defaults, then the configuration file, then explicit flags.
fn resolve_config(cli: &Cli) -> Result<WalkConfig> {
    let mut config = match &cli.config {
        Some(path) => WalkConfig::load(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => WalkConfig::default(),
    };

    if let Some(timeout) = cli.timeout {
        config.fetch.timeout_secs = timeout;
    }
    if let Some(max_redirects) = cli.max_redirects {
        config.fetch.max_redirects = max_redirects;
    }
    if let Some(user_agent) = &cli.user_agent {
        config.fetch.user_agent.clone_from(user_agent);
    }
    if cli.best_effort {
        config.probe.policy = ProbePolicy::BestEffort;
    }

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Write as _;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["yumscout"];
        argv.extend_from_slice(args);
        argv.push("http://a.test/repo");
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_flags_override_defaults() {
        let cli = parse(&["--timeout", "7", "--max-redirects", "2", "--best-effort"]);
        let cli = Cli { config: None, ..cli };
        let config = resolve_config(&cli).unwrap();

        assert_eq!(config.fetch.timeout_secs, 7);
        assert_eq!(config.fetch.max_redirects, 2);
        assert_eq!(config.probe.policy, ProbePolicy::BestEffort);
    }

    #[test]
    fn test_flags_override_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[fetch]\ntimeout_secs = 9\nmax_redirects = 4\n\n[probe]\npolicy = \"best_effort\""
        )
        .unwrap();

        let path = file.path().to_str().unwrap().to_string();
        let cli = parse(&["--config", &path, "--max-redirects", "1"]);
        let config = resolve_config(&cli).unwrap();

        assert_eq!(config.fetch.timeout_secs, 9);
        assert_eq!(config.fetch.max_redirects, 1);
        assert_eq!(config.probe.policy, ProbePolicy::BestEffort);
    }

    #[test]
    fn test_invalid_flag_values_are_rejected() {
        let cli = parse(&["--timeout", "0"]);
        let cli = Cli { config: None, ..cli };
        assert!(resolve_config(&cli).is_err());
    }
}
