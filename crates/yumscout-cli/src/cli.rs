//! # CLI Structure and Argument Parsing
//!
//! `yumscout` takes a single repository base URL and prints every domain the
//! metadata walk contacted.
//!
//! ```bash
//! yumscout http://mirror.example.org/centos/9/BaseOS/x86_64/os
//! yumscout -l --urls https://repo.example.com/el9
//! yumscout --format json --best-effort https://repo.example.com/el9 | jq '.domains[]'
//! ```
//!
//! Transport flags override the matching values of the configuration file
//! given with `--config` (or `YUMSCOUT_CONFIG`).

use clap::Parser;
use std::path::PathBuf;

use crate::output::OutputFormat;

/// Discover every domain contacted while walking a yum repository
#[derive(Parser, Clone, Debug)]
#[command(name = "yumscout")]
#[command(version)]
#[command(about = "List every domain a yum repository's metadata chain touches", long_about = None)]
pub struct Cli {
    /// Repository base URL (the directory containing `repodata/`)
    #[arg(value_name = "URL")]
    pub url: String,

    /// Log every request to stderr
    #[arg(short = 'l', long)]
    pub logging: bool,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Also list every visited URL (text output)
    #[arg(long)]
    pub urls: bool,

    /// Keep probing packages after a probe fails
    #[arg(long)]
    pub best_effort: bool,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Maximum redirect hops followed per request
    #[arg(long, value_name = "N")]
    pub max_redirects: Option<usize>,

    /// User-Agent header sent with every request
    #[arg(long, value_name = "UA")]
    pub user_agent: Option<String>,

    /// TOML configuration file
    #[arg(long, value_name = "PATH", env = "YUMSCOUT_CONFIG")]
    pub config: Option<PathBuf>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["yumscout", "http://a.test/repo"]).unwrap();
        assert_eq!(cli.url, "http://a.test/repo");
        assert!(!cli.logging);
        assert_eq!(cli.format, OutputFormat::Text);
        assert!(!cli.urls);
        assert!(!cli.best_effort);
        assert!(cli.timeout.is_none());
        assert!(cli.max_redirects.is_none());
    }

    #[test]
    fn test_all_flags() {
        let cli = Cli::try_parse_from([
            "yumscout",
            "-l",
            "--format",
            "json",
            "--urls",
            "--best-effort",
            "--timeout",
            "5",
            "--max-redirects",
            "3",
            "--user-agent",
            "probe/1.0",
            "--config",
            "/etc/yumscout.toml",
            "http://a.test/repo",
        ])
        .unwrap();

        assert!(cli.logging);
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(cli.urls);
        assert!(cli.best_effort);
        assert_eq!(cli.timeout, Some(5));
        assert_eq!(cli.max_redirects, Some(3));
        assert_eq!(cli.user_agent.as_deref(), Some("probe/1.0"));
        assert_eq!(cli.config, Some(PathBuf::from("/etc/yumscout.toml")));
    }

    #[test]
    fn test_url_is_required() {
        assert!(Cli::try_parse_from(["yumscout"]).is_err());
    }
}
