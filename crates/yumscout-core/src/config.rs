//! Configuration for repository walks.
//!
//! Settings are stored in TOML and every field has a default, so an empty file
//! (or no file at all) yields a usable configuration.
//!
//! ## Example Configuration File
//!
//! ```toml
//! [fetch]
//! timeout_secs = 30
//! max_redirects = 10
//! user_agent = "yumscout/0.1.0"
//!
//! [probe]
//! policy = "best_effort"
//! ```
//!
//! ## Loading
//!
//! ```rust,no_run
//! use yumscout_core::WalkConfig;
//! use std::path::Path;
//!
//! let config = WalkConfig::load(Path::new("yumscout.toml"))?;
//! println!("timeout: {}s", config.fetch.timeout_secs);
//! # Ok::<(), yumscout_core::Error>(())
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Upper bound accepted for `fetch.max_redirects`.
pub const MAX_REDIRECT_LIMIT: usize = 50;

/// Top-level configuration for a repository walk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkConfig {
    /// HTTP transport settings used by the loader.
    pub fetch: FetchConfig,
    /// Package probing behaviour.
    pub probe: ProbeConfig,
}

/// HTTP transport settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Per-request timeout in seconds, applied by the transport.
    pub timeout_secs: u64,

    /// Maximum number of redirect hops followed for a single request.
    pub max_redirects: usize,

    /// `User-Agent` header sent with every request.
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            max_redirects: 10,
            user_agent: concat!("yumscout/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl FetchConfig {
    /// Request timeout as a [`Duration`].
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Package probing settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// What to do when a single package probe fails.
    pub policy: ProbePolicy,
}

/// Failure policy for the package probing stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbePolicy {
    /// The first failing probe aborts the whole walk.
    #[default]
    FailFast,

    /// Failing probes are logged and reported; the walk continues.
    ///
    /// Redirect hops that answered before a probe failed are still recorded.
    BestEffort,
}

impl WalkConfig {
    /// Loads configuration from a TOML file and validates it.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read {}: {e}", path.display()))
        })?;
        Self::from_toml(&content)
    }

    /// Parses configuration from TOML text and validates it.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.fetch.timeout_secs == 0 {
            return Err(Error::Config(
                "fetch.timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.fetch.max_redirects > MAX_REDIRECT_LIMIT {
            return Err(Error::Config(format!(
                "fetch.max_redirects must be at most {MAX_REDIRECT_LIMIT} (got {})",
                self.fetch.max_redirects
            )));
        }
        if self.fetch.user_agent.trim().is_empty() {
            return Err(Error::Config("fetch.user_agent must not be empty".to_string()));
        }
        Ok(())
    }
}
