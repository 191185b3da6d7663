//! Repository walker: index → primary metadata → package probes.
//!
//! The walk is strictly sequential. Each stage's document determines the next
//! stage's request target, and every request goes through one [`Loader`] so
//! its history covers the whole walk.
//!
//! ```no_run
//! use yumscout_core::{RepoUrl, WalkConfig, Walker};
//!
//! # async fn example() -> yumscout_core::Result<()> {
//! let base: RepoUrl = "https://mirror.example.org/fedora/releases/40/Everything/x86_64/os".parse()?;
//! let report = Walker::new(base, &WalkConfig::default())?.run().await?;
//! for domain in &report.domains {
//!     println!("{domain}");
//! }
//! # Ok(())
//! # }
//! ```

use crate::config::{ProbePolicy, WalkConfig};
use crate::loader::Loader;
use crate::metadata::repomd::REPOMD_PATH;
use crate::metadata::{PrimaryMetadata, RepoIndex};
use crate::report::{FailedProbe, WalkReport};
use crate::{Error, Result};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, instrument, warn};
use url::Url;

/// Repository base URL, normalised to end with `/`.
///
/// Relative metadata locations are resolved against it with standard URL
/// resolution, so `http://x/repo` and `http://x/repo/` behave the same.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoUrl(Url);

impl RepoUrl {
    /// Parses and normalises a repository base URL.
    ///
    /// Only `http` and `https` URLs are accepted.
    pub fn parse(raw: &str) -> Result<Self> {
        let mut url = Url::parse(raw.trim())?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::InvalidUrl(format!(
                "unsupported scheme '{}' in '{raw}' (expected http or https)",
                url.scheme()
            )));
        }
        if url.host_str().is_none() {
            return Err(Error::InvalidUrl(format!("no host in '{raw}'")));
        }
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }

        Ok(Self(url))
    }

    /// Resolves a metadata location against the base.
    ///
    /// Absolute hrefs replace the base entirely; `/`-rooted hrefs keep only
    /// the base's origin.
    pub fn join(&self, href: &str) -> Result<Url> {
        self.0
            .join(href)
            .map_err(|e| Error::InvalidUrl(format!("cannot resolve '{href}' against '{}': {e}", self.0)))
    }

    /// The normalised base URL.
    #[must_use]
    pub const fn as_url(&self) -> &Url {
        &self.0
    }
}

impl FromStr for RepoUrl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for RepoUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Drives one repository walk.
#[derive(Debug)]
pub struct Walker {
    base: RepoUrl,
    loader: Loader,
    policy: ProbePolicy,
}

impl Walker {
    /// Creates a walker with a fresh loader.
    pub fn new(base: RepoUrl, config: &WalkConfig) -> Result<Self> {
        Ok(Self::with_loader(
            base,
            Loader::with_config(&config.fetch)?,
            config.probe.policy,
        ))
    }

    /// Creates a walker around an existing loader.
    ///
    /// Anything the loader has already recorded is part of the final report.
    #[must_use]
    pub fn with_loader(base: RepoUrl, loader: Loader, policy: ProbePolicy) -> Self {
        Self {
            base,
            loader,
            policy,
        }
    }

    /// Runs all stages and returns the report.
    ///
    /// Any failure aborts the walk; nothing is reported for a failed walk.
    #[instrument(skip_all, fields(base = %self.base))]
    pub async fn run(mut self) -> Result<WalkReport> {
        let index = self.fetch_index().await?;
        let primary = self.fetch_primary(&index).await?;
        let failed_probes = self.probe_packages(&primary).await?;

        let (urls, domains) = self.loader.into_history().into_parts();
        Ok(WalkReport {
            base_url: self.base.to_string(),
            domains,
            urls,
            packages: primary.package_count(),
            failed_probes,
        })
    }

    /// Stage 1: download and parse `repodata/repomd.xml`.
    #[instrument(skip_all)]
    async fn fetch_index(&mut self) -> Result<RepoIndex> {
        let url = self.base.join(REPOMD_PATH)?;
        let body = self.loader.get(&url).await?.error_for_status()?.into_body();
        let index = RepoIndex::parse(&body)?;
        debug!(data_types = ?index.data_types().collect::<Vec<_>>(), "parsed repository index");
        Ok(index)
    }

    /// Stage 2: download, decompress and parse the primary metadata.
    #[instrument(skip_all)]
    async fn fetch_primary(&mut self, index: &RepoIndex) -> Result<PrimaryMetadata> {
        let location = index.primary_location()?;
        let url = self.base.join(location)?;
        let body = self.loader.get(&url).await?.error_for_status()?.into_body();
        let primary = PrimaryMetadata::from_gzip(&body)?;
        debug!(packages = primary.package_count(), "parsed primary metadata");
        Ok(primary)
    }

    /// Stage 3: HEAD every package artifact in document order.
    ///
    /// Probe statuses are not checked; only the visited chain matters.
    #[instrument(skip_all, fields(policy = ?self.policy))]
    async fn probe_packages(&mut self, primary: &PrimaryMetadata) -> Result<Vec<FailedProbe>> {
        let mut failed = Vec::new();

        for href in primary.package_locations()? {
            let outcome = match self.base.join(href) {
                Ok(url) => self.loader.head(&url).await.map(|_| ()),
                Err(e) => Err(e),
            };

            match (outcome, self.policy) {
                (Ok(()), _) => {},
                (Err(e), ProbePolicy::FailFast) => return Err(e),
                (Err(e), ProbePolicy::BestEffort) => {
                    warn!(href, error = %e, "package probe failed, continuing");
                    failed.push(FailedProbe {
                        href: href.to_string(),
                        error: e.to_string(),
                    });
                },
            }
        }

        Ok(failed)
    }
}

/// Walks the repository at `base` and returns the report.
pub async fn discover_domains(base: &str, config: &WalkConfig) -> Result<WalkReport> {
    Walker::new(RepoUrl::parse(base)?, config)?.run().await
}
