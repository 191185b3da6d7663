//! # yumscout-core
//!
//! Discovers every network domain contacted while resolving a yum/rpm-md
//! repository's metadata chain, including domains that only appear as
//! redirect hops.
//!
//! ## Architecture
//!
//! - **Loader**: issues GET/HEAD requests, follows redirects hop by hop and
//!   records every URL and domain of each chain ([`Loader`], [`VisitHistory`])
//! - **Metadata**: namespace-aware navigation of `repomd.xml` and
//!   `primary.xml.gz` ([`metadata`])
//! - **Walker**: index → primary → package probes ([`Walker`])
//! - **Configuration**: transport settings and probe policy ([`WalkConfig`])
//!
//! ## Quick Start
//!
//! ```no_run
//! use yumscout_core::{WalkConfig, discover_domains};
//!
//! # async fn example() -> yumscout_core::Result<()> {
//! let report = discover_domains("http://mirror.example.org/centos/9/os", &WalkConfig::default()).await?;
//! println!("Domains:");
//! for domain in &report.domains {
//!     println!("  {domain}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Ordering
//!
//! Requests are issued strictly one after another. Domains are reported in
//! the order they were first observed across the whole walk; within a single
//! request the chain is recorded request URL first, final URL last.

/// Walk configuration (transport settings, probe policy)
pub mod config;
/// Error types and result aliases
pub mod error;
/// Insertion-ordered URL and domain history
pub mod history;
/// Redirect-aware HTTP loader
pub mod loader;
pub mod metadata;
/// Walk results
pub mod report;
/// Repository walker
pub mod walker;

pub use config::{FetchConfig, ProbeConfig, ProbePolicy, WalkConfig};
pub use error::{Error, Result};
pub use history::{VisitHistory, authority};
pub use loader::{FetchResponse, Loader, Method};
pub use report::{FailedProbe, WalkReport};
pub use walker::{RepoUrl, Walker, discover_domains};
