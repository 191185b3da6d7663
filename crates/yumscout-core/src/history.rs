//! Visit history: every URL and domain touched during a walk.
//!
//! Both collections are insertion-ordered sets. A value is appended the first
//! time it is observed and never moves afterwards, so iteration yields the
//! global first-seen order across all requests of a run.

use indexmap::IndexSet;
use url::Url;

/// Accumulated URLs and domains seen by a [`Loader`](crate::Loader).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisitHistory {
    urls: IndexSet<String>,
    domains: IndexSet<String>,
}

impl VisitHistory {
    /// Creates an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one request chain into the history.
    ///
    /// URLs are recorded by exact string; domains by [`authority`]. Values
    /// already present keep their original position.
    pub fn record<'a, I>(&mut self, chain: I)
    where
        I: IntoIterator<Item = &'a Url>,
    {
        for url in chain {
            self.urls.insert(url.as_str().to_string());
            if let Some(domain) = authority(url) {
                self.domains.insert(domain);
            }
        }
    }

    /// Visited URLs in first-seen order.
    pub fn urls(&self) -> impl ExactSizeIterator<Item = &str> {
        self.urls.iter().map(String::as_str)
    }

    /// Visited domains in first-seen order.
    pub fn domains(&self) -> impl ExactSizeIterator<Item = &str> {
        self.domains.iter().map(String::as_str)
    }

    /// Returns `true` if nothing has been recorded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    /// Consumes the history, returning `(urls, domains)` in first-seen order.
    #[must_use]
    pub fn into_parts(self) -> (Vec<String>, Vec<String>) {
        (
            self.urls.into_iter().collect(),
            self.domains.into_iter().collect(),
        )
    }
}

/// Extracts the network authority (`host` or `host:port`) of a URL.
///
/// Userinfo is dropped. The port only appears when it differs from the
/// scheme's default, which is how `url` normalises parsed URLs. Returns `None`
/// for URLs without a host (`file:`, `data:`).
#[must_use]
pub fn authority(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    Some(url.port().map_or_else(|| host.to_string(), |port| format!("{host}:{port}")))
}
