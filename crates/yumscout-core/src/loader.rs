//! Redirect-aware HTTP loader.
//!
//! The loader disables the transport's automatic redirect handling and walks
//! each redirect chain itself. Every URL of a successful chain (the request
//! URL, every hop, the final URL) is folded into a [`VisitHistory`], so domains
//! that only ever answer with a `3xx` still show up in the report.

use crate::config::FetchConfig;
use crate::history::VisitHistory;
use crate::{Error, Result};
use reqwest::header::LOCATION;
use reqwest::redirect::Policy;
use reqwest::{Client, Response, StatusCode};
use std::fmt;
use tracing::{debug, info};
use url::Url;

/// HTTP method used for a fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// Download the body.
    Get,
    /// Existence probe; the body is never read.
    Head,
}

impl Method {
    fn as_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Head => reqwest::Method::HEAD,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Head => write!(f, "HEAD"),
        }
    }
}

/// Outcome of a single [`Loader::fetch`] call.
#[derive(Debug, Clone)]
pub struct FetchResponse {
    /// URLs that answered with a redirect, oldest first.
    ///
    /// When at least one redirect happened, the first entry is the URL that
    /// was originally requested.
    pub redirects: Vec<Url>,
    /// URL of the terminal response.
    pub url: Url,
    /// Status of the terminal response.
    pub status: StatusCode,
    body: Option<Vec<u8>>,
}

impl FetchResponse {
    /// The URL originally requested.
    #[must_use]
    pub fn requested_url(&self) -> &Url {
        self.redirects.first().unwrap_or(&self.url)
    }

    /// Every URL of the chain in traversal order, final URL last.
    pub fn chain(&self) -> impl Iterator<Item = &Url> {
        self.redirects.iter().chain(std::iter::once(&self.url))
    }

    /// Response body. Always `None` for HEAD requests.
    #[must_use]
    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    /// Consumes the response and returns its body (empty for HEAD).
    #[must_use]
    pub fn into_body(self) -> Vec<u8> {
        self.body.unwrap_or_default()
    }

    /// Returns an error unless the terminal status is a success.
    pub fn error_for_status(self) -> Result<Self> {
        if self.status.is_success() {
            Ok(self)
        } else {
            Err(Error::HttpStatus {
                url: self.url.to_string(),
                status: self.status.as_u16(),
            })
        }
    }
}

/// HTTP loader that records every URL and domain it touches.
///
/// A loader is created for one repository walk; its [`VisitHistory`] only
/// grows for the lifetime of the instance.
#[derive(Debug)]
pub struct Loader {
    client: Client,
    max_redirects: usize,
    history: VisitHistory,
}

impl Loader {
    /// Creates a loader with the default fetch settings.
    pub fn new() -> Result<Self> {
        Self::with_config(&FetchConfig::default())
    }

    /// Creates a loader from explicit fetch settings.
    pub fn with_config(config: &FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.as_str())
            .redirect(Policy::none())
            .build()
            .map_err(Error::Network)?;

        Ok(Self {
            client,
            max_redirects: config.max_redirects,
            history: VisitHistory::new(),
        })
    }

    /// Issues one request, following redirects, and records its chain.
    ///
    /// The method is kept across hops. A `3xx` response without a `Location`
    /// header is returned as the terminal response. Non-success terminal
    /// statuses are not errors here; see [`FetchResponse::error_for_status`].
    ///
    /// When the request fails part-way, every URL that already answered is
    /// still recorded.
    pub async fn fetch(&mut self, url: &Url, method: Method) -> Result<FetchResponse> {
        info!("loading: {url}");

        let mut redirects = Vec::new();
        let outcome = self.follow(url, method, &mut redirects).await;
        match outcome {
            Ok((final_url, status, body)) => {
                let fetched = FetchResponse {
                    redirects,
                    url: final_url,
                    status,
                    body,
                };
                self.history.record(fetched.chain());

                debug!(
                    %method,
                    url = %fetched.url,
                    status = status.as_u16(),
                    hops = fetched.redirects.len(),
                    "request complete"
                );
                Ok(fetched)
            },
            Err(e) => {
                if !redirects.is_empty() {
                    debug!(%method, hops = redirects.len(), error = %e, "recording partial redirect chain");
                    self.history.record(&redirects);
                }
                Err(e)
            },
        }
    }

    /// Walks the redirect chain.
    ///
    /// Every URL that answered before the chain ended is pushed onto
    /// `redirects`, so a failing chain still leaves the contacted URLs behind.
    async fn follow(
        &self,
        url: &Url,
        method: Method,
        redirects: &mut Vec<Url>,
    ) -> Result<(Url, StatusCode, Option<Vec<u8>>)> {
        let mut current = url.clone();

        loop {
            let response = self
                .client
                .request(method.as_reqwest(), current.clone())
                .send()
                .await?;
            let status = response.status();

            let target = match redirect_target(&current, &response) {
                Ok(target) => target,
                Err(e) => {
                    redirects.push(current);
                    return Err(e);
                },
            };

            if let Some(next) = target {
                if redirects.len() >= self.max_redirects {
                    redirects.push(current);
                    return Err(Error::TooManyRedirects {
                        url: url.to_string(),
                        limit: self.max_redirects,
                    });
                }
                debug!(%method, from = %current, to = %next, status = status.as_u16(), "following redirect");
                redirects.push(std::mem::replace(&mut current, next));
                continue;
            }

            let body = match method {
                Method::Get => match response.bytes().await {
                    Ok(bytes) => Some(bytes.to_vec()),
                    Err(e) => {
                        redirects.push(current);
                        return Err(e.into());
                    },
                },
                Method::Head => None,
            };
            return Ok((current, status, body));
        }
    }

    /// Shorthand for `fetch(url, Method::Get)`.
    pub async fn get(&mut self, url: &Url) -> Result<FetchResponse> {
        self.fetch(url, Method::Get).await
    }

    /// Shorthand for `fetch(url, Method::Head)`.
    pub async fn head(&mut self, url: &Url) -> Result<FetchResponse> {
        self.fetch(url, Method::Head).await
    }

    /// Everything recorded so far.
    #[must_use]
    pub const fn history(&self) -> &VisitHistory {
        &self.history
    }

    /// Consumes the loader, returning its history.
    #[must_use]
    pub fn into_history(self) -> VisitHistory {
        self.history
    }
}

const fn is_redirect(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::MOVED_PERMANENTLY
            | StatusCode::FOUND
            | StatusCode::SEE_OTHER
            | StatusCode::TEMPORARY_REDIRECT
            | StatusCode::PERMANENT_REDIRECT
    )
}

/// Resolves the next hop of a redirect response, if it is one.
fn redirect_target(current: &Url, response: &Response) -> Result<Option<Url>> {
    if !is_redirect(response.status()) {
        return Ok(None);
    }
    let Some(location) = response.headers().get(LOCATION) else {
        return Ok(None);
    };

    let location = location.to_str().map_err(|_| Error::InvalidRedirect {
        url: current.to_string(),
        reason: "Location header is not valid UTF-8".to_string(),
    })?;

    current
        .join(location)
        .map(Some)
        .map_err(|e| Error::InvalidRedirect {
            url: current.to_string(),
            reason: format!("cannot resolve Location '{location}': {e}"),
        })
}
