//! Error types for yumscout-core operations.
//!
//! Every failure during a repository walk is fatal: nothing is retried and no
//! partial report is produced. The error type therefore focuses on telling the
//! user *which stage* failed and why.
//!
//! ## Error Categories
//!
//! - **Transport**: DNS, connect, TLS, timeouts, redirect loops, bad statuses
//! - **Document**: malformed XML or missing namespace-qualified elements
//! - **Decompression**: the primary metadata body is not valid gzip
//! - **Configuration**: unreadable or invalid configuration files
//!
//! ```rust
//! use yumscout_core::Error;
//!
//! let err = Error::MissingPrimary;
//! assert_eq!(err.category(), "document");
//! ```

use thiserror::Error;

/// The main error type for yumscout-core operations.
///
/// All public functions return [`Result<T>`]. The source chain of wrapped
/// transport and I/O errors is preserved so the CLI can print it in full.
#[derive(Error, Debug)]
pub enum Error {
    /// Network operation failed.
    ///
    /// Covers DNS resolution, connection, TLS and timeout failures reported by
    /// the HTTP transport. The underlying `reqwest::Error` is preserved.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A redirect chain exceeded the configured hop limit.
    #[error("Too many redirects while loading '{url}' (limit: {limit})")]
    TooManyRedirects {
        /// URL originally requested.
        url: String,
        /// Maximum number of hops that were allowed.
        limit: usize,
    },

    /// A redirect response could not be followed.
    ///
    /// ## Common Causes
    ///
    /// - `Location` header that is not valid UTF-8
    /// - `Location` value that cannot be resolved against the current URL
    ///
    /// A 3xx response without any `Location` header is not an error; the
    /// loader returns it as the terminal response.
    #[error("Invalid redirect from '{url}': {reason}")]
    InvalidRedirect {
        /// URL whose response carried the bad redirect.
        url: String,
        /// What was wrong with the redirect.
        reason: String,
    },

    /// A metadata document was served with a non-success status.
    #[error("HTTP {status} while loading '{url}'")]
    HttpStatus {
        /// Final URL of the request, after redirects.
        url: String,
        /// Status code of the final response.
        status: u16,
    },

    /// URL is malformed or cannot be resolved against the repository base.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A metadata document could not be parsed or lacks an expected element.
    ///
    /// ## Common Causes
    ///
    /// - Response body is not XML (an HTML error page, for example)
    /// - Elements live outside the expected metadata namespaces
    /// - `location` element without an `href` attribute
    #[error("Malformed document: {0}")]
    MalformedDocument(String),

    /// The repository index has no `data` entry of type `primary`.
    #[error("Malformed document: repomd.xml has no data entry of type 'primary'")]
    MissingPrimary,

    /// The primary metadata body is not valid gzip content.
    #[error("Decompression error: {0}")]
    Decompression(String),

    /// Configuration is invalid or could not be read.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidUrl(err.to_string())
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Self::MalformedDocument(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}

impl Error {
    /// Get the error category as a string identifier.
    ///
    /// The CLI includes it in the message of a fatal error.
    ///
    /// - `"transport"` - network failures, redirect problems, bad statuses
    /// - `"invalid_url"` - base URL or href resolution
    /// - `"document"` - XML parsing and navigation
    /// - `"decompression"` - gzip decoding of primary metadata
    /// - `"config"` - configuration values
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::Network(_)
            | Self::TooManyRedirects { .. }
            | Self::InvalidRedirect { .. }
            | Self::HttpStatus { .. } => "transport",
            Self::InvalidUrl(_) => "invalid_url",
            Self::MalformedDocument(_) | Self::MissingPrimary => "document",
            Self::Decompression(_) => "decompression",
            Self::Config(_) => "config",
        }
    }
}

/// Convenience type alias for `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_formatting() {
        let err = Error::TooManyRedirects {
            url: "http://a.test/repo/repodata/repomd.xml".to_string(),
            limit: 10,
        };
        let msg = err.to_string();
        assert!(msg.contains("Too many redirects"));
        assert!(msg.contains("a.test"));
        assert!(msg.contains("10"));

        let err = Error::HttpStatus {
            url: "http://a.test/x".to_string(),
            status: 404,
        };
        assert_eq!(err.to_string(), "HTTP 404 while loading 'http://a.test/x'");

        assert!(Error::MissingPrimary.to_string().contains("primary"));
    }

    #[test]
    fn test_error_categories() {
        let cases = [
            (Error::InvalidUrl("x".to_string()), "invalid_url"),
            (Error::MalformedDocument("x".to_string()), "document"),
            (Error::MissingPrimary, "document"),
            (Error::Decompression("x".to_string()), "decompression"),
            (Error::Config("x".to_string()), "config"),
            (
                Error::InvalidRedirect {
                    url: "x".to_string(),
                    reason: "y".to_string(),
                },
                "transport",
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.category(), expected, "wrong category for {error}");
        }
    }

    #[test]
    fn test_url_parse_error_conversion() {
        let err: Error = url::Url::parse("not a url").unwrap_err().into();
        assert!(matches!(err, Error::InvalidUrl(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let err: Error = toml::from_str::<toml::Value>("= nope").unwrap_err().into();
        match err {
            Error::Config(msg) => assert!(!msg.is_empty()),
            other => panic!("expected config error, got {other:?}"),
        }
    }
}
