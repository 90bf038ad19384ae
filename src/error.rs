// src/error.rs
// =============================================================================
// Error types for the crawler library.
//
// Two families:
// - CrawlError: problems setting up a crawl (bad seed URL, bad headers,
//   HTTP client construction). Only these can stop a crawl before it starts.
// - FetchError: problems with a single page. These never stop a crawl;
//   the engine logs them and moves on to the next target.
//
// The binary and the C export wrap these in anyhow at the edges.
// =============================================================================

use reqwest::StatusCode;
use thiserror::Error;

/// Errors raised while preparing a crawl.
#[derive(Debug, Error)]
pub enum CrawlError {
    /// The seed could not be parsed as a URL, or has no hostname.
    #[error("invalid seed URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The raw header string contains no colon at all.
    #[error("headers flag not formatted properly (no colon to separate header and value)")]
    MalformedHeaders,

    /// reqwest refused the client configuration (TLS backend, etc.).
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("invalid scope pattern: {0}")]
    ScopePattern(#[from] regex::Error),
}

/// Errors for a single crawl target.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error(transparent)]
    Request(#[from] reqwest::Error),

    #[error("HTTP {0}")]
    Status(StatusCode),

    #[error("not an HTML document (content-type: {0})")]
    NotHtml(String),
}

impl FetchError {
    /// Short category used as a log field.
    ///
    /// reqwest errors can happen for many reasons (timeouts, DNS,
    /// TLS handshakes, redirect loops), so we sort them into buckets
    /// that are easy to grep for.
    pub fn label(&self) -> &'static str {
        match self {
            FetchError::Request(e) if e.is_timeout() => "timeout",
            FetchError::Request(e) if e.is_redirect() => "redirect",
            FetchError::Request(e) if e.is_connect() => "connect",
            FetchError::Request(e) if e.is_body() || e.is_decode() => "body",
            FetchError::Request(_) => "request",
            FetchError::Status(_) => "status",
            FetchError::NotHtml(_) => "not-html",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_for_non_request_errors() {
        assert_eq!(FetchError::Status(StatusCode::NOT_FOUND).label(), "status");
        assert_eq!(
            FetchError::NotHtml("application/json".to_string()).label(),
            "not-html"
        );
    }

    #[test]
    fn test_error_messages() {
        let err = FetchError::Status(StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "HTTP 500 Internal Server Error");

        let err = CrawlError::MalformedHeaders;
        assert!(err.to_string().contains("no colon"));
    }
}
