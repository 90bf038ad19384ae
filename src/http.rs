// src/http.rs
// =============================================================================
// This module builds the HTTP client for a crawl and fetches pages.
//
// Key functionality:
// - One reqwest Client per crawl (connection pooling across workers)
// - Fixed browser-like User-Agent on every request
// - Optional TLS verification bypass (-insecure)
// - Redirects are followed only while they stay inside the crawl scope
// - Only successful HTML responses are handed to the parser
// =============================================================================

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, CONTENT_TYPE};
use reqwest::{redirect, Client};
use url::Url;

use crate::crawl::ScopePolicy;
use crate::error::{CrawlError, FetchError};

/// Sent on every request; not configurable.
pub const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:78.0) Gecko/20100101 Firefox/78.0";

const MAX_REDIRECTS: usize = 10;

/// A fetched HTML document.
#[derive(Debug, Clone)]
pub struct Page {
    /// Final URL after redirects; relative links resolve against it.
    pub url: Url,
    pub body: String,
}

/// Creates the HTTP client shared by all workers of one crawl.
pub fn build_client(
    scope: Arc<ScopePolicy>,
    skip_tls_verify: bool,
    timeout: Option<Duration>,
) -> Result<Client, CrawlError> {
    let policy = redirect::Policy::custom(move |attempt| {
        if attempt.previous().len() >= MAX_REDIRECTS {
            attempt.error("too many redirects")
        } else if scope.allows(attempt.url()) {
            attempt.follow()
        } else {
            attempt.stop()
        }
    });

    let mut builder = Client::builder()
        .user_agent(USER_AGENT)
        .redirect(policy)
        .danger_accept_invalid_certs(skip_tls_verify);

    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }

    Ok(builder.build()?)
}

/// GETs `url` with the custom headers and returns the page if it is HTML.
///
/// The custom headers replace any client default of the same name
/// (including User-Agent).
pub async fn fetch_page(client: &Client, url: &Url, headers: &HeaderMap) -> Result<Page, FetchError> {
    let response = client
        .get(url.clone())
        .headers(headers.clone())
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status(status));
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    if !is_html(&content_type) {
        return Err(FetchError::NotHtml(content_type));
    }

    let url = response.url().clone();
    let body = response.text().await?;

    Ok(Page { url, body })
}

fn is_html(content_type: &str) -> bool {
    content_type.to_ascii_lowercase().contains("html")
}
