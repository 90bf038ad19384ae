// src/crawl/scope.rs
// =============================================================================
// Decides which hosts a crawl is allowed to fetch.
//
// The policy is derived once from the seed URL:
// - Exact: the target hostname must equal the seed hostname.
// - Subdomains: the target hostname may also be any dot-delimited
//   subdomain of the seed hostname (api.example.com for example.com),
//   but never a different name that merely ends with the same letters
//   (notexample.com).
// =============================================================================

use std::fmt;

use regex::Regex;
use url::Url;

use crate::error::CrawlError;

/// Prepends `http://` to seeds that do not start with a web scheme.
pub fn normalize_seed(raw: &str) -> String {
    let trimmed = raw.trim();
    let lower = trimmed.to_ascii_lowercase();

    if lower.starts_with("http://") || lower.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("http://{}", trimmed)
    }
}

/// Parses a (normalized) seed and returns it with its hostname.
pub fn parse_seed(seed: &str) -> Result<(Url, String), CrawlError> {
    let url = Url::parse(seed).map_err(|e| CrawlError::InvalidUrl {
        url: seed.to_string(),
        reason: e.to_string(),
    })?;

    let hostname = match url.host_str() {
        Some(host) if !host.is_empty() => host.to_string(),
        _ => {
            return Err(CrawlError::InvalidUrl {
                url: seed.to_string(),
                reason: "URL has no hostname".to_string(),
            })
        }
    };

    Ok((url, hostname))
}

/// The set of hostnames a crawl may fetch from.
#[derive(Debug, Clone)]
pub enum ScopePolicy {
    Exact(String),
    Subdomains { hostname: String, pattern: Regex },
}

impl ScopePolicy {
    pub fn new(hostname: &str, include_subdomains: bool) -> Result<Self, CrawlError> {
        if !include_subdomains {
            return Ok(ScopePolicy::Exact(hostname.to_string()));
        }

        // scheme://[userinfo@][label.]*host[:port][/?#...]
        let pattern = format!(
            r"(?i)^[a-z][a-z0-9+.\-]*://(?:[^/?#@]*@)?(?:[^/?#@:]+\.)?{}(?::\d+)?(?:[/?#].*)?$",
            regex::escape(hostname)
        );

        Ok(ScopePolicy::Subdomains {
            hostname: hostname.to_string(),
            pattern: Regex::new(&pattern)?,
        })
    }

    pub fn hostname(&self) -> &str {
        match self {
            ScopePolicy::Exact(hostname) => hostname,
            ScopePolicy::Subdomains { hostname, .. } => hostname,
        }
    }

    pub fn allows(&self, url: &Url) -> bool {
        match self {
            ScopePolicy::Exact(hostname) => url.host_str() == Some(hostname.as_str()),
            ScopePolicy::Subdomains { pattern, .. } => pattern.is_match(url.as_str()),
        }
    }
}

impl fmt::Display for ScopePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScopePolicy::Exact(hostname) => write!(f, "{}", hostname),
            ScopePolicy::Subdomains { hostname, .. } => write!(f, "*.{}", hostname),
        }
    }
}
