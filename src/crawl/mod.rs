// src/crawl/mod.rs
// =============================================================================
// This module handles website crawling.
//
// Features:
// - Breadth-first crawling starting from a seed URL
// - Host scoping (exact host, or host plus its subdomains)
// - Configurable depth limit and parallelism cap
// - Crawl-wide dedup of every recorded URL
//
// Submodules:
// - scope: which hosts may be fetched
// - visited: the concurrent dedup set
// - engine: the worker pool that fetches, parses and expands the crawl
// =============================================================================

mod engine;
mod scope;
mod visited;

use serde::Serialize;

pub use engine::crawl;
pub use scope::{normalize_seed, parse_seed, ScopePolicy};
pub use visited::VisitedSet;

pub const DEFAULT_THREADS: usize = 5;
pub const DEFAULT_DEPTH: usize = 2;

/// Everything one crawl needs. Immutable once the crawl starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlRequest {
    /// Seed URL; `http://` is prepended when it has no web scheme.
    pub seed: String,
    /// Maximum number of requests in flight at once.
    pub threads: usize,
    /// Link hops from the seed page (the seed itself is depth 0).
    pub max_depth: usize,
    pub include_subdomains: bool,
    pub skip_tls_verify: bool,
    /// Custom headers, e.g. "Cookie: a=b;;Referer: http://x/".
    pub raw_headers: String,
    /// Per-request timeout; None keeps the HTTP client default.
    pub timeout: Option<std::time::Duration>,
}

impl CrawlRequest {
    pub fn new(seed: impl Into<String>) -> Self {
        Self {
            seed: seed.into(),
            ..Self::default()
        }
    }
}

impl Default for CrawlRequest {
    fn default() -> Self {
        Self {
            seed: String::new(),
            threads: DEFAULT_THREADS,
            max_depth: DEFAULT_DEPTH,
            include_subdomains: false,
            skip_tls_verify: false,
            raw_headers: String::new(),
            timeout: None,
        }
    }
}

/// One seed's results, as printed by `--json`.
#[derive(Debug, Clone, Serialize)]
pub struct CrawlReport {
    pub seed: String,
    pub results: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults() {
        let request = CrawlRequest::new("example.com");
        assert_eq!(request.seed, "example.com");
        assert_eq!(request.threads, 5);
        assert_eq!(request.max_depth, 2);
        assert!(!request.include_subdomains);
        assert!(!request.skip_tls_verify);
        assert!(request.raw_headers.is_empty());
        assert!(request.timeout.is_none());
    }

    #[test]
    fn test_report_json_shape() {
        let report = CrawlReport {
            seed: "http://example.com".to_string(),
            results: vec!["http://example.com/a".to_string()],
        };
        let json = serde_json::to_string(&report).unwrap();
        assert_eq!(
            json,
            r#"{"seed":"http://example.com","results":["http://example.com/a"]}"#
        );
    }
}
