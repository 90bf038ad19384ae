// src/lib.rs
// =============================================================================
// link-harvester: crawl a site from a seed URL and collect every link,
// script source and form action it can reach.
//
//   let request = CrawlRequest::new("https://example.com");
//   let urls = link_harvester::crawl(&request).await;
//
// The binary (src/main.rs) feeds seeds from stdin one at a time; the C
// export (ffi) wraps the same call for non-Rust callers.
// =============================================================================

pub mod crawl;
pub mod error;
pub mod ffi;
pub mod headers;
pub mod html;
pub mod http;

pub use crawl::{crawl, CrawlReport, CrawlRequest, ScopePolicy, VisitedSet};
pub use error::{CrawlError, FetchError};
pub use headers::{parse_headers, HeaderSet};
