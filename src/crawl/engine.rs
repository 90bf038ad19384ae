// src/crawl/engine.rs
// =============================================================================
// This module implements the crawl itself with a breadth-first approach.
//
// How it works:
// 1. Resolve the scope and headers, build one HTTP client
// 2. Put the seed URL (depth 0) in a queue
// 3. Keep up to `threads` workers busy; each worker fetches one page,
//    extracts anchors/scripts/forms and marks them in the shared dedup set
// 4. Every URL a worker wins in the dedup set goes straight to the results
//    channel; when the worker finishes, in-scope anchors within the depth
//    limit go to the back of the queue
// 5. Stop when the queue is empty and no worker is running
//
// Failures of individual pages are logged at debug level and skipped.
// =============================================================================

use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

use reqwest::header::HeaderMap;
use reqwest::Client;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};
use url::Url;

use super::scope::{normalize_seed, parse_seed, ScopePolicy};
use super::visited::VisitedSet;
use super::CrawlRequest;
use crate::error::CrawlError;
use crate::headers::{parse_headers, to_header_map};
use crate::html::extract_links;
use crate::http::{build_client, fetch_page};

// Represents a page waiting to be fetched
#[derive(Debug, Clone)]
struct CrawlTarget {
    url: Url,
    depth: usize, // link hops from the seed page
}

// What a worker hands back after processing one page
#[derive(Debug)]
struct Harvest {
    depth: usize,
    // URL after redirects
    final_url: Url,
    // every anchor on the page; follow candidates
    anchors: Vec<Url>,
}

// State shared by all workers of one crawl
struct Shared {
    client: Client,
    headers: HeaderMap,
    seen: VisitedSet,
    // new results, sent the moment check_and_mark wins
    found: mpsc::UnboundedSender<String>,
}

/// Crawls one seed URL and returns every unique absolute URL discovered,
/// in first-discovery order.
///
/// Never fails: an unusable seed gives an empty list, and page-level
/// errors only reduce the number of results.
pub async fn crawl(request: &CrawlRequest) -> Vec<String> {
    match run_crawl(request).await {
        Ok(results) => results,
        Err(e) => {
            warn!(seed = %request.seed, error = %e, "crawl aborted");
            Vec::new()
        }
    }
}

async fn run_crawl(request: &CrawlRequest) -> Result<Vec<String>, CrawlError> {
    let seed_string = normalize_seed(&request.seed);
    let (seed, hostname) = parse_seed(&seed_string)?;
    let scope = Arc::new(ScopePolicy::new(&hostname, request.include_subdomains)?);

    // A bad header string does not stop the crawl; it just runs without them.
    let headers = match parse_headers(&request.raw_headers) {
        Ok(set) => to_header_map(&set),
        Err(e) => {
            warn!(error = %e, "ignoring custom headers");
            HeaderMap::new()
        }
    };

    let client = build_client(Arc::clone(&scope), request.skip_tls_verify, request.timeout)?;

    let (found, mut found_rx) = mpsc::unbounded_channel();
    let shared = Arc::new(Shared {
        client,
        headers,
        seen: VisitedSet::new(),
        found,
    });

    let threads = request.threads.max(1);
    info!(
        seed = %seed,
        host = scope.hostname(),
        scope = %scope,
        threads,
        max_depth = request.max_depth,
        "crawl started"
    );

    // URLs already handed to a worker; separate from the result dedup set
    // so that a page linking back to the seed does not refetch it.
    let mut requested = HashSet::new();
    requested.insert(seed.to_string());

    let mut queue = VecDeque::new();
    queue.push_back(CrawlTarget { url: seed, depth: 0 });

    let mut workers = JoinSet::new();
    let mut fetched = 0usize;

    loop {
        // Top up the pool from the front of the queue
        while workers.len() < threads {
            let Some(target) = queue.pop_front() else { break };
            workers.spawn(visit(Arc::clone(&shared), target));
        }

        // No running workers means the queue is empty too
        let Some(joined) = workers.join_next().await else { break };

        let harvest = match joined {
            Ok(Some(harvest)) => harvest,
            Ok(None) => continue,
            Err(e) => {
                warn!(error = %e, "crawl worker failed");
                continue;
            }
        };

        fetched += 1;
        // A redirected page must not be fetched again under its final URL
        requested.insert(harvest.final_url.to_string());

        let next_depth = harvest.depth + 1;
        if next_depth > request.max_depth {
            continue;
        }

        for link in harvest.anchors {
            if !is_fetchable(&link) || !scope.allows(&link) {
                continue;
            }
            if requested.insert(link.to_string()) {
                queue.push_back(CrawlTarget {
                    url: link,
                    depth: next_depth,
                });
            }
        }
    }

    // Workers send before they finish, so everything is already queued
    let mut results = Vec::with_capacity(shared.seen.len());
    while let Ok(url) = found_rx.try_recv() {
        results.push(url);
    }

    info!(seed = %seed_string, pages = fetched, results = results.len(), "crawl finished");

    Ok(results)
}

// Fetches one target and records what it links to.
// Returns None when the page could not be fetched or was not HTML.
async fn visit(shared: Arc<Shared>, target: CrawlTarget) -> Option<Harvest> {
    debug!(url = %target.url, depth = target.depth, "fetching");

    let page = match fetch_page(&shared.client, &target.url, &shared.headers).await {
        Ok(page) => page,
        Err(e) => {
            debug!(url = %target.url, reason = e.label(), error = %e, "skipping target");
            return None;
        }
    };

    let links = extract_links(&page.body, &page.url);

    for url in links.in_recording_order().map(Url::as_str) {
        if !url.is_empty() && shared.seen.check_and_mark(url) {
            // The receiver lives until every worker is done
            let _ = shared.found.send(url.to_string());
        }
    }

    Some(Harvest {
        depth: target.depth,
        final_url: page.url,
        anchors: links.anchors,
    })
}

fn is_fetchable(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https")
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is JoinSet?
//    - A collection of spawned tokio tasks
//    - join_next() waits for whichever task finishes first
//    - It returns None once the set is empty, which is our stop signal
//
// 2. Why two "seen" sets?
//    - VisitedSet (shared, concurrent) decides which URLs become results
//    - `requested` (driver only) decides which pages get fetched
//    - Only workers touch the first one, so it must be safe to share
//
// 3. Why Arc<Shared>?
//    - Each spawned task must own what it uses ('static)
//    - Arc lets every worker hold the same client, headers and dedup set
//
// 4. Why a channel for results?
//    - A worker sends a URL right after winning check_and_mark, so the
//      results keep that order even when pages finish out of order
// -----------------------------------------------------------------------------
