// src/crawl/visited.rs
// =============================================================================
// The crawl-wide dedup set.
//
// Every worker of one crawl shares a single VisitedSet (behind an Arc).
// The only operation exposed is check_and_mark: a test-and-set that tells
// exactly one caller "this URL is new", no matter how many workers race
// on the same URL. A fresh set is built for every crawl and dropped with it.
// =============================================================================

use dashmap::DashSet;

#[derive(Debug, Default)]
pub struct VisitedSet {
    seen: DashSet<String>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `url` as seen. Returns true only for the first caller.
    pub fn check_and_mark(&self, url: &str) -> bool {
        // Fast path avoids allocating for URLs we already have.
        if self.seen.contains(url) {
            return false;
        }
        // insert() holds the shard lock for the whole test-and-set.
        self.seen.insert(url.to_string())
    }

    pub(crate) fn len(&self) -> usize {
        self.seen.len()
    }
}
