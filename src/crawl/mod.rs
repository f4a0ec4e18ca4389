// src/crawl/mod.rs
// =============================================================================
// This module handles website crawling.
//
// Features:
// - Breadth-first crawling starting from a seed URL
// - Follows every http(s) link it finds, on any host
// - Stops after a fixed number of pages, or when there is nothing left
// - Polite crawling with a delay between requests
// - A page that fails to load is logged and skipped, never fatal
//
// Pieces:
// - frontier: the FIFO queue of URLs still to visit
// - visited: the URLs already taken off the queue
// - politeness: the delay between fetches (swappable in tests)
// - session: one crawl run, and the Crawler that starts them
// =============================================================================

mod frontier;
mod politeness;
mod session;
mod visited;

use std::collections::HashMap;
use std::time::Duration;

use thiserror::Error;

use crate::page::{FetchError, PageUrl, UrlError};

pub use frontier::Frontier;
pub use politeness::{Sleeper, TokioSleeper};
pub use session::{CrawlSession, CrawlState, Crawler};
pub use visited::VisitedSet;

/// Page cap used when the caller doesn't pick one.
pub const DEFAULT_MAX_PAGES: usize = 10;

/// Delay used when the caller doesn't pick one.
pub const DEFAULT_DELAY: Duration = Duration::from_secs(1);

#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Pause between two consecutive fetch attempts
    pub delay: Duration,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            delay: DEFAULT_DELAY,
        }
    }
}

/// Problems with the crawl request itself. Nothing that happens during the
/// crawl ends up here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CrawlError {
    #[error("invalid start URL: {0}")]
    InvalidStartUrl(#[from] UrlError),

    #[error("max pages must be at least 1")]
    ZeroPageCap,
}

/// One successfully fetched page.
///
/// Keyed by the URL the crawler requested (the one in the visited set).
/// `final_url` is where redirects ended up; it equals `url` when there
/// were none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlResult {
    pub url: PageUrl,
    pub final_url: PageUrl,
    pub html: String,
}

/// Fetched pages keyed by URL, remembered in the order they were visited.
#[derive(Debug, Default, Clone)]
pub struct CrawlResults {
    pages: Vec<CrawlResult>,
    index: HashMap<PageUrl, usize>,
}

impl CrawlResults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a page. A second result for the same URL is ignored.
    pub fn insert(&mut self, result: CrawlResult) -> bool {
        if self.index.contains_key(&result.url) {
            return false;
        }
        self.index.insert(result.url.clone(), self.pages.len());
        self.pages.push(result);
        true
    }

    pub fn get(&self, url: &PageUrl) -> Option<&CrawlResult> {
        self.index.get(url).map(|&i| &self.pages[i])
    }

    pub fn contains(&self, url: &PageUrl) -> bool {
        self.index.contains_key(url)
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Pages in visit order.
    pub fn iter(&self) -> impl Iterator<Item = &CrawlResult> {
        self.pages.iter()
    }

    pub fn urls(&self) -> impl Iterator<Item = &PageUrl> {
        self.pages.iter().map(|page| &page.url)
    }
}

impl IntoIterator for CrawlResults {
    type Item = CrawlResult;
    type IntoIter = std::vec::IntoIter<CrawlResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.pages.into_iter()
    }
}

/// Everything a finished crawl session hands back.
#[derive(Debug, Default, Clone)]
pub struct CrawlReport {
    /// Pages that were fetched successfully
    pub results: CrawlResults,
    /// Every URL that was attempted, successful or not
    pub visited: VisitedSet,
    /// One entry per URL whose fetch failed
    pub failures: Vec<FetchError>,
    /// Queued URLs thrown away because the page cap was reached
    pub discarded: usize,
}
