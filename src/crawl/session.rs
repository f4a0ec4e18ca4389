// src/crawl/session.rs
// =============================================================================
// This module implements the crawl loop.
//
// How it works:
// 1. Start with the seed URL in the frontier
// 2. Take the next URL off the front and mark it visited
// 3. Fetch the page HTML (waiting out the politeness delay first)
// 4. Extract all links from the page and queue the ones we haven't seen.
//    Links resolve against the URL the page was finally served from, which
//    after a redirect is not the URL we asked for
// 5. Repeat until the frontier is empty or max_pages URLs were visited
//
// A CrawlSession owns all of the mutable state for ONE crawl. The Crawler
// builds a fresh session for every call to crawl(), so two crawls never
// share a visited set, and separate crawls can run side by side.
//
// Session states:
//   Idle -> Running -> Done              (frontier ran dry)
//   Idle -> Running -> Draining -> Done  (page cap hit with URLs still queued)
// =============================================================================

use std::time::Duration;

use super::frontier::Frontier;
use super::politeness::{Sleeper, TokioSleeper};
use super::visited::VisitedSet;
use super::{CrawlConfig, CrawlError, CrawlReport, CrawlResult, CrawlResults};
use crate::page::{extract_links, FetchError, FetchedPage, Fetcher, PageUrl};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlState {
    /// Created and seeded, nothing fetched yet
    Idle,
    /// The loop is taking URLs off the frontier
    Running,
    /// Page cap reached; the leftover frontier is about to be thrown away
    Draining,
    /// Finished; the report can be taken
    Done,
}

// Starts crawl sessions
//
// Holds the collaborators that live longer than one crawl: the fetcher,
// the sleeper and the politeness settings.
pub struct Crawler<F, S = TokioSleeper> {
    fetcher: F,
    sleeper: S,
    config: CrawlConfig,
}

impl<F: Fetcher> Crawler<F, TokioSleeper> {
    pub fn new(fetcher: F, config: CrawlConfig) -> Self {
        Self::with_sleeper(fetcher, TokioSleeper, config)
    }
}

impl<F: Fetcher, S: Sleeper> Crawler<F, S> {
    pub fn with_sleeper(fetcher: F, sleeper: S, config: CrawlConfig) -> Self {
        Self {
            fetcher,
            sleeper,
            config,
        }
    }

    // Crawls breadth-first from start_url, visiting at most max_pages URLs
    //
    // Returns: the pages that loaded, plus the visited set and failures
    //
    // Errors: only for a bad request (unparseable / non-http start URL,
    // max_pages of 0). Failures while crawling never end the crawl.
    pub async fn crawl(
        &self,
        start_url: &str,
        max_pages: usize,
    ) -> Result<CrawlReport, CrawlError> {
        let start = PageUrl::parse(start_url)?;
        let mut session = CrawlSession::new(
            &self.fetcher,
            &self.sleeper,
            self.config.delay,
            start,
            max_pages,
        )?;
        session.run().await;
        Ok(session.into_report())
    }
}

/// The mutable state of one crawl.
pub struct CrawlSession<'a, F, S> {
    fetcher: &'a F,
    sleeper: &'a S,
    delay: Duration,
    max_pages: usize,
    state: CrawlState,
    frontier: Frontier,
    visited: VisitedSet,
    results: CrawlResults,
    failures: Vec<FetchError>,
    discarded: usize,
    attempts: usize,
}

impl<'a, F: Fetcher, S: Sleeper> CrawlSession<'a, F, S> {
    pub fn new(
        fetcher: &'a F,
        sleeper: &'a S,
        delay: Duration,
        start: PageUrl,
        max_pages: usize,
    ) -> Result<Self, CrawlError> {
        if max_pages == 0 {
            return Err(CrawlError::ZeroPageCap);
        }

        let visited = VisitedSet::new();
        let mut frontier = Frontier::new();
        frontier.enqueue(start, &visited);

        Ok(Self {
            fetcher,
            sleeper,
            delay,
            max_pages,
            state: CrawlState::Idle,
            frontier,
            visited,
            results: CrawlResults::new(),
            failures: Vec::new(),
            discarded: 0,
            attempts: 0,
        })
    }

    pub fn state(&self) -> CrawlState {
        self.state
    }

    pub fn visited(&self) -> &VisitedSet {
        &self.visited
    }

    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    // Drives the session until it is Done
    pub async fn run(&mut self) {
        while self.step().await != CrawlState::Done {}
    }

    // Advances the session by one loop iteration and returns the new state
    pub async fn step(&mut self) -> CrawlState {
        match self.state {
            CrawlState::Done => return CrawlState::Done,
            CrawlState::Draining => {
                self.discarded = self.frontier.clear();
                log::debug!(
                    "Page cap of {} reached, discarding {} queued URL(s)",
                    self.max_pages,
                    self.discarded
                );
                self.state = CrawlState::Done;
                return self.state;
            }
            CrawlState::Idle => self.state = CrawlState::Running,
            CrawlState::Running => {}
        }

        if self.visited.len() >= self.max_pages {
            self.state = if self.frontier.is_empty() {
                CrawlState::Done
            } else {
                CrawlState::Draining
            };
            return self.state;
        }

        let Some(url) = self.frontier.dequeue() else {
            self.state = CrawlState::Done;
            return self.state;
        };

        // The frontier already refuses visited URLs; this is the last line
        // of the at-most-once guarantee, and doesn't count toward the cap
        if !self.visited.mark(&url) {
            return self.state;
        }

        if self.attempts > 0 {
            self.sleeper.sleep(self.delay).await;
        }
        self.attempts += 1;

        log::info!("Crawling [{}/{}]: {}", self.visited.len(), self.max_pages, url);

        match self.fetcher.fetch(&url).await {
            Ok(FetchedPage { final_url, html }) => {
                if final_url != url {
                    log::debug!("{} redirected to {}", url, final_url);
                }
                let mut queued = 0;
                for link in extract_links(&final_url, &html) {
                    if self.frontier.enqueue(link, &self.visited) {
                        queued += 1;
                    }
                }
                log::debug!("Queued {} new link(s) from {}", queued, url);
                self.results.insert(CrawlResult {
                    url,
                    final_url,
                    html,
                });
            }
            Err(e) => {
                log::warn!("{}", e);
                self.failures.push(e);
            }
        }

        self.state
    }

    pub fn into_report(self) -> CrawlReport {
        CrawlReport {
            results: self.results,
            visited: self.visited,
            failures: self.failures,
            discarded: self.discarded,
        }
    }
}
