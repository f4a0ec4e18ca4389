// src/lib.rs
// =============================================================================
// polite-crawler: a bounded, breadth-first web crawler.
//
// Give it a seed URL and a page cap; it fetches pages one at a time, waits
// between requests, follows the links it finds and hands back the HTML of
// every page that loaded.
//
//   let fetcher = HttpFetcher::new(FetchSettings::default())?;
//   let crawler = Crawler::new(fetcher, CrawlConfig::default());
//   let report = crawler.crawl("https://example.com", 10).await?;
//
// Modules:
// - page: URL type, HTTP fetcher, link extractor
// - crawl: frontier, visited set, politeness delay, the crawl loop
// - output: writing fetched pages to disk
// =============================================================================

pub mod crawl;
pub mod output;
pub mod page;

pub use crawl::{
    CrawlConfig, CrawlError, CrawlReport, CrawlResult, CrawlResults, CrawlState, Crawler,
    DEFAULT_DELAY, DEFAULT_MAX_PAGES,
};
pub use page::{FetchError, FetchSettings, FetchedPage, Fetcher, HttpFetcher, PageUrl};
