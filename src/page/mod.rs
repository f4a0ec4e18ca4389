// src/page/mod.rs
// =============================================================================
// This module contains everything that happens to a single page.
//
// Submodules:
// - url: the PageUrl type (parsing, normalization, link resolution)
// - http: fetching a page over HTTP
// - html: pulling outbound links out of a fetched page
//
// The crawl module strings these together; nothing in here knows about
// queues, visited sets or page caps.
// =============================================================================

mod html;
mod http;
mod url;

pub use self::html::extract_links;
pub use self::http::{
    FailureKind, FetchError, FetchSettings, FetchedPage, Fetcher, HttpFetcher, BROWSER_USER_AGENT,
};
pub use self::url::{PageUrl, UrlError};
