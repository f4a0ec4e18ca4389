// src/page/html.rs
// =============================================================================
// This module extracts outbound links from HTML pages.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever, which never fails: truncated or invalid markup
//   still produces a tree, so we always get "whatever links we can find"
//
// Link resolution is delegated to PageUrl::resolve (src/page/url.rs), which
// also throws away mailto:, javascript:, tel: and friends.
// =============================================================================

use std::collections::HashSet;

use scraper::{Html, Selector};

use super::url::PageUrl;

// Hyperlink elements: <a href> and image-map <area href>
const LINK_SELECTOR: &str = "a[href], area[href]";

// A document can override its own URL for link resolution
const BASE_SELECTOR: &str = "base[href]";

// Extracts every crawlable link from an HTML document
//
// Parameters:
//   base: the URL the HTML was fetched from (for resolving relative links)
//   html: the HTML content to parse
//
// If the document has a <base href>, the first one (itself resolved against
// `base`) is used for resolution instead, the way a browser does.
//
// Returns: absolute URLs, without duplicates, in the order they first
// appear in the document. The order isn't part of the contract, but keeping
// it stable makes a crawl of the same site repeatable.
//
// Example:
//   base = "https://example.com/page/"
//   html = "<a href='../docs'>Docs</a><a href='mailto:x@y.z'>Mail</a>"
//   result = ["https://example.com/docs"]
pub fn extract_links(base: &PageUrl, html: &str) -> Vec<PageUrl> {
    let document = Html::parse_document(html);

    // The selectors are constants, so parsing can only fail on a typo here
    let selector = Selector::parse(LINK_SELECTOR).expect("link selector is valid CSS");
    let base_selector = Selector::parse(BASE_SELECTOR).expect("base selector is valid CSS");

    let document_base = document
        .select(&base_selector)
        .next()
        .and_then(|element| element.value().attr("href"))
        .and_then(|href| base.resolve(href));
    let base = document_base.as_ref().unwrap_or(base);

    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for element in document.select(&selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };

        // Unresolvable or non-http(s) references are dropped one at a time;
        // a bad link never affects its neighbours
        let Some(link) = base.resolve(href) else {
            log::trace!("Skipping unusable link '{}' on {}", href, base);
            continue;
        };

        if seen.insert(link.clone()) {
            links.push(link);
        }
    }

    links
}
