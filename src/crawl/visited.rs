// src/crawl/visited.rs
// =============================================================================
// The set of URLs the crawler has already picked off the frontier.
//
// A URL goes in here the moment it is dequeued, before it is fetched, so a
// page that fails to load still counts as visited. Nothing is ever removed.
// The size of this set is what the page cap is measured against.
// =============================================================================

use std::collections::HashSet;

use crate::page::PageUrl;

#[derive(Debug, Default, Clone)]
pub struct VisitedSet {
    urls: HashSet<PageUrl>,
    // Insertion order, for reporting
    order: Vec<PageUrl>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a visit. Returns false if the URL was already visited.
    pub fn mark(&mut self, url: &PageUrl) -> bool {
        if self.urls.insert(url.clone()) {
            self.order.push(url.clone());
            true
        } else {
            false
        }
    }

    pub fn contains(&self, url: &PageUrl) -> bool {
        self.urls.contains(url)
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    /// Visited URLs, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &PageUrl> {
        self.order.iter()
    }
}
