// src/crawl/frontier.rs
// =============================================================================
// The queue of URLs waiting to be crawled.
//
// How it works:
// - First in, first out, which gives us a breadth-first crawl: every page one
//   link away from the seed is visited before any page two links away
// - Duplicates are rejected when they are enqueued, not when they come out,
//   so two pages that link to each other can't grow the queue forever
//
// Rust concepts:
// - VecDeque: push_back() at the tail, pop_front() at the head
// - HashSet: O(1) "is this already queued?" check next to the VecDeque
// =============================================================================

use std::collections::{HashSet, VecDeque};

use super::visited::VisitedSet;
use crate::page::PageUrl;

#[derive(Debug, Default)]
pub struct Frontier {
    queue: VecDeque<PageUrl>,
    // Mirror of `queue` for membership checks
    queued: HashSet<PageUrl>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    // Adds a URL to the back of the queue
    //
    // This is a no-op (returns false) if the URL is already waiting in the
    // queue or has already been visited.
    pub fn enqueue(&mut self, url: PageUrl, visited: &VisitedSet) -> bool {
        if visited.contains(&url) || self.queued.contains(&url) {
            return false;
        }
        self.queued.insert(url.clone());
        self.queue.push_back(url);
        true
    }

    // Takes the oldest URL off the front of the queue
    pub fn dequeue(&mut self) -> Option<PageUrl> {
        let url = self.queue.pop_front()?;
        self.queued.remove(&url);
        Some(url)
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    // Throws away everything still queued, returning how many were dropped
    pub fn clear(&mut self) -> usize {
        let dropped = self.queue.len();
        self.queue.clear();
        self.queued.clear();
        dropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> PageUrl {
        PageUrl::parse(s).unwrap()
    }

    #[test]
    fn test_fifo_order() {
        let visited = VisitedSet::new();
        let mut frontier = Frontier::new();
        frontier.enqueue(url("https://a.com/1"), &visited);
        frontier.enqueue(url("https://a.com/2"), &visited);
        frontier.enqueue(url("https://a.com/3"), &visited);

        assert_eq!(frontier.dequeue(), Some(url("https://a.com/1")));
        assert_eq!(frontier.dequeue(), Some(url("https://a.com/2")));
        assert_eq!(frontier.dequeue(), Some(url("https://a.com/3")));
        assert_eq!(frontier.dequeue(), None);
        assert!(frontier.is_empty());
    }

    #[test]
    fn test_enqueue_rejects_already_queued() {
        let visited = VisitedSet::new();
        let mut frontier = Frontier::new();

        assert!(frontier.enqueue(url("https://a.com/x"), &visited));
        assert!(!frontier.enqueue(url("https://a.com/x"), &visited));
        assert_eq!(frontier.len(), 1);
    }

    #[test]
    fn test_enqueue_rejects_visited() {
        let mut visited = VisitedSet::new();
        visited.mark(&url("https://a.com/x"));
        let mut frontier = Frontier::new();

        assert!(!frontier.enqueue(url("https://a.com/x"), &visited));
        assert!(frontier.is_empty());
    }

    #[test]
    fn test_dequeued_url_can_be_queued_again_if_not_visited() {
        // The frontier itself only guards what it currently holds; the
        // visited set is what keeps a dequeued URL from coming back.
        let visited = VisitedSet::new();
        let mut frontier = Frontier::new();
        frontier.enqueue(url("https://a.com/x"), &visited);
        frontier.dequeue();

        assert!(frontier.enqueue(url("https://a.com/x"), &visited));
    }

    #[test]
    fn test_clear_reports_dropped_count() {
        let visited = VisitedSet::new();
        let mut frontier = Frontier::new();
        frontier.enqueue(url("https://a.com/1"), &visited);
        frontier.enqueue(url("https://a.com/2"), &visited);

        assert_eq!(frontier.clear(), 2);
        assert!(frontier.is_empty());
        assert!(frontier.enqueue(url("https://a.com/1"), &visited));
    }
}
