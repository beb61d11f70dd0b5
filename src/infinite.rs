//! Infinite Feed
//!
//! Append-only list of pages behind an `Idle -> Fetching -> Idle | Exhausted`
//! state machine. At most one page request is in flight.

use crate::api::{FetchError, FetchResult};
use crate::models::{ListItem, Page};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FeedStatus {
    #[default]
    Idle,
    Fetching,
    /// The source returned an empty page; terminal
    Exhausted,
}

#[derive(Clone, Debug, PartialEq)]
pub struct InfiniteFeed<T> {
    pages: Vec<Page<T>>,
    status: FeedStatus,
    /// Page number of the request in flight
    in_flight: Option<u32>,
    error: Option<FetchError>,
}

impl<T> Default for InfiniteFeed<T> {
    fn default() -> Self {
        Self {
            pages: Vec::new(),
            status: FeedStatus::Idle,
            in_flight: None,
            error: None,
        }
    }
}

impl<T> InfiniteFeed<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> FeedStatus {
        self.status
    }

    pub fn error(&self) -> Option<&FetchError> {
        self.error.as_ref()
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn is_fetching(&self) -> bool {
        self.status == FeedStatus::Fetching
    }

    /// First page not there yet
    pub fn is_loading(&self) -> bool {
        self.pages.is_empty() && self.error.is_none() && self.status != FeedStatus::Exhausted
    }

    pub fn has_next_page(&self) -> bool {
        self.next_page_param().is_some()
    }

    /// Page number the next request would ask for
    pub fn next_page_param(&self) -> Option<u32> {
        if self.status == FeedStatus::Exhausted {
            return None;
        }
        u32::try_from(self.pages.len() + 1).ok()
    }

    /// All items in fetch order
    pub fn items(&self) -> impl Iterator<Item = &T> {
        self.pages.iter().flatten()
    }

    /// Claim the next page for fetching
    ///
    /// Returns the page to request, or None when a request is already in
    /// flight, the feed is exhausted, or the last attempt failed.
    pub fn begin_next(&mut self) -> Option<u32> {
        if self.status != FeedStatus::Idle || self.error.is_some() {
            return None;
        }
        let page = self.next_page_param()?;
        self.status = FeedStatus::Fetching;
        self.in_flight = Some(page);
        Some(page)
    }

    /// Apply the outcome of the request for `page`
    ///
    /// Returns false (and changes nothing) if `page` is not the request in
    /// flight.
    pub fn finish(&mut self, page: u32, result: FetchResult<Page<T>>) -> bool {
        if self.in_flight != Some(page) {
            return false;
        }
        self.in_flight = None;
        match result {
            Ok(items) if items.is_empty() => self.status = FeedStatus::Exhausted,
            Ok(items) => {
                self.pages.push(items);
                self.status = FeedStatus::Idle;
            }
            Err(err) => {
                self.error = Some(err);
                self.status = FeedStatus::Idle;
            }
        }
        true
    }
}

impl<T: ListItem> InfiniteFeed<T> {
    /// Identity of the last rendered item, the sentinel
    pub fn last_item_id(&self) -> Option<u32> {
        self.pages.last().and_then(|page| page.last()).map(ListItem::id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Todo;

    fn todos(ids: std::ops::RangeInclusive<u32>) -> Page<Todo> {
        ids.map(|id| Todo {
            user_id: 1,
            id,
            title: format!("todo {}", id),
            completed: false,
        })
        .collect()
    }

    fn ids(feed: &InfiniteFeed<Todo>) -> Vec<u32> {
        feed.items().map(|todo| todo.id).collect()
    }

    #[test]
    fn empty_page_is_not_appended_and_ends_the_feed() {
        let mut feed = InfiniteFeed::new();
        for (page, range) in [(1, 1..=10), (2, 11..=20)] {
            assert_eq!(feed.begin_next(), Some(page));
            assert!(feed.finish(page, Ok(todos(range))));
        }
        assert_eq!(feed.last_item_id(), Some(20));

        assert_eq!(feed.begin_next(), Some(3));
        feed.finish(3, Ok(vec![]));
        assert_eq!(feed.status(), FeedStatus::Exhausted);
        assert_eq!(feed.page_count(), 2);
        assert_eq!(ids(&feed), (1..=20).collect::<Vec<_>>());
        assert!(!feed.has_next_page());
        assert_eq!(feed.begin_next(), None);
    }

    #[test]
    fn second_trigger_while_fetching_is_ignored() {
        let mut feed = InfiniteFeed::<Todo>::new();
        assert_eq!(feed.begin_next(), Some(1));
        assert!(feed.is_fetching());
        assert_eq!(feed.begin_next(), None);

        assert!(feed.finish(1, Ok(todos(1..=10))));
        assert_eq!(feed.begin_next(), Some(2));
    }

    #[test]
    fn pages_are_appended_in_arrival_order() {
        let mut feed = InfiniteFeed::<Todo>::new();
        for (page, range) in [(1, 1..=3), (2, 4..=6), (3, 7..=9)] {
            assert_eq!(feed.begin_next(), Some(page));
            feed.finish(page, Ok(todos(range)));
        }
        assert_eq!(ids(&feed), (1..=9).collect::<Vec<_>>());
        assert_eq!(feed.page_count(), 3);
        assert_eq!(feed.next_page_param(), Some(4));
    }

    #[test]
    fn finish_for_other_page_is_ignored() {
        let mut feed = InfiniteFeed::<Todo>::new();
        feed.begin_next();
        assert!(!feed.finish(2, Ok(todos(1..=10))));
        assert!(feed.is_fetching());
        assert_eq!(feed.items().count(), 0);
    }

    #[test]
    fn loading_only_before_first_page() {
        let mut feed = InfiniteFeed::<Todo>::new();
        assert!(feed.is_loading());
        feed.begin_next();
        feed.finish(1, Ok(todos(1..=2)));
        assert!(!feed.is_loading());
    }

    #[test]
    fn failure_sets_error_and_blocks_further_requests() {
        let mut feed = InfiniteFeed::<Todo>::new();
        feed.begin_next();
        feed.finish(1, Err(FetchError::new("connection reset")));

        assert_eq!(feed.error(), Some(&FetchError::new("connection reset")));
        assert_eq!(feed.status(), FeedStatus::Idle);
        assert!(!feed.is_loading());
        assert_eq!(feed.begin_next(), None);
    }

    #[test]
    fn empty_first_page_exhausts_immediately() {
        let mut feed = InfiniteFeed::<Todo>::new();
        feed.begin_next();
        feed.finish(1, Ok(vec![]));
        assert_eq!(feed.status(), FeedStatus::Exhausted);
        assert_eq!(feed.last_item_id(), None);
        assert!(!feed.is_loading());
        assert_eq!(feed.begin_next(), None);
    }
}
