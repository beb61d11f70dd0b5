//! Paged View Controller
//!
//! Page-number state for the posts screen: which page the user asked for,
//! which page is on screen, which page to prefetch, and where the list ends.

use chrono::{DateTime, Utc};

use crate::query::{Lookup, QueryCache, QueryKey};

#[derive(Clone, Debug, PartialEq)]
pub struct PagedController {
    /// Page the user navigated to
    requested: u32,
    /// Page whose items are on screen; lags `requested` while it loads
    displayed: Option<u32>,
    /// Last page with items, known once an empty page came back
    last_page: Option<u32>,
    /// Prefetch never goes past this page
    max_page: Option<u32>,
}

impl Default for PagedController {
    fn default() -> Self {
        Self::new(None)
    }
}

impl PagedController {
    pub fn new(max_page: Option<u32>) -> Self {
        Self {
            requested: 1,
            displayed: None,
            last_page: None,
            max_page,
        }
    }

    pub fn requested(&self) -> u32 {
        self.requested
    }

    pub fn displayed(&self) -> Option<u32> {
        self.displayed
    }

    pub fn last_page(&self) -> Option<u32> {
        self.last_page
    }

    pub fn requested_key(&self) -> QueryKey {
        QueryKey::posts(self.requested)
    }

    /// Keys the screen still needs (kept out of cache eviction)
    pub fn active_keys(&self) -> Vec<QueryKey> {
        let mut keys = vec![self.requested_key()];
        if let Some(page) = self.displayed.filter(|page| *page != self.requested) {
            keys.push(QueryKey::posts(page));
        }
        keys
    }

    /// Navigate to `page`, never below 1. Returns whether the page changed.
    pub fn go_to(&mut self, page: u32) -> bool {
        let page = page.max(1);
        if page == self.requested {
            return false;
        }
        self.requested = page;
        true
    }

    pub fn next(&mut self) -> bool {
        if self.next_disabled() {
            return false;
        }
        self.go_to(self.requested.saturating_add(1))
    }

    pub fn previous(&mut self) -> bool {
        if self.previous_disabled() {
            return false;
        }
        self.go_to(self.requested - 1)
    }

    pub fn previous_disabled(&self) -> bool {
        self.requested <= 1
    }

    /// Only disabled once the end of the list is known
    pub fn next_disabled(&self) -> bool {
        self.last_page.is_some_and(|last| self.requested >= last)
    }

    /// Page to warm in the background, if any
    pub fn prefetch_target(&self) -> Option<u32> {
        let next = self.requested.checked_add(1)?;
        if self.max_page.is_some_and(|max| next > max) {
            return None;
        }
        if self.last_page.is_some_and(|last| next > last) {
            return None;
        }
        Some(next)
    }

    /// A page arrived with `len` items
    ///
    /// An empty page marks the end of the list. The display only moves when
    /// the page is the one currently requested.
    pub fn on_page_loaded(&mut self, page: u32, len: usize) {
        if len == 0 {
            let last = page.saturating_sub(1);
            self.last_page = Some(self.last_page.map_or(last, |known| known.min(last)));
        }
        if page == self.requested {
            self.displayed = Some(page);
        }
    }

    /// Items to render: the requested page when cached, otherwise the
    /// previously displayed page
    ///
    /// Returns the page number the items belong to.
    pub fn visible_page<'a, T>(
        &self,
        cache: &'a QueryCache<T>,
        now: DateTime<Utc>,
    ) -> Option<(u32, &'a [T])> {
        if let Some(items) = cache.lookup(&self.requested_key(), now).items() {
            return Some((self.requested, items));
        }
        let page = self.displayed?;
        cache
            .lookup(&QueryKey::posts(page), now)
            .items()
            .map(|items| (page, items))
    }

    /// The requested page failed and there is nothing else to show for it
    pub fn is_failed<T>(&self, cache: &QueryCache<T>, now: DateTime<Utc>) -> bool {
        matches!(cache.lookup(&self.requested_key(), now), Lookup::Failed(_))
    }
}
