//! Query Layer
//!
//! Explicit page cache: every fetched page lives under a `(scope, page)` key
//! with a status, a timestamp, and a staleness/eviction policy.

mod cache;

pub use cache::{CachePolicy, Lookup, QueryCache};

/// Which screen a page belongs to
pub const POSTS_SCOPE: &str = "posts";

/// Cache key: screen identity plus page number
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct QueryKey {
    pub scope: &'static str,
    pub page: u32,
}

impl QueryKey {
    pub fn new(scope: &'static str, page: u32) -> Self {
        Self { scope, page }
    }

    pub fn posts(page: u32) -> Self {
        Self::new(POSTS_SCOPE, page)
    }
}

/// Data status of a cache entry
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QueryStatus {
    /// First fetch still running, no value yet
    Pending,
    Ready,
    /// Last fetch failed
    Error,
}
