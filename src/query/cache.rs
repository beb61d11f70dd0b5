//! Page Cache
//!
//! Pages are stored wholesale and never mutated; a re-fetch replaces the
//! previous value under the same key.

use std::collections::HashMap;

use chrono::{DateTime, TimeDelta, Utc};

use super::{QueryKey, QueryStatus};
use crate::api::{FetchError, FetchResult};
use crate::config::AppConfig;
use crate::models::Page;

/// Staleness and eviction settings
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CachePolicy {
    /// A value younger than this is served without refetching
    pub stale_time: TimeDelta,
    /// An entry not accessed for this long is evicted
    pub cache_time: TimeDelta,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self {
            stale_time: TimeDelta::zero(),
            cache_time: TimeDelta::minutes(5),
        }
    }
}

impl CachePolicy {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            stale_time: config.stale_time,
            cache_time: config.cache_time,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
struct QueryEntry<T> {
    status: QueryStatus,
    /// Last successfully fetched page, kept through later failures
    value: Option<Page<T>>,
    error: Option<FetchError>,
    updated_at: Option<DateTime<Utc>>,
    last_access: DateTime<Utc>,
    /// A request for this key is in flight
    fetching: bool,
}

impl<T> QueryEntry<T> {
    fn new(now: DateTime<Utc>) -> Self {
        Self {
            status: QueryStatus::Pending,
            value: None,
            error: None,
            updated_at: None,
            last_access: now,
            fetching: false,
        }
    }

    fn is_fresh(&self, policy: &CachePolicy, now: DateTime<Utc>) -> bool {
        self.status == QueryStatus::Ready
            && self
                .updated_at
                .is_some_and(|at| now.signed_duration_since(at) < policy.stale_time)
    }
}

/// Handle for one in-flight request, handed back to `resolve`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FetchTicket {
    pub key: QueryKey,
    pub started_at: DateTime<Utc>,
}

/// What the cache can show for a key right now
#[derive(Debug, PartialEq)]
pub enum Lookup<'a, T> {
    /// Never requested (or evicted)
    Missing,
    /// Requested, nothing to show yet
    Pending,
    Fresh(&'a [T]),
    /// Showable, but due for a background refetch
    Stale(&'a [T]),
    Failed(&'a FetchError),
}

impl<'a, T> Lookup<'a, T> {
    /// Items that can be rendered, fresh or stale
    pub fn items(&self) -> Option<&'a [T]> {
        match *self {
            Lookup::Fresh(items) | Lookup::Stale(items) => Some(items),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct QueryCache<T> {
    policy: CachePolicy,
    entries: HashMap<QueryKey, QueryEntry<T>>,
}

impl<T> Default for QueryCache<T> {
    fn default() -> Self {
        Self::new(CachePolicy::default())
    }
}

impl<T> QueryCache<T> {
    pub fn new(policy: CachePolicy) -> Self {
        Self {
            policy,
            entries: HashMap::new(),
        }
    }

    pub fn lookup(&self, key: &QueryKey, now: DateTime<Utc>) -> Lookup<'_, T> {
        let Some(entry) = self.entries.get(key) else {
            return Lookup::Missing;
        };
        if let (QueryStatus::Error, Some(err)) = (entry.status, entry.error.as_ref()) {
            return Lookup::Failed(err);
        }
        match entry.value.as_deref() {
            Some(items) if entry.is_fresh(&self.policy, now) => Lookup::Fresh(items),
            Some(items) => Lookup::Stale(items),
            None => Lookup::Pending,
        }
    }

    /// Start a request for `key`
    ///
    /// Returns None when one is already in flight or the cached value is
    /// still fresh; the caller must not fetch in that case.
    pub fn begin_fetch(&mut self, key: QueryKey, now: DateTime<Utc>) -> Option<FetchTicket> {
        let policy = self.policy;
        let entry = self.entries.entry(key).or_insert_with(|| QueryEntry::new(now));
        entry.last_access = now;
        if entry.fetching || entry.is_fresh(&policy, now) {
            return None;
        }
        entry.fetching = true;
        Some(FetchTicket {
            key,
            started_at: now,
        })
    }

    /// Store the outcome of a request. Returns false if the entry is gone
    /// or no longer waiting for this request.
    pub fn resolve(
        &mut self,
        ticket: FetchTicket,
        result: FetchResult<Page<T>>,
        now: DateTime<Utc>,
    ) -> bool {
        let Some(entry) = self.entries.get_mut(&ticket.key) else {
            return false;
        };
        if !entry.fetching {
            return false;
        }
        entry.fetching = false;
        match result {
            Ok(items) => {
                entry.status = QueryStatus::Ready;
                entry.value = Some(items);
                entry.error = None;
                entry.updated_at = Some(now);
            }
            Err(err) => {
                entry.status = QueryStatus::Error;
                entry.error = Some(err);
            }
        }
        true
    }

    /// Drop entries unused for longer than `cache_time`
    ///
    /// Entries in flight or listed in `active` are kept. Returns how many
    /// entries were removed.
    pub fn evict_expired(&mut self, now: DateTime<Utc>, active: &[QueryKey]) -> usize {
        let cache_time = self.policy.cache_time;
        let before = self.entries.len();
        self.entries.retain(|key, entry| {
            entry.fetching
                || active.contains(key)
                || now.signed_duration_since(entry.last_access) < cache_time
        });
        before - self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
    }

    fn secs(n: i64) -> DateTime<Utc> {
        t0() + TimeDelta::seconds(n)
    }

    fn cache_with_stale_time(stale_secs: i64) -> QueryCache<u32> {
        QueryCache::new(CachePolicy {
            stale_time: TimeDelta::seconds(stale_secs),
            cache_time: TimeDelta::minutes(5),
        })
    }

    #[test]
    fn miss_then_pending_then_ready() {
        let mut cache = cache_with_stale_time(30);
        let key = QueryKey::posts(1);
        assert_eq!(cache.lookup(&key, t0()), Lookup::Missing);

        let ticket = cache.begin_fetch(key, t0()).expect("first fetch starts");
        assert_eq!(cache.lookup(&key, t0()), Lookup::Pending);
        assert!(cache.entries[&key].fetching);

        assert!(cache.resolve(ticket, Ok(vec![1, 2, 3]), secs(1)));
        assert_eq!(cache.lookup(&key, secs(2)), Lookup::Fresh(&[1, 2, 3][..]));
        assert_eq!(cache.entries[&key].status, QueryStatus::Ready);
    }

    #[test]
    fn in_flight_requests_are_deduplicated() {
        let mut cache = cache_with_stale_time(0);
        let key = QueryKey::posts(2);
        assert!(cache.begin_fetch(key, t0()).is_some());
        assert!(cache.begin_fetch(key, secs(1)).is_none());
    }

    #[test]
    fn fresh_value_is_not_refetched() {
        let mut cache = cache_with_stale_time(30);
        let key = QueryKey::posts(1);
        let ticket = cache.begin_fetch(key, t0()).unwrap();
        cache.resolve(ticket, Ok(vec![1]), t0());
        assert!(cache.begin_fetch(key, secs(10)).is_none());
        assert!(cache.begin_fetch(key, secs(30)).is_some());
    }

    #[test]
    fn zero_stale_time_serves_stale_and_refetches() {
        let mut cache = cache_with_stale_time(0);
        let key = QueryKey::posts(1);
        let ticket = cache.begin_fetch(key, t0()).unwrap();
        cache.resolve(ticket, Ok(vec![7, 8]), t0());

        assert_eq!(cache.lookup(&key, secs(1)), Lookup::Stale(&[7, 8][..]));
        assert_eq!(cache.lookup(&key, secs(1)).items(), Some(&[7, 8][..]));

        let refetch = cache.begin_fetch(key, secs(1)).expect("stale value refetches");
        // old value stays visible while the refetch runs
        assert_eq!(cache.lookup(&key, secs(1)).items(), Some(&[7, 8][..]));
        cache.resolve(refetch, Ok(vec![9]), secs(2));
        assert_eq!(cache.lookup(&key, secs(3)).items(), Some(&[9][..]));
    }

    #[test]
    fn failure_surfaces_as_error() {
        let mut cache = cache_with_stale_time(0);
        let key = QueryKey::posts(4);
        let ticket = cache.begin_fetch(key, t0()).unwrap();
        cache.resolve(ticket, Err(FetchError::new("HTTP 500")), secs(1));

        assert_eq!(cache.lookup(&key, secs(1)), Lookup::Failed(&FetchError::new("HTTP 500")));
        assert!(!cache.entries[&key].fetching);
        // a later visit may try again
        assert!(cache.begin_fetch(key, secs(2)).is_some());
    }

    #[test]
    fn responses_only_land_under_their_own_key() {
        let mut cache = cache_with_stale_time(0);
        let first = cache.begin_fetch(QueryKey::posts(1), t0()).unwrap();
        let second = cache.begin_fetch(QueryKey::posts(2), t0()).unwrap();

        cache.resolve(second, Ok(vec![6, 7]), secs(1));
        cache.resolve(first, Ok(vec![1, 2]), secs(2));

        assert_eq!(cache.lookup(&QueryKey::posts(1), secs(3)).items(), Some(&[1, 2][..]));
        assert_eq!(cache.lookup(&QueryKey::posts(2), secs(3)).items(), Some(&[6, 7][..]));
    }

    #[test]
    fn unknown_or_settled_ticket_is_ignored() {
        let mut cache = cache_with_stale_time(0);
        let key = QueryKey::posts(1);
        let ticket = cache.begin_fetch(key, t0()).unwrap();
        assert!(cache.resolve(ticket, Ok(vec![1]), secs(1)));
        assert!(!cache.resolve(ticket, Ok(vec![2]), secs(2)));
        assert_eq!(cache.lookup(&key, secs(3)).items(), Some(&[1][..]));

        let stray = FetchTicket {
            key: QueryKey::posts(99),
            started_at: t0(),
        };
        assert!(!cache.resolve(stray, Ok(vec![]), secs(1)));
    }

    #[test]
    fn eviction_skips_active_and_in_flight_entries() {
        let mut cache = cache_with_stale_time(0);
        for page in 1..=3 {
            let ticket = cache.begin_fetch(QueryKey::posts(page), t0()).unwrap();
            cache.resolve(ticket, Ok(vec![page]), t0());
        }
        let _in_flight = cache.begin_fetch(QueryKey::posts(4), t0()).unwrap();

        // page 2 revisited later
        let revisit = cache.begin_fetch(QueryKey::posts(2), secs(200)).unwrap();
        cache.resolve(revisit, Ok(vec![2]), secs(201));
        let removed = cache.evict_expired(secs(360), &[QueryKey::posts(3)]);

        assert_eq!(removed, 1);
        assert_eq!(cache.lookup(&QueryKey::posts(1), secs(360)), Lookup::Missing);
        assert!(cache.entries.contains_key(&QueryKey::posts(2)));
        assert!(cache.entries.contains_key(&QueryKey::posts(3)));
        assert!(cache.entries[&QueryKey::posts(4)].fetching);
        assert_eq!(cache.entries.len(), 3);
    }
}
