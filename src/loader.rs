//! Page Loading
//!
//! Moves pages from a `PageSource` into the store. Claims are taken
//! synchronously on the event loop, results are written back when the
//! request completes.

use chrono::Utc;
use gloo_timers::callback::Interval;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::PageSource;
use crate::models::{Post, Todo};
use crate::query::QueryKey;
use crate::store::{AppStateStoreFields, AppStore};

/// Navigate the posts screen to `page` and warm the page after it
pub fn open_posts_page<S>(store: AppStore, source: S, page: u32)
where
    S: PageSource<Post> + Clone + 'static,
{
    show_posts_page(store, source.clone(), page);
    // the pager guard has to be gone before the cache is written
    let target = store.pager().read_untracked().prefetch_target();
    if let Some(next) = target {
        log::debug!("[posts] prefetching page {}", next);
        load_posts_page(store, source, next);
    }
}

/// Make `page` the one on screen, fetching it unless cached and fresh
pub fn show_posts_page<S>(store: AppStore, source: S, page: u32)
where
    S: PageSource<Post> + 'static,
{
    let cached_len = store
        .posts()
        .read_untracked()
        .lookup(&QueryKey::posts(page), Utc::now())
        .items()
        .map(<[Post]>::len);
    if let Some(len) = cached_len {
        log::debug!("[posts] page {} served from cache", page);
        store.pager().write().on_page_loaded(page, len);
    }
    load_posts_page(store, source, page);
}

/// Fetch `page` into the cache in the background
///
/// Does nothing when the page is fresh or already being fetched.
pub fn load_posts_page<S>(store: AppStore, source: S, page: u32)
where
    S: PageSource<Post> + 'static,
{
    let Some(ticket) = store.posts().write().begin_fetch(QueryKey::posts(page), Utc::now()) else {
        return;
    };
    spawn_local(async move {
        let result = source.fetch_page(page).await;
        let len = match &result {
            Ok(items) => Some(items.len()),
            Err(e) => {
                log::warn!("[posts] page {}: {}", page, e);
                None
            }
        };
        let elapsed = Utc::now().signed_duration_since(ticket.started_at);
        if !store.posts().write().resolve(ticket, result, Utc::now()) {
            log::debug!("[posts] dropped response for page {}", page);
            return;
        }
        if let Some(len) = len {
            log::debug!(
                "[posts] page {} loaded, {} items in {} ms",
                page,
                len,
                elapsed.num_milliseconds()
            );
            store.pager().write().on_page_loaded(page, len);
        }
    });
}

/// Request the next todos page unless one is in flight or the feed ended
pub fn load_next_todos<S>(store: AppStore, source: S)
where
    S: PageSource<Todo> + 'static,
{
    let Some(page) = store.todos().write().begin_next() else {
        return;
    };
    log::debug!("[todos] fetching page {}", page);
    spawn_local(async move {
        let result = source.fetch_page(page).await;
        match &result {
            Ok(items) if items.is_empty() => log::info!("[todos] page {} empty, feed exhausted", page),
            Ok(items) => log::debug!("[todos] page {} loaded, {} items", page, items.len()),
            Err(e) => log::warn!("[todos] page {}: {}", page, e),
        }
        store.todos().write().finish(page, result);
    });
}

/// Periodically evict posts pages nobody looked at for a while
pub fn start_cache_gc(store: AppStore, interval_ms: u32) {
    Interval::new(interval_ms, move || {
        let active = store.pager().read_untracked().active_keys();
        let removed = store.posts().write().evict_expired(Utc::now(), &active);
        if removed > 0 {
            log::debug!("[cache] evicted {} posts pages", removed);
        }
    })
    .forget();
}
