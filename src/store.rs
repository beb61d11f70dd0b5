//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::config::AppConfig;
use crate::infinite::InfiniteFeed;
use crate::models::{Post, Todo};
use crate::pager::PagedController;
use crate::query::{CachePolicy, QueryCache};

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Posts pages by page number
    pub posts: QueryCache<Post>,
    /// Page navigation of the posts screen
    pub pager: PagedController,
    /// Todos loaded so far by the infinite screen
    pub todos: InfiniteFeed<Todo>,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            posts: QueryCache::new(CachePolicy::from_config(config)),
            pager: PagedController::new(config.posts.max_page),
            todos: InfiniteFeed::new(),
        }
    }
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}
