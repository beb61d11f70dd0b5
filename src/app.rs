//! Paged Feed App
//!
//! Root component: provides the store and context, then shows one screen.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::components::{PostsScreen, ScreenTabBar, TodoFeed};
use crate::config::{AppConfig, Screen};
use crate::context::AppContext;
use crate::loader;
use crate::store::AppState;

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    // State
    let store = Store::new(AppState::new(&config));
    let (screen, set_screen) = signal(config.start_screen);

    // Provide context to all children
    provide_context(store);
    provide_context(AppContext::new(config.clone(), (screen, set_screen)));

    loader::start_cache_gc(store, config.gc_interval_ms);

    view! {
        <div class="app-layout">
            <ScreenTabBar />
            <main class="main-content">
                {move || match screen.get() {
                    Screen::Posts => view! { <PostsScreen /> }.into_any(),
                    Screen::Todos => view! { <TodoFeed /> }.into_any(),
                }}
            </main>
        </div>
    }
}
