//! Todo Feed Component
//!
//! Infinite-scrolling todos. The last rendered item is the sentinel: when it
//! scrolls into view the next page is requested.

use leptos::html::Div;
use leptos::prelude::*;
use leptos_sentinel::use_last_child_sentinel;

use crate::api::RestSource;
use crate::context::use_app_context;
use crate::loader;
use crate::models::{ListItem, Todo};
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn TodoFeed() -> impl IntoView {
    let store = use_app_store();
    let ctx = use_app_context();
    let source = RestSource::todos(&ctx.config());
    let list_ref = NodeRef::<Div>::new();

    // First page on mount
    let first_page_source = source.clone();
    Effect::new(move |_| {
        if store.todos().read_untracked().page_count() == 0 {
            loader::load_next_todos(store, first_page_source.clone());
        }
    });

    use_last_child_sentinel(
        list_ref,
        move || store.todos().read().last_item_id(),
        move || loader::load_next_todos(store, source.clone()),
    );

    let todos = move || store.todos().read().items().cloned().collect::<Vec<Todo>>();
    let loading = move || store.todos().read().is_loading();
    let failed = move || store.todos().read().error().is_some();
    let fetching_more = move || {
        let feed = store.todos().read();
        feed.is_fetching() && !feed.is_loading()
    };

    view! {
        <section class="todo-screen">
            <Show when=loading>
                <h1 class="loading">"Loading..."</h1>
            </Show>
            <Show when=failed>
                <h1 class="fetch-error">"Error on fetch data..."</h1>
            </Show>

            <div class="todo-list" class:hidden=failed node_ref=list_ref>
                <For
                    each=todos
                    key=|todo: &Todo| todo.id()
                    children=move |todo: Todo| {
                        view! {
                            <div class="todo-item" class:completed=todo.completed>
                                <p>{todo.title().to_string()}</p>
                            </div>
                        }
                    }
                />
            </div>

            <Show when=fetching_more>
                <div class="fetching-more">"Fetching more data..."</div>
            </Show>
        </section>
    }
}
