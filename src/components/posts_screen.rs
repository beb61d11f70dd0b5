//! Posts Screen Component
//!
//! Paged posts. The previous page stays on screen while the requested one
//! loads, and the page after the requested one is prefetched.

use chrono::Utc;
use leptos::prelude::*;

use crate::api::RestSource;
use crate::components::PageControls;
use crate::context::use_app_context;
use crate::loader;
use crate::models::{ListItem, Post};
use crate::store::{use_app_store, AppStateStoreFields};

/// What the posts screen renders
enum PostsView {
    Failed,
    /// Nothing displayed yet
    Loading,
    /// `lagging` while the requested page is still loading
    Page { posts: Vec<Post>, lagging: bool },
}

#[component]
pub fn PostsScreen() -> impl IntoView {
    let store = use_app_store();
    let ctx = use_app_context();
    let source = RestSource::posts(&ctx.config());

    // Only a change of page number may rerun the loader below
    let requested = Memo::new(move |_| store.pager().read().requested());

    Effect::new(move |_| {
        loader::open_posts_page(store, source.clone(), requested.get());
    });

    let visible = move || {
        let state = store.read();
        let now = Utc::now();
        if state.pager.is_failed(&state.posts, now) {
            return PostsView::Failed;
        }
        match state.pager.visible_page(&state.posts, now) {
            Some((page, items)) => PostsView::Page {
                posts: items.to_vec(),
                lagging: page != state.pager.requested(),
            },
            None => PostsView::Loading,
        }
    };

    view! {
        <section class="posts-screen">
            {move || match visible() {
                PostsView::Failed => view! { <p class="fetch-error">"Error"</p> }.into_any(),
                PostsView::Loading => view! { <p class="loading">"Loading..."</p> }.into_any(),
                PostsView::Page { posts, lagging } => view! {
                    <ul class="post-list" class:lagging=lagging>
                        {posts
                            .into_iter()
                            .map(|post: Post| view! { <li class="post-item">{post.title().to_string()}</li> })
                            .collect_view()}
                    </ul>
                    <PageControls />
                }
                .into_any(),
            }}
        </section>
    }
}
