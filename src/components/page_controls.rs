//! Page Controls Component
//!
//! Previous / "Page N" / Next row under the posts list.

use leptos::prelude::*;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn PageControls() -> impl IntoView {
    let store = use_app_store();

    let page = move || store.pager().read().requested();
    let previous_disabled = move || store.pager().read().previous_disabled();
    let next_disabled = move || store.pager().read().next_disabled();

    view! {
        <div class="page-controls">
            <button
                class="page-btn"
                disabled=previous_disabled
                on:click=move |_| {
                    store.pager().write().previous();
                }
            >
                "Previous"
            </button>
            <p class="page-indicator">{move || format!("Page {}", page())}</p>
            <button
                class="page-btn"
                disabled=next_disabled
                on:click=move |_| {
                    store.pager().write().next();
                }
            >
                "Next"
            </button>
        </div>
    }
}
