//! Screen Tab Bar Component
//!
//! Tab bar for switching between the posts and todos screens.

use leptos::prelude::*;
use crate::config::Screen;
use crate::context::use_app_context;

#[component]
pub fn ScreenTabBar() -> impl IntoView {
    let ctx = use_app_context();

    view! {
        <nav class="screen-tab-bar">
            {Screen::ALL
                .into_iter()
                .map(|screen| {
                    let tab_class = move || {
                        if ctx.screen.get() == screen { "screen-tab active" } else { "screen-tab" }
                    };
                    view! {
                        <button class=tab_class on:click=move |_| ctx.show(screen)>
                            {screen.label()}
                        </button>
                    }
                })
                .collect_view()}
        </nav>
    }
}
