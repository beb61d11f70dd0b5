//! Paged Feed Frontend Entry Point

mod api;
mod app;
mod components;
mod config;
mod context;
mod infinite;
mod loader;
mod logger;
mod models;
mod pager;
mod query;
mod store;

use app::App;
use config::AppConfig;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();

    let config = AppConfig::from_location();
    logger::init(config.log_level);
    log::info!("[main] starting on {:?} screen, api {}", config.start_screen, config.api_base);

    mount_to_body(move || view! { <App config=config /> });
}
