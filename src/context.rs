//! Application Context
//!
//! Shared state provided via Leptos Context API.

use leptos::prelude::*;

use crate::config::{AppConfig, Screen};

/// App-wide values provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Startup configuration
    config: StoredValue<AppConfig>,
    /// Screen on display - read
    pub screen: ReadSignal<Screen>,
    /// Screen on display - write
    set_screen: WriteSignal<Screen>,
}

impl AppContext {
    pub fn new(config: AppConfig, screen: (ReadSignal<Screen>, WriteSignal<Screen>)) -> Self {
        Self {
            config: StoredValue::new(config),
            screen: screen.0,
            set_screen: screen.1,
        }
    }

    pub fn config(&self) -> AppConfig {
        self.config.get_value()
    }

    /// Switch to another screen
    pub fn show(&self, screen: Screen) {
        log::debug!("[AppContext] show {:?}", screen);
        self.set_screen.set(screen);
    }
}

/// Get the app context
pub fn use_app_context() -> AppContext {
    use_context::<AppContext>().expect("AppContext should be provided")
}
