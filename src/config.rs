//! App Configuration
//!
//! Compile-time defaults, optionally overridden from the page's query string
//! (`?screen=posts&log=debug`).

use chrono::TimeDelta;
use log::LevelFilter;
use percent_encoding::percent_decode_str;

pub const DEFAULT_API_BASE: &str = "https://jsonplaceholder.typicode.com";

/// Screens the app can show
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    /// Paged posts with Previous/Next
    Posts,
    /// Infinite-scrolling todos
    Todos,
}

impl Screen {
    pub const ALL: [Screen; 2] = [Screen::Posts, Screen::Todos];

    pub fn label(self) -> &'static str {
        match self {
            Screen::Posts => "Posts",
            Screen::Todos => "Todos",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "posts" => Some(Screen::Posts),
            "todos" => Some(Screen::Todos),
            _ => None,
        }
    }
}

/// Paged screen settings
#[derive(Clone, Debug, PartialEq)]
pub struct PagedConfig {
    /// Items per request (`_limit`)
    pub page_size: u32,
    /// Highest page worth prefetching; None means unbounded
    pub max_page: Option<u32>,
}

/// Infinite screen settings
#[derive(Clone, Debug, PartialEq)]
pub struct FeedConfig {
    pub page_size: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    /// Collection endpoint root, without trailing slash
    pub api_base: String,
    pub posts: PagedConfig,
    pub todos: FeedConfig,
    /// How long a fetched page counts as fresh
    pub stale_time: TimeDelta,
    /// How long an unused page stays cached
    pub cache_time: TimeDelta,
    pub gc_interval_ms: u32,
    pub start_screen: Screen,
    pub log_level: LevelFilter,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            posts: PagedConfig {
                page_size: 5,
                max_page: Some(5),
            },
            todos: FeedConfig { page_size: 10 },
            stale_time: TimeDelta::zero(),
            cache_time: TimeDelta::minutes(5),
            gc_interval_ms: 60_000,
            start_screen: Screen::Todos,
            log_level: LevelFilter::Info,
        }
    }
}

impl AppConfig {
    /// Defaults plus overrides from `window.location.search`
    pub fn from_location() -> Self {
        let search = web_sys::window()
            .and_then(|win| win.location().search().ok())
            .unwrap_or_default();
        Self::from_query(&search)
    }

    pub fn from_query(search: &str) -> Self {
        let mut config = Self::default();
        config.apply_query(search);
        config
    }

    /// Apply `key=value` pairs; unknown keys and bad values are ignored
    pub fn apply_query(&mut self, search: &str) {
        let pairs = search
            .trim_start_matches('?')
            .split('&')
            .filter(|pair| !pair.is_empty());

        for pair in pairs {
            let (key, raw) = pair.split_once('=').unwrap_or((pair, ""));
            let value = percent_decode_str(raw).decode_utf8_lossy();
            let value = value.trim();
            match key {
                "screen" => {
                    if let Some(screen) = Screen::parse(value) {
                        self.start_screen = screen;
                    }
                }
                "log" => {
                    if let Ok(level) = value.parse::<LevelFilter>() {
                        self.log_level = level;
                    }
                }
                "api" => {
                    if !value.is_empty() {
                        self.api_base = value.trim_end_matches('/').to_string();
                    }
                }
                "posts_limit" => {
                    if let Some(limit) = parse_limit(value) {
                        self.posts.page_size = limit;
                    }
                }
                "todos_limit" => {
                    if let Some(limit) = parse_limit(value) {
                        self.todos.page_size = limit;
                    }
                }
                _ => {}
            }
        }
    }
}

fn parse_limit(value: &str) -> Option<u32> {
    value.parse::<u32>().ok().filter(|limit| *limit > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_page_sizes_and_start_screen() {
        let config = AppConfig::default();
        assert_eq!(config.posts.page_size, 5);
        assert_eq!(config.posts.max_page, Some(5));
        assert_eq!(config.todos.page_size, 10);
        assert_eq!(config.start_screen, Screen::Todos);
        assert_eq!(config.stale_time, TimeDelta::zero());
    }

    #[test]
    fn query_overrides_screen_and_log_level() {
        let config = AppConfig::from_query("?screen=Posts&log=debug");
        assert_eq!(config.start_screen, Screen::Posts);
        assert_eq!(config.log_level, LevelFilter::Debug);
    }

    #[test]
    fn api_base_is_percent_decoded() {
        let config = AppConfig::from_query("api=http%3A%2F%2Flocalhost%3A3000%2F");
        assert_eq!(config.api_base, "http://localhost:3000");
    }

    #[test]
    fn bad_values_keep_defaults() {
        let config = AppConfig::from_query("?screen=home&log=loud&posts_limit=0&todos_limit=x&foo");
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn limits_are_overridable() {
        let config = AppConfig::from_query("posts_limit=8&todos_limit=25");
        assert_eq!(config.posts.page_size, 8);
        assert_eq!(config.todos.page_size, 25);
    }
}
