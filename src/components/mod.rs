//! UI Components
//!
//! Leptos components for the two list screens.

mod page_controls;
mod posts_screen;
mod screen_tab_bar;
mod todo_feed;

pub use page_controls::PageControls;
pub use posts_screen::PostsScreen;
pub use screen_tab_bar::ScreenTabBar;
pub use todo_feed::TodoFeed;
