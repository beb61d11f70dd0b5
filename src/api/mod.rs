//! Remote Collection API
//!
//! Page sources for the list screens, organized by concern.

mod error;
mod rest;

use async_trait::async_trait;
use crate::models::Page;

// Re-export all public items
pub use error::*;
pub use rest::*;

/// Anything that can hand out numbered pages of `T`
///
/// Pages start at 1. An empty page means there is nothing after it.
#[async_trait(?Send)]
pub trait PageSource<T> {
    async fn fetch_page(&self, page: u32) -> FetchResult<Page<T>>;
}
