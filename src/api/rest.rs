//! REST Page Source
//!
//! `GET {base}/{resource}?_limit=L&_page=P` returning a JSON array.

use std::marker::PhantomData;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{FetchResult, PageSource};
use crate::config::AppConfig;
use crate::models::{Page, Post, Todo};

/// Collection endpoints
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resource {
    Posts,
    Todos,
}

impl Resource {
    pub fn path(self) -> &'static str {
        match self {
            Resource::Posts => "posts",
            Resource::Todos => "todos",
        }
    }
}

// ========================
// Query Structs
// ========================

#[derive(Serialize)]
struct PageQuery {
    #[serde(rename = "_limit")]
    limit: u32,
    #[serde(rename = "_page")]
    page: u32,
}

/// HTTP-backed source for one resource
#[derive(Clone)]
pub struct RestSource<T> {
    client: reqwest::Client,
    base_url: String,
    resource: Resource,
    limit: u32,
    _item: PhantomData<fn() -> T>,
}

impl<T> RestSource<T> {
    pub fn new(base_url: &str, resource: Resource, limit: u32) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            resource,
            limit,
            _item: PhantomData,
        }
    }

    fn request(&self, page: u32) -> reqwest::RequestBuilder {
        let url = format!("{}/{}", self.base_url, self.resource.path());
        self.client.get(url).query(&PageQuery {
            limit: self.limit,
            page,
        })
    }
}

impl RestSource<Post> {
    pub fn posts(config: &AppConfig) -> Self {
        Self::new(&config.api_base, Resource::Posts, config.posts.page_size)
    }
}

impl RestSource<Todo> {
    pub fn todos(config: &AppConfig) -> Self {
        Self::new(&config.api_base, Resource::Todos, config.todos.page_size)
    }
}

#[async_trait(?Send)]
impl<T: DeserializeOwned + 'static> PageSource<T> for RestSource<T> {
    async fn fetch_page(&self, page: u32) -> FetchResult<Page<T>> {
        log::debug!("[api] GET /{} page={} limit={}", self.resource.path(), page, self.limit);
        let response = self.request(page).send().await?.error_for_status()?;
        let items = response.json::<Page<T>>().await?;
        log::debug!("[api] /{} page={} -> {} items", self.resource.path(), page, items.len());
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn posts_request_carries_limit_and_page() {
        let source = RestSource::posts(&AppConfig::default());
        let request = source.request(3).build().unwrap();
        assert_eq!(
            request.url().as_str(),
            "https://jsonplaceholder.typicode.com/posts?_limit=5&_page=3"
        );
    }

    #[test]
    fn todos_request_uses_todo_page_size() {
        let source = RestSource::todos(&AppConfig::default());
        let request = source.request(1).build().unwrap();
        assert_eq!(
            request.url().as_str(),
            "https://jsonplaceholder.typicode.com/todos?_limit=10&_page=1"
        );
    }

    #[test]
    fn trailing_slash_in_base_is_dropped() {
        let source = RestSource::<Post>::new("http://localhost:3000/", Resource::Posts, 2);
        let request = source.request(1).build().unwrap();
        assert_eq!(request.url().as_str(), "http://localhost:3000/posts?_limit=2&_page=1");
    }
}
