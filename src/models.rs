//! Frontend Models
//!
//! Records returned by the collection endpoints.

use serde::{Deserialize, Serialize};

/// Anything rendered as one row of a list
pub trait ListItem: Clone + 'static {
    /// Stable identity, used as the render key
    fn id(&self) -> u32;

    fn title(&self) -> &str;
}

/// One page of items, in the order the endpoint returned them
pub type Page<T> = Vec<T>;

/// Post (`GET /posts`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub user_id: u32,
    pub id: u32,
    pub title: String,
    pub body: String,
}

/// Todo (`GET /todos`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    #[serde(default)]
    pub user_id: u32,
    pub id: u32,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

impl ListItem for Post {
    fn id(&self) -> u32 {
        self.id
    }

    fn title(&self) -> &str {
        &self.title
    }
}

impl ListItem for Todo {
    fn id(&self) -> u32 {
        self.id
    }

    fn title(&self) -> &str {
        &self.title
    }
}
