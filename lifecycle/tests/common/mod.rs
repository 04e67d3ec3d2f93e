//! Shared fixtures for lifecycle integration tests.

#![allow(dead_code)]

use composable_crud_lifecycle::{Entity, LifecycleEnvironment, MockTransport, Tracker};
use composable_crud_testing::test_clock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: u64,
    pub title: String,
    pub author: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookDraft {
    pub title: String,
    pub author: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BookPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

impl Entity for Book {
    type Id = u64;
    type Draft = BookDraft;
    type Patch = BookPatch;

    const COLLECTION: &'static str = "books";
    const LABEL: &'static str = "Book";

    fn id(&self) -> &u64 {
        &self.id
    }
}

pub fn book(id: u64, title: &str) -> Book {
    Book {
        id,
        title: title.to_string(),
        author: "Anonymous".to_string(),
    }
}

pub fn draft(title: &str) -> BookDraft {
    BookDraft {
        title: title.to_string(),
        author: "Anonymous".to_string(),
    }
}

pub fn tracker() -> (Tracker<Book>, MockTransport<Book>) {
    let transport = MockTransport::new();
    let env = LifecycleEnvironment::new(Arc::new(transport.clone()), Arc::new(test_clock()));
    let tracker = Tracker::new(env).with_response_timeout(Duration::from_secs(2));
    (tracker, transport)
}
