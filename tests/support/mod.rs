#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use todo_api::errors::StorageError;
use todo_api::query::{Filter, FindOptions};
use todo_api::store::{MemoryTodoStore, TodoCollection};
use todo_api::todo::{NewTodo, Todo, TodoId};

pub const ELENA_ID: &str = "5f1e9d3c2b4a6c8e0f1a2b3c";

/// Four todos: two Kristin/groceries, one Kristin/homework, one Elena/homework.
pub fn fixture() -> MemoryTodoStore {
    let store = MemoryTodoStore::new("todos");
    store.insert_many([
        NewTodo::new("Kristin", true, "Buy soup and ice cream", "groceries"),
        NewTodo::new("Kristin", false, "Buy cereal and soup", "groceries"),
        NewTodo::new("Kristin", false, "Write an essay about soup", "homework"),
    ]);
    let elena = NewTodo::new("Elena", false, "Write an essay about walking on ice", "homework")
        .with_id(ELENA_ID.parse::<TodoId>().unwrap());
    store.insert_document(elena.to_document()).unwrap();
    store
}

/// Wraps a store and counts `find` calls.
pub struct CountingCollection {
    pub inner: MemoryTodoStore,
    pub calls: AtomicUsize,
}

impl CountingCollection {
    pub fn new(inner: MemoryTodoStore) -> Self {
        Self { inner, calls: AtomicUsize::new(0) }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TodoCollection for CountingCollection {
    async fn find(&self, filter: &Filter, options: &FindOptions) -> Result<Vec<Todo>, StorageError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.find(filter, options).await
    }
}

/// A collection whose backend is always down.
pub struct UnavailableCollection;

#[async_trait]
impl TodoCollection for UnavailableCollection {
    async fn find(&self, _filter: &Filter, _options: &FindOptions) -> Result<Vec<Todo>, StorageError> {
        Err(StorageError::Unavailable("connection refused".into()))
    }
}
